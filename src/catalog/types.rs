use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Underlying color cast of the skin, independent of depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

impl Undertone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Undertone::Warm => "Warm",
            Undertone::Cool => "Cool",
            Undertone::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Undertone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Warm" => Ok(Undertone::Warm),
            "Cool" => Ok(Undertone::Cool),
            "Neutral" => Ok(Undertone::Neutral),
            other => Err(format!(
                "unknown undertone '{}' (expected Warm, Cool or Neutral)",
                other
            )),
        }
    }
}

/// Skin/face profile produced by the upstream analysis.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinProfile {
    /// Skin depth on the 1-6 ordinal scale. Not range-checked here.
    pub melanin_index: i32,
    pub undertone: Undertone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<String>,
    /// 1-5; scoring substitutes the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity_level: Option<u8>,
    #[serde(default)]
    pub skin_concerns: Vec<String>,
}

impl SkinProfile {
    pub fn new(melanin_index: i32, undertone: Undertone) -> Self {
        Self {
            melanin_index,
            undertone,
            skin_type: None,
            sensitivity_level: None,
            skin_concerns: Vec::new(),
        }
    }
}

/// Inclusive range of skin depths a product is formulated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelaninRange {
    pub min: i32,
    pub max: i32,
}

impl MelaninRange {
    pub fn center(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }

    pub fn contains(&self, index: i32) -> bool {
        index >= self.min && index <= self.max
    }

    /// True when `index` is within one step of the range (range itself included).
    pub fn near(&self, index: i32) -> bool {
        index >= self.min.saturating_sub(1) && index <= self.max.saturating_add(1)
    }
}

/// A catalog product. Rows come straight from the product table, so extra
/// columns are ignored and every list column may be absent or null.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "ProductRow")]
pub struct Product {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub melanin_min: i32,
    pub melanin_max: i32,
    pub undertones: Vec<String>,
    pub skin_types: Vec<String>,
    pub concerns: Vec<String>,
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
}

/// Wire shape of a product row. `name` wins over `name_en` when both are set.
#[derive(Deserialize)]
struct ProductRow {
    id: String,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    name_en: Option<String>,
    category: String,
    #[serde(default)]
    subcategory: Option<String>,
    melanin_min: i32,
    melanin_max: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    undertones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    skin_types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    concerns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    ingredients: Vec<String>,
    #[serde(default)]
    safety_rating: Option<String>,
    #[serde(default)]
    shade_hex: Option<String>,
    #[serde(default)]
    price_usd: Option<f64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<ProductRow> for Product {
    type Error = String;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let name = row
            .name
            .or(row.name_en)
            .ok_or_else(|| format!("product '{}' is missing name or name_en", row.id))?;

        Ok(Product {
            id: row.id,
            brand: row.brand.unwrap_or_default(),
            name,
            category: row.category,
            subcategory: row.subcategory,
            melanin_min: row.melanin_min,
            melanin_max: row.melanin_max,
            undertones: row.undertones,
            skin_types: row.skin_types,
            concerns: row.concerns,
            ingredients: row.ingredients,
            safety_rating: row.safety_rating,
            shade_hex: row.shade_hex,
            price_usd: row.price_usd,
        })
    }
}

impl Product {
    pub fn melanin_range(&self) -> MelaninRange {
        MelaninRange {
            min: self.melanin_min,
            max: self.melanin_max,
        }
    }

    /// "Brand Name" for display
    pub fn display_name(&self) -> String {
        if self.brand.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.brand, self.name)
        }
    }
}
