use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coverage tier of a cosmetic product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpacityClass {
    Tint,
    Matte,
    Cushion,
}

impl OpacityClass {
    pub const ALL: [OpacityClass; 3] = [OpacityClass::Tint, OpacityClass::Matte, OpacityClass::Cushion];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpacityClass::Tint => "tint",
            OpacityClass::Matte => "matte",
            OpacityClass::Cushion => "cushion",
        }
    }
}

impl fmt::Display for OpacityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpacityClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tint" => Ok(OpacityClass::Tint),
            "matte" => Ok(OpacityClass::Matte),
            "cushion" => Ok(OpacityClass::Cushion),
            other => Err(format!(
                "unknown opacity class '{}' (expected tint, matte or cushion)",
                other
            )),
        }
    }
}

/// Compositing formula used to combine product over skin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Darkens or preserves; pigmented and matte products
    #[default]
    Multiply,
    /// Lightens or preserves; highlighters and shimmer
    Screen,
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
        })
    }
}

impl FromStr for BlendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiply" => Ok(BlendMode::Multiply),
            "screen" => Ok(BlendMode::Screen),
            other => Err(format!(
                "unknown blend mode '{}' (expected multiply or screen)",
                other
            )),
        }
    }
}

/// Base opacity per coverage tier.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OpacityTable {
    pub tint: f64,
    pub matte: f64,
    pub cushion: f64,
}

impl Default for OpacityTable {
    fn default() -> Self {
        Self {
            tint: 0.40,
            matte: 0.87,
            cushion: 0.55,
        }
    }
}

impl OpacityTable {
    pub fn get(&self, class: OpacityClass) -> f64 {
        match class {
            OpacityClass::Tint => self.tint,
            OpacityClass::Matte => self.matte,
            OpacityClass::Cushion => self.cushion,
        }
    }
}

/// Swatch rendering configuration.
///
/// Example YAML:
/// ```yaml
/// render:
///   opacity: { tint: 0.4, matte: 0.87, cushion: 0.55 }
///   melanin_boost_step: 0.05
///   melanin_boost_pivot: 2
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub opacity: OpacityTable,
    /// Opacity added per melanin step above the pivot
    pub melanin_boost_step: f64,
    pub melanin_boost_pivot: i32,
    pub default_mode: BlendMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            opacity: OpacityTable::default(),
            melanin_boost_step: 0.05,
            melanin_boost_pivot: 2,
            default_mode: BlendMode::Multiply,
        }
    }
}

/// Validate render configuration at startup, collecting every error.
pub fn validate_render(config: &RenderConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for class in OpacityClass::ALL {
        let value = config.opacity.get(class);
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!(
                "render.opacity.{}: must be between 0 and 1, got {}",
                class, value
            ));
        }
    }

    let step = config.melanin_boost_step;
    if !step.is_finite() || step < 0.0 {
        errors.push(format!(
            "render.melanin_boost_step: must be a non-negative number, got {}",
            step
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opacity_table() {
        let table = OpacityTable::default();
        assert_eq!(table.get(OpacityClass::Tint), 0.40);
        assert_eq!(table.get(OpacityClass::Matte), 0.87);
        assert_eq!(table.get(OpacityClass::Cushion), 0.55);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Matte".parse::<OpacityClass>().unwrap(), OpacityClass::Matte);
        assert_eq!("screen".parse::<BlendMode>().unwrap(), BlendMode::Screen);
        assert!("gloss".parse::<OpacityClass>().is_err());
        assert!("overlay".parse::<BlendMode>().is_err());
        assert_eq!(BlendMode::default(), BlendMode::Multiply);
    }

    #[test]
    fn test_render_config_partial_parse() {
        let yaml = r#"
opacity:
  tint: 0.3
default_mode: screen
"#;
        let config: RenderConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.opacity.tint, 0.3);
        assert_eq!(config.opacity.matte, 0.87);
        assert_eq!(config.default_mode, BlendMode::Screen);
        assert_eq!(config.melanin_boost_pivot, 2);
    }

    #[test]
    fn test_validate_render_defaults() {
        assert!(validate_render(&RenderConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_render_collects_errors() {
        let config = RenderConfig {
            opacity: OpacityTable {
                tint: 1.2,
                matte: f64::NAN,
                cushion: 0.5,
            },
            melanin_boost_step: -0.1,
            ..RenderConfig::default()
        };
        let errors = validate_render(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("render.opacity.tint"));
        assert!(errors[1].contains("render.opacity.matte"));
        assert!(errors[2].contains("melanin_boost_step"));
    }
}
