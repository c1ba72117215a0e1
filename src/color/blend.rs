use serde::Serialize;
use tracing::trace;

use super::config::{BlendMode, OpacityClass, RenderConfig};
use super::rgb::{hex_to_rgb, rgb_to_hex, ColorError, Rgb};
use crate::catalog::Product;

const MAX_CHANNEL: f64 = 255.0;

/// One product rendered at all three coverage tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchSet {
    pub tint: String,
    pub matte: String,
    pub cushion: String,
}

impl SwatchSet {
    pub fn get(&self, class: OpacityClass) -> &str {
        match class {
            OpacityClass::Tint => &self.tint,
            OpacityClass::Matte => &self.matte,
            OpacityClass::Cushion => &self.cushion,
        }
    }
}

pub fn blend(skin: Rgb, product: Rgb, mode: BlendMode) -> Rgb {
    match mode {
        BlendMode::Multiply => skin.zip_with(product, |s, p| s * p / MAX_CHANNEL),
        BlendMode::Screen => skin.zip_with(product, |s, p| {
            MAX_CHANNEL - (MAX_CHANNEL - s) * (MAX_CHANNEL - p) / MAX_CHANNEL
        }),
    }
}

/// Move from `skin` toward `target` by `opacity`.
pub fn lerp(skin: Rgb, target: Rgb, opacity: f64) -> Rgb {
    skin.zip_with(target, |s, t| s + (t - s) * opacity)
}

impl RenderConfig {
    /// Deeper skin hides more product under plain compositing, so opacity
    /// grows by one step per melanin level above the pivot. Result is in [0, 1].
    pub fn adjusted_opacity(&self, base_opacity: f64, melanin_index: i32) -> f64 {
        let steps = (melanin_index as f64 - self.melanin_boost_pivot as f64).max(0.0);
        let opacity = base_opacity + steps * self.melanin_boost_step;
        if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        }
    }

    pub fn opacity_for(&self, class: OpacityClass, melanin_index: Option<i32>) -> f64 {
        let base = self.opacity.get(class);
        match melanin_index {
            Some(index) => self.adjusted_opacity(base, index),
            None => base,
        }
    }

    pub fn render(
        &self,
        skin_hex: &str,
        product_hex: &str,
        class: OpacityClass,
        melanin_index: Option<i32>,
        mode: BlendMode,
    ) -> Result<String, ColorError> {
        let skin = hex_to_rgb(skin_hex)?;
        let product = hex_to_rgb(product_hex)?;
        let opacity = self.opacity_for(class, melanin_index);

        let rendered = rgb_to_hex(lerp(skin, blend(skin, product, mode), opacity));
        trace!(skin_hex, product_hex, %class, %mode, opacity, %rendered, "rendered swatch");
        Ok(rendered)
    }

    pub fn swatch_set(
        &self,
        skin_hex: &str,
        product_hex: &str,
        melanin_index: Option<i32>,
    ) -> Result<SwatchSet, ColorError> {
        let render = |class| self.render(skin_hex, product_hex, class, melanin_index, BlendMode::Multiply);
        Ok(SwatchSet {
            tint: render(OpacityClass::Tint)?,
            matte: render(OpacityClass::Matte)?,
            cushion: render(OpacityClass::Cushion)?,
        })
    }
}

/// `min(1, base + max(0, (index - 2) * 0.05))` with the default config.
pub fn melanin_adjusted_opacity(base_opacity: f64, melanin_index: i32) -> f64 {
    RenderConfig::default().adjusted_opacity(base_opacity, melanin_index)
}

/// Simulate `product_hex` applied over `skin_hex`.
pub fn render_color_on_skin(
    skin_hex: &str,
    product_hex: &str,
    class: OpacityClass,
    melanin_index: Option<i32>,
    mode: BlendMode,
) -> Result<String, ColorError> {
    RenderConfig::default().render(skin_hex, product_hex, class, melanin_index, mode)
}

/// Render a product at tint, matte and cushion coverage in multiply mode.
pub fn render_swatch_set(
    skin_hex: &str,
    product_hex: &str,
    melanin_index: Option<i32>,
) -> Result<SwatchSet, ColorError> {
    RenderConfig::default().swatch_set(skin_hex, product_hex, melanin_index)
}

/// Swatches for a catalog product that carries a shade. `None` when the
/// product has no shade color.
pub fn preview_product_shade(
    config: &RenderConfig,
    product: &Product,
    skin_hex: &str,
    melanin_index: Option<i32>,
) -> Option<Result<SwatchSet, ColorError>> {
    product
        .shade_hex
        .as_deref()
        .map(|shade| config.swatch_set(skin_hex, shade, melanin_index))
}
