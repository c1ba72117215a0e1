//! Swatch preview: composite a product color over a skin color.
//!
//! Multiply/screen blending followed by an opacity lerp is a closed-form
//! stand-in for how translucent product reads on skin. It is meant for live
//! previews, not color-accurate simulation.

pub mod blend;
pub mod config;
pub mod rgb;

pub use blend::{
    melanin_adjusted_opacity, preview_product_shade, render_color_on_skin, render_swatch_set,
    SwatchSet,
};
pub use config::{validate_render, BlendMode, OpacityClass, OpacityTable, RenderConfig};
pub use rgb::{hex_to_rgb, rgb_to_hex, ColorError, Rgb};
