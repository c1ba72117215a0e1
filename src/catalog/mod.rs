pub mod loader;
pub mod types;

pub use loader::{load_catalog, load_document, load_profile, CatalogError};
pub use types::{MelaninRange, Product, SkinProfile, Undertone};
