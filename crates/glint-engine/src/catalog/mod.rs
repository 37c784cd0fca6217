pub mod definition;
pub mod registry;

pub use definition::{MarkerDefinition, MarkerShape, MarkerStyle};
pub use registry::{CatalogError, MarkerCatalog};
