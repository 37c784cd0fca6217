use std::collections::HashMap;

use thiserror::Error;

use crate::catalog::definition::MarkerDefinition;

/// Errors raised while loading a marker catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate marker id: {0}")]
    DuplicateId(String),
    #[error("catalog manifest parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only registry of every discoverable marker.
///
/// The catalog is the single source of truth for the total marker count;
/// nothing else in the engine may hard-code it. `all_ids` preserves the
/// manifest's declaration order.
#[derive(Debug)]
pub struct MarkerCatalog {
    definitions: HashMap<String, MarkerDefinition>,
    order: Vec<String>,
}

impl MarkerCatalog {
    /// Build a catalog from definitions. Fails on duplicate ids.
    pub fn from_definitions(
        definitions: Vec<MarkerDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::with_capacity(definitions.len());
        let mut order = Vec::with_capacity(definitions.len());
        for def in definitions {
            if map.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId(def.id));
            }
            order.push(def.id.clone());
            map.insert(def.id.clone(), def);
        }
        Ok(Self {
            definitions: map,
            order,
        })
    }

    /// Parse a catalog from a JSON manifest: an array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<MarkerDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Look up a marker by id. Returns None if absent.
    pub fn lookup(&self, id: &str) -> Option<&MarkerDefinition> {
        self.definitions.get(id)
    }

    /// All marker ids in declaration order.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The authoritative total used for completion.
    pub fn total(&self) -> u32 {
        self.order.len() as u32
    }
}
