//! Static store catalog served by the monitored endpoint.

use serde::{Deserialize, Serialize};

/// A store record returned verbatim in every `/store` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub items: Vec<Item>,
}

/// A single item inside a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
}

/// The in-memory demo catalog. Never mutated by the call chain.
pub fn catalog() -> Vec<Store> {
    vec![Store {
        name: "My Store".to_string(),
        items: vec![Item {
            name: "Chair".to_string(),
            price: 15.99,
        }],
    }]
}
