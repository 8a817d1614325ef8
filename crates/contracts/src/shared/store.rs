use serde::{Deserialize, Serialize};
use std::fmt;

/// Store identifier (`Store` column of the source files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u32);

impl StoreId {
    /// Label shown in the store selector, e.g. "Store 12"
    pub fn label(&self) -> String {
        format!("Store {}", self.0)
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Option for the store multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOption {
    pub value: StoreId,
    pub label: String,
}

impl From<StoreId> for StoreOption {
    fn from(store: StoreId) -> Self {
        Self {
            value: store,
            label: store.label(),
        }
    }
}
