use serde::{Deserialize, Serialize};

/// A country of operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    pub code: String,
    pub name: String,
}
