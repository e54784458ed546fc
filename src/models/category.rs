use serde::{Deserialize, Serialize};

/// Selection option for the category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
}
