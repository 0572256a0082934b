use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Input to `save`: `id: None` inserts with a store-assigned id, `Some(id)`
/// inserts or overwrites that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

impl CategoryDraft {
    pub fn into_category(self, id: i64) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
