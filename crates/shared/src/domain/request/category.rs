use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::category::CategoryDraft;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<&CreateCategoryRequest> for CategoryDraft {
    fn from(input: &CreateCategoryRequest) -> Self {
        CategoryDraft {
            id: None,
            name: input.name.clone(),
            description: input.description.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateCategoryRequest {
    /// Overwritten with the path id by the handler.
    #[serde(default)]
    #[schema(read_only)]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<&UpdateCategoryRequest> for CategoryDraft {
    fn from(input: &UpdateCategoryRequest) -> Self {
        CategoryDraft {
            id: Some(input.id),
            name: input.name.clone(),
            description: input.description.clone(),
        }
    }
}
