use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::category::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_description_is_not_serialized() {
        let response = CategoryResponse::from(Category {
            id: 1,
            name: "Books".into(),
            description: None,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 1, "name": "Books"})
        );
    }
}
