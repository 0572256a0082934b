use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::abstract_trait::CategoryRepositoryTrait;
use crate::model::category::{Category, CategoryDraft};
use crate::utils::AppError;

#[derive(Debug, Default)]
struct CategoryTable {
    last_id: i64,
    rows: BTreeMap<i64, Category>,
}

/// Category storage held in process memory. Ids start at 1 and are never
/// handed out twice, even after deletes.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    table: RwLock<CategoryTable>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, input: &CategoryDraft) -> Result<Category, AppError> {
        let mut table = self.table.write().await;

        let id = match input.id {
            Some(id) => {
                table.last_id = table.last_id.max(id);
                id
            }
            None => {
                table.last_id += 1;
                table.last_id
            }
        };

        let category = input.clone().into_category(id);
        table.rows.insert(id, category.clone());

        info!("Category saved with ID: {id}");
        Ok(category)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut table = self.table.write().await;

        if table.rows.remove(&id).is_none() {
            info!("No category stored with ID: {id}, nothing to delete");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: Option<i64>, name: &str) -> CategoryDraft {
        CategoryDraft {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryCategoryRepository::new();

        let books = repo.save(&draft(None, "Books")).await.unwrap();
        let music = repo.save(&draft(None, "Music")).await.unwrap();

        assert_eq!(books.id, 1);
        assert_eq!(music.id, 2);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(books));
    }

    #[tokio::test]
    async fn save_with_id_overwrites_in_place() {
        let repo = InMemoryCategoryRepository::new();
        repo.save(&draft(None, "Books")).await.unwrap();

        let updated = repo.save(&draft(Some(1), "Literature")).await.unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(repo.find_all().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryCategoryRepository::new();
        repo.save(&draft(None, "Books")).await.unwrap();
        repo.delete_by_id(1).await.unwrap();

        let next = repo.save(&draft(None, "Music")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn explicit_id_advances_the_sequence() {
        let repo = InMemoryCategoryRepository::new();
        repo.save(&draft(Some(10), "Imported")).await.unwrap();

        let next = repo.save(&draft(None, "Fresh")).await.unwrap();
        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryCategoryRepository::new();

        repo.delete_by_id(99).await.unwrap();
        repo.delete_by_id(99).await.unwrap();

        assert_eq!(repo.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repo = InMemoryCategoryRepository::new();
        repo.save(&draft(Some(5), "Five")).await.unwrap();
        repo.save(&draft(Some(2), "Two")).await.unwrap();
        repo.save(&draft(None, "Six")).await.unwrap();

        let ids: Vec<i64> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![2, 5, 6]);
    }
}
