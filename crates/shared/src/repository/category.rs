use crate::abstract_trait::CategoryRepositoryTrait;
use crate::config::ConnectionPool;
use crate::model::category::{Category, CategoryDraft};
use crate::schema::category::Categories;
use crate::utils::AppError;
use async_trait::async_trait;
use sea_query::{
    DeleteStatement, Expr, InsertStatement, OnConflict, Order, PostgresQueryBuilder, Query,
    ReturningClause, SelectStatement,
};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

const COLUMNS: [Categories; 3] = [Categories::Id, Categories::Name, Categories::Description];

fn returning_columns() -> ReturningClause {
    Query::returning().columns(COLUMNS)
}

fn select_all_statement() -> SelectStatement {
    Query::select()
        .columns(COLUMNS)
        .from(Categories::Table)
        .order_by(Categories::Id, Order::Asc)
        .to_owned()
}

fn select_by_id_statement(id: i64) -> SelectStatement {
    Query::select()
        .columns(COLUMNS)
        .from(Categories::Table)
        .and_where(Expr::col(Categories::Id).eq(id))
        .to_owned()
}

fn save_statement(input: &CategoryDraft) -> Result<InsertStatement, AppError> {
    let mut insert = Query::insert();
    insert
        .into_table(Categories::Table)
        .returning(returning_columns());

    match input.id {
        Some(id) => {
            insert
                .columns(COLUMNS)
                .values([
                    id.into(),
                    input.name.clone().into(),
                    input.description.clone().into(),
                ])?
                .on_conflict(
                    OnConflict::column(Categories::Id)
                        .update_columns([Categories::Name, Categories::Description])
                        .to_owned(),
                );
        }
        None => {
            insert
                .columns([Categories::Name, Categories::Description])
                .values([input.name.clone().into(), input.description.clone().into()])?;
        }
    }

    Ok(insert)
}

fn delete_statement(id: i64) -> DeleteStatement {
    Query::delete()
        .from_table(Categories::Table)
        .and_where(Expr::col(Categories::Id).eq(id))
        .to_owned()
}

pub struct CategoryRepository {
    db_pool: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        info!("Getting all categories");

        let (sql, values) = select_all_statement().build_sqlx(PostgresQueryBuilder);

        let categories = match sqlx::query_as_with::<_, Category, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
        {
            Ok(categories) => categories,
            Err(e) => {
                error!("Error fetching categories: {e}");
                return Err(AppError::SqlxError(e));
            }
        };

        info!("Found {} categories", categories.len());
        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        info!("Finding category by id: {id}");

        let (sql, values) = select_by_id_statement(id).build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_as_with::<_, Category, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(AppError::from)?;

        info!("Find result: {:?}", result);
        Ok(result)
    }

    async fn save(&self, input: &CategoryDraft) -> Result<Category, AppError> {
        match input.id {
            Some(id) => info!("Saving category ID {id} with name '{}'", input.name),
            None => info!("Creating new category: {:?}", input.name),
        }

        let (sql, values) = save_statement(input)?.build_sqlx(PostgresQueryBuilder);

        let category = sqlx::query_as_with::<_, Category, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error saving category {:?}: {e}", input.name);
                AppError::from(e)
            })?;

        info!("Category saved with ID: {}", category.id);
        Ok(category)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        info!("Deleting category with ID: {id}");

        let (sql, values) = delete_statement(id).build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await?;

        match result.rows_affected() {
            0 => info!("No category stored with ID: {id}, nothing to delete"),
            _ => info!("Category ID: {id} deleted successfully"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::QueryStatementWriter;

    fn draft(id: Option<i64>, name: &str) -> CategoryDraft {
        CategoryDraft {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn select_all_orders_by_id() {
        assert_eq!(
            select_all_statement().to_string(PostgresQueryBuilder),
            r#"SELECT "id", "name", "description" FROM "categories" ORDER BY "id" ASC"#
        );
    }

    #[test]
    fn select_by_id_binds_the_key() {
        let (sql, _) = select_by_id_statement(7).build_sqlx(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"SELECT "id", "name", "description" FROM "categories" WHERE "id" = $1"#
        );
    }

    #[test]
    fn insert_without_id_lets_the_database_assign_one() {
        let sql = save_statement(&draft(None, "Books"))
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"INSERT INTO "categories" ("name", "description")"#));
        assert!(!sql.contains("ON CONFLICT"));
        assert!(sql.ends_with(r#"RETURNING "id", "name", "description""#));
    }

    #[test]
    fn save_with_id_overwrites_on_conflict() {
        let sql = save_statement(&draft(Some(1), "Literature"))
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"INSERT INTO "categories" ("id", "name", "description")"#));
        assert!(sql.contains(r#"ON CONFLICT ("id") DO UPDATE SET"#));
        assert!(sql.contains(r#""name" = "excluded"."name""#));
        assert!(sql.contains(r#""description" = "excluded"."description""#));
        assert!(sql.ends_with(r#"RETURNING "id", "name", "description""#));
    }

    #[test]
    fn delete_targets_a_single_id() {
        assert_eq!(
            delete_statement(3).to_string(PostgresQueryBuilder),
            r#"DELETE FROM "categories" WHERE "id" = 3"#
        );
    }
}
