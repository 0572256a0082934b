use anyhow::{Context, Result};
use sea_query::{PostgresQueryBuilder, SchemaStatementBuilder};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tracing::info;

use crate::schema::category::create_table_statement;

pub type ConnectionPool = Pool<Postgres>;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        database_url: &str,
        max_connections: u32,
        ensure_schema: bool,
    ) -> Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to the database")?;

        info!("Database pool ready with max {max_connections} connections");

        if ensure_schema {
            Self::ensure_schema(&pool).await?;
        }

        Ok(pool)
    }

    async fn ensure_schema(pool: &ConnectionPool) -> Result<()> {
        let sql = create_table_statement().build(PostgresQueryBuilder);

        sqlx::query(&sql)
            .execute(pool)
            .await
            .context("Failed to create the categories table")?;

        info!("Ensured table \"categories\" exists");
        Ok(())
    }
}
