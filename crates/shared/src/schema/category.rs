use sea_query::{ColumnDef, Iden, Table, TableCreateStatement};

#[derive(Iden, Clone, Copy)]
pub enum Categories {
    Table,
    Id,
    Name,
    Description,
}

pub fn create_table_statement() -> TableCreateStatement {
    Table::create()
        .table(Categories::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Categories::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Categories::Name).string().not_null())
        .col(ColumnDef::new(Categories::Description).text().null())
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::{PostgresQueryBuilder, SchemaStatementBuilder};

    #[test]
    fn create_table_is_idempotent_and_uses_serial_key() {
        let sql = create_table_statement().to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"CREATE TABLE IF NOT EXISTS "categories""#));
        assert!(sql.contains(r#""id" bigserial"#));
        assert!(sql.contains("PRIMARY KEY"));
        assert!(sql.contains(r#""description" text"#));
    }
}
