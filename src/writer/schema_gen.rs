use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        };
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };

        columns.push(format!("    \"{}\" {}{}", col.name, sql_type, null_constraint));
    }

    if !schema.primary_key.is_empty() {
        columns.push(format!("    PRIMARY KEY ({})", schema.primary_key.join(", ")));
    }

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PERSON_STARSHIPS, STARSHIPS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&PERSON_STARSHIPS);
        assert!(sql.contains("CREATE TABLE person_starships"));
        assert!(sql.contains("\"starship_id\" INTEGER NOT NULL"));
        assert!(sql.contains("PRIMARY KEY (uid, starship_id)"));
        assert!(sql.contains("FOREIGN KEY (uid) REFERENCES people(uid)"));
    }

    #[test]
    fn test_catalog_columns_are_nullable_text() {
        let sql = generate_create_table(&STARSHIPS);
        assert!(sql.contains("\"MGLT\" TEXT,"));
        assert!(sql.contains("PRIMARY KEY (starship_id)"));
        assert!(!sql.contains("FOREIGN KEY"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&PERSON_STARSHIPS);
        assert_eq!(indexes, vec!["CREATE INDEX idx_person_starships_uid ON person_starships(uid)"]);
        assert!(generate_indexes(&STARSHIPS).is_empty());
    }
}
