use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_indexes};
use super::TableData;
use crate::ui::Ui;

pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    pub fn new(db_path: &Path) -> Result<Self> {
        // Remove existing database if present
        if db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        let conn = Connection::open(db_path).context("Failed to create database")?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Create the table and its indexes, then insert every row in one transaction
    pub fn write_table(&mut self, table: &TableData) -> Result<u64> {
        let schema = table.schema;

        self.conn
            .execute(&generate_create_table(schema), [])
            .with_context(|| format!("Failed to create table: {}", schema.name))?;
        for index_sql in generate_indexes(schema) {
            self.conn
                .execute(&index_sql, [])
                .with_context(|| format!("Failed to create index for: {}", schema.name))?;
        }

        let columns: Vec<String> = schema
            .column_names()
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect();
        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.name,
            columns.join(", "),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&insert_sql)?;
            for row in &table.rows {
                for (idx, value) in row.iter().enumerate() {
                    value.bind_to(idx + 1, &mut stmt)?;
                }
                stmt.raw_execute()
                    .with_context(|| format!("Failed to insert into {}", schema.name))?;
            }
        }
        tx.commit()?;

        Ok(table.rows.len() as u64)
    }

    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }
}

/// Write all tables (parents first) into a fresh database
pub fn write_sqlite(db_path: &Path, tables: &[TableData], ui: &mut impl Ui) -> Result<u64> {
    let mut writer = SqliteWriter::new(db_path)?;
    let mut total_rows = 0;

    for (i, table) in tables.iter().enumerate() {
        ui.set_progress(i as u64, tables.len() as u64, table.schema.name);
        total_rows += writer.write_table(table)?;
    }

    writer.finalize()?;
    ui.log(format!("{:?}: {} rows", db_path, total_rows));

    Ok(total_rows)
}
