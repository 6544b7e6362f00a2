use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::TableData;
use crate::parser::CellValue;
use crate::ui::Ui;

/// Write one table to `<dir>/<file_name>` with a header row
pub fn write_csv_table(dir: &Path, table: &TableData) -> Result<PathBuf> {
    let path = dir.join(table.schema.file_name);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create: {:?}", path))?;

    writer
        .write_record(table.schema.column_names())
        .with_context(|| format!("Failed to write header: {:?}", path))?;

    for row in &table.rows {
        writer
            .write_record(row.iter().map(CellValue::to_field))
            .with_context(|| format!("Failed to write row to {:?}", path))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush: {:?}", path))?;

    Ok(path)
}

/// Write every table into `dir`, creating it if needed
pub fn write_csv_tables(dir: &Path, tables: &[TableData], ui: &mut impl Ui) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let mut paths = Vec::with_capacity(tables.len());
    for (i, table) in tables.iter().enumerate() {
        ui.set_progress(i as u64, tables.len() as u64, table.schema.file_name);
        let path = write_csv_table(dir, table)?;
        ui.log(format!("{}: {} rows", table.schema.file_name, table.rows.len()));
        paths.push(path);
    }

    Ok(paths)
}
