pub mod delimited;
pub mod schema_gen;
pub mod sqlite;

pub use delimited::*;
pub use sqlite::*;

use crate::parser::CellValue;
use crate::schema::TableSchema;

/// Rows ready for output, each in `schema.columns` order
#[derive(Debug, Clone)]
pub struct TableData {
    pub schema: &'static TableSchema,
    pub rows: Vec<Vec<CellValue>>,
}
