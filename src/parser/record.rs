use serde_json::Value;

use crate::fetch::ResourceBody;
use crate::schema::TableSchema;

/// Numeric identity of a person, vehicle or starship
pub type EntityId = i64;

/// A single output cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Text(String),
}

impl CellValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            CellValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            CellValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            CellValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }

    /// Render for a delimited text file; null is an empty field
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Null)
    }
}

/// A person as extracted from `/people/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub uid: EntityId,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub height: Option<String>,
    /// Reference URLs to `/vehicles/{id}`
    pub vehicles: Vec<String>,
    /// Reference URLs to `/starships/{id}`
    pub starships: Vec<String>,
}

impl Person {
    /// Row in `people` column order
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Integer(self.uid),
            self.name.clone().into(),
            self.gender.clone().into(),
            self.height.clone().into(),
        ]
    }
}

/// One vehicle or starship row
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    /// Resolved identity (reported uid, or the requested id)
    pub id: EntityId,
    pub requested_id: EntityId,
    /// Attribute values in schema order, after the identity column
    pub values: Vec<CellValue>,
}

impl CatalogRecord {
    pub fn to_row(&self) -> Vec<CellValue> {
        let mut row = Vec::with_capacity(self.values.len() + 1);
        row.push(CellValue::Integer(self.id));
        row.extend(self.values.iter().cloned());
        row
    }

    /// Value of a named attribute column
    pub fn get<'a>(&'a self, schema: &TableSchema, column: &str) -> Option<&'a CellValue> {
        let idx = schema
            .attribute_columns()
            .iter()
            .position(|c| c.name == column)?;
        self.values.get(idx)
    }
}

pub fn extract_person(body: &ResourceBody, requested_id: EntityId) -> Person {
    Person {
        uid: body.resolve_id(requested_id),
        name: text_value(body.property("name")),
        gender: text_value(body.property("gender")),
        height: text_value(body.property("height")),
        vehicles: reference_list(body.property("vehicles")),
        starships: reference_list(body.property("starships")),
    }
}

/// Read the schema's attribute columns out of `properties`
pub fn extract_catalog_record(
    body: &ResourceBody,
    requested_id: EntityId,
    schema: &TableSchema,
) -> CatalogRecord {
    let values = schema
        .attribute_columns()
        .iter()
        .map(|col| text_value(body.property(col.name)).into())
        .collect();

    CatalogRecord {
        id: body.resolve_id(requested_id),
        requested_id,
        values,
    }
}

/// Free-form attribute as text. Missing and null stay absent.
fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn reference_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
