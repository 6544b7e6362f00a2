//! Table schema definitions for the normalized SWAPI export

use super::types::*;

// =============================================================================
// Entity Tables
// =============================================================================

pub static PEOPLE: TableSchema = TableSchema {
    name: "people",
    file_name: "people.csv",
    columns: &[
        Column::required("uid", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
        Column::new("gender", ColumnType::Text),
        Column::new("height", ColumnType::Text),
    ],
    primary_key: &["uid"],
    foreign_keys: &[],
};

pub static VEHICLES: TableSchema = TableSchema {
    name: "vehicles",
    file_name: "vehicles.csv",
    columns: &[
        Column::required("vehicle_id", ColumnType::Integer),
        Column::new("url", ColumnType::Text),
        Column::new("name", ColumnType::Text),
        Column::new("model", ColumnType::Text),
        Column::new("manufacturer", ColumnType::Text),
        Column::new("cost_in_credits", ColumnType::Text),
        Column::new("cargo_capacity", ColumnType::Text),
        Column::new("passengers", ColumnType::Text),
        Column::new("max_atmosphering_speed", ColumnType::Text),
        Column::new("crew", ColumnType::Text),
        Column::new("length", ColumnType::Text),
        Column::new("consumables", ColumnType::Text),
        Column::new("vehicle_class", ColumnType::Text),
    ],
    primary_key: &["vehicle_id"],
    foreign_keys: &[],
};

pub static STARSHIPS: TableSchema = TableSchema {
    name: "starships",
    file_name: "starships.csv",
    columns: &[
        Column::required("starship_id", ColumnType::Integer),
        Column::new("url", ColumnType::Text),
        Column::new("name", ColumnType::Text),
        Column::new("model", ColumnType::Text),
        Column::new("manufacturer", ColumnType::Text),
        Column::new("cost_in_credits", ColumnType::Text),
        Column::new("cargo_capacity", ColumnType::Text),
        Column::new("passengers", ColumnType::Text),
        Column::new("max_atmosphering_speed", ColumnType::Text),
        Column::new("crew", ColumnType::Text),
        Column::new("length", ColumnType::Text),
        Column::new("consumables", ColumnType::Text),
        Column::new("starship_class", ColumnType::Text),
        Column::new("hyperdrive_rating", ColumnType::Text),
        Column::new("MGLT", ColumnType::Text),
    ],
    primary_key: &["starship_id"],
    foreign_keys: &[],
};

// =============================================================================
// Junction Tables
// =============================================================================

pub static PERSON_VEHICLES: TableSchema = TableSchema {
    name: "person_vehicles",
    file_name: "person_vehicles.csv",
    columns: &[
        Column::required("uid", ColumnType::Integer),
        Column::required("vehicle_id", ColumnType::Integer),
    ],
    primary_key: &["uid", "vehicle_id"],
    foreign_keys: &[ForeignKey::new("uid", "people", "uid")],
};

pub static PERSON_STARSHIPS: TableSchema = TableSchema {
    name: "person_starships",
    file_name: "person_starships.csv",
    columns: &[
        Column::required("uid", ColumnType::Integer),
        Column::required("starship_id", ColumnType::Integer),
    ],
    primary_key: &["uid", "starship_id"],
    foreign_keys: &[ForeignKey::new("uid", "people", "uid")],
};

// =============================================================================
// Schema Registry
// =============================================================================

/// All table schemas in write order (parents before join tables)
pub static ALL_TABLES: &[&TableSchema] = &[
    &PEOPLE,
    &PERSON_VEHICLES,
    &PERSON_STARSHIPS,
    &VEHICLES,
    &STARSHIPS,
];

/// Get table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
