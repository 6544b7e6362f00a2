//! people → join tables → catalogs → files
//!
//! Every stage takes the previous stage's output by value or reference and
//! returns new data; unusable records end up in the [`RunReport`] instead of
//! an error.

pub mod catalog;
pub mod relate;
pub mod report;

pub use catalog::*;
pub use relate::*;
pub use report::*;

use anyhow::Result;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::fetch::ResourceSource;
use crate::parser::{CatalogRecord, EntityId, Person};
use crate::schema::PEOPLE;
use crate::ui::{Phase, Ui};
use crate::writer::{write_csv_tables, write_sqlite, TableData};

/// Everything one run extracted
#[derive(Debug, Clone)]
pub struct Extraction {
    pub people: Vec<Person>,
    pub person_vehicles: Vec<Link>,
    pub person_starships: Vec<Link>,
    pub vehicles: Vec<CatalogRecord>,
    pub starships: Vec<CatalogRecord>,
    pub report: RunReport,
}

impl Extraction {
    /// Output tables in write order
    pub fn tables(&self) -> Vec<TableData> {
        vec![
            TableData {
                schema: &PEOPLE,
                rows: self.people.iter().map(Person::to_row).collect(),
            },
            TableData {
                schema: ReferenceField::Vehicles.schema(),
                rows: self.person_vehicles.iter().map(Link::to_row).collect(),
            },
            TableData {
                schema: ReferenceField::Starships.schema(),
                rows: self.person_starships.iter().map(Link::to_row).collect(),
            },
            TableData {
                schema: VEHICLE_CATALOG.schema,
                rows: self.vehicles.iter().map(CatalogRecord::to_row).collect(),
            },
            TableData {
                schema: STARSHIP_CATALOG.schema,
                rows: self.starships.iter().map(CatalogRecord::to_row).collect(),
            },
        ]
    }
}

/// Fetch people in `people_ids`, relate them, then fetch what they reference
pub fn run_pipeline(
    source: &impl ResourceSource,
    people_ids: RangeInclusive<EntityId>,
    ui: &mut impl Ui,
) -> Extraction {
    let mut report = RunReport::default();

    let people = fetch_people(source, people_ids, &mut report, ui);
    ui.set_info(format!("{} people", people.len()));

    ui.set_phase(Phase::Relating);
    let person_vehicles = relate_people(&people, ReferenceField::Vehicles, &mut report, ui);
    let person_starships = relate_people(&people, ReferenceField::Starships, &mut report, ui);

    let vehicles = assemble_catalog(
        source,
        VEHICLE_CATALOG,
        &distinct_entity_ids(&person_vehicles),
        &mut report,
        ui,
    );
    let starships = assemble_catalog(
        source,
        STARSHIP_CATALOG,
        &distinct_entity_ids(&person_starships),
        &mut report,
        ui,
    );

    report.set_row_count(PEOPLE.name, people.len());
    report.set_row_count(ReferenceField::Vehicles.schema().name, person_vehicles.len());
    report.set_row_count(ReferenceField::Starships.schema().name, person_starships.len());
    report.set_row_count(VEHICLE_CATALOG.schema.name, vehicles.len());
    report.set_row_count(STARSHIP_CATALOG.schema.name, starships.len());

    Extraction {
        people,
        person_vehicles,
        person_starships,
        vehicles,
        starships,
        report,
    }
}

fn relate_people(
    people: &[Person],
    field: ReferenceField,
    report: &mut RunReport,
    ui: &mut impl Ui,
) -> Vec<Link> {
    let relation = expand_references(people, field);

    // Reference drops are logged, not counted as record skips
    for unresolved in &relation.unresolved {
        ui.log(format!(
            "{}: person {} references {:?}, no id in last segment",
            unresolved.table, unresolved.uid, unresolved.url
        ));
    }
    report.unresolved.extend(relation.unresolved);

    relation.links
}

/// Run the pipeline and write the CSV files (and the database, if asked)
pub fn sync(
    source: &impl ResourceSource,
    people_ids: RangeInclusive<EntityId>,
    output_dir: &Path,
    sqlite_path: Option<&Path>,
    ui: &mut impl Ui,
) -> Result<(Extraction, Vec<PathBuf>)> {
    let extraction = run_pipeline(source, people_ids, ui);
    let tables = extraction.tables();

    ui.set_phase(Phase::Writing);
    let paths = write_csv_tables(output_dir, &tables, ui)?;
    if let Some(db_path) = sqlite_path {
        write_sqlite(db_path, &tables, ui)?;
    }
    ui.clear_progress();

    Ok((extraction, paths))
}
