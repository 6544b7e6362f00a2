use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::RangeInclusive;

use super::report::RunReport;
use crate::fetch::{Resource, ResourceSource, SkipReason};
use crate::parser::{extract_catalog_record, extract_person, CatalogRecord, EntityId, Person};
use crate::schema::{TableSchema, PEOPLE, STARSHIPS, VEHICLES};
use crate::ui::{Phase, Ui};

/// An endpoint paired with the table its records land in
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub resource: Resource,
    pub schema: &'static TableSchema,
}

pub static VEHICLE_CATALOG: Catalog = Catalog {
    resource: Resource::Vehicles,
    schema: &VEHICLES,
};

pub static STARSHIP_CATALOG: Catalog = Catalog {
    resource: Resource::Starships,
    schema: &STARSHIPS,
};

/// Fetch every person in `ids`, skipping unusable responses.
///
/// A person reporting an already-seen uid is skipped, but its reference
/// lists are appended to the first person with that uid.
pub fn fetch_people(
    source: &impl ResourceSource,
    ids: RangeInclusive<EntityId>,
    report: &mut RunReport,
    ui: &mut impl Ui,
) -> Vec<Person> {
    ui.set_phase(Phase::FetchingPeople);

    let total = ids.clone().count() as u64;
    let mut index_by_uid: HashMap<EntityId, usize> = HashMap::new();
    let mut people: Vec<Person> = Vec::new();

    for (done, id) in ids.enumerate() {
        ui.set_progress(done as u64, total, format!("people/{}", id));

        let person = match source.fetch(Resource::People, id) {
            Ok(body) => extract_person(&body, id),
            Err(reason) => {
                ui.warn(format!("people/{} skipped: {}", id, reason));
                report.record_skip(PEOPLE.name, id, reason);
                continue;
            }
        };

        match index_by_uid.get(&person.uid) {
            Some(&idx) => {
                let first = &mut people[idx];
                first.vehicles.extend(person.vehicles);
                first.starships.extend(person.starships);

                let reason = SkipReason::DuplicateIdentity(person.uid);
                ui.warn(format!("people/{} skipped: {}", id, reason));
                report.record_skip(PEOPLE.name, id, reason);
            }
            None => {
                index_by_uid.insert(person.uid, people.len());
                people.push(person);
            }
        }
    }

    ui.clear_progress();
    people
}

/// Fetch and extract one record per id, in ascending id order.
///
/// Records keep fetch order. A record whose resolved identity was already
/// produced is dropped.
pub fn assemble_catalog(
    source: &impl ResourceSource,
    catalog: Catalog,
    ids: &BTreeSet<EntityId>,
    report: &mut RunReport,
    ui: &mut impl Ui,
) -> Vec<CatalogRecord> {
    ui.set_phase(Phase::fetching(catalog.resource));

    let total = ids.len() as u64;
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (done, &id) in ids.iter().enumerate() {
        ui.set_progress(done as u64, total, format!("{}/{}", catalog.resource, id));

        let outcome = source
            .fetch(catalog.resource, id)
            .map(|body| extract_catalog_record(&body, id, catalog.schema))
            .and_then(|record| {
                if seen.insert(record.id) {
                    Ok(record)
                } else {
                    Err(SkipReason::DuplicateIdentity(record.id))
                }
            });

        match outcome {
            Ok(record) => records.push(record),
            Err(reason) => {
                ui.warn(format!("{}/{} skipped: {}", catalog.resource, id, reason));
                report.record_skip(catalog.schema.name, id, reason);
            }
        }
    }

    ui.clear_progress();
    records
}
