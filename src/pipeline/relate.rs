use std::collections::{BTreeSet, HashSet};

use super::report::UnresolvedReference;
use crate::parser::{reference_id, CellValue, EntityId, Person};
use crate::schema::{TableSchema, PERSON_STARSHIPS, PERSON_VEHICLES};

/// One join row: a person and an entity they reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub uid: EntityId,
    pub entity_id: EntityId,
}

impl Link {
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![CellValue::Integer(self.uid), CellValue::Integer(self.entity_id)]
    }
}

/// Which reference list of a person to expand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    Vehicles,
    Starships,
}

impl ReferenceField {
    pub fn references(self, person: &Person) -> &[String] {
        match self {
            ReferenceField::Vehicles => &person.vehicles,
            ReferenceField::Starships => &person.starships,
        }
    }

    /// Join table this field expands into
    pub fn schema(self) -> &'static TableSchema {
        match self {
            ReferenceField::Vehicles => &PERSON_VEHICLES,
            ReferenceField::Starships => &PERSON_STARSHIPS,
        }
    }
}

/// Join rows for one reference field
#[derive(Debug, Clone, Default)]
pub struct Relation {
    pub links: Vec<Link>,
    pub unresolved: Vec<UnresolvedReference>,
}

/// Explode every person's reference list into `(uid, id)` pairs.
///
/// Pairs are unique and keep first-occurrence order. URLs without a
/// numeric last segment are returned as unresolved.
pub fn expand_references(people: &[Person], field: ReferenceField) -> Relation {
    let table = field.schema().name;
    let mut seen = HashSet::new();
    let mut relation = Relation::default();

    for person in people {
        for url in field.references(person) {
            match reference_id(url) {
                Some(entity_id) => {
                    let link = Link {
                        uid: person.uid,
                        entity_id,
                    };
                    if seen.insert(link) {
                        relation.links.push(link);
                    }
                }
                None => relation.unresolved.push(UnresolvedReference {
                    table,
                    uid: person.uid,
                    url: url.clone(),
                }),
            }
        }
    }

    relation
}

/// Distinct referenced ids, ascending
pub fn distinct_entity_ids(links: &[Link]) -> BTreeSet<EntityId> {
    links.iter().map(|l| l.entity_id).collect()
}
