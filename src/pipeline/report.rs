use std::fmt::Write;

use crate::fetch::SkipReason;
use crate::parser::EntityId;

/// A requested record that did not make it into a table
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    pub table: &'static str,
    pub requested_id: EntityId,
    pub reason: SkipReason,
}

/// A reference URL whose last segment is not an id
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedReference {
    pub table: &'static str,
    pub uid: EntityId,
    pub url: String,
}

/// Everything a run left out, plus what it produced
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub skips: Vec<Skip>,
    pub unresolved: Vec<UnresolvedReference>,
    pub row_counts: Vec<(&'static str, usize)>,
}

impl RunReport {
    pub fn record_skip(&mut self, table: &'static str, requested_id: EntityId, reason: SkipReason) {
        self.skips.push(Skip {
            table,
            requested_id,
            reason,
        });
    }

    pub fn skips_for<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Skip> + 'a {
        self.skips.iter().filter(move |s| s.table == table)
    }

    pub fn set_row_count(&mut self, table: &'static str, rows: usize) {
        match self.row_counts.iter_mut().find(|(name, _)| *name == table) {
            Some(entry) => entry.1 = rows,
            None => self.row_counts.push((table, rows)),
        }
    }

    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.row_counts
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, rows)| *rows)
    }

    /// One line per table, e.g. `vehicles: 39 rows, 2 skipped`
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (table, rows) in &self.row_counts {
            let skipped = self.skips_for(table).count();
            let unresolved = self.unresolved.iter().filter(|u| u.table == *table).count();

            let _ = write!(out, "{}: {} rows", table, rows);
            if skipped > 0 {
                let _ = write!(out, ", {} skipped", skipped);
            }
            if unresolved > 0 {
                let _ = write!(out, ", {} unresolved references", unresolved);
            }
            out.push('\n');
        }
        out
    }
}
