//! In-memory session using `DashMap`.
//!
//! Holds tables of rows and answers lookups in insertion order using
//! [`Value::sql_eq`](crate::Value::sql_eq): `Integer(5)` matches `Real(5.0)` and a `NULL` key
//! matches nothing, as in SQL. There is no column affinity, so
//! `Integer(5)` does not match `Text("5")`.

use dashmap::DashMap;

use super::Session;
use crate::row::Row;
use crate::table::{Lookup, Table};
use crate::{Error, Result};

/// In-memory stand-in for a database.
///
/// # Example
///
/// ```rust
/// use experimental_db::session::MemorySession;
/// use experimental_db::{DataAccessClient, Row, Table};
///
/// let session = MemorySession::new();
/// session.insert(Table::Experiments, Row::new().with("id", 1).with("stimulus_id", 5));
///
/// let client = DataAccessClient::with_session(session);
/// assert_eq!(client.get_experiments(5).unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySession {
    tables: DashMap<Table, Vec<Row>>,
}

impl MemorySession {
    /// Create a session with no tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with both tables present and empty.
    #[must_use]
    pub fn with_empty_tables() -> Self {
        let session = Self::new();
        session.create_table(Table::Stimuli);
        session.create_table(Table::Experiments);
        session
    }

    /// Create a table if it does not exist yet.
    pub fn create_table(&self, table: Table) {
        self.tables.entry(table).or_default();
    }

    /// Append a row, creating the table if needed.
    pub fn insert(&self, table: Table, row: Row) {
        self.tables.entry(table).or_default().push(row);
    }

    /// Number of rows in a table (0 if it does not exist).
    #[must_use]
    pub fn row_count(&self, table: Table) -> usize {
        self.tables.get(&table).map_or(0, |rows| rows.len())
    }

    /// Remove every table.
    pub fn clear(&self) {
        self.tables.clear();
    }
}

impl Session for MemorySession {
    fn lookup(&self, lookup: &Lookup, limit: Option<usize>) -> Result<Vec<Row>> {
        let table = lookup.table();
        let rows = self
            .tables
            .get(&table)
            .ok_or_else(|| Error::MissingTable(table.name().to_string()))?;

        Ok(rows
            .iter()
            .filter(|row| {
                row.get(lookup.column())
                    .is_some_and(|value| value.sql_eq(lookup.key()))
            })
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
