//! The two tables this crate reads, and the exact-match lookups issued
//! against them.

use crate::row::Value;

/// A table the client knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// `stimuli(id, ...)`
    Stimuli,
    /// `experiments(stimulus_id, ...)`
    Experiments,
}

impl Table {
    /// SQL name of the table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stimuli => "stimuli",
            Self::Experiments => "experiments",
        }
    }

    /// Columns every row of this table must carry.
    #[must_use]
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Stimuli => &["id"],
            Self::Experiments => &["id", "stimulus_id"],
        }
    }
}

/// Exact-match lookup: `SELECT * FROM <table> WHERE <column> = <key>`.
///
/// The key is always bound as a parameter by sessions, never spliced into
/// SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    table: Table,
    column: &'static str,
    key: Value,
}

impl Lookup {
    /// Lookup of a stimulus by primary key.
    #[must_use]
    pub fn stimulus(stim_id: impl Into<Value>) -> Self {
        Self {
            table: Table::Stimuli,
            column: "id",
            key: stim_id.into(),
        }
    }

    /// Lookup of the experiments referencing a stimulus.
    #[must_use]
    pub fn experiments_for(stim_id: impl Into<Value>) -> Self {
        Self {
            table: Table::Experiments,
            column: "stimulus_id",
            key: stim_id.into(),
        }
    }

    /// Table being queried.
    #[must_use]
    pub const fn table(&self) -> Table {
        self.table
    }

    /// Column compared against the key.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        self.column
    }

    /// Bound key value.
    #[must_use]
    pub const fn key(&self) -> &Value {
        &self.key
    }
}
