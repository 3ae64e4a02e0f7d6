//! Stimulus Record - one row of `stimuli`

use serde::Serialize;

use super::{ensure_required, required};
use crate::row::{Row, Value};
use crate::table::Table;
use crate::Error;

/// A `stimuli` row known to carry an `id`.
///
/// All other columns are kept and reachable through [`StimulusRecord::row`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StimulusRecord {
    row: Row,
}

impl StimulusRecord {
    /// Get the stimulus ID.
    #[must_use]
    pub fn id(&self) -> &Value {
        required(&self.row, "id")
    }

    /// Get the stimulus name, if the table has a textual `name` column.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.row.get_str("name")
    }

    /// Get the full underlying row.
    #[must_use]
    pub const fn row(&self) -> &Row {
        &self.row
    }

    /// Unwrap into the underlying row.
    #[must_use]
    pub fn into_row(self) -> Row {
        self.row
    }
}

impl TryFrom<Row> for StimulusRecord {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        ensure_required(Table::Stimuli, &row)?;
        Ok(Self { row })
    }
}
