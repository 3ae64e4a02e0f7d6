//! Experiment Record - one row of `experiments`

use serde::Serialize;

use super::{ensure_required, required};
use crate::row::{Row, Value};
use crate::table::Table;
use crate::Error;

/// An `experiments` row known to carry `id` and `stimulus_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExperimentRecord {
    row: Row,
}

impl ExperimentRecord {
    /// Get the experiment ID.
    #[must_use]
    pub fn id(&self) -> &Value {
        required(&self.row, "id")
    }

    /// Get the ID of the stimulus this experiment ran.
    #[must_use]
    pub fn stimulus_id(&self) -> &Value {
        required(&self.row, "stimulus_id")
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

impl TryFrom<Row> for ExperimentRecord {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        ensure_required(Table::Experiments, &row)?;
        Ok(Self { row })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experiment_record_from_row() {
        let row = Row::new()
            .with("id", 1)
            .with("stimulus_id", 5)
            .with("subject", "A");
        let record = ExperimentRecord::try_from(row).unwrap();

        assert_eq!(record.id(), &Value::Integer(1));
        assert_eq!(record.stimulus_id(), &Value::Integer(5));
        assert_eq!(record.row().get_str("subject"), Some("A"));
    }

    #[test]
    fn test_experiment_record_requires_stimulus_id() {
        let err = ExperimentRecord::try_from(Row::new().with("id", 1)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                column: "stimulus_id",
                ..
            }
        ));
    }
}
