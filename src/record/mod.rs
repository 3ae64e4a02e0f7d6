//! Typed records over raw rows
//!
//! [`Row`](crate::Row) passes columns through untouched. The records here
//! wrap a row and check that the columns its table requires are present and
//! non-NULL, so schema drift surfaces as [`Error::MissingColumn`] instead of
//! a silent `None` further downstream.
//!
//! ```text
//! StimulusRecord (1) ──< ExperimentRecord (N)   [experiments.stimulus_id → stimuli.id]
//! ```

mod experiment_record;
mod stimulus_record;

pub use experiment_record::ExperimentRecord;
pub use stimulus_record::StimulusRecord;

use crate::row::{Row, Value};
use crate::table::Table;
use crate::{Error, Result};

/// Fail with [`Error::MissingColumn`] on the first required column of
/// `table` that `row` lacks or holds as `NULL`.
fn ensure_required(table: Table, row: &Row) -> Result<()> {
    for &column in table.required_columns() {
        match row.get(column) {
            Some(value) if !value.is_null() => {}
            _ => {
                return Err(Error::MissingColumn {
                    table: table.name(),
                    column,
                })
            }
        }
    }
    Ok(())
}

static NULL: Value = Value::Null;

/// Value of a column already checked by [`ensure_required`].
fn required<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&NULL)
}
