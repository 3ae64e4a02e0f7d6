//! Database sessions
//!
//! A [`Session`] is the owned handle the client queries through. The client
//! never talks to a database directly, so tests and callers can hand it any
//! implementation:
//!
//! - [`SqliteSession`]: embedded SQLite via `rusqlite`, opened read-only
//! - [`MemorySession`]: in-memory tables, for tests and database-free use
//!
//! # Example
//!
//! ```rust
//! use experimental_db::session::{MemorySession, Session};
//! use experimental_db::{Lookup, Row, Table};
//!
//! # fn main() -> experimental_db::Result<()> {
//! let session = MemorySession::new();
//! session.insert(Table::Stimuli, Row::new().with("id", 5).with("name", "tone_440hz"));
//!
//! let rows = session.lookup(&Lookup::stimulus(5), None)?;
//! assert_eq!(rows.len(), 1);
//! # Ok(())
//! # }
//! ```

mod memory;
mod sqlite;

pub use memory::MemorySession;
pub use sqlite::SqliteSession;

use crate::config::ConnectOptions;
use crate::row::Row;
use crate::table::Lookup;
use crate::Result;

/// Read-only access to the `stimuli` and `experiments` tables.
pub trait Session {
    /// Run an exact-match lookup, returning at most `limit` rows.
    ///
    /// Rows come back in the backend's natural scan order. The lookup key is
    /// bound as a parameter, never interpolated.
    ///
    /// # Errors
    ///
    /// Returns a query-kind error if the table or column does not exist or
    /// the backend fails mid-query.
    fn lookup(&self, lookup: &Lookup, limit: Option<usize>) -> Result<Vec<Row>>;
}

/// Sessions that can be opened from [`ConnectOptions`].
pub trait Connect: Session + Sized {
    /// Open a session.
    ///
    /// # Errors
    ///
    /// Returns a connection-kind error if the database cannot be reached or
    /// opened.
    fn connect(options: &ConnectOptions) -> Result<Self>;
}
