//! Data access client
//!
//! [`DataAccessClient`] owns at most one [`Session`] and translates the two
//! supported lookups into rows:
//!
//! - [`stim_definition`](DataAccessClient::stim_definition): the `stimuli`
//!   row with a given `id`, if any
//! - [`get_experiments`](DataAccessClient::get_experiments): every
//!   `experiments` row whose `stimulus_id` matches
//!
//! The client is either not connected (fresh from [`DataAccessClient::new`])
//! or connected (after [`connect`](DataAccessClient::connect) or
//! [`with_session`](DataAccessClient::with_session)). Lookups on an
//! unconnected client fail with [`Error::NotConnected`].

use tracing::{debug, info, warn};

use crate::config::ConnectOptions;
use crate::record::{ExperimentRecord, StimulusRecord};
use crate::row::{Row, Value};
use crate::session::{Connect, Session, SqliteSession};
use crate::table::Lookup;
use crate::{Error, Result};

/// Client for the experimental database.
///
/// Blocking and single-session: each lookup runs to completion on the
/// calling thread. Use one client per thread for concurrent access.
///
/// # Example
///
/// ```rust
/// use experimental_db::session::MemorySession;
/// use experimental_db::{DataAccessClient, Row, Table};
///
/// # fn main() -> experimental_db::Result<()> {
/// let session = MemorySession::with_empty_tables();
/// session.insert(Table::Stimuli, Row::new().with("id", 5).with("name", "tone_440hz"));
///
/// let client = DataAccessClient::with_session(session);
/// let stim = client.stim_definition(5)?.expect("stimulus 5 exists");
/// assert_eq!(stim.get_str("name"), Some("tone_440hz"));
/// assert!(client.stim_definition(999)?.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DataAccessClient<S = SqliteSession> {
    session: Option<S>,
}

impl DataAccessClient<SqliteSession> {
    /// Create a client with no session.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Create a client and connect it to a SQLite database.
    ///
    /// # Errors
    ///
    /// Returns a connection-kind error if the session cannot be opened.
    pub fn open(options: &ConnectOptions) -> Result<Self> {
        let mut client = Self::new();
        client.connect(options)?;
        Ok(client)
    }
}

impl<S> Default for DataAccessClient<S> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<S: Connect> DataAccessClient<S> {
    /// Open a session and store it in the client.
    ///
    /// A second successful call replaces the previous session, which is
    /// closed when dropped. On failure the client keeps whatever session it
    /// had.
    ///
    /// # Errors
    ///
    /// Returns a connection-kind error if the database does not exist, the
    /// host is unreachable, or the options are invalid. Never retried.
    pub fn connect(&mut self, options: &ConnectOptions) -> Result<()> {
        let session = S::connect(options)?;
        if self.session.replace(session).is_some() {
            debug!("replaced existing session");
        }
        info!(
            database = options.database(),
            host = options.host(),
            user = options.user(),
            "connected"
        );
        Ok(())
    }
}

impl<S: Session> DataAccessClient<S> {
    /// Create a client around an already-open session.
    #[must_use]
    pub const fn with_session(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// True once a session is held.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Get the session, if connected.
    #[must_use]
    pub const fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    fn active_session(&self) -> Result<&S> {
        self.session.as_ref().ok_or(Error::NotConnected)
    }

    /// Get the `stimuli` row whose `id` equals `stim_id`.
    ///
    /// Returns `Ok(None)` when no row matches. If several rows share the id
    /// only the first in scan order is returned and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before `connect`, or a query-kind
    /// error if the table or column is missing.
    pub fn stim_definition(&self, stim_id: impl Into<Value>) -> Result<Option<Row>> {
        let lookup = Lookup::stimulus(stim_id);
        let rows = self.active_session()?.lookup(&lookup, Some(2))?;

        if rows.len() > 1 {
            warn!(
                table = lookup.table().name(),
                key = ?lookup.key(),
                "duplicate stimulus id, returning first match"
            );
        }
        debug!(
            table = lookup.table().name(),
            key = ?lookup.key(),
            found = !rows.is_empty(),
            "stimulus lookup"
        );

        Ok(rows.into_iter().next())
    }

    /// Get every `experiments` row whose `stimulus_id` equals `stim_id`.
    ///
    /// Rows come back in the database's scan order; no sort is applied.
    /// An empty `Vec` means no experiment references the stimulus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before `connect`, or a query-kind
    /// error if the table or column is missing.
    pub fn get_experiments(&self, stim_id: impl Into<Value>) -> Result<Vec<Row>> {
        let lookup = Lookup::experiments_for(stim_id);
        let rows = self.active_session()?.lookup(&lookup, None)?;

        debug!(
            table = lookup.table().name(),
            key = ?lookup.key(),
            rows = rows.len(),
            "experiments lookup"
        );

        Ok(rows)
    }

    /// [`stim_definition`](Self::stim_definition), validated as a
    /// [`StimulusRecord`].
    ///
    /// # Errors
    ///
    /// As `stim_definition`, plus [`Error::MissingColumn`] if the row lacks
    /// `id`.
    pub fn stimulus(&self, stim_id: impl Into<Value>) -> Result<Option<StimulusRecord>> {
        self.stim_definition(stim_id)?
            .map(StimulusRecord::try_from)
            .transpose()
    }

    /// [`get_experiments`](Self::get_experiments), validated as
    /// [`ExperimentRecord`]s.
    ///
    /// # Errors
    ///
    /// As `get_experiments`, plus [`Error::MissingColumn`] on the first row
    /// lacking `id` or `stimulus_id`.
    pub fn experiments(&self, stim_id: impl Into<Value>) -> Result<Vec<ExperimentRecord>> {
        self.get_experiments(stim_id)?
            .into_iter()
            .map(ExperimentRecord::try_from)
            .collect()
    }
}
