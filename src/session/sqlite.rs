//! SQLite session backed by `rusqlite`.
//!
//! The database file is opened read-only and must already exist. SQLite is
//! embedded, so only local hosts are reachable and the user/password pair is
//! checked for presence but not authenticated.

use rusqlite::{params, Connection, OpenFlags};

use super::{Connect, Session};
use crate::config::ConnectOptions;
use crate::row::{Row, Value};
use crate::table::Lookup;
use crate::{Error, Result};

/// Hosts an embedded database is reachable on.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1"];

/// Session over a single SQLite connection.
#[derive(Debug)]
pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    /// Wrap an already-open connection.
    ///
    /// Unlike [`Connect::connect`] this does not force read-only mode, which
    /// lets tests seed an in-memory database and then query it.
    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Get the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Connect for SqliteSession {
    fn connect(options: &ConnectOptions) -> Result<Self> {
        options.validate()?;

        let host = options.host().trim();
        if !LOCAL_HOSTS
            .iter()
            .any(|local| local.eq_ignore_ascii_case(host))
        {
            return Err(Error::HostUnreachable(options.host().to_string()));
        }

        let connection_error = |e: rusqlite::Error| Error::Connection {
            database: options.database().to_string(),
            reason: e.to_string(),
        };

        let conn = Connection::open_with_flags(
            options.database(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connection_error)?;

        // SQLite reads the file header lazily; touch the schema so a file
        // that is not a database fails here rather than on the first lookup.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |r| {
            r.get::<_, i64>(0)
        })
        .map_err(connection_error)?;

        Ok(Self { conn })
    }
}

impl Session for SqliteSession {
    fn lookup(&self, lookup: &Lookup, limit: Option<usize>) -> Result<Vec<Row>> {
        let mut sql = format!(
            "SELECT * FROM {} WHERE {} = ?1",
            lookup.table().name(),
            lookup.column()
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        // Statement is the cursor: released when it drops, on every path.
        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let rows = stmt.query_map(params![lookup.key()], |r| row_from_sqlite(r, &names))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

fn row_from_sqlite(row: &rusqlite::Row<'_>, names: &[String]) -> rusqlite::Result<Row> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| Ok((name.clone(), Value::from(row.get_ref(idx)?))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteSession {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stimuli (id INTEGER PRIMARY KEY, name TEXT, created TEXT);
             INSERT INTO stimuli VALUES (5, 'tone_440hz', '2019-04-02 13:45:10');
             CREATE TABLE experiments (id INTEGER PRIMARY KEY, stimulus_id INTEGER, subject TEXT);
             INSERT INTO experiments VALUES (1, 5, 'A'), (2, 5, 'B'), (3, 9, 'C');",
        )
        .unwrap();
        SqliteSession::from_connection(conn)
    }

    #[test]
    fn test_lookup_maps_columns() {
        let session = seeded();
        let rows = session.lookup(&Lookup::stimulus(5), None).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("id"), Some(5));
        assert_eq!(rows[0].get_str("name"), Some("tone_440hz"));
        assert!(rows[0].get_datetime("created").is_some());
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_lookup_limit() {
        let session = seeded();
        let rows = session.lookup(&Lookup::experiments_for(5), Some(1)).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_lookup_binds_key() {
        let session = seeded();
        let rows = session
            .lookup(&Lookup::stimulus("5 OR 1=1"), None)
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_table_is_query_error() {
        let session = SqliteSession::from_connection(Connection::open_in_memory().unwrap());
        let err = session.lookup(&Lookup::stimulus(1), None).unwrap_err();
        assert!(err.is_query());
        assert!(format!("{err}").contains("no such table"));
    }

    #[test]
    fn test_connect_rejects_remote_host() {
        let options = ConnectOptions::new("lab.db", "lab", "pw").with_host("db.example.org");
        let err = SqliteSession::connect(&options).err().unwrap();
        assert!(matches!(err, Error::HostUnreachable(_)));
    }

    #[test]
    fn test_connect_host_ignores_case_and_padding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE stimuli (id INTEGER PRIMARY KEY);")
            .unwrap();

        for host in ["LocalHost", "localhost ", " 127.0.0.1"] {
            let options = ConnectOptions::new(path.to_string_lossy(), "lab", "pw").with_host(host);
            assert!(SqliteSession::connect(&options).is_ok(), "host {host:?}");
        }
    }

    #[test]
    fn test_invalid_utf8_text_passes_through() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE stimuli (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO stimuli VALUES (5, CAST(x'fffe41' AS TEXT));",
        )
        .unwrap();
        let session = SqliteSession::from_connection(conn);

        let rows = session.lookup(&Lookup::stimulus(5), None).unwrap();
        assert_eq!(rows[0].get("name"), Some(&Value::Blob(vec![0xff, 0xfe, b'A'])));
    }

    #[test]
    fn test_connect_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let options = ConnectOptions::new(path.to_string_lossy(), "lab", "pw");

        let err = SqliteSession::connect(&options).err().unwrap();
        assert!(err.is_connection());
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[test]
    fn test_connect_rejects_non_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not a database\n".repeat(64)).unwrap();
        let options = ConnectOptions::new(path.to_string_lossy(), "lab", "pw");

        let err = SqliteSession::connect(&options).err().unwrap();
        assert!(err.is_connection());
    }
}
