//! # experimental-db: Read Access to the Experimental Database
//!
//! A small blocking client over two tables:
//!
//! - `stimuli(id, ...)`: one row per stimulus definition
//! - `experiments(stimulus_id, ...)`: trial records referencing a stimulus
//!
//! The client holds one session and supports exactly two reads, a stimulus
//! by id and the experiments that used it. Rows come back as column→value
//! maps ([`Row`]), or as validated records ([`record::StimulusRecord`],
//! [`record::ExperimentRecord`]). Keys are always bound as query
//! parameters. The crate never writes.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use experimental_db::{ConnectOptions, DataAccessClient};
//!
//! let options = ConnectOptions::new("/var/lib/lab/experiments.db", "lab", "secret");
//! let client = DataAccessClient::open(&options)?;
//!
//! if let Some(stimulus) = client.stim_definition(5)? {
//!     println!("stimulus: {:?}", stimulus.get_str("name"));
//! }
//! for experiment in client.get_experiments(5)? {
//!     println!("experiment: {:?}", experiment.get_i64("id"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod client;
pub mod config;
pub mod error;
pub mod record;
pub mod row;
pub mod session;
pub mod table;

pub use client::DataAccessClient;
pub use config::ConnectOptions;
pub use error::{Error, ErrorKind, Result};
pub use row::{Row, Value};
pub use table::{Lookup, Table};
