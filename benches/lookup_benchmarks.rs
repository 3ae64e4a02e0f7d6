//! Lookup benchmarks
//!
//! Measures the two read paths against an in-memory SQLite database and the
//! `MemorySession` fake:
//! - stimulus lookup by primary key
//! - experiments lookup by stimulus id (unindexed scan vs. indexed)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use experimental_db::session::{MemorySession, SqliteSession};
use experimental_db::{DataAccessClient, Row, Table};
use rusqlite::{params, Connection};

const STIMULI: i64 = 1_000;
const EXPERIMENTS_PER_STIMULUS: i64 = 10;

fn sqlite_client(with_index: bool) -> DataAccessClient {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE stimuli (id INTEGER PRIMARY KEY, name TEXT);
         CREATE TABLE experiments (id INTEGER PRIMARY KEY, stimulus_id INTEGER, subject TEXT);",
    )
    .unwrap();
    if with_index {
        conn.execute_batch("CREATE INDEX idx_experiments_stimulus ON experiments (stimulus_id);")
            .unwrap();
    }

    let mut next_id = 1;
    for stim in 0..STIMULI {
        conn.execute(
            "INSERT INTO stimuli (id, name) VALUES (?1, ?2)",
            params![stim, format!("stim-{stim}")],
        )
        .unwrap();
        for _ in 0..EXPERIMENTS_PER_STIMULUS {
            conn.execute(
                "INSERT INTO experiments (id, stimulus_id, subject) VALUES (?1, ?2, 'S')",
                params![next_id, stim],
            )
            .unwrap();
            next_id += 1;
        }
    }
    DataAccessClient::with_session(SqliteSession::from_connection(conn))
}

fn memory_client() -> DataAccessClient<MemorySession> {
    let session = MemorySession::with_empty_tables();
    let mut next_id = 1;
    for stim in 0..STIMULI {
        session.insert(Table::Stimuli, Row::new().with("id", stim));
        for _ in 0..EXPERIMENTS_PER_STIMULUS {
            session.insert(
                Table::Experiments,
                Row::new().with("id", next_id).with("stimulus_id", stim),
            );
            next_id += 1;
        }
    }
    DataAccessClient::with_session(session)
}

fn bench_stim_definition(c: &mut Criterion) {
    let mut group = c.benchmark_group("stim_definition");

    let sqlite = sqlite_client(false);
    group.bench_function("sqlite", |b| {
        b.iter(|| sqlite.stim_definition(black_box(STIMULI / 2)).unwrap());
    });

    let memory = memory_client();
    group.bench_function("memory", |b| {
        b.iter(|| memory.stim_definition(black_box(STIMULI / 2)).unwrap());
    });

    group.finish();
}

fn bench_get_experiments(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_experiments");

    for with_index in [false, true] {
        let client = sqlite_client(with_index);
        let label = if with_index { "indexed" } else { "scan" };
        group.bench_with_input(BenchmarkId::new("sqlite", label), &client, |b, client| {
            b.iter(|| client.get_experiments(black_box(STIMULI / 2)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stim_definition, bench_get_experiments);
criterion_main!(benches);
