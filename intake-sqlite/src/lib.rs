#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the intake-sqlite crate.
//! [intake_core]: https://docs.rs/intake_core/latest/intake_core/index.html
//! [intake_sqlite]: https://docs.rs/intake_sqlite/latest/intake_sqlite/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::str::FromStr;
use tokio::try_join;

pub mod config;
mod r#impl;

use config::SqliteConfig;

/// SQLite implementation of the sheet store.
///
/// Reads go through a pooled reader; writes go through a writer pool capped
/// at a single connection, which is what serializes row index assignment.
///
/// # Example
///
/// ```no_run
/// # use intake_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open (and if needed create) the database and apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established or a
    /// migration fails to apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(config.busy_timeout)
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        // An in-memory database is private to its connection, so the reader
        // has to share the writer's single connection.
        let (reader, writer) = if db_path.is_none() {
            let writer = sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;
            (writer.clone(), writer)
        } else {
            let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
            let writer = sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options);
            try_join!(reader, writer)?
        };

        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::info!(
            path = db_path.as_deref().unwrap_or(":memory:"),
            "sheet store ready"
        );

        Ok(Self { reader, writer })
    }
}
