pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod reconcile;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

pub use db::StoreOptions;
pub use reconcile::{ReconcileOptions, ReconcileOutcome, ReconcileReport};

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path, options: &StoreOptions) -> Result<Self> {
        let conn = db::open(path, options)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Removes the database file at `path` so the next open starts empty.
    pub fn destroy(path: &Path) -> Result<()> {
        db::remove_database_files(path)
    }

    /// Creates the phone table when absent. Safe to call on every startup.
    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn phones(&self) -> repo::PhonesRepo<'_> {
        repo::PhonesRepo::new(&self.conn)
    }

    pub fn reconcile(&self, options: ReconcileOptions) -> Result<ReconcileReport> {
        reconcile::run(&self.conn, options)
    }
}
