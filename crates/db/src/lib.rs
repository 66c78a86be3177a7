mod error;
mod helpers;
mod migrations;
mod workouts;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use migrations::{MIGRATIONS, WORKOUT_COLUMNS};

/// Handle on the SQLite store holding the `workouts` table.
///
/// The connection lives as long as the handle and is closed on drop.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "cache_size", -20_000)?;
        Ok(Self { conn })
    }
}
