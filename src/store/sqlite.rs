//! SQLite pet backend.
//!
//! Stores pets in a `pets` table. Ids come from `AUTOINCREMENT`, so SQLite
//! assigns them natively and never reuses a deleted id.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use super::backend::PetBackend;
use super::error::{Result, StoreError};
use crate::model::{NewPet, Pet, PetId};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    years TEXT,
    gender TEXT,
    img TEXT,
    description TEXT,
    created_at TEXT
);
";

const SELECT_COLUMNS: &str = "SELECT id, name, type, years, gender, img, description, created_at FROM pets";

/// SQLite-backed pet storage backend.
///
/// # Thread Safety
///
/// `SqliteBackend` is `Clone`; clones share one connection behind a mutex,
/// and every statement runs on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Opens or creates a database at the given path.
    ///
    /// Creates parent directories if needed. Databases created by earlier
    /// versions of the site lack the `created_at` column; it is added on open.
    /// A table whose ids are not `AUTOINCREMENT` is rebuilt so deleted ids are
    /// never handed out again.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created or
    /// the schema cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;

        let has_created_at = conn
            .prepare("SELECT name FROM pragma_table_info('pets')")?
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .iter()
            .any(|column| column == "created_at");
        if !has_created_at {
            conn.execute_batch("ALTER TABLE pets ADD COLUMN created_at TEXT")?;
        }

        let table_sql: String = conn.query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'pets'",
            [],
            |row| row.get(0),
        )?;
        if !table_sql.to_ascii_uppercase().contains("AUTOINCREMENT") {
            let tx = conn.transaction()?;
            tx.execute_batch("ALTER TABLE pets RENAME TO pets_legacy")?;
            tx.execute_batch(SCHEMA)?;
            let copied = tx.execute(
                "INSERT INTO pets (id, name, type, years, gender, img, description, created_at)
                 SELECT id, name, type, years, gender, img, description, created_at FROM pets_legacy",
                [],
            )?;
            tx.execute_batch("DROP TABLE pets_legacy")?;
            tx.commit()?;
            info!(rows = copied, "rebuilt pets table with AUTOINCREMENT ids");
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || op(&conn.lock())).await?
    }
}

fn row_to_pet(row: &Row<'_>) -> rusqlite::Result<Pet> {
    let created_at: Option<String> = row.get(7)?;
    Ok(Pet {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        years: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        gender: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        img: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        description: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        created_at: created_at
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
    })
}

fn get_sync(conn: &Connection, id: PetId) -> Result<Option<Pet>> {
    let pet = conn
        .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_pet)
        .optional()?;
    Ok(pet)
}

#[async_trait]
impl PetBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn list(&self) -> Result<Vec<Pet>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;
            let pets = stmt
                .query_map([], row_to_pet)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(pets)
        })
        .await
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>> {
        self.with_conn(move |conn| get_sync(conn, id)).await
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet> {
        self.with_conn(move |conn| {
            let created_at = Utc::now();
            conn.execute(
                "INSERT INTO pets (name, type, years, gender, img, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    pet.name,
                    pet.kind,
                    pet.years,
                    pet.gender,
                    pet.img,
                    pet.description,
                    created_at.to_rfc3339(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Pet::from_new(id, pet, created_at))
        })
        .await
    }

    async fn delete(&self, id: PetId) -> Result<bool> {
        self.with_conn(move |conn| Ok(conn.execute("DELETE FROM pets WHERE id = ?1", [id])? > 0))
            .await
    }
}
