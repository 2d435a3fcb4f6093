//! Relational catalog backend on SQLite.

use crate::CatalogStore;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CategoryRow, ItemRow};
use crate::repos::{CategoryRepo, ItemRepo};
use async_trait::async_trait;
use curio_core::{Category, CategoryId, Item, ItemId, NewItem};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const ITEM_COLUMNS: &str = "items.id AS id, items.name AS name, \
     categories.name AS category, items.image_name AS image_name";

/// SQLite-backed catalog store.
///
/// Items reference their category by foreign key; reads materialize the
/// category name through a join. The UNIQUE constraint on the category name
/// column keeps concurrent first-use inserts from creating duplicate rows.
pub struct SqliteCatalog {
    pool: Pool<Sqlite>,
}

impl SqliteCatalog {
    /// Open (or create) the database at `path` and run migrations.
    pub async fn new(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

/// Map constraint violations to their own variant so callers can tell a
/// duplicate or broken reference apart from an I/O-level query failure.
fn db_error(e: sqlx::Error) -> CatalogError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.message().contains("constraint")
    {
        return CatalogError::Constraint(db_err.message().to_string());
    }
    CatalogError::Database(e)
}

/// Insert-if-absent on the category name, then read the id back, all on one
/// connection. The UNIQUE name column makes the insert atomic: of two racing
/// resolutions one inserts, the other ignores, and both select the same row.
async fn resolve_category(conn: &mut SqliteConnection, name: &str) -> CatalogResult<CategoryId> {
    sqlx::query("INSERT OR IGNORE INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(db_error)?;

    let (id,): (i64,) = sqlx::query_as("SELECT id FROM categories WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(CategoryId(id))
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn migrate(&self) -> CatalogResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> CatalogResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ItemRepo for SqliteCatalog {
    async fn insert(&self, item: NewItem) -> CatalogResult<Item> {
        let mut tx = self.pool.begin().await?;

        let category_id = resolve_category(&mut *tx, &item.category).await?;

        let result =
            sqlx::query("INSERT INTO items (name, category_id, image_name) VALUES (?, ?, ?)")
                .bind(&item.name)
                .bind(category_id.0)
                .bind(item.image_name.as_str())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        let id = result.last_insert_rowid();

        tx.commit().await?;

        tracing::debug!(item_id = id, category_id = category_id.0, "item inserted");
        Ok(Item {
            id: ItemId(id),
            name: item.name,
            category: item.category,
            image_name: item.image_name,
        })
    }

    async fn list(&self) -> CatalogResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             INNER JOIN categories ON items.category_id = categories.id \
             ORDER BY items.id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ItemRow::into_item).collect()
    }

    async fn get(&self, id: ItemId) -> CatalogResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             INNER JOIN categories ON items.category_id = categories.id \
             WHERE items.id = ?"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(ItemRow::into_item).transpose()
    }

    async fn search(&self, keyword: &str) -> CatalogResult<Vec<Item>> {
        // instr() is a plain byte search: case-sensitive, and the keyword is
        // never interpreted as a LIKE pattern.
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             INNER JOIN categories ON items.category_id = categories.id \
             WHERE instr(items.name, ?) > 0 \
             ORDER BY items.id"
        ))
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ItemRow::into_item).collect()
    }
}

#[async_trait]
impl CategoryRepo for SqliteCatalog {
    async fn resolve_or_create(&self, name: &str) -> CatalogResult<CategoryId> {
        let mut conn = self.pool.acquire().await?;
        resolve_category(&mut conn, name).await
    }

    async fn name_of(&self, id: CategoryId) -> CatalogResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT name FROM categories WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(name,)| name))
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}

/// SQL schema for SQLite. Idempotent: re-running against an initialized
/// store is a no-op.
const SCHEMA_SQL: &str = r#"
-- Categories: one row per distinct name, created lazily on first use
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Items: immutable records referencing their category
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    image_name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_items_category ON items(category_id);
"#;
