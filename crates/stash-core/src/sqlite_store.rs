use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::item::{Item, ItemDocument};
use crate::sql_query::{compile_lookup, Lookup};
use crate::store::{ItemGateway, StoreError};

/// SQLite-backed item store.
///
/// Each item is kept as its JSON document plus indexed mirror columns:
/// `name_lower` for prefix range scans and one `item_series` row per label
/// for exact membership. `position` preserves insertion order.
pub struct SqliteItemStore {
    conn: Mutex<Connection>,
}

impl SqliteItemStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn =
            Connection::open(path).map_err(|e| StoreError::Storage(format!("open: {}", e)))?;
        Self::init_with_connection(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Storage(format!("open_in_memory: {}", e)))?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> Result<Self, StoreError> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                position INTEGER NOT NULL,
                name_lower TEXT NOT NULL,
                document TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS item_series (
                item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                ord INTEGER NOT NULL,
                label TEXT NOT NULL,
                PRIMARY KEY (item_id, ord)
            );

            CREATE INDEX IF NOT EXISTS idx_items_position ON items(position);
            CREATE INDEX IF NOT EXISTS idx_items_name_lower ON items(name_lower);
            CREATE INDEX IF NOT EXISTS idx_item_series_label ON item_series(label);
            ",
        )
        .map_err(|e| StoreError::Storage(format!("init_schema: {}", e)))?;
        Ok(())
    }

    /// Insert a single item at the end of the collection.
    pub fn insert(&self, item: &Item) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|e| StoreError::Storage(e.to_string()))?;
        Self::insert_item(&conn, item)
    }

    /// Insert multiple items atomically, in order.
    pub fn insert_batch(&self, items: &[Item]) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|e| StoreError::Storage(e.to_string()))?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::Storage(format!("begin tx: {}", e)))?;

        for item in items {
            Self::insert_item(&tx, item)?;
        }

        tx.commit()
            .map_err(|e| StoreError::Storage(format!("commit: {}", e)))?;
        Ok(())
    }

    fn insert_item(conn: &Connection, item: &Item) -> Result<(), StoreError> {
        let document = serde_json::to_string(&item.to_document())
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        conn.execute(
            "INSERT INTO items (id, position, name_lower, document)
             VALUES (?1, (SELECT COALESCE(MAX(position), -1) + 1 FROM items), ?2, ?3)",
            params![item.id, item.name_lower(), document],
        )
        .map_err(|e| {
            if let rusqlite::Error::SqliteFailure(ref err, _) = e {
                if err.code == rusqlite::ErrorCode::ConstraintViolation {
                    return StoreError::AlreadyExists(item.id.clone());
                }
            }
            StoreError::Storage(format!("insert: {}", e))
        })?;

        for (ord, label) in item.series().labels().iter().enumerate() {
            conn.execute(
                "INSERT INTO item_series (item_id, ord, label) VALUES (?1, ?2, ?3)",
                params![item.id, ord as i64, label],
            )
            .map_err(|e| StoreError::Storage(format!("insert series: {}", e)))?;
        }

        Ok(())
    }

    fn lookup(&self, lookup: Lookup<'_>) -> Result<Vec<Item>, StoreError> {
        let conn = self.conn.lock().map_err(|e| StoreError::Storage(e.to_string()))?;
        let compiled = compile_lookup(&lookup);

        let sql = format!(
            "SELECT id, document FROM items {} {}",
            compiled.where_clause, compiled.order_clause
        );

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            compiled.params.iter().map(|p| p as &dyn rusqlite::types::ToSql).collect();

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::Storage(format!("prepare query: {} (sql: {})", e, sql)))?;

        let rows = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| StoreError::Storage(format!("query: {}", e)))?;

        let mut items = Vec::new();
        for row_result in rows {
            let (id, document) =
                row_result.map_err(|e| StoreError::Storage(format!("row: {}", e)))?;
            items.push(Self::document_to_item(id, &document)?);
        }
        Ok(items)
    }

    fn document_to_item(id: String, document: &str) -> Result<Item, StoreError> {
        let doc: ItemDocument = serde_json::from_str(document)
            .map_err(|e| StoreError::Document(format!("{}: {}", id, e)))?;
        Ok(Item::from_document(id, doc))
    }
}

impl ItemGateway for SqliteItemStore {
    fn fetch_all(&self) -> Result<Vec<Item>, StoreError> {
        self.lookup(Lookup::All)
    }

    fn fetch_by_name_prefix(&self, prefix: &str) -> Result<Vec<Item>, StoreError> {
        self.lookup(Lookup::NamePrefix(prefix))
    }

    fn fetch_by_series(&self, label: &str) -> Result<Vec<Item>, StoreError> {
        self.lookup(Lookup::SeriesLabel(label))
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.lookup(Lookup::Id(id))?.into_iter().next())
    }
}
