//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Params, params_from_iter};
use rusqlite::types::Value;
use crate::{Result, Error};
use crate::dog::{Dog, RecordState};
use super::schema::{self, Field, SchemaVariant};

/// SQLite-backed mapper between `Dog` values and the `dogs` table
pub struct DogStore {
    conn: Connection,
    schema: SchemaVariant,
}

impl DogStore {
    /// Open a database file (creates the file if it doesn't exist)
    pub fn open(path: &Path, schema: SchemaVariant) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self::from_connection(conn, schema))
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory(schema: SchemaVariant) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn, schema))
    }

    /// Wrap a connection the caller already holds
    pub fn from_connection(conn: Connection, schema: SchemaVariant) -> Self {
        Self { conn, schema }
    }

    pub fn schema(&self) -> SchemaVariant {
        self.schema
    }

    /// Raw connection, for ad-hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Schema Lifecycle ==========

    /// Create the dogs table if it doesn't exist
    pub fn create_table(&self) -> Result<()> {
        self.conn.execute(&self.schema.create_table_sql(), [])?;
        tracing::info!("Created table {} ({} schema)", schema::TABLE_NAME, self.schema);
        Ok(())
    }

    /// Drop the dogs table if it exists
    pub fn drop_table(&self) -> Result<()> {
        self.conn.execute(schema::DROP_DOGS_TABLE, [])?;
        tracing::info!("Dropped table {}", schema::TABLE_NAME);
        Ok(())
    }

    /// Check sqlite_master for the dogs table
    pub fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(schema::DOGS_TABLE_EXISTS, [], |row| row.get(0))?;
        Ok(count > 0)
    }

    // ========== Hydration ==========

    /// Build a dog from a row in this store's column order
    pub fn hydrate(&self, row: &[Value]) -> Result<Dog> {
        self.schema.hydrate(row)
    }

    fn row_values(&self, row: &rusqlite::Row) -> rusqlite::Result<Vec<Value>> {
        (0..self.schema.column_count())
            .map(|i| row.get::<_, Value>(i))
            .collect()
    }

    /// Run `SELECT <columns> FROM dogs <clause>` and hydrate every row
    fn query_dogs<P: Params>(&self, clause: &str, params: P) -> Result<Vec<Dog>> {
        let sql = format!("{} {}", self.schema.select_sql(), clause);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params)?;

        let mut dogs = Vec::new();
        while let Some(row) = rows.next()? {
            let values = self.row_values(row)?;
            dogs.push(self.hydrate(&values)?);
        }
        Ok(dogs)
    }

    // ========== Persistence ==========

    /// Insert an unpersisted dog and assign its id
    pub fn insert(&self, dog: &mut Dog) -> Result<()> {
        if let RecordState::Persisted(id) = dog.state() {
            return Err(Error::AlreadyPersisted(id));
        }

        // Insert and rowid read must see the same connection state
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(&self.schema.insert_sql(), params_from_iter(self.schema.data_values(dog)))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        dog.set_id(Some(id));
        self.schema.retain_stored_fields(dog);
        tracing::debug!("Inserted dog {} as id {}", dog.name, id);
        Ok(())
    }

    /// Overwrite the non-id columns of a persisted dog's row
    pub fn update(&self, dog: &Dog) -> Result<()> {
        let id = match dog.state() {
            RecordState::Persisted(id) => id,
            RecordState::Unpersisted => return Err(Error::NotPersisted),
        };

        let mut values = self.schema.data_values(dog);
        values.push(Value::Integer(id));

        let affected = self.conn.execute(&self.schema.update_sql(), params_from_iter(values))?;
        if affected == 0 {
            return Err(Error::UpdateTargetMissing(id));
        }

        tracing::debug!("Updated dog id {}", id);
        Ok(())
    }

    /// Insert if unpersisted, update otherwise
    pub fn save(&self, dog: &mut Dog) -> Result<()> {
        match dog.state() {
            RecordState::Unpersisted => self.insert(dog),
            RecordState::Persisted(_) => {
                self.update(dog)?;
                self.schema.retain_stored_fields(dog);
                Ok(())
            }
        }
    }

    /// Save a new dog and hand it back with its id set
    pub fn create(&self, mut dog: Dog) -> Result<Dog> {
        self.save(&mut dog)?;
        Ok(dog)
    }

    // ========== Retrieval ==========

    /// Get a dog by id
    pub fn find(&self, id: i64) -> Result<Option<Dog>> {
        let sql = format!("{} WHERE id = ?1", self.schema.select_sql());
        let values = self
            .conn
            .query_row(&sql, [id], |row| self.row_values(row))
            .optional()?;

        values.map(|row| self.hydrate(&row)).transpose()
    }

    /// First dog (lowest id) with the given name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Dog>> {
        let mut dogs = self.query_dogs("WHERE name = ?1 ORDER BY id LIMIT 1", [name])?;
        Ok(dogs.pop())
    }

    /// Return the first dog matching the template exactly, creating it if absent.
    ///
    /// `name` and `breed` always take part in the match. `color` and
    /// `instagram` only do when set on the template and present in the schema.
    pub fn find_or_create_by(&self, mut template: Dog) -> Result<Dog> {
        if let RecordState::Persisted(id) = template.state() {
            return Err(Error::AlreadyPersisted(id));
        }
        self.schema.retain_stored_fields(&mut template);

        let mut conditions = Vec::new();
        let mut values = Vec::new();
        for field in self.schema.data_fields() {
            let value = field.value_of(&template);
            let optional = matches!(field, Field::Color | Field::Instagram);
            if optional && value == Value::Null {
                continue;
            }
            values.push(value);
            conditions.push(format!("{} = ?{}", field.column(), values.len()));
        }

        let clause = format!("WHERE {} ORDER BY id LIMIT 1", conditions.join(" AND "));
        if let Some(existing) = self.query_dogs(&clause, params_from_iter(values))?.pop() {
            tracing::debug!("Found existing dog {}", existing);
            return Ok(existing);
        }

        self.create(template)
    }

    /// Every dog in insertion (id) order
    pub fn all(&self) -> Result<Vec<Dog>> {
        self.query_dogs("ORDER BY id", [])
    }

    /// Count all dogs
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(schema::COUNT_DOGS, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let table_exists = self.table_exists()?;
        let dogs = if table_exists { self.count()? } else { 0 };
        Ok(DbStats {
            schema: self.schema,
            table_exists,
            dogs,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub schema: SchemaVariant,
    pub table_exists: bool,
    pub dogs: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Schema: {}", self.schema)?;
        writeln!(f, "  Table present: {}", self.table_exists)?;
        writeln!(f, "  Dogs: {}", self.dogs)
    }
}
