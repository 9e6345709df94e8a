//! Database schema definitions
//!
//! The field table below is the single source of column order. Every SQL
//! statement and the positional hydration of rows are derived from it.

use std::str::FromStr;

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::dog::Dog;
use crate::{Error, Result};

/// Name of the backing table
pub const TABLE_NAME: &str = "dogs";

/// SQL to drop the dogs table
pub const DROP_DOGS_TABLE: &str = "DROP TABLE IF EXISTS dogs";

/// SQL to check whether the dogs table exists
pub const DOGS_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND tbl_name = 'dogs'";

/// SQL to count dogs
pub const COUNT_DOGS: &str = "SELECT COUNT(*) FROM dogs";

/// A mapped attribute of `Dog`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Color,
    Breed,
    Instagram,
}

impl Field {
    /// Column name in the `dogs` table
    pub fn column(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Color => "color",
            Field::Breed => "breed",
            Field::Instagram => "instagram",
        }
    }

    /// Column type used in `CREATE TABLE`
    pub fn sql_type(&self) -> &'static str {
        match self {
            Field::Id => "INTEGER PRIMARY KEY",
            _ => "TEXT",
        }
    }

    /// Read this field off a dog as a SQL value
    pub fn value_of(&self, dog: &Dog) -> Value {
        match self {
            Field::Id => dog.id().map(Value::Integer).unwrap_or(Value::Null),
            Field::Name => Value::Text(dog.name.clone()),
            Field::Color => text_or_null(&dog.color),
            Field::Breed => Value::Text(dog.breed.clone()),
            Field::Instagram => text_or_null(&dog.instagram),
        }
    }
}

fn text_or_null(value: &Option<String>) -> Value {
    value.clone().map(Value::Text).unwrap_or(Value::Null)
}

const FULL_FIELDS: &[Field] = &[
    Field::Id,
    Field::Name,
    Field::Color,
    Field::Breed,
    Field::Instagram,
];

const BASIC_FIELDS: &[Field] = &[Field::Id, Field::Name, Field::Breed];

/// Which column set the `dogs` table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// `id, name, breed`
    Basic,
    /// `id, name, color, breed, instagram`
    #[default]
    Full,
}

impl SchemaVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Basic => "basic",
            SchemaVariant::Full => "full",
        }
    }

    /// All fields in column order, id first
    pub fn fields(&self) -> &'static [Field] {
        match self {
            SchemaVariant::Basic => BASIC_FIELDS,
            SchemaVariant::Full => FULL_FIELDS,
        }
    }

    /// Fields written on insert/update (everything except id)
    pub fn data_fields(&self) -> &'static [Field] {
        &self.fields()[1..]
    }

    pub fn has(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    pub fn column_count(&self) -> usize {
        self.fields().len()
    }

    /// `CREATE TABLE IF NOT EXISTS dogs (...)`
    pub fn create_table_sql(&self) -> String {
        let definitions: Vec<String> = self
            .fields()
            .iter()
            .map(|f| format!("{} {}", f.column(), f.sql_type()))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            TABLE_NAME,
            definitions.join(",\n    ")
        )
    }

    /// `SELECT <all columns> FROM dogs`, to be followed by a WHERE/ORDER clause
    pub fn select_sql(&self) -> String {
        format!("SELECT {} FROM {}", column_list(self.fields()), TABLE_NAME)
    }

    /// `INSERT INTO dogs (<data columns>) VALUES (?1, ...)`
    pub fn insert_sql(&self) -> String {
        let fields = self.data_fields();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            column_list(fields),
            placeholders(1, fields.len())
        )
    }

    /// `UPDATE dogs SET a = ?1, ... WHERE id = ?N`
    pub fn update_sql(&self) -> String {
        let fields = self.data_fields();
        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{} = ?{}", f.column(), i + 1))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            TABLE_NAME,
            assignments.join(", "),
            fields.len() + 1
        )
    }

    /// Clear fields this variant has no column for, so the value matches what is stored
    pub fn retain_stored_fields(&self, dog: &mut Dog) {
        if !self.has(Field::Color) {
            dog.color = None;
        }
        if !self.has(Field::Instagram) {
            dog.instagram = None;
        }
    }

    /// Values of the data fields of `dog`, in column order
    pub fn data_values(&self, dog: &Dog) -> Vec<Value> {
        self.data_fields().iter().map(|f| f.value_of(dog)).collect()
    }

    /// Build a dog from a row laid out in this variant's column order.
    pub fn hydrate(&self, row: &[Value]) -> Result<Dog> {
        let fields = self.fields();
        if row.len() != fields.len() {
            return Err(Error::InvalidRow {
                expected: fields.len(),
                found: row.len(),
            });
        }

        let mut dog = Dog::new(String::new(), String::new());
        for (field, value) in fields.iter().zip(row) {
            match field {
                Field::Id => dog.set_id(optional_integer(*field, value)?),
                Field::Name => dog.name = optional_text(*field, value)?.unwrap_or_default(),
                Field::Color => dog.color = optional_text(*field, value)?,
                Field::Breed => dog.breed = optional_text(*field, value)?.unwrap_or_default(),
                Field::Instagram => dog.instagram = optional_text(*field, value)?,
            }
        }
        Ok(dog)
    }
}

impl FromStr for SchemaVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" | "simple" => Ok(SchemaVariant::Basic),
            "full" | "rich" => Ok(SchemaVariant::Full),
            _ => Err(Error::InvalidSchema(s.to_string())),
        }
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn column_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.column())
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Integer(_) => "INTEGER",
        Value::Real(_) => "REAL",
        Value::Text(_) => "TEXT",
        Value::Blob(_) => "BLOB",
    }
}

fn optional_integer(field: Field, value: &Value) -> Result<Option<i64>> {
    match value {
        Value::Integer(i) => Ok(Some(*i)),
        Value::Null => Ok(None),
        other => Err(Error::InvalidColumn {
            column: field.column(),
            reason: format!("expected INTEGER, found {}", type_name(other)),
        }),
    }
}

fn optional_text(field: Field, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Text(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        other => Err(Error::InvalidColumn {
            column: field.column(),
            reason: format!("expected TEXT, found {}", type_name(other)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_create_table_sql_full() {
        let sql = SchemaVariant::Full.create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS dogs ("));
        assert!(sql.contains("id INTEGER PRIMARY KEY,"));
        assert!(sql.contains("color TEXT,"));
        assert!(sql.contains("instagram TEXT\n)"));
    }

    #[test]
    fn test_create_table_sql_basic() {
        let sql = SchemaVariant::Basic.create_table_sql();
        assert!(sql.contains("breed TEXT"));
        assert!(!sql.contains("color"));
        assert!(!sql.contains("instagram"));
    }

    #[test]
    fn test_insert_and_update_sql() {
        assert_eq!(
            SchemaVariant::Full.insert_sql(),
            "INSERT INTO dogs (name, color, breed, instagram) VALUES (?1, ?2, ?3, ?4)"
        );
        assert_eq!(
            SchemaVariant::Full.update_sql(),
            "UPDATE dogs SET name = ?1, color = ?2, breed = ?3, instagram = ?4 WHERE id = ?5"
        );
        assert_eq!(
            SchemaVariant::Basic.update_sql(),
            "UPDATE dogs SET name = ?1, breed = ?2 WHERE id = ?3"
        );
    }

    #[test]
    fn test_select_sql() {
        assert_eq!(
            SchemaVariant::Basic.select_sql(),
            "SELECT id, name, breed FROM dogs"
        );
    }

    #[test]
    fn test_hydrate_full_row() {
        let row = vec![
            Value::Integer(3),
            text("Teddy"),
            text("brown"),
            text("cockapoo"),
            text("@teddy"),
        ];
        let dog = SchemaVariant::Full.hydrate(&row).unwrap();
        assert_eq!(dog.id(), Some(3));
        assert_eq!(dog.name, "Teddy");
        assert_eq!(dog.color.as_deref(), Some("brown"));
        assert_eq!(dog.breed, "cockapoo");
        assert_eq!(dog.instagram.as_deref(), Some("@teddy"));
    }

    #[test]
    fn test_hydrate_basic_row() {
        let row = vec![Value::Integer(1), text("Pat"), text("poodle")];
        let pat = SchemaVariant::Basic.hydrate(&row).unwrap();
        assert_eq!(pat.id(), Some(1));
        assert_eq!(pat.name, "Pat");
        assert_eq!(pat.breed, "poodle");
        assert_eq!(pat.color, None);
        assert_eq!(pat.instagram, None);
    }

    #[test]
    fn test_hydrate_nulls_in_optional_columns() {
        let row = vec![
            Value::Integer(2),
            text("Dave"),
            Value::Null,
            text("poodle"),
            Value::Null,
        ];
        let dog = SchemaVariant::Full.hydrate(&row).unwrap();
        assert_eq!(dog.color, None);
        assert_eq!(dog.instagram, None);
    }

    #[test]
    fn test_hydrate_rejects_wrong_arity() {
        let short = vec![Value::Integer(1), text("Pat"), text("poodle")];
        match SchemaVariant::Full.hydrate(&short) {
            Err(Error::InvalidRow { expected, found }) => {
                assert_eq!(expected, 5);
                assert_eq!(found, 3);
            }
            other => panic!("expected InvalidRow, got {:?}", other),
        }

        let long = vec![Value::Integer(1), text("a"), text("b"), text("c")];
        assert!(matches!(
            SchemaVariant::Basic.hydrate(&long),
            Err(Error::InvalidRow { expected: 3, found: 4 })
        ));
    }

    #[test]
    fn test_hydrate_rejects_wrong_types() {
        let row = vec![text("one"), text("Pat"), text("poodle")];
        assert!(matches!(
            SchemaVariant::Basic.hydrate(&row),
            Err(Error::InvalidColumn { column: "id", .. })
        ));

        let row = vec![Value::Integer(1), Value::Blob(vec![1]), text("poodle")];
        assert!(matches!(
            SchemaVariant::Basic.hydrate(&row),
            Err(Error::InvalidColumn { column: "name", .. })
        ));
    }

    #[test]
    fn test_hydrate_null_name_and_breed_as_empty() {
        let row = vec![Value::Integer(4), Value::Null, Value::Null];
        let dog = SchemaVariant::Basic.hydrate(&row).unwrap();
        assert_eq!(dog.id(), Some(4));
        assert_eq!(dog.name, "");
        assert_eq!(dog.breed, "");
    }

    #[test]
    fn test_retain_stored_fields() {
        let mut dog = Dog::new("Rex", "boxer").with_color("tan").with_instagram("@rex");
        SchemaVariant::Full.retain_stored_fields(&mut dog);
        assert_eq!(dog.color.as_deref(), Some("tan"));

        SchemaVariant::Basic.retain_stored_fields(&mut dog);
        assert_eq!(dog.color, None);
        assert_eq!(dog.instagram, None);
    }

    #[test]
    fn test_data_values_follow_column_order() {
        let dog = Dog::new("Teddy", "cockapoo").with_instagram("@teddy");
        assert_eq!(
            SchemaVariant::Full.data_values(&dog),
            vec![text("Teddy"), Value::Null, text("cockapoo"), text("@teddy")]
        );
        assert_eq!(
            SchemaVariant::Basic.data_values(&dog),
            vec![text("Teddy"), text("cockapoo")]
        );
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("basic".parse::<SchemaVariant>().unwrap(), SchemaVariant::Basic);
        assert_eq!("FULL".parse::<SchemaVariant>().unwrap(), SchemaVariant::Full);
        assert!(matches!(
            "fancy".parse::<SchemaVariant>(),
            Err(Error::InvalidSchema(_))
        ));
    }
}
