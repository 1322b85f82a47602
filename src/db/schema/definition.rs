//! Core schema definition types.
//!
//! Provides a storage-agnostic description of each relation: its columns, their
//! types, and the constraints the validator enforces before any write.

/// Represents a column data type.
///
/// Maps to the Cozo type system via `cozo_type()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// String/text data
    String,
    /// Integer data
    Int,
    /// Fixed-point decimal, stored as integer minor units
    Decimal { precision: u32, scale: u32 },
    /// Timestamp without time zone, stored as ISO-8601 text
    DateTime,
}

impl DataType {
    /// Returns the Cozo type name for this data type.
    pub fn cozo_type(&self) -> &'static str {
        match self {
            DataType::String | DataType::DateTime => "String",
            DataType::Int | DataType::Decimal { .. } => "Int",
        }
    }

    /// Returns the relational type name, used in reports and error messages.
    pub fn sql_type(&self) -> String {
        match self {
            DataType::String => "nvarchar".to_string(),
            DataType::Int => "int".to_string(),
            DataType::Decimal { precision, scale } => format!("decimal({},{})", precision, scale),
            DataType::DateTime => "datetime2".to_string(),
        }
    }
}

/// Represents a column in a schema relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    /// Column name (e.g., "first_name", "department_id")
    pub name: &'static str,

    /// Column data type
    pub data_type: DataType,

    /// Text columns only: value must be non-blank
    pub required: bool,

    /// Text columns only: maximum length in characters
    pub max_length: Option<usize>,

    /// Column accepts null
    pub nullable: bool,
}

impl SchemaField {
    const fn of(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            required: false,
            max_length: None,
            nullable: false,
        }
    }

    pub const fn int(name: &'static str) -> Self {
        Self::of(name, DataType::Int)
    }

    pub const fn text(name: &'static str, max_length: usize) -> Self {
        let mut field = Self::of(name, DataType::String);
        field.max_length = Some(max_length);
        field
    }

    pub const fn decimal(name: &'static str, precision: u32, scale: u32) -> Self {
        Self::of(name, DataType::Decimal { precision, scale })
    }

    pub const fn datetime(name: &'static str) -> Self {
        Self::of(name, DataType::DateTime)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Cozo column type including the nullable marker.
    pub fn cozo_column_type(&self) -> String {
        if self.nullable {
            format!("{}?", self.data_type.cozo_type())
        } else {
            self.data_type.cozo_type().to_string()
        }
    }
}

/// Represents a complete database relation/table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRelation {
    /// Relation name (e.g., "students", "enrollments")
    pub name: &'static str,

    /// Fields that form the key (must be unique)
    pub key_fields: &'static [SchemaField],

    /// Fields that are associated values
    pub value_fields: &'static [SchemaField],

    /// Key is a single integer assigned by the mapping layer on insert
    pub identity: bool,
}

impl SchemaRelation {
    /// Returns all fields in this relation (key + value).
    pub fn all_fields(&self) -> impl Iterator<Item = &'static SchemaField> + use<> {
        let (keys, values) = (self.key_fields, self.value_fields);
        keys.iter().chain(values.iter())
    }

    /// Returns the total number of fields.
    pub fn field_count(&self) -> usize {
        self.key_fields.len() + self.value_fields.len()
    }

    /// Position of a column in row order (key fields first).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.all_fields().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&'static SchemaField> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn key_names(&self) -> Vec<&'static str> {
        self.key_fields.iter().map(|f| f.name).collect()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.all_fields().map(|f| f.name).collect()
    }
}
