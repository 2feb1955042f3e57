//! Dynamically typed records.
//!
//! A [`Record`] is what the external repository hands us: a model name, an id, and a bag of
//! named [`Value`]s. Linked records are shared through `Arc` so the same record can appear
//! in several places of a graph without copying.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::Arc;

/// A raw property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
    Reference(Arc<Record>),
    Collection(Vec<Arc<Record>>),
}

static NULL: Value = Value::Null;

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The linked record, if this is a non-null reference.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Reference(record) => Some(record),
            _ => None,
        }
    }

    /// The linked records of a collection; empty for anything else.
    pub fn as_collection(&self) -> &[Arc<Record>] {
        match self {
            Value::Collection(records) => records,
            _ => &[],
        }
    }
}

/// The default string form of a value. References render as the target id.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            // Whole floats keep a `.0` so they stay distinguishable from integers.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::Text(s) => f.write_str(s),
            Value::Reference(record) => write!(f, "{}", record.id()),
            Value::Collection(records) => {
                let ids: Vec<String> = records.iter().map(|r| r.id().to_string()).collect();
                write!(f, "[{}]", ids.join(","))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Reference(Arc::new(value))
    }
}

impl From<Arc<Record>> for Value {
    fn from(value: Arc<Record>) -> Self {
        Value::Reference(value)
    }
}

impl From<Vec<Record>> for Value {
    fn from(value: Vec<Record>) -> Self {
        Value::Collection(value.into_iter().map(Arc::new).collect())
    }
}

impl From<Vec<Arc<Record>>> for Value {
    fn from(value: Vec<Arc<Record>>) -> Self {
        Value::Collection(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A live business record conforming to some [`Schema`](crate::model::Schema).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: String,
    id: i64,
    values: HashMap<String, Value>,
}

impl Record {
    pub fn new(model: impl Into<String>, id: i64) -> Self {
        Self {
            model: model.into(),
            id,
            values: HashMap::new(),
        }
    }

    /// Builder-style setter, handy when assembling fixtures.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Reads a property. Properties that were never set read as [`Value::Null`].
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }
}
