//! # Schema Registry
//!
//! The [`SchemaIntrospector`] trait is the read-only capability the flattener consumes:
//! schemas by model name and code-lookup titles. [`SchemaRegistry`] is the in-process
//! implementation. It is built once, validated, and then shared behind an `Arc` for the
//! lifetime of the process (no locking, it never changes after `build()`).
//!
//! ## Loading from JSON
//!
//! ```rust
//! use docmerge::model::SchemaRegistry;
//!
//! let registry = SchemaRegistry::from_json_str(r#"{
//!     "schemas": [
//!         { "name": "Partner", "properties": [
//!             { "name": "name", "kind": "scalar" },
//!             { "name": "company", "kind": "reference", "target": "Company", "display_field": "name" }
//!         ]},
//!         { "name": "Company", "properties": [ { "name": "name", "kind": "scalar" } ] }
//!     ],
//!     "lookups": { "partner.type": { "1": "Customer" } }
//! }"#).unwrap();
//!
//! use docmerge::model::SchemaIntrospector;
//! assert!(registry.schema("Partner").is_some());
//! assert_eq!(registry.lookup_title("partner.type", "1").as_deref(), Some("Customer"));
//! ```

use crate::model::error::SchemaError;
use crate::model::schema::Schema;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Read-only access to schema metadata.
///
/// Implementations must be cheap and synchronous; the flattener calls them while walking a
/// record graph.
pub trait SchemaIntrospector: Send + Sync {
    /// Resolves a model name to its schema.
    fn schema(&self, model: &str) -> Option<Arc<Schema>>;

    /// Resolves a stored code to its (untranslated) title.
    fn lookup_title(&self, table: &str, code: &str) -> Option<String>;
}

/// Validated, immutable set of schemas and lookup tables.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
    lookups: HashMap<String, HashMap<String, String>>,
}

/// On-disk shape of a schema set.
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    schemas: Vec<Schema>,
    #[serde(default)]
    lookups: HashMap<String, HashMap<String, String>>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        let mut builder = Self::builder();
        for schema in document.schemas {
            builder = builder.schema(schema);
        }
        for (table, entries) in document.lookups {
            builder = builder.lookup_table(table, entries);
        }
        builder.build()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Like [`SchemaIntrospector::schema`], but unknown models are an error.
    pub fn require(&self, model: &str) -> Result<Arc<Schema>, SchemaError> {
        self.schema(model)
            .ok_or_else(|| SchemaError::UnknownModel(model.to_string()))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaIntrospector for SchemaRegistry {
    fn schema(&self, model: &str) -> Option<Arc<Schema>> {
        self.schemas.get(model).cloned()
    }

    fn lookup_title(&self, table: &str, code: &str) -> Option<String> {
        self.lookups.get(table)?.get(code).cloned()
    }
}

/// Collects schemas and lookup tables, then validates them in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: Vec<Schema>,
    lookups: HashMap<String, HashMap<String, String>>,
}

impl SchemaRegistryBuilder {
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Adds (or extends) a code-lookup table.
    pub fn lookup_table<I, C, T>(mut self, table: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: Into<String>,
    {
        self.lookups
            .entry(table.into())
            .or_default()
            .extend(entries.into_iter().map(|(c, t)| (c.into(), t.into())));
        self
    }

    /// Registers every schema and checks that each reference/collection target resolves.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let mut schemas = HashMap::with_capacity(self.schemas.len());
        for schema in self.schemas {
            let name = schema.name().to_string();
            if schemas.insert(name.clone(), Arc::new(schema)).is_some() {
                return Err(SchemaError::DuplicateModel(name));
            }
        }

        for schema in schemas.values() {
            for property in schema.properties() {
                if let Some(target) = property.kind.target() {
                    if !schemas.contains_key(target) {
                        return Err(SchemaError::UnresolvedTarget {
                            model: schema.name().to_string(),
                            property: property.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }

        debug!(
            schemas = schemas.len(),
            lookups = self.lookups.len(),
            "Schema registry built"
        );
        Ok(SchemaRegistry {
            schemas,
            lookups: self.lookups,
        })
    }
}
