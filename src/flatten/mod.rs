//! # Field Flattener
//!
//! Walks a [`Record`] and its [`Schema`] and produces a [`FlatFieldMap`] of dotted
//! placeholder names to formatted text.
//!
//! ## Naming
//!
//! | Property kind | Keys emitted |
//! |---------------|--------------|
//! | Scalar        | `name` |
//! | Reference     | `name` (display text), then `name.sub`, `name.sub.sub`, ... |
//! | Collection    | `name.sub` for every non-collection sub-field, values joined as `[a,b]` |
//!
//! ## Bounding the walk
//!
//! Reference chains are expanded one level per hop, at depths `1..=max_depth`. A chain can
//! therefore never produce a key longer than `max_depth + 1` segments. That counter is the
//! only thing that stops a cyclic schema (`Partner → Company → Partner → ...`) from
//! expanding forever.
//!
//! Collections are aggregated at the top level only. Inside an expanded reference a
//! collection sub-field gets a single key holding its `[id,id]` form, and inside a
//! collection, references render as their display text.
//!
//! ## Absent values
//!
//! A null reference still emits every immediate sub-field key (mapped to `""`) and stops
//! there. A null or empty collection emits every sub-field key mapped to `""`. Templates
//! can therefore rely on their placeholders always being replaced.

pub mod map;

pub use map::FlatFieldMap;

use crate::format::{Localizer, ValueFormatter};
use crate::model::{PropertyDescriptor, PropertyKind, Record, Schema, SchemaIntrospector, Value};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Flattens records into merge fields.
#[derive(Clone)]
pub struct FieldFlattener {
    introspector: Arc<dyn SchemaIntrospector>,
    formatter: ValueFormatter,
    max_depth: usize,
}

impl FieldFlattener {
    pub fn new(introspector: Arc<dyn SchemaIntrospector>, localizer: Arc<dyn Localizer>) -> Self {
        let formatter = ValueFormatter::new(introspector.clone(), localizer);
        Self {
            introspector,
            formatter,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Flattens `record` using `schema`'s property order.
    pub fn flatten(&self, schema: &Schema, record: &Record) -> FlatFieldMap {
        let mut fields = FlatFieldMap::new();

        for property in schema.properties() {
            let value = record.get(&property.name);
            match &property.kind {
                PropertyKind::Scalar => {
                    fields.insert(property.name.as_str(), self.formatter.format(property, value));
                }
                PropertyKind::Reference { target } => {
                    fields.insert(property.name.as_str(), self.formatter.format(property, value));
                    if let Some(target) = self.target_schema(schema, property, target) {
                        self.expand_reference(
                            &mut fields,
                            &property.name,
                            &target,
                            value.as_record(),
                            1,
                        );
                    }
                }
                PropertyKind::Collection { target } => {
                    if let Some(target) = self.target_schema(schema, property, target) {
                        self.flatten_collection(&mut fields, property, &target, value);
                    }
                }
            }
        }

        debug!(
            model = schema.name(),
            id = record.id(),
            fields = fields.len(),
            "Flattened record"
        );
        fields
    }

    fn expand_reference(
        &self,
        fields: &mut FlatFieldMap,
        prefix: &str,
        schema: &Schema,
        record: Option<&Record>,
        depth: usize,
    ) {
        if depth > self.max_depth {
            return;
        }

        for field in schema.properties() {
            let key = format!("{prefix}.{}", field.name);

            let Some(record) = record else {
                fields.insert(key, String::new());
                continue;
            };

            let value = record.get(&field.name);
            fields.insert(key.as_str(), self.formatter.format(field, value));

            // Collections keep their `[id,...]` form here and are never descended into.
            if let PropertyKind::Reference { target } = &field.kind {
                if let Some(target) = self.target_schema(schema, field, target) {
                    self.expand_reference(fields, &key, &target, value.as_record(), depth + 1);
                }
            }
        }
    }

    fn flatten_collection(
        &self,
        fields: &mut FlatFieldMap,
        property: &PropertyDescriptor,
        schema: &Schema,
        value: &Value,
    ) {
        let elements = value.as_collection();

        for field in schema.properties() {
            if field.kind.is_collection() {
                continue;
            }
            let key = format!("{}.{}", property.name, field.name);
            if elements.is_empty() {
                fields.insert(key, String::new());
                continue;
            }

            // References format through their display field, so nothing below an element
            // is ever expanded.
            let parts: Vec<String> = elements
                .iter()
                .map(|element| self.formatter.format(field, element.get(&field.name)))
                .collect();
            fields.insert(key, format!("[{}]", parts.join(",")));
        }
    }

    fn target_schema(
        &self,
        owner: &Schema,
        property: &PropertyDescriptor,
        target: &str,
    ) -> Option<Arc<Schema>> {
        let schema = self.introspector.schema(target);
        if schema.is_none() {
            warn!(
                model = owner.name(),
                property = %property.name,
                target,
                "Target schema not registered, skipping sub-fields"
            );
        }
        schema
    }
}
