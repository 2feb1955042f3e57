//! # Value Formatter
//!
//! Maps a raw [`Value`] plus its [`PropertyDescriptor`] to the text that ends up in a
//! document. Rules are applied in priority order:
//!
//! 1. null → `""`
//! 2. code-lookup table → translated title, or the raw code if the table has no entry
//! 3. booleans → translated `"True"` / `"False"`
//! 4. decimals → 2 places, half-even, plain notation (`2.345` → `"2.34"`)
//! 5. dates → `dd/MM/yyyy`
//! 6. date-times → ISO-8601 with the shortest fraction (`2024-03-01T09:30:00.25`)
//! 7. everything else → the default string form; references show their display field
//!
//! Formatting never fails. An unexpected value shape simply takes rule 7.

pub mod localizer;

pub use localizer::{Localizer, NoTranslation, Translations};

use crate::model::{PropertyDescriptor, Record, SchemaIntrospector, Value};
use chrono::{NaiveDateTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DECIMAL_PLACES: u32 = 2;

/// Formats values for merge fields.
///
/// Holds the two external capabilities formatting depends on: lookup tables (through the
/// schema introspector) and translation. Cheap to clone.
#[derive(Clone)]
pub struct ValueFormatter {
    introspector: Arc<dyn SchemaIntrospector>,
    localizer: Arc<dyn Localizer>,
}

impl ValueFormatter {
    pub fn new(introspector: Arc<dyn SchemaIntrospector>, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            introspector,
            localizer,
        }
    }

    pub fn format(&self, property: &PropertyDescriptor, value: &Value) -> String {
        if value.is_null() {
            return String::new();
        }

        if let Some(table) = property.lookup.as_deref() {
            let code = value.to_string();
            return match self.introspector.lookup_title(table, &code) {
                Some(title) => self.localizer.translate(&title),
                None => code,
            };
        }

        match value {
            Value::Bool(true) => self.localizer.translate("True"),
            Value::Bool(false) => self.localizer.translate("False"),
            Value::Decimal(d) => format_decimal(d),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::DateTime(dt) => format_date_time(dt),
            Value::Reference(record) => self.display(property, record),
            other => other.to_string(),
        }
    }

    /// Renders a referenced record as text: its display field if the property names one,
    /// otherwise its id.
    pub fn display(&self, property: &PropertyDescriptor, record: &Record) -> String {
        let Some(field) = property.display_field.as_deref() else {
            return record.id().to_string();
        };

        let value = record.get(field);
        // Display fields that are themselves links stop at the id.
        if matches!(value, Value::Reference(_) | Value::Collection(_)) {
            return value.to_string();
        }

        match self.introspector.schema(record.model()) {
            Some(schema) => match schema.property(field) {
                Some(target) => self.format(target, value),
                None => self.format(&PropertyDescriptor::scalar(field), value),
            },
            None => self.format(&PropertyDescriptor::scalar(field), value),
        }
    }
}

/// ISO-8601 local date-time. The fraction is omitted when zero and otherwise printed
/// without trailing zeros.
pub fn format_date_time(value: &NaiveDateTime) -> String {
    let mut text = value.format(DATE_TIME_FORMAT).to_string();
    let nanos = value.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

/// Rounds half-to-even to two places and pads to exactly two fractional digits.
pub fn format_decimal(value: &Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(DECIMAL_PLACES);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}
