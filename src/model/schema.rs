//! Runtime schema descriptions.
//!
//! A [`Schema`] is an ordered list of [`PropertyDescriptor`]s. The order matters: it is the
//! order in which merge fields are emitted.

use serde::{Deserialize, Serialize};

/// The shape of a property.
///
/// Reference and collection kinds carry the model name of their target schema. Targets
/// may point back at the owning model (directly or through other models).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyKind {
    /// A plain value (text, number, date, boolean, selection code).
    Scalar,
    /// A one-to-one link to another record.
    Reference { target: String },
    /// An ordered one-to-many link to other records.
    Collection { target: String },
}

impl PropertyKind {
    /// The model name this property points at, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            PropertyKind::Scalar => None,
            PropertyKind::Reference { target } | PropertyKind::Collection { target } => {
                Some(target)
            }
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, PropertyKind::Collection { .. })
    }
}

/// Describes one named property of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,

    #[serde(flatten)]
    pub kind: PropertyKind,

    /// Code-lookup table used to turn stored codes into titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<String>,

    /// Property of the target record shown when this reference is rendered as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
}

impl PropertyDescriptor {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::with_kind(name, PropertyKind::Scalar)
    }

    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            PropertyKind::Reference {
                target: target.into(),
            },
        )
    }

    pub fn collection(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            PropertyKind::Collection {
                target: target.into(),
            },
        )
    }

    fn with_kind(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            lookup: None,
            display_field: None,
        }
    }

    /// Attaches a code-lookup table.
    pub fn with_lookup(mut self, table: impl Into<String>) -> Self {
        self.lookup = Some(table.into());
        self
    }

    /// Sets the target property used to render this reference as text.
    pub fn with_display_field(mut self, field: impl Into<String>) -> Self {
        self.display_field = Some(field.into());
        self
    }
}

/// Immutable description of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    properties: Vec<PropertyDescriptor>,
}

impl Schema {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// The model name (e.g. `SaleOrder`). Also used for output file names.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}
