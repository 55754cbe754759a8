//! Declarative entity descriptors.
//!
//! An [`EntityDescriptor`] pairs a backing collection name with the set of
//! fields a record of that kind carries. Descriptors are plain `const` data:
//! the repository layer uses them to shape raw store documents before
//! deserialization, and the API layer never needs to know about them.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Semantic type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A UTF-8 string.
    String,
    /// Any numeric value (integer or floating point).
    Number,
}

impl FieldKind {
    /// Lowercase name used in log and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value substituted for a field that is absent from a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    /// A string default.
    Str(&'static str),
}

impl FieldDefault {
    /// The [`FieldKind`] this default satisfies.
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Str(_) => FieldKind::String,
        }
    }
}

/// A single declared field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field name as stored in the collection and emitted in JSON.
    pub name: &'static str,
    /// Semantic type.
    pub kind: FieldKind,
    /// Whether every stored document must carry this field.
    pub required: bool,
    /// Value used when the stored document omits the field.
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    /// A field every document must carry.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    /// A field that may be absent.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    /// Attach a default value, applied when the field is absent or null.
    #[must_use]
    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }
}

/// Metadata binding a record type to its backing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityDescriptor {
    /// Logical record name (e.g. `Deal`).
    pub name: &'static str,
    /// Backing collection name (e.g. `deals`).
    pub collection: &'static str,
    /// Declared fields in output order.
    pub fields: &'static [FieldSpec],
}

impl EntityDescriptor {
    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate over the fields every document must carry.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Names of all declared fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// A record type that can be read from a collection.
///
/// Implementors declare their shape once in [`Entity::DESCRIPTOR`]; the
/// serde field names of the implementing struct must match the descriptor's
/// field names.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Shape and backing collection of this record type.
    const DESCRIPTOR: EntityDescriptor;
}
