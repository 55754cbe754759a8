//! Mapping raw documents onto entity descriptors.
//!
//! Each stored document is first shaped against the entity's
//! [`EntityDescriptor`]: declared fields are type-checked, defaults are
//! filled in, missing required fields are reported, and everything the
//! descriptor does not declare (`_id`, `__v`, pipeline extras) is dropped.
//! The shaped document is then deserialized into the record struct.
//!
//! What happens to a document that does not fit is decided by
//! [`DecodePolicy`].

use std::str::FromStr;

use crm_types::{Entity, EntityDescriptor, FieldDefault, FieldKind};
use mongodb::bson::{self, Bson, Document};

use crate::error::DbError;

/// How `fetch_all` treats a document that does not fit its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Fail the whole read on the first malformed document.
    Strict,
    /// Drop malformed documents with a warning and return the rest.
    ///
    /// The sync pipeline upserts whole CRM rows, so collections routinely
    /// hold documents without a report's required fields.
    #[default]
    Skip,
}

impl DecodePolicy {
    /// Lowercase name as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Skip => "skip",
        }
    }
}

impl FromStr for DecodePolicy {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "skip" => Ok(Self::Skip),
            other => Err(DbError::Config(format!(
                "unknown decode policy `{other}` (expected `strict` or `skip`)"
            ))),
        }
    }
}

impl core::fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape `raw` to the fields declared by `descriptor`.
///
/// # Errors
///
/// Returns a human-readable reason if a declared field has the wrong type
/// or a required field is missing.
pub fn shape_document(descriptor: &EntityDescriptor, raw: &Document) -> Result<Document, String> {
    let mut shaped = Document::new();

    for field in descriptor.fields {
        let value = match raw.get(field.name) {
            Some(Bson::Null) | None => field.default.map(default_value),
            Some(value) if matches_kind(value, field.kind) => Some(value.clone()),
            Some(value) => {
                return Err(format!(
                    "field `{}` expected {}, found {:?}",
                    field.name,
                    field.kind,
                    value.element_type()
                ));
            }
        };

        match value {
            Some(value) => {
                shaped.insert(field.name, value);
            }
            None if field.required => {
                return Err(format!("missing required field `{}`", field.name));
            }
            None => {}
        }
    }

    Ok(shaped)
}

/// Shape and deserialize a single document into `E`.
///
/// # Errors
///
/// Returns a human-readable reason if the document does not fit.
pub fn decode_document<E: Entity>(raw: &Document) -> Result<E, String> {
    let shaped = shape_document(&E::DESCRIPTOR, raw)?;
    bson::from_document(shaped).map_err(|e| e.to_string())
}

/// Decode every document of a collection according to `policy`.
///
/// Output order follows input order.
///
/// # Errors
///
/// Under [`DecodePolicy::Strict`], returns [`DbError::Decode`] for the
/// first document that does not fit. Under [`DecodePolicy::Skip`] this
/// never fails.
pub fn decode_all<E: Entity>(
    documents: Vec<Document>,
    policy: DecodePolicy,
) -> Result<Vec<E>, DbError> {
    let collection = E::DESCRIPTOR.collection;
    let mut records = Vec::with_capacity(documents.len());

    for raw in documents {
        match decode_document::<E>(&raw) {
            Ok(record) => records.push(record),
            Err(reason) => {
                let document_id = document_id(&raw);
                match policy {
                    DecodePolicy::Strict => {
                        return Err(DbError::Decode {
                            collection: collection.to_owned(),
                            document_id,
                            reason,
                        });
                    }
                    DecodePolicy::Skip => {
                        tracing::warn!(
                            collection,
                            document_id = %document_id,
                            reason = %reason,
                            "Skipping malformed document"
                        );
                    }
                }
            }
        }
    }

    Ok(records)
}

fn matches_kind(value: &Bson, kind: FieldKind) -> bool {
    match kind {
        FieldKind::String => matches!(value, Bson::String(_)),
        FieldKind::Number => matches!(value, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)),
    }
}

fn default_value(default: FieldDefault) -> Bson {
    match default {
        FieldDefault::Str(s) => Bson::String(s.to_owned()),
    }
}

fn document_id(raw: &Document) -> String {
    raw.get("_id")
        .map_or_else(|| String::from("<no _id>"), ToString::to_string)
}
