//! # Entity Metadata & Field Resolution
//!
//! Filter, sort and search directives reference fields by their *logical*
//! (JSON-facing) name. The SQL needs the *physical* column reference, which
//! may be qualified with a table alias (`t.last_name`). [`EntityMetadata`] is
//! the lookup table between the two.
//!
//! Build it once per entity type at startup and share it between compile
//! calls:
//!
//! ```rust
//! use paginate_sql::{EntityMetadata, entity_metadata};
//!
//! let users = entity_metadata! {
//!     "id" => "u.id",
//!     "name" => "u.name",
//!     "lastName" => "u.last_name",
//! };
//! assert_eq!(users.resolve("lastName"), Some("u.last_name"));
//! assert_eq!(users.resolve("password"), None);
//!
//! // Struct-tag style pairs: modifiers after the comma are ignored
//! let tagged = EntityMetadata::from_tags(&[("name,omitempty", "name"), ("-", "secret")]);
//! assert_eq!(tagged.resolve("name"), Some("name"));
//! assert_eq!(tagged.len(), 1);
//! ```
//!
//! A failed lookup is not an error. Callers drop whatever referenced the
//! unknown field, so arbitrary query parameters cannot break a page request.

use serde::Serialize;

use crate::errors::MetadataError;

/// Tag value that hides a field from filtering entirely
const SKIP_TAG: &str = "-";

/// One logical-name → physical-column pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Name used by API clients (e.g. `lastName`)
    pub logical: String,
    /// Column reference emitted in SQL (e.g. `t.last_name`)
    pub column: String,
}

impl FieldMapping {
    #[must_use]
    pub fn new(logical: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            logical: logical.into(),
            column: column.into(),
        }
    }
}

/// Ordered, read-only description of one row-producing type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMetadata {
    fields: Vec<FieldMapping>,
}

impl EntityMetadata {
    #[must_use]
    pub fn new(fields: Vec<FieldMapping>) -> Self {
        Self { fields }
    }

    /// Build metadata from `(logical_tag, column)` pairs.
    ///
    /// The logical tag follows the struct-tag convention: anything after the
    /// first comma is a modifier (`"name,omitempty"` → `name`). Tags of `-` and
    /// empty logical names are skipped.
    #[must_use]
    pub fn from_tags(tags: &[(&str, &str)]) -> Self {
        tags.iter()
            .filter_map(|(tag, column)| {
                let logical = tag_name(tag)?;
                Some(FieldMapping::new(logical, *column))
            })
            .collect()
    }

    /// Derive logical names from a serializable record.
    ///
    /// The sample is serialized with serde, so `#[serde(rename...)]`
    /// attributes decide the logical names. Each key maps to the column given
    /// in `columns` for that key, or to the key itself. Fields skipped during
    /// serialization (e.g. `skip_serializing_if` on a `None`) are not
    /// registered, so pass a fully populated sample.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotARecord`] when `sample` is not a struct or
    /// map, and [`MetadataError::Serialize`] when serialization fails.
    pub fn from_record<T: Serialize + ?Sized>(
        sample: &T,
        columns: &[(&str, &str)],
    ) -> Result<Self, MetadataError> {
        let serde_json::Value::Object(map) = serde_json::to_value(sample)? else {
            return Err(MetadataError::not_a_record::<T>());
        };

        Ok(map
            .keys()
            .filter(|key| !key.is_empty())
            .map(|key| {
                let column = columns
                    .iter()
                    .find(|(logical, _)| *logical == key.as_str())
                    .map_or(key.as_str(), |(_, column)| *column);
                FieldMapping::new(key.as_str(), column)
            })
            .collect())
    }

    /// Resolve a logical field name to its physical column.
    ///
    /// Exact match only. Empty names never resolve.
    #[must_use]
    pub fn resolve(&self, logical: &str) -> Option<&str> {
        if logical.is_empty() {
            return None;
        }
        self.fields
            .iter()
            .find(|field| field.logical == logical)
            .map(|field| field.column.as_str())
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldMapping> for EntityMetadata {
    fn from_iter<I: IntoIterator<Item = FieldMapping>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Logical name of a struct-style tag, or `None` when the field is hidden
fn tag_name(tag: &str) -> Option<&str> {
    let name = tag.split(',').next().unwrap_or_default().trim();
    if name.is_empty() || name == SKIP_TAG {
        None
    } else {
        Some(name)
    }
}

/// Declare [`EntityMetadata`] as `logical => column` pairs.
///
/// Usage: `entity_metadata! { "name" => "t.name", "lastName" => "t.last_name" }`
#[macro_export]
macro_rules! entity_metadata {
    ($($logical:expr => $column:expr),* $(,)?) => {
        $crate::EntityMetadata::new(vec![
            $($crate::FieldMapping::new($logical, $column),)*
        ])
    };
}
