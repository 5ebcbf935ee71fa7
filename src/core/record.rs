//! Record traits defining the core abstraction for every dashboard view
//!
//! A record type exposes a closed set of fields through an enum implementing
//! [`RecordField`]. Each variant carries its wire name and kind, and the
//! record provides the typed accessor for it in [`Record::value`]. Field
//! references are therefore checked when a view is wired, never while the
//! pipeline runs.

use crate::core::error::{Result, ViewError};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::query::SortKey;
use std::fmt::Debug;
use std::hash::Hash;

/// A filterable/sortable field of a record type
///
/// Usually generated with [`record_fields!`](crate::record_fields).
pub trait RecordField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Plural resource name of the owning record type (e.g. "reservations")
    fn resource() -> &'static str;

    /// Every field, in declaration order
    fn all() -> &'static [Self];

    /// Wire name of the field (e.g. "total_amount")
    fn name(&self) -> &'static str;

    /// Kind of the values this field yields
    fn kind(&self) -> FieldKind;

    /// Allowed values of a categorical field; empty means unrestricted
    fn choices(&self) -> &'static [&'static str] {
        &[]
    }

    /// Resolve a wire name to a field
    fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| ViewError::UnknownField {
                resource: Self::resource(),
                field: name.to_string(),
            })
    }

    /// Interpret a raw string as a value of this field
    fn parse_value(&self, raw: &str) -> Result<FieldValue> {
        self.kind().parse_value(self.name(), raw, self.choices())
    }
}

/// A domain record held in a view's record store
pub trait Record: Clone + Send + Sync + 'static {
    /// The field enum of this record type
    type Field: RecordField;

    /// Identifier, unique within a store
    fn id(&self) -> u64;

    /// Typed accessor for a field
    fn value(&self, field: Self::Field) -> FieldValue;

    /// Text fields scanned by the free-text search
    fn search_fields() -> &'static [Self::Field];

    /// Ordering applied when a view is first mounted
    fn default_sort() -> SortKey<Self::Field>;

    /// Plural resource name (e.g. "reservations")
    fn resource_name() -> &'static str {
        <Self::Field as RecordField>::resource()
    }
}
