//! Filter predicates and the criteria set narrowing a view
//!
//! Predicates are validated when they are built: a range on a text field,
//! a categorical value outside its choices or an unknown field name never
//! reaches the filter stage.

use crate::core::error::{Result, ViewError};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::record::{Record, RecordField};
use serde_json::Value;
use std::collections::HashMap;

/// Value of the match-everything selector in dropdown filters
pub const ALL_SENTINEL: &str = "all";

/// Selection of an equality filter
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The "all" selector: the predicate is disabled
    All,
    /// Only records whose field equals this value
    Only(FieldValue),
}

/// A single filter predicate over records with fields `F`
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<F> {
    /// Case-insensitive substring over the record's search fields
    Search(String),

    /// Exact match on one categorical, boolean or text field
    Equals { field: F, selection: Selection },

    /// Case-insensitive substring on one text field
    Contains { field: F, term: String },

    /// Inclusive range on one number or date field; `None` is unbounded
    Range {
        field: F,
        min: Option<FieldValue>,
        max: Option<FieldValue>,
    },
}

impl<F: RecordField> Predicate<F> {
    /// Free-text search predicate
    pub fn search(term: impl Into<String>) -> Self {
        Predicate::Search(term.into())
    }

    /// Equality predicate with a typed value
    pub fn equals(field: F, value: impl Into<FieldValue>) -> Result<Self> {
        Self::check_kind(
            field,
            "equality",
            &[FieldKind::Categorical, FieldKind::Boolean, FieldKind::Text],
        )?;

        let value = value.into();
        if !field.kind().accepts(&value) {
            return Err(ViewError::invalid_value(
                field.name(),
                value.to_string(),
                format!("expected a {:?} value", field.kind()),
            ));
        }
        if let FieldValue::Text(text) = &value {
            let choices = field.choices();
            if !choices.is_empty() && !choices.contains(&text.as_str()) {
                return Err(ViewError::invalid_value(
                    field.name(),
                    text.clone(),
                    format!("expected one of {}", choices.join(", ")),
                ));
            }
        }

        Ok(Predicate::Equals {
            field,
            selection: Selection::Only(value),
        })
    }

    /// Equality predicate from a dropdown value; `"all"` disables it
    pub fn parse_equals(field: F, raw: &str) -> Result<Self> {
        if raw.trim() == ALL_SENTINEL {
            Self::check_kind(
                field,
                "equality",
                &[FieldKind::Categorical, FieldKind::Boolean, FieldKind::Text],
            )?;
            return Ok(Predicate::Equals {
                field,
                selection: Selection::All,
            });
        }
        Self::equals(field, field.parse_value(raw)?)
    }

    /// Substring predicate on a single text field
    pub fn contains(field: F, term: impl Into<String>) -> Result<Self> {
        Self::check_kind(field, "substring", &[FieldKind::Text, FieldKind::Categorical])?;
        Ok(Predicate::Contains {
            field,
            term: term.into(),
        })
    }

    /// Inclusive range predicate with typed bounds
    pub fn range(field: F, min: Option<FieldValue>, max: Option<FieldValue>) -> Result<Self> {
        Self::check_kind(field, "range", &[FieldKind::Number, FieldKind::Date])?;

        for bound in min.iter().chain(max.iter()) {
            if !field.kind().accepts(bound) {
                return Err(ViewError::invalid_value(
                    field.name(),
                    bound.to_string(),
                    format!("expected a {:?} bound", field.kind()),
                ));
            }
        }

        Ok(Predicate::Range { field, min, max })
    }

    /// Range predicate from raw inputs; empty inputs are unbounded
    pub fn parse_range(field: F, min: Option<&str>, max: Option<&str>) -> Result<Self> {
        let parse = |raw: Option<&str>| -> Result<Option<FieldValue>> {
            match raw.map(str::trim) {
                None | Some("") => Ok(None),
                Some(raw) => field.parse_value(raw).map(Some),
            }
        };
        Self::range(field, parse(min)?, parse(max)?)
    }

    /// The field this predicate applies to (`None` for search)
    pub fn field(&self) -> Option<F> {
        match self {
            Predicate::Search(_) => None,
            Predicate::Equals { field, .. }
            | Predicate::Contains { field, .. }
            | Predicate::Range { field, .. } => Some(*field),
        }
    }

    /// Short name of the predicate kind
    pub fn label(&self) -> &'static str {
        match self {
            Predicate::Search(_) => "search",
            Predicate::Equals { .. } => "equality",
            Predicate::Contains { .. } => "substring",
            Predicate::Range { .. } => "range",
        }
    }

    /// Whether the predicate is the match-everything sentinel
    pub fn is_sentinel(&self) -> bool {
        match self {
            Predicate::Search(term) => term.trim().is_empty(),
            Predicate::Equals { selection, .. } => *selection == Selection::All,
            Predicate::Contains { term, .. } => term.trim().is_empty(),
            Predicate::Range { min, max, .. } => min.is_none() && max.is_none(),
        }
    }

    /// Test one record
    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        if self.is_sentinel() {
            return true;
        }

        match self {
            Predicate::Search(term) => {
                let needle = term.trim().to_lowercase();
                R::search_fields()
                    .iter()
                    .any(|field| record.value(*field).contains_lowercase(&needle))
            }
            Predicate::Equals { field, selection } => {
                matches!(selection, Selection::Only(expected) if record.value(*field) == *expected)
            }
            Predicate::Contains { field, term } => record
                .value(*field)
                .contains_lowercase(&term.trim().to_lowercase()),
            Predicate::Range { field, min, max } => {
                let value = record.value(*field);
                if value.is_null() {
                    return false;
                }
                min.as_ref().is_none_or(|min| value.natural_cmp(min).is_ge())
                    && max.as_ref().is_none_or(|max| value.natural_cmp(max).is_le())
            }
        }
    }

    fn slot(&self) -> (Option<F>, &'static str) {
        (self.field(), self.label())
    }

    fn check_kind(field: F, predicate: &'static str, allowed: &[FieldKind]) -> Result<()> {
        if allowed.contains(&field.kind()) {
            Ok(())
        } else {
            Err(ViewError::UnsupportedPredicate {
                field: field.name(),
                predicate,
            })
        }
    }
}

/// The set of predicates narrowing a view, ANDed together
///
/// Holds at most one predicate per (field, predicate kind); setting a
/// predicate replaces the previous one in its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria<F> {
    predicates: Vec<Predicate<F>>,
}

impl<F> Default for FilterCriteria<F> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<F: RecordField> FilterCriteria<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, predicate: Predicate<F>) -> Self {
        self.set(predicate);
        self
    }

    /// Install a predicate, replacing the one in the same slot
    pub fn set(&mut self, predicate: Predicate<F>) {
        let slot = predicate.slot();
        match self.predicates.iter_mut().find(|p| p.slot() == slot) {
            Some(existing) => *existing = predicate,
            None => self.predicates.push(predicate),
        }
    }

    /// Replace the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.set(Predicate::search(term));
    }

    /// Current search term, if any
    pub fn search_term(&self) -> Option<&str> {
        self.predicates.iter().find_map(|p| match p {
            Predicate::Search(term) => Some(term.as_str()),
            _ => None,
        })
    }

    /// Remove every predicate on a field; returns whether any was removed
    pub fn clear(&mut self, field: F) -> bool {
        let before = self.predicates.len();
        self.predicates.retain(|p| p.field() != Some(field));
        before != self.predicates.len()
    }

    /// Remove every predicate, including the search term
    pub fn reset(&mut self) {
        self.predicates.clear();
    }

    pub fn predicates(&self) -> &[Predicate<F>] {
        &self.predicates
    }

    /// Predicates that actually narrow the view
    pub fn active(&self) -> impl Iterator<Item = &Predicate<F>> {
        self.predicates.iter().filter(|p| !p.is_sentinel())
    }

    /// Number of predicates that actually narrow the view
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Whether the criteria match every record
    pub fn is_unrestricted(&self) -> bool {
        self.active_count() == 0
    }

    /// Test one record against every predicate
    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.active().all(|p| p.matches(record))
    }

    /// Build criteria from a JSON filter object
    ///
    /// # Format
    /// - `"field": value` exact match (`"all"` disables it)
    /// - `"field>=": value` / `"field<=": value` inclusive range bounds
    /// - `"field~": "term"` case-insensitive substring
    pub fn from_json(filter: &Value) -> Result<Self> {
        let Some(obj) = filter.as_object() else {
            return Err(ViewError::InvalidQuery(
                "filter must be a JSON object".to_string(),
            ));
        };

        let mut criteria = Self::new();
        let mut ranges: Vec<F> = Vec::new();
        let mut bounds: HashMap<F, (Option<FieldValue>, Option<FieldValue>)> = HashMap::new();

        for (key, value) in obj {
            if let Some(name) = key.strip_suffix(">=") {
                let field = F::parse(name)?;
                let bound = field.kind().parse_json(field.name(), value, field.choices())?;
                if !ranges.contains(&field) {
                    ranges.push(field);
                }
                bounds.entry(field).or_default().0 = Some(bound);
            } else if let Some(name) = key.strip_suffix("<=") {
                let field = F::parse(name)?;
                let bound = field.kind().parse_json(field.name(), value, field.choices())?;
                if !ranges.contains(&field) {
                    ranges.push(field);
                }
                bounds.entry(field).or_default().1 = Some(bound);
            } else if let Some(name) = key.strip_suffix('~') {
                let field = F::parse(name)?;
                let term = value.as_str().ok_or_else(|| {
                    ViewError::invalid_value(field.name(), value.to_string(), "expected a string")
                })?;
                criteria.set(Predicate::contains(field, term)?);
            } else {
                let field = F::parse(key)?;
                let predicate = match value {
                    Value::String(raw) => Predicate::parse_equals(field, raw)?,
                    other => Predicate::equals(
                        field,
                        field.kind().parse_json(field.name(), other, field.choices())?,
                    )?,
                };
                criteria.set(predicate);
            }
        }

        for field in ranges {
            let (min, max) = bounds.remove(&field).unwrap_or_default();
            criteria.set(Predicate::range(field, min, max)?);
        }

        Ok(criteria)
    }
}
