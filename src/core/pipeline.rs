//! The pure stages of a view: filter, sort, paginate
//!
//! Every function here is side-effect free and leaves its input untouched.
//! Views hold tens of records, so the whole pipeline is recomputed on each
//! change instead of being maintained incrementally.

use crate::core::criteria::{FilterCriteria, Predicate};
use crate::core::field::FieldValue;
use crate::core::query::{SortDirection, SortKey};
use crate::core::record::{Record, RecordField};
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Keep the records matching every active predicate, in input order
pub fn filter<R: Record>(records: &[R], criteria: &FilterCriteria<R::Field>) -> Vec<R> {
    let filtered: Vec<R> = records
        .iter()
        .filter(|record| criteria.matches(*record))
        .cloned()
        .collect();

    tracing::debug!(
        resource = R::resource_name(),
        input = records.len(),
        output = filtered.len(),
        predicates = criteria.active_count(),
        "filter stage"
    );

    filtered
}

/// Return a copy of the records ordered by the sort key
///
/// The sort is stable: records equal under the key keep their relative
/// order. Absent values sort after all present values in both directions.
pub fn sort<R: Record>(records: &[R], key: &SortKey<R::Field>) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(&a.value(key.field), &b.value(key.field), key.direction));

    tracing::debug!(
        resource = R::resource_name(),
        sort = %key,
        count = sorted.len(),
        "sort stage"
    );

    sorted
}

/// Compare two field values under a direction, absent values last
pub fn compare(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.natural_cmp(b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Return the records of one page (1-based)
///
/// The slice `[(page-1)*page_size, page*page_size)` clamped to the input;
/// empty when `page` is 0 or past the last page.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= records.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(records.len());

    records[start..end].to_vec()
}

/// Number of pages needed for `count` records, at least 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Count records per value of a field, in first-seen order
///
/// Absent values are counted under `"none"`.
pub fn facet_counts<R: Record>(records: &[R], field: R::Field) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for record in records {
        *counts.entry(record.value(field).facet_key()).or_insert(0) += 1;
    }

    tracing::debug!(
        resource = R::resource_name(),
        field = field.name(),
        buckets = counts.len(),
        "facet counts"
    );

    counts
}

/// Count records satisfying a single predicate
pub fn count_matching<R: Record>(records: &[R], predicate: &Predicate<R::Field>) -> usize {
    records.iter().filter(|record| predicate.matches(*record)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::test_support::{Item, ItemField, items};

    fn ids(records: &[Item]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_filter_preserves_order() {
        let criteria = FilterCriteria::new()
            .with(Predicate::parse_equals(ItemField::Tag, "blue").unwrap());
        assert_eq!(ids(&filter(&items(), &criteria)), vec![2, 5]);
    }

    #[test]
    fn test_filter_empty_input() {
        let criteria = FilterCriteria::new().with(Predicate::search("lamp"));
        assert!(filter::<Item>(&[], &criteria).is_empty());
    }

    #[test]
    fn test_sort_ascending_with_absent_last() {
        let sorted = sort(&items(), &SortKey::asc(ItemField::Score));
        // 2 and 5 tie on 10 and keep their input order
        assert_eq!(ids(&sorted), vec![2, 5, 4, 1, 3]);
    }

    #[test]
    fn test_sort_descending_keeps_absent_last_and_ties_stable() {
        let sorted = sort(&items(), &SortKey::desc(ItemField::Score));
        assert_eq!(ids(&sorted), vec![1, 4, 2, 5, 3]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let input = items();
        let _ = sort(&input, &SortKey::desc(ItemField::Name));
        assert_eq!(input, items());
    }

    #[test]
    fn test_sort_text() {
        let sorted = sort(&items(), &SortKey::asc(ItemField::Name));
        assert_eq!(ids(&sorted), vec![3, 2, 1, 5, 4]);
    }

    #[test]
    fn test_paginate_slices() {
        let data: Vec<u32> = (1..=13).collect();
        assert_eq!(paginate(&data, 1, 10), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&data, 2, 10), vec![11, 12, 13]);
        assert!(paginate(&data, 3, 10).is_empty());
        assert!(paginate(&data, 0, 10).is_empty());
    }

    #[test]
    fn test_paginate_empty() {
        let data: Vec<u32> = Vec::new();
        assert!(paginate(&data, 1, 10).is_empty());
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(13, 10), 2);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn test_facet_counts() {
        let counts = facet_counts(&items(), ItemField::Tag);
        let pairs: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, vec![("red", 2), ("blue", 2), ("green", 1)]);

        let scores = facet_counts(&items(), ItemField::Score);
        assert_eq!(scores.get("none"), Some(&1));
        assert_eq!(scores.get("10"), Some(&2));
    }

    #[test]
    fn test_count_matching() {
        let red = Predicate::parse_equals(ItemField::Tag, "red").unwrap();
        assert_eq!(count_matching(&items(), &red), 2);
    }
}
