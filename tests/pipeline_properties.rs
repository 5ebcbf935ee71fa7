//! Property tests for the filter, sort and pagination stages

use kapulaga::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

const STATUSES: [ReservationStatus; 4] = [
    ReservationStatus::Confirmed,
    ReservationStatus::CheckedIn,
    ReservationStatus::Pending,
    ReservationStatus::Cancelled,
];

/// Reservations with ids 1..=n in order, random names, amounts and statuses
fn arb_reservations() -> impl Strategy<Value = Vec<Reservation>> {
    let template = kapulaga::entities::mock_reservations().unwrap().remove(0);

    prop::collection::vec(
        (0i64..15, "[a-z]{1,6}", prop::sample::select(STATUSES.to_vec())),
        0..40,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (amount, name, status))| {
                let mut reservation = template.clone();
                reservation.id = i as u64 + 1;
                reservation.guest_name = name;
                reservation.total_amount = amount * 500_000;
                reservation.status = status;
                reservation
            })
            .collect()
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria<ReservationField>> {
    (
        "[a-z]{0,2}",
        prop::option::of(prop::sample::select(STATUSES.to_vec())),
    )
        .prop_map(|(term, status)| {
            let mut criteria = FilterCriteria::new().with(Predicate::search(term));
            if let Some(status) = status {
                criteria.set(Predicate::equals(ReservationField::Status, status).unwrap());
            }
            criteria
        })
}

fn arb_sort_key() -> impl Strategy<Value = SortKey<ReservationField>> {
    (
        prop::sample::select(vec![
            ReservationField::TotalAmount,
            ReservationField::GuestName,
            ReservationField::Status,
        ]),
        any::<bool>(),
    )
        .prop_map(|(field, descending)| {
            if descending {
                SortKey::desc(field)
            } else {
                SortKey::asc(field)
            }
        })
}

fn ids(records: &[Reservation]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

fn arb_event() -> impl Strategy<Value = ViewEvent<ReservationField>> {
    prop_oneof![
        "[a-z]{0,3}".prop_map(ViewEvent::<ReservationField>::SearchChanged),
        Just(ViewEvent::FiltersReset),
        Just(ViewEvent::FilterCleared(ReservationField::Status)),
        Just(ViewEvent::SortRequested(ReservationField::TotalAmount)),
        Just(ViewEvent::SortRequested(ReservationField::GuestName)),
        (0usize..6).prop_map(ViewEvent::<ReservationField>::PageChanged),
        Just(ViewEvent::NextPage),
        Just(ViewEvent::PreviousPage),
        Just(ViewEvent::ModeChanged(ViewMode::Cards)),
    ]
}

proptest! {
    #[test]
    fn prop_filter_output_is_ordered_subsequence(
        records in arb_reservations(),
        criteria in arb_criteria(),
    ) {
        let filtered = filter(&records, &criteria);
        let out = ids(&filtered);

        // ids are increasing in the input, so a subsequence stays increasing
        prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(filtered.iter().all(|r| criteria.matches(r)));
        prop_assert_eq!(
            records.iter().filter(|r| criteria.matches(*r)).count(),
            filtered.len()
        );
    }

    #[test]
    fn prop_filter_is_idempotent(records in arb_reservations(), criteria in arb_criteria()) {
        let once = filter(&records, &criteria);
        let twice = filter(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_sort_is_a_permutation(records in arb_reservations(), key in arb_sort_key()) {
        let sorted = sort(&records, &key);
        prop_assert_eq!(sorted.len(), records.len());

        let mut a = ids(&records);
        let mut b = ids(&sorted);
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_sort_is_ordered_and_stable(records in arb_reservations(), key in arb_sort_key()) {
        let sorted = sort(&records, &key);

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0].value(key.field), pair[1].value(key.field));
            let ordering = kapulaga::core::pipeline::compare(&a, &b, key.direction);
            prop_assert!(ordering.is_le());
            if ordering.is_eq() {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_descending_is_reversed_ascending_without_ties(records in arb_reservations()) {
        let mut seen = HashSet::new();
        let distinct: Vec<Reservation> = records
            .into_iter()
            .filter(|r| seen.insert(r.total_amount))
            .collect();

        let asc = sort(&distinct, &SortKey::asc(ReservationField::TotalAmount));
        let mut desc = sort(&distinct, &SortKey::desc(ReservationField::TotalAmount));
        desc.reverse();
        prop_assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn prop_pages_partition_the_input(records in arb_reservations(), page_size in 1usize..15) {
        let pages = total_pages(records.len(), page_size);
        prop_assert!(pages >= 1);

        let mut joined = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&records, page, page_size);
            prop_assert!(slice.len() <= page_size);
            joined.extend(slice);
        }
        prop_assert_eq!(ids(&joined), ids(&records));
        prop_assert!(paginate(&records, pages + 1, page_size).is_empty());
    }

    #[test]
    fn prop_empty_input_has_one_empty_page(page_size in 1usize..100) {
        prop_assert_eq!(total_pages(0, page_size), 1);
        prop_assert!(paginate::<Reservation>(&[], 1, page_size).is_empty());
    }

    #[test]
    fn prop_reduce_keeps_page_in_range(events in prop::collection::vec(arb_event(), 0..25)) {
        let mut state = ViewState::new(Reservation::default_sort(), 10);

        for event in events {
            let resets = matches!(
                event,
                ViewEvent::SearchChanged(_)
                    | ViewEvent::FiltersReset
                    | ViewEvent::FilterCleared(_)
                    | ViewEvent::SortRequested(_)
            );
            state = reduce(state, event);

            prop_assert!(state.window.page >= 1);
            if resets {
                prop_assert_eq!(state.window.page, 1);
            }
        }
    }

    #[test]
    fn prop_projection_matches_the_stages(
        records in arb_reservations(),
        criteria in arb_criteria(),
        key in arb_sort_key(),
        page in 0usize..6,
    ) {
        let mut state = ViewState::new(key, 10);
        state.criteria = criteria;
        state.window = PageWindow::new(page, 10);

        let projected = state.project(&records);
        let expected = sort(&filter(&records, &state.criteria), &key);

        prop_assert_eq!(projected.pagination.total, expected.len());
        prop_assert!(projected.pagination.page <= projected.pagination.total_pages);
        prop_assert_eq!(
            ids(&projected.data),
            ids(&paginate(&expected, projected.pagination.page, 10))
        );
    }
}
