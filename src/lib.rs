//! # Kapulaga Views
//!
//! The data side of the Kapulaga hotel dashboard: tabular views over
//! reservations, complaints and guests, each driven by the same
//! filter → sort → paginate pipeline.
//!
//! ## Features
//!
//! - **Typed fields**: every record exposes a closed field enum, so unknown
//!   field names are rejected when a view is wired, never while it runs
//! - **Composable filters**: free-text search, equality with an "all"
//!   selector, single-field substring and inclusive ranges, ANDed together
//! - **Stable sorting**: ties keep their order, absent values sort last
//! - **Pagination metadata**: totals, page clamping, "showing X to Y of Z"
//! - **Pure state transitions**: user actions are events folded into a view
//!   state, which makes every view reproducible in tests
//! - **Configuration-Based**: page sizes and default orderings via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kapulaga::prelude::*;
//!
//! let config = DashboardConfig::default_config();
//! let source = InMemoryRecordSource::reservations()?.with_latency(config.load_delay());
//! let store = RecordStore::load(&source).await;
//!
//! let mut view = DashboardView::mount(store, &config.bookings)?;
//! view.dispatch(ViewEvent::SearchChanged("smith".to_string()));
//! let page = view.dispatch(ViewEvent::SortRequested(ReservationField::TotalAmount));
//!
//! println!(
//!     "Showing {} to {} of {}",
//!     page.pagination.first_item, page.pagination.last_item, page.pagination.total
//! );
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        criteria::{ALL_SENTINEL, FilterCriteria, Predicate, Selection},
        error::ViewError,
        field::{FieldKind, FieldValue},
        pipeline::{count_matching, facet_counts, filter, paginate, sort, total_pages},
        query::{PageWindow, PaginationMeta, QueryParams, SortDirection, SortKey},
        record::{Record, RecordField},
        store::{LoadState, RecordSource, RecordStore},
        view::{DashboardView, PaginatedResponse, ViewEvent, ViewMode, ViewState, reduce},
    };

    // === Macros ===
    pub use crate::{categorical_enum, record_fields};

    // === Records ===
    pub use crate::entities::{
        BookingSource, Complaint, ComplaintCategory, ComplaintField, ComplaintPriority,
        ComplaintStatus, Guest, GuestField, Reservation, ReservationField, ReservationStatus,
        RewardTier,
    };

    // === Storage ===
    pub use crate::storage::InMemoryRecordSource;

    // === Config ===
    pub use crate::config::{DashboardConfig, ViewConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
}
