//! Core module containing the record abstraction and the view pipeline

pub mod criteria;
pub mod error;
pub mod field;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod store;
pub mod view;

pub use criteria::{ALL_SENTINEL, FilterCriteria, Predicate, Selection};
pub use error::{Result, ViewError};
pub use field::{FieldKind, FieldValue};
pub use pipeline::{count_matching, facet_counts, filter, paginate, sort, total_pages};
pub use query::{PageWindow, PaginationMeta, QueryParams, SortDirection, SortKey};
pub use record::{Record, RecordField};
pub use store::{LoadState, RecordSource, RecordStore};
pub use view::{DashboardView, PaginatedResponse, ViewEvent, ViewMode, ViewState, reduce};
