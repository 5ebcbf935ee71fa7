//! Configuration loading and management

use crate::core::{Record, SortKey, ViewError};
use crate::entities::{Complaint, Guest, Reservation};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Configuration of one dashboard view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ViewConfig {
    /// Number of records per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,

    /// Ordering applied on mount (`field:asc` or `field:desc`)
    ///
    /// When omitted, the record type's own default ordering is used.
    #[serde(default)]
    pub default_sort: Option<String>,
}

fn default_page_size() -> usize {
    10
}

fn default_load_delay_ms() -> u64 {
    1000
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: None,
        }
    }
}

impl ViewConfig {
    pub fn new(page_size: usize, default_sort: impl Into<String>) -> Self {
        Self {
            page_size,
            default_sort: Some(default_sort.into()),
        }
    }

    /// Resolve the configured ordering for a record type
    pub fn sort_key<R: Record>(&self) -> crate::core::Result<SortKey<R::Field>> {
        match self.default_sort.as_deref().map(str::trim) {
            Some(expr) if !expr.is_empty() => SortKey::parse(expr),
            _ => Ok(R::default_sort()),
        }
    }
}

/// Complete configuration of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// Simulated latency of the mock record sources, in milliseconds
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,

    /// Bookings page (reservations)
    #[serde(default = "bookings_view")]
    #[validate(nested)]
    pub bookings: ViewConfig,

    /// Complaints page
    #[serde(default = "complaints_view")]
    #[validate(nested)]
    pub complaints: ViewConfig,

    /// Guests page
    #[serde(default = "guests_view")]
    #[validate(nested)]
    pub guests: ViewConfig,
}

fn bookings_view() -> ViewConfig {
    ViewConfig::new(default_page_size(), "created_at:desc")
}

fn complaints_view() -> ViewConfig {
    ViewConfig::new(default_page_size(), "created_at:desc")
}

fn guests_view() -> ViewConfig {
    ViewConfig::new(default_page_size(), "full_name:asc")
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing keys fall back to [`default_config`](Self::default_config).
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ViewError::from)?;
        config.check()?;
        Ok(config)
    }

    /// Validate page sizes and default orderings
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| ViewError::Config(e.to_string()))?;

        self.bookings.sort_key::<Reservation>()?;
        self.complaints.sort_key::<Complaint>()?;
        self.guests.sort_key::<Guest>()?;

        Ok(())
    }

    /// Simulated record source latency
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    /// Create the default configuration
    pub fn default_config() -> Self {
        Self {
            load_delay_ms: default_load_delay_ms(),
            bookings: bookings_view(),
            complaints: complaints_view(),
            guests: guests_view(),
        }
    }
}
