use std::fmt;

use serde::Serialize;

use super::error::{LoadError, QueryError};

pub const COL_SITE: &str = "Launch Site";
pub const COL_CLASS: &str = "class";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER: &str = "Booster Version Category";
pub const COL_FLIGHT: &str = "Flight Number";

/// Required source columns, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_SITE, COL_CLASS, COL_PAYLOAD, COL_BOOSTER, COL_FLIGHT];

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// `true` for `class == 1`.
    pub outcome: bool,
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    pub flight_number: i64,
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable launch table with pre-computed global bounds.
///
/// Only constructible from a non-empty record set, so `min_payload_kg <=
/// max_payload_kg` and `distinct_sites` is never empty.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<LaunchRecord>,
    min_payload_kg: f64,
    max_payload_kg: f64,
    /// Sites in order of first appearance.
    distinct_sites: Vec<String>,
    /// Booster categories in order of first appearance.
    booster_categories: Vec<String>,
}

impl RecordStore {
    /// Build the cached bounds from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut min_payload_kg = f64::INFINITY;
        let mut max_payload_kg = f64::NEG_INFINITY;
        let mut distinct_sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for (row, rec) in records.iter().enumerate() {
            if !rec.payload_mass_kg.is_finite() {
                return Err(LoadError::invalid(row, COL_PAYLOAD, "payload mass is not finite"));
            }
            min_payload_kg = min_payload_kg.min(rec.payload_mass_kg);
            max_payload_kg = max_payload_kg.max(rec.payload_mass_kg);

            if !distinct_sites.contains(&rec.site) {
                distinct_sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
        }

        Ok(RecordStore {
            records,
            min_payload_kg,
            max_payload_kg,
            distinct_sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload_kg(&self) -> f64 {
        self.min_payload_kg
    }

    pub fn max_payload_kg(&self) -> f64 {
        self.max_payload_kg
    }

    pub fn distinct_sites(&self) -> &[String] {
        &self.distinct_sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn contains_site(&self, name: &str) -> bool {
        self.distinct_sites.iter().any(|s| s == name)
    }

    /// Resolve `name` against the known sites, rejecting anything else.
    pub(crate) fn require_site(&self, name: &str) -> Result<(), QueryError> {
        if self.contains_site(name) {
            Ok(())
        } else {
            Err(QueryError::UnknownSite(name.to_string()))
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Query inputs
// ---------------------------------------------------------------------------

/// Which sites a chart covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "kind", content = "name")]
pub enum SiteSelector {
    #[default]
    AllSites,
    Site(String),
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::AllSites => write!(f, "All Sites"),
            SiteSelector::Site(name) => write!(f, "{name}"),
        }
    }
}

/// Inclusive payload window `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// `low <= high`; a NaN endpoint fails too.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.low <= self.high {
            Ok(())
        } else {
            Err(QueryError::InvalidRange {
                low: self.low,
                high: self.high,
            })
        }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Query outputs
// ---------------------------------------------------------------------------

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub label: String,
    pub count: usize,
}

/// Ordered slices backing a pie chart.
pub type CategoryBreakdown = Vec<CategorySlice>;

/// One scatter marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: bool,
    pub booster_version_category: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
        }
    }
}
