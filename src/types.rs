//! Core metric types for the overview refresh pipeline
//!
//! A refresh always produces a complete [`MetricSet`]: six records, one per
//! [`MetricKind`], in fixed display order. There is no partial set - a fetch
//! either maps the full set or fails, and unknown values are represented by
//! an empty display string rather than absence.

use serde::{Deserialize, Serialize};

use crate::error::RefreshError;

/// Number of metrics in a complete set
pub const METRIC_COUNT: usize = 6;

/// The fixed set of overview metrics, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Mrr,
    Subscriptions,
    Trials,
    Revenue,
    Users,
    Installs,
}

impl MetricKind {
    /// All kinds in display order: MRR, Subscriptions, Trials, Revenue, Users, Installs
    pub const ALL: [MetricKind; METRIC_COUNT] = [
        MetricKind::Mrr,
        MetricKind::Subscriptions,
        MetricKind::Trials,
        MetricKind::Revenue,
        MetricKind::Users,
        MetricKind::Installs,
    ];

    /// Position of this kind in the display order
    #[must_use]
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Self::Mrr => 0,
            Self::Subscriptions => 1,
            Self::Trials => 2,
            Self::Revenue => 3,
            Self::Users => 4,
            Self::Installs => 5,
        }
    }

    /// Display label for this metric
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mrr => "MRR",
            Self::Subscriptions => "Subscriptions",
            Self::Trials => "Trials",
            Self::Revenue => "Revenue",
            Self::Users => "Users",
            Self::Installs => "Installs",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One named metric with its pre-formatted display value
///
/// An empty `value` means "unknown" (the upstream field was absent), which
/// is distinct from the record itself being missing - a valid set always
/// carries all six records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub kind: MetricKind,
    pub value: String,
}

impl MetricRecord {
    /// Create a record with a formatted display value
    #[must_use]
    pub fn new(kind: MetricKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Create an "unknown" placeholder record for this kind
    #[must_use]
    pub fn placeholder(kind: MetricKind) -> Self {
        Self {
            kind,
            value: String::new(),
        }
    }

    /// Whether this record carries a real value (non-empty display string)
    #[must_use]
    #[inline]
    pub fn is_known(&self) -> bool {
        !self.value.is_empty()
    }
}

/// A complete, ordered set of six metric records
///
/// Immutable once constructed. Construction enforces the invariant: exactly
/// one record per kind, in `MetricKind::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricSet {
    records: Vec<MetricRecord>,
}

impl MetricSet {
    /// Build a set from six display values in display order
    #[must_use]
    pub fn from_values(values: [String; METRIC_COUNT]) -> Self {
        let records = MetricKind::ALL
            .iter()
            .zip(values)
            .map(|(&kind, value)| MetricRecord { kind, value })
            .collect();
        Self { records }
    }

    /// A set of six "unknown" placeholder records
    ///
    /// Used when no data is available at all (no credential and no cache).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: MetricKind::ALL
                .iter()
                .map(|&k| MetricRecord::placeholder(k))
                .collect(),
        }
    }

    /// Whether every record is an "unknown" placeholder
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.iter().all(|r| !r.is_known())
    }

    /// Records in display order
    #[must_use]
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Look up the record for a kind
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> &MetricRecord {
        &self.records[kind.index()]
    }

    /// Iterate records in display order
    pub fn iter(&self) -> impl Iterator<Item = &MetricRecord> {
        self.records.iter()
    }
}

/// Validate an arbitrary record sequence against the set invariant
///
/// Deserialization goes through this so that a tampered or stale cache
/// payload can never produce a partial or misordered set.
impl TryFrom<Vec<MetricRecord>> for MetricSet {
    type Error = String;

    fn try_from(records: Vec<MetricRecord>) -> Result<Self, Self::Error> {
        if records.len() != METRIC_COUNT {
            return Err(format!(
                "metric set must have exactly {} records, got {}",
                METRIC_COUNT,
                records.len()
            ));
        }
        for (record, &expected) in records.iter().zip(MetricKind::ALL.iter()) {
            if record.kind != expected {
                return Err(format!(
                    "metric set out of order: expected {}, got {}",
                    expected, record.kind
                ));
            }
        }
        Ok(Self { records })
    }
}

impl<'de> Deserialize<'de> for MetricSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<MetricRecord>::deserialize(deserializer)?;
        Self::try_from(records).map_err(serde::de::Error::custom)
    }
}

/// Result of one refresh cycle
///
/// Invariant: when `error` is present, `metrics` still holds the
/// best-available set - cached records on a degraded failure, placeholders
/// when nothing is available.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// When the refresh completed (milliseconds since Unix epoch)
    pub timestamp_millis: u64,
    /// Best-available metrics
    pub metrics: MetricSet,
    /// Failure classification, if the live fetch did not succeed
    pub error: Option<RefreshError>,
}

impl RefreshOutcome {
    /// Live data, no error
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.error.is_none()
    }

    /// Failed fetch served from cache: stale numbers the surface must mark as such
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self.error, Some(RefreshError::Service(_))) && !self.metrics.is_empty()
    }
}
