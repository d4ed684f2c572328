//! Per-metric construction of native read requests.

use serde::{Deserialize, Serialize};

use crate::registry::{DataType, MetricKind};

/// Millisecond epoch bounds of a query or a written point.
///
/// Ordering is not checked; an inverted range is forwarded as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_millis: i64,
    pub end_millis: i64,
}

impl TimeRange {
    pub fn new(start_millis: i64, end_millis: i64) -> Self {
        Self {
            start_millis,
            end_millis,
        }
    }

    /// Hosts send epoch bounds as doubles; fractions are truncated.
    pub fn from_epoch_f64(start: f64, end: f64) -> Self {
        Self::new(start as i64, end as i64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Hour,
    Day,
}

impl IntervalUnit {
    /// Only the exact token `"hour"` selects hourly buckets.
    pub fn from_token(token: &str) -> Self {
        if token == "hour" {
            IntervalUnit::Hour
        } else {
            IntervalUnit::Day
        }
    }

    pub fn millis(self) -> i64 {
        match self {
            IntervalUnit::Hour => 3_600_000,
            IntervalUnit::Day => 86_400_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Raw,
    Derived,
}

/// A named stream of native data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub data_type: DataType,
    pub kind: SourceKind,
    pub stream_name: String,
    /// `None` means the calling application's own package.
    pub app_package: Option<String>,
}

impl DataSource {
    /// The store's merged step estimate, which is what the platform's own
    /// step counter displays.
    pub fn estimated_step_deltas() -> Self {
        Self {
            data_type: DataType::StepCountDelta,
            kind: SourceKind::Derived,
            stream_name: "estimated_steps".into(),
            app_package: Some("com.google.android.gms".into()),
        }
    }
}

/// What an aggregate read consumes: a whole data type or one stream of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateInput {
    Type(DataType),
    Source(DataSource),
}

/// Metrics that are read as time-bucketed aggregates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateMetric {
    Step,
    Distance,
    Calories,
    HeartRate,
}

impl AggregateMetric {
    pub fn kind(self) -> MetricKind {
        match self {
            AggregateMetric::Step => MetricKind::Step,
            AggregateMetric::Distance => MetricKind::Distance,
            AggregateMetric::Calories => MetricKind::Calories,
            AggregateMetric::HeartRate => MetricKind::HeartRate,
        }
    }

    fn input(self) -> AggregateInput {
        match self {
            AggregateMetric::Step => AggregateInput::Source(DataSource::estimated_step_deltas()),
            AggregateMetric::Distance => AggregateInput::Type(DataType::DistanceDelta),
            AggregateMetric::Calories => AggregateInput::Type(DataType::CaloriesExpended),
            AggregateMetric::HeartRate => AggregateInput::Type(DataType::HeartRateBpm),
        }
    }

    fn output(self) -> DataType {
        match self {
            AggregateMetric::Step => DataType::AggregateStepCountDelta,
            AggregateMetric::Distance => DataType::AggregateDistanceDelta,
            AggregateMetric::Calories => DataType::AggregateCaloriesExpended,
            AggregateMetric::HeartRate => DataType::AggregateHeartRateSummary,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReadRequest {
    /// Aggregated read bucketed by `bucket_span` units of `bucket_unit`.
    Aggregate {
        input: AggregateInput,
        output: DataType,
        bucket_span: u32,
        bucket_unit: IntervalUnit,
        range: TimeRange,
    },
    /// Raw samples of one data type, newest first, optionally capped.
    Raw {
        data_type: DataType,
        range: TimeRange,
        limit: Option<u32>,
    },
}

impl ReadRequest {
    pub fn aggregate(metric: AggregateMetric, range: TimeRange, interval_token: &str) -> Self {
        ReadRequest::Aggregate {
            input: metric.input(),
            output: metric.output(),
            bucket_span: 1,
            bucket_unit: IntervalUnit::from_token(interval_token),
            range,
        }
    }

    /// The single most recent weight sample recorded up to `now_millis`.
    pub fn latest_weight(now_millis: i64) -> Self {
        ReadRequest::Raw {
            data_type: DataType::Weight,
            range: TimeRange::new(1, now_millis),
            limit: Some(1),
        }
    }

    pub fn range(&self) -> TimeRange {
        match self {
            ReadRequest::Aggregate { range, .. } | ReadRequest::Raw { range, .. } => *range,
        }
    }
}
