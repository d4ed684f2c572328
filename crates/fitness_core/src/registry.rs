//! Static lookup tables between semantic kinds and native store identifiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Native data types understood by the backing store.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    StepCountDelta,
    StepCountCumulative,
    DistanceDelta,
    CaloriesExpended,
    ActivitySegment,
    ActivitySamples,
    HeartRateBpm,
    Weight,
    AggregateStepCountDelta,
    AggregateDistanceDelta,
    AggregateCaloriesExpended,
    AggregateHeartRateSummary,
}

impl DataType {
    /// Native identifier of the data type.
    pub fn name(self) -> &'static str {
        match self {
            DataType::StepCountDelta | DataType::AggregateStepCountDelta => {
                "com.google.step_count.delta"
            }
            DataType::StepCountCumulative => "com.google.step_count.cumulative",
            DataType::DistanceDelta | DataType::AggregateDistanceDelta => {
                "com.google.distance.delta"
            }
            DataType::CaloriesExpended | DataType::AggregateCaloriesExpended => {
                "com.google.calories.expended"
            }
            DataType::ActivitySegment => "com.google.activity.segment",
            DataType::ActivitySamples => "com.google.activity.samples",
            DataType::HeartRateBpm => "com.google.heart_rate.bpm",
            DataType::Weight => "com.google.weight",
            DataType::AggregateHeartRateSummary => "com.google.heart_rate.summary",
        }
    }
}

/// Semantic category of fitness data a caller can ask permission for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum MetricKind {
    Step,
    Distance,
    Activity,
    Calories,
    Weight,
    HeartRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Step,
        MetricKind::Distance,
        MetricKind::Activity,
        MetricKind::Calories,
        MetricKind::Weight,
        MetricKind::HeartRate,
    ];

    /// Integer code callers use on the wire.
    pub fn code(self) -> i64 {
        match self {
            MetricKind::Step => 0,
            MetricKind::Distance => 1,
            MetricKind::Activity => 2,
            MetricKind::Calories => 3,
            MetricKind::Weight => 4,
            MetricKind::HeartRate => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Step => "Step",
            MetricKind::Distance => "Distance",
            MetricKind::Activity => "Activity",
            MetricKind::Calories => "Calories",
            MetricKind::Weight => "Weight",
            MetricKind::HeartRate => "HeartRate",
        }
    }

    /// Native data types a permission on this kind declares.
    pub fn data_types(self) -> &'static [DataType] {
        match self {
            MetricKind::Step => &[DataType::StepCountDelta, DataType::StepCountCumulative],
            MetricKind::Distance => &[DataType::DistanceDelta],
            MetricKind::Activity => &[DataType::ActivitySegment],
            MetricKind::Calories => &[DataType::CaloriesExpended],
            MetricKind::Weight => &[DataType::Weight],
            MetricKind::HeartRate => &[DataType::HeartRateBpm],
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum AccessMode {
    #[default]
    Read,
    Write,
}

impl AccessMode {
    pub const ALL: [AccessMode; 2] = [AccessMode::Read, AccessMode::Write];

    /// Native access code; callers send the same value.
    pub fn code(self) -> i64 {
        match self {
            AccessMode::Read => 0,
            AccessMode::Write => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            AccessMode::Read => "Read",
            AccessMode::Write => "Write",
        }
    }
}

/// Activities that can be written as activity segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ActivityKind {
    Biking,
    BikingStationary,
    JumpRope,
    Other,
    Running,
    RunningTreadmill,
    Walking,
    WalkingTreadmill,
    Weightlifting,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 9] = [
        ActivityKind::Biking,
        ActivityKind::BikingStationary,
        ActivityKind::JumpRope,
        ActivityKind::Other,
        ActivityKind::Running,
        ActivityKind::RunningTreadmill,
        ActivityKind::Walking,
        ActivityKind::WalkingTreadmill,
        ActivityKind::Weightlifting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActivityKind::Biking => "Biking",
            ActivityKind::BikingStationary => "BikingStationary",
            ActivityKind::JumpRope => "JumpRope",
            ActivityKind::Other => "Other",
            ActivityKind::Running => "Running",
            ActivityKind::RunningTreadmill => "RunningTreadmill",
            ActivityKind::Walking => "Walking",
            ActivityKind::WalkingTreadmill => "WalkingTreadmill",
            ActivityKind::Weightlifting => "Weightlifting",
        }
    }

    /// Native activity label stored on written segments.
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Biking => "biking",
            ActivityKind::BikingStationary => "biking.stationary",
            ActivityKind::JumpRope => "jump_rope",
            ActivityKind::Other => "other",
            ActivityKind::Running => "running",
            ActivityKind::RunningTreadmill => "running.treadmill",
            ActivityKind::Walking => "walking",
            ActivityKind::WalkingTreadmill => "walking.treadmill",
            ActivityKind::Weightlifting => "weightlifting",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}
