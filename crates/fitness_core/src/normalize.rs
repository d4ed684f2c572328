//! Native response structures and their flattening into uniform records.

use chrono::FixedOffset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::query::AggregateMetric;
use crate::registry::DataType;
use crate::utils::format_timestamp;

const POUNDS_PER_KILOGRAM: f64 = 2.20462262185;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Steps,
    Distance,
    Calories,
    Bpm,
    Average,
    Max,
    Min,
    Weight,
    Activity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Integer reading of the value; floats are truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Float(v) => Some(*v as i64),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub data_type: DataType,
    pub start_millis: i64,
    pub end_millis: i64,
    /// Values in the order the data type declares its fields.
    pub fields: Vec<(Field, FieldValue)>,
}

impl DataPoint {
    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find_map(|(f, value)| (*f == field).then_some(value))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    pub data_type: DataType,
    #[serde(default)]
    pub points: Vec<DataPoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub start_millis: i64,
    pub end_millis: i64,
    #[serde(default)]
    pub data_sets: Vec<DataSet>,
}

/// What the store returns for a read: buckets for aggregated reads, bare
/// data sets for raw reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResponse {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    #[serde(default)]
    pub data_sets: Vec<DataSet>,
}

impl ReadResponse {
    pub fn data_set(&self, data_type: DataType) -> Option<&DataSet> {
        self.data_sets.iter().find(|ds| ds.data_type == data_type)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub start_date: String,
    pub end_date: String,
    pub quantity: f64,
}

/// The most recent weight sample with derived units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecord {
    pub kilograms: f64,
    pub grams: f64,
    pub pounds: f64,
    pub start_date: i64,
    pub end_date: i64,
}

impl WeightRecord {
    pub fn from_kilograms(kilograms: f64, start_date: i64, end_date: i64) -> Self {
        Self {
            kilograms,
            grams: kilograms * 1000.0,
            pounds: kilograms * POUNDS_PER_KILOGRAM,
            start_date,
            end_date,
        }
    }
}

/// Flatten an aggregated response into one record per (point, field).
///
/// Iteration follows the store's order: buckets, then data sets, then
/// points, then fields. Step counts are integer-coerced; everything else is
/// read as a float. Non-numeric field values are skipped.
pub fn flatten(
    response: &ReadResponse,
    metric: AggregateMetric,
    offset: Option<FixedOffset>,
) -> Vec<NormalizedRecord> {
    let mut records = Vec::new();
    for bucket in &response.buckets {
        for data_set in &bucket.data_sets {
            for point in &data_set.points {
                let start_date = format_timestamp(point.start_millis, offset);
                let end_date = format_timestamp(point.end_millis, offset);
                for (field, value) in &point.fields {
                    let Some(quantity) = coerce(metric, value) else {
                        warn!(?field, ?metric, "skipping non-numeric field value");
                        continue;
                    };
                    records.push(NormalizedRecord {
                        start_date: start_date.clone(),
                        end_date: end_date.clone(),
                        quantity,
                    });
                }
            }
        }
    }
    records
}

fn coerce(metric: AggregateMetric, value: &FieldValue) -> Option<f64> {
    match metric {
        AggregateMetric::Step => value.as_int().map(|v| v as f64),
        AggregateMetric::Distance | AggregateMetric::Calories | AggregateMetric::HeartRate => {
            value.as_float()
        }
    }
}

/// Extract the first weight sample of a raw weight read.
pub fn latest_weight(response: &ReadResponse) -> Option<WeightRecord> {
    let point = response.data_set(DataType::Weight)?.points.first()?;
    let kilograms = point.value(Field::Weight)?.as_float()?;
    Some(WeightRecord::from_kilograms(
        kilograms,
        point.start_millis,
        point.end_millis,
    ))
}
