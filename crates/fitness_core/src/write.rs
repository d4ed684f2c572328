//! Building the single raw activity segment the write path inserts.

use crate::normalize::{DataPoint, DataSet, Field, FieldValue};
use crate::query::{DataSource, SourceKind, TimeRange};
use crate::registry::{ActivityKind, DataType};

/// Resolve an activity name (`"Running"`) or label (`"running"`) to its
/// native label. Anything else is forwarded unchanged.
pub fn activity_label(activity: &str) -> String {
    ActivityKind::from_name(activity)
        .or_else(|| ActivityKind::from_label(activity))
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| activity.to_string())
}

/// The raw stream this application writes segments of `label` to.
pub fn activity_source(label: &str) -> DataSource {
    DataSource {
        data_type: DataType::ActivitySegment,
        kind: SourceKind::Raw,
        stream_name: format!("save_activity_{}", label.replace('.', "_")),
        app_package: None,
    }
}

/// A one-point data set spanning `range`, tagged with `label`.
pub fn activity_segment(label: &str, range: TimeRange) -> (DataSource, DataSet) {
    let source = activity_source(label);
    let point = DataPoint {
        data_type: DataType::ActivitySegment,
        start_millis: range.start_millis,
        end_millis: range.end_millis,
        fields: vec![(Field::Activity, FieldValue::Text(label.to_string()))],
    };
    let data_set = DataSet {
        data_type: DataType::ActivitySegment,
        points: vec![point],
    };
    (source, data_set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_labels_resolve() {
        assert_eq!(activity_label("BikingStationary"), "biking.stationary");
        assert_eq!(activity_label("walking.treadmill"), "walking.treadmill");
    }

    #[test]
    fn unknown_activity_passes_through() {
        assert_eq!(activity_label("kitesurfing"), "kitesurfing");
        assert_eq!(activity_label(""), "");
    }

    #[test]
    fn stream_name_replaces_dots() {
        let source = activity_source("running.treadmill");
        assert_eq!(source.stream_name, "save_activity_running_treadmill");
        assert_eq!(source.kind, SourceKind::Raw);
        assert_eq!(source.data_type, DataType::ActivitySegment);
        assert!(source.app_package.is_none());
    }

    #[test]
    fn segment_spans_range_with_single_point() {
        let (_, data_set) = activity_segment("running", TimeRange::new(1_000, 2_000));
        assert_eq!(data_set.points.len(), 1);
        let point = &data_set.points[0];
        assert_eq!((point.start_millis, point.end_millis), (1_000, 2_000));
        assert_eq!(
            point.value(Field::Activity),
            Some(&FieldValue::Text("running".into()))
        );
    }
}
