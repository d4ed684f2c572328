//! Lookup tables published to callers so they can build valid requests.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::registry::{AccessMode, ActivityKind, MetricKind};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublishedConstants {
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "PermissionKind")]
    pub permission_kind: BTreeMap<&'static str, i64>,
    #[serde(rename = "PermissionAccess")]
    pub permission_access: BTreeMap<&'static str, i64>,
    #[serde(rename = "Activities")]
    pub activities: BTreeMap<&'static str, &'static str>,
    #[serde(rename = "Error")]
    pub error: BTreeMap<&'static str, &'static str>,
}

pub fn published(platform: &str) -> PublishedConstants {
    PublishedConstants {
        platform: platform.to_string(),
        permission_kind: MetricKind::ALL
            .into_iter()
            .map(|kind| (kind.name(), kind.code()))
            .collect(),
        permission_access: AccessMode::ALL
            .into_iter()
            .map(|mode| (mode.name(), mode.code()))
            .collect(),
        activities: ActivityKind::ALL
            .into_iter()
            .map(|kind| (kind.name(), kind.label()))
            .collect(),
        error: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publishes_all_tables() {
        let constants = published("GoogleFit");
        assert_eq!(constants.permission_kind.len(), MetricKind::ALL.len());
        assert_eq!(constants.permission_kind["HeartRate"], 5);
        assert_eq!(constants.permission_access["Write"], 1);
        assert_eq!(constants.activities["JumpRope"], "jump_rope");
    }

    #[test]
    fn serializes_with_host_keys() {
        let value = serde_json::to_value(published("GoogleFit")).expect("serialize");
        assert_eq!(value["Platform"], "GoogleFit");
        assert_eq!(value["PermissionKind"]["Step"], 0);
        assert_eq!(value["PermissionAccess"], json!({"Read": 0, "Write": 1}));
        assert_eq!(value["Activities"]["BikingStationary"], "biking.stationary");
        assert_eq!(value["Error"], json!({}));
    }
}
