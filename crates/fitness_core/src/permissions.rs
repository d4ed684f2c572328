//! Folding semantic permission requests into native capability declarations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::registry::{AccessMode, DataType, MetricKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRequest {
    pub kind: MetricKind,
    #[serde(default)]
    pub access: AccessMode,
}

impl PermissionRequest {
    pub fn new(kind: MetricKind, access: AccessMode) -> Self {
        Self { kind, access }
    }

    pub fn read(kind: MetricKind) -> Self {
        Self::new(kind, AccessMode::Read)
    }

    pub fn write(kind: MetricKind) -> Self {
        Self::new(kind, AccessMode::Write)
    }
}

/// Native declaration built from one or more permission requests.
///
/// Backed by an ordered set, so two sets built from permutations of the same
/// requests compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    declarations: BTreeSet<(DataType, AccessMode)>,
}

impl CapabilitySet {
    pub fn build<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a PermissionRequest>,
    {
        let mut set = Self::default();
        for request in requests {
            set.add(*request);
        }
        set
    }

    pub fn add(&mut self, request: PermissionRequest) {
        for data_type in request.kind.data_types() {
            self.declarations.insert((*data_type, request.access));
        }
    }

    pub fn contains(&self, data_type: DataType, access: AccessMode) -> bool {
        self.declarations.contains(&(data_type, access))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DataType, AccessMode)> + '_ {
        self.declarations.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Read caller-supplied `[{kind, access?}]` maps into typed requests.
///
/// Malformed entries and entries with an unrecognized kind are dropped; the
/// rest of the batch is still returned.
pub fn parse_permission_list(value: &Value) -> Vec<PermissionRequest> {
    let Some(entries) = value.as_array() else {
        warn!("permission list is not an array, ignoring it");
        return Vec::new();
    };

    let mut requests = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Ok(Some(request)) => requests.push(request),
            Ok(None) => debug!(index, "skipping permission with unrecognized kind"),
            Err(reason) => warn!(index, %reason, "dropping malformed permission entry"),
        }
    }
    requests
}

fn parse_entry(entry: &Value) -> Result<Option<PermissionRequest>, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| format!("expected an object, got {entry}"))?;
    let kind = obj
        .get("kind")
        .and_then(as_code)
        .ok_or_else(|| "missing or non-integer `kind`".to_string())?;
    let access = match obj.get("access") {
        None => AccessMode::default(),
        Some(raw) => as_code(raw)
            .and_then(AccessMode::from_code)
            .ok_or_else(|| format!("invalid `access` value {raw}"))?,
    };
    Ok(MetricKind::from_code(kind).map(|kind| PermissionRequest { kind, access }))
}

// Hosts marshal numbers as doubles, so accept integral floats too.
fn as_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}
