//! Scripted `HealthStore` shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use fitness_core::{
    Bucket, CapabilitySet, DataPoint, DataSet, DataSource, DataType, Field, FieldValue,
    HealthStore, ReadRequest, ReadResponse, Session, StoreError,
};

pub struct ScriptedStore {
    pub available: bool,
    pub session: Option<Session>,
    pub granted: CapabilitySet,
    pub launch_error: Option<StoreError>,
    pub insert_error: Option<StoreError>,
    pub subscribe_error: Option<StoreError>,
    pub responses: Mutex<VecDeque<Result<ReadResponse, StoreError>>>,
    pub reads: Mutex<Vec<ReadRequest>>,
    pub inserts: Mutex<Vec<(DataSource, DataSet)>>,
    pub launches: Mutex<Vec<(i32, CapabilitySet)>>,
    pub subscriptions: Mutex<Vec<DataType>>,
}

impl Default for ScriptedStore {
    fn default() -> Self {
        Self {
            available: true,
            session: Some(Session::new("athlete@example.com")),
            granted: CapabilitySet::default(),
            launch_error: None,
            insert_error: None,
            subscribe_error: None,
            responses: Mutex::new(VecDeque::new()),
            reads: Mutex::new(Vec::new()),
            inserts: Mutex::new(Vec::new()),
            launches: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedStore {
    pub fn signed_out() -> Self {
        Self {
            session: None,
            ..Self::default()
        }
    }

    pub fn respond_with(self, response: Result<ReadResponse, StoreError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn last_read(&self) -> Option<ReadRequest> {
        self.reads.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HealthStore for ScriptedStore {
    fn is_available(&self) -> bool {
        self.available
    }

    fn signed_in_session(&self) -> Option<Session> {
        self.session.clone()
    }

    fn has_permissions(&self, _session: &Session, capabilities: &CapabilitySet) -> bool {
        capabilities
            .iter()
            .all(|(data_type, access)| self.granted.contains(data_type, access))
    }

    fn launch_authorization(
        &self,
        request_code: i32,
        _session: &Session,
        capabilities: &CapabilitySet,
    ) -> Result<(), StoreError> {
        if let Some(err) = &self.launch_error {
            return Err(err.clone());
        }
        self.launches
            .lock()
            .unwrap()
            .push((request_code, capabilities.clone()));
        Ok(())
    }

    async fn read_data(
        &self,
        _session: &Session,
        request: &ReadRequest,
    ) -> Result<ReadResponse, StoreError> {
        self.reads.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ReadResponse::default()))
    }

    async fn insert_data(
        &self,
        _session: &Session,
        source: &DataSource,
        data_set: &DataSet,
    ) -> Result<(), StoreError> {
        if let Some(err) = &self.insert_error {
            return Err(err.clone());
        }
        self.inserts
            .lock()
            .unwrap()
            .push((source.clone(), data_set.clone()));
        Ok(())
    }

    async fn subscribe(&self, _session: &Session, data_type: DataType) -> Result<(), StoreError> {
        if let Some(err) = &self.subscribe_error {
            return Err(err.clone());
        }
        self.subscriptions.lock().unwrap().push(data_type);
        Ok(())
    }
}

/// `count` consecutive buckets of `width` ms, each holding one point with one
/// field.
pub fn single_field_buckets(
    data_type: DataType,
    field: Field,
    count: i64,
    width: i64,
    value: impl Fn(i64) -> FieldValue,
) -> ReadResponse {
    let buckets = (0..count)
        .map(|i| {
            let start = i * width;
            let end = start + width;
            Bucket {
                start_millis: start,
                end_millis: end,
                data_sets: vec![DataSet {
                    data_type,
                    points: vec![DataPoint {
                        data_type,
                        start_millis: start,
                        end_millis: end,
                        fields: vec![(field, value(i))],
                    }],
                }],
            }
        })
        .collect();
    ReadResponse {
        buckets,
        data_sets: vec![],
    }
}
