use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fitness_bridge::{FitnessModule, MODULE_NAME};
use fitness_core::broker::RESULT_OK;
use fitness_core::utils::parse_utc_offset;
use fitness_core::{
    AccessMode, Bucket, CapabilitySet, Config, DataPoint, DataSet, DataSource, DataType, Field,
    FieldValue, HealthStore, ReadRequest, ReadResponse, Session, StoreError,
};
use serde_json::json;

#[derive(Default)]
struct MockStore {
    signed_out: bool,
    fail_inserts: bool,
    granted: Mutex<CapabilitySet>,
    launched: Mutex<Vec<i32>>,
}

#[async_trait]
impl HealthStore for MockStore {
    fn is_available(&self) -> bool {
        true
    }

    fn signed_in_session(&self) -> Option<Session> {
        (!self.signed_out).then(|| Session::new("user"))
    }

    fn has_permissions(&self, _session: &Session, capabilities: &CapabilitySet) -> bool {
        let granted = self.granted.lock().unwrap();
        capabilities.iter().all(|(t, a)| granted.contains(t, a))
    }

    fn launch_authorization(
        &self,
        request_code: i32,
        _session: &Session,
        capabilities: &CapabilitySet,
    ) -> Result<(), StoreError> {
        self.launched.lock().unwrap().push(request_code);
        *self.granted.lock().unwrap() = capabilities.clone();
        Ok(())
    }

    async fn read_data(
        &self,
        _session: &Session,
        request: &ReadRequest,
    ) -> Result<ReadResponse, StoreError> {
        match request {
            ReadRequest::Aggregate { range, .. } => Ok(ReadResponse {
                buckets: vec![Bucket {
                    start_millis: range.start_millis,
                    end_millis: range.end_millis,
                    data_sets: vec![DataSet {
                        data_type: DataType::AggregateDistanceDelta,
                        points: vec![DataPoint {
                            data_type: DataType::AggregateDistanceDelta,
                            start_millis: range.start_millis,
                            end_millis: range.end_millis,
                            fields: vec![(Field::Distance, FieldValue::Float(1234.5))],
                        }],
                    }],
                }],
                data_sets: vec![],
            }),
            ReadRequest::Raw { .. } => Ok(ReadResponse::default()),
        }
    }

    async fn insert_data(
        &self,
        _session: &Session,
        _source: &DataSource,
        _data_set: &DataSet,
    ) -> Result<(), StoreError> {
        if self.fail_inserts {
            Err(StoreError::new("write quota exceeded"))
        } else {
            Ok(())
        }
    }

    async fn subscribe(&self, _session: &Session, _data_type: DataType) -> Result<(), StoreError> {
        Ok(())
    }
}

fn utc_config() -> Config {
    Config {
        utc_offset: parse_utc_offset("+00:00"),
        ..Config::default()
    }
}

#[test]
fn publishes_constants_and_name() {
    let module = FitnessModule::with_logging(MockStore::default(), Config::default());
    assert_eq!(module.module_name(), MODULE_NAME);
    let constants = module.constants().expect("constants");
    assert_eq!(constants["Platform"], "GoogleFit");
    assert_eq!(constants["PermissionKind"]["Weight"], 4);
    assert_eq!(constants["Activities"]["Running"], "running");
}

#[test]
fn record_schemas_describe_camel_case_fields() {
    let module = FitnessModule::with_logging(MockStore::default(), Config::default());
    let schemas = module.record_schemas().expect("schemas");
    assert!(schemas["NormalizedRecord"]["properties"]["startDate"].is_object());
    assert!(schemas["WeightRecord"]["properties"]["pounds"].is_object());
}

#[tokio::test]
async fn permission_round_trip_through_activity_result() {
    let module = FitnessModule::with_logging(MockStore::default(), Config::default());
    let permissions = json!([{"kind": 1}, {"oops": 1}, {"kind": 4, "access": 1}]);
    assert!(!module.is_authorized(&permissions));

    let ticket = module.request_permissions(&permissions).expect("ticket");
    assert!(!module.on_activity_result(ticket.request_code() + 1, RESULT_OK));
    assert!(module.on_activity_result(ticket.request_code(), RESULT_OK));
    assert!(ticket.outcome().await.expect("outcome"));
    assert!(module.is_authorized(&permissions));
}

#[tokio::test]
async fn reads_resolve_with_json_records() {
    let module = FitnessModule::with_logging(MockStore::default(), utc_config());
    let value = module
        .get_distance(0.0, 86_400_000.0, "day")
        .await
        .expect("distance");
    assert_eq!(
        value,
        json!([{
            "startDate": "1970-01-01T00:00:00.000+0000",
            "endDate": "1970-01-02T00:00:00.000+0000",
            "quantity": 1234.5
        }])
    );
}

#[tokio::test]
async fn missing_weight_resolves_null() {
    let module = FitnessModule::with_logging(MockStore::default(), Config::default());
    assert_eq!(module.get_weight().await.expect("weight"), serde_json::Value::Null);
}

#[tokio::test]
async fn failed_save_rejects_with_tag() {
    let store = MockStore {
        fail_inserts: true,
        ..MockStore::default()
    };
    let module = FitnessModule::new(Arc::new(store), Config::default());
    let rejection = module
        .save_activity("Running", 0.0, 60_000.0)
        .await
        .map_err(|e| e.rejection())
        .expect_err("save should fail");
    assert_eq!(rejection.code, "SaveActivityError");
    assert!(rejection.message.contains("write quota exceeded"));
}

#[tokio::test]
async fn signed_out_host_is_handled_without_panics() {
    let store = MockStore {
        signed_out: true,
        ..MockStore::default()
    };
    let module = FitnessModule::with_logging(store, Config::default());
    assert!(!module.is_authorized(&json!([{"kind": 0}])));
    assert!(!module.subscribe_to_steps().await);
    let err = module
        .request_permissions(&json!([{"kind": 0}]))
        .expect_err("no session");
    assert_eq!(err.code(), "NoSessionError");
    let err = module.get_steps(0.0, 1.0, "hour").await.expect_err("no session");
    assert_eq!(err.rejection().code, "NoSessionError");
}

#[test]
fn access_mode_codes_match_published_table() {
    let module = FitnessModule::with_logging(MockStore::default(), Config::default());
    let constants = module.constants().expect("constants");
    for mode in AccessMode::ALL {
        assert_eq!(constants["PermissionAccess"][mode.name()], mode.code());
    }
}
