//! Host-facing surface of the fitness adapter.
//!
//! Hosts call these methods with marshalled arguments (JSON permission
//! lists, epoch doubles, interval tokens) and receive JSON results or a
//! [`Rejection`].

use std::sync::Arc;

use fitness_core::constants;
use fitness_core::{
    Config, FitnessManager, HealthStore, NormalizedRecord, PermissionTicket, TimeRange,
    WeightRecord, parse_permission_list,
};
use serde_json::Value;

pub mod error;
pub mod logging;
pub mod middleware;

pub use error::{BridgeError, BridgeResult, Rejection};
pub use middleware::LoggingMiddleware;

/// Name the module is registered under in the host runtime.
pub const MODULE_NAME: &str = "Fitness";

#[derive(Clone)]
pub struct FitnessModule {
    manager: Arc<FitnessManager>,
}

impl FitnessModule {
    pub fn new(store: Arc<dyn HealthStore>, config: Config) -> Self {
        Self {
            manager: Arc::new(FitnessManager::new(store, config)),
        }
    }

    /// Build a module whose store calls go through [`LoggingMiddleware`].
    pub fn with_logging<S: HealthStore>(store: S, config: Config) -> Self {
        Self::new(Arc::new(LoggingMiddleware::new(store)), config)
    }

    pub fn module_name(&self) -> &'static str {
        MODULE_NAME
    }

    pub fn manager(&self) -> &FitnessManager {
        &self.manager
    }

    pub fn constants(&self) -> BridgeResult<Value> {
        let published = constants::published(&self.manager.config().platform);
        Ok(serde_json::to_value(published)?)
    }

    /// JSON Schemas of the record shapes this module resolves with.
    pub fn record_schemas(&self) -> BridgeResult<Value> {
        Ok(serde_json::json!({
            "NormalizedRecord": serde_json::to_value(schemars::schema_for!(NormalizedRecord))?,
            "WeightRecord": serde_json::to_value(schemars::schema_for!(WeightRecord))?,
        }))
    }

    pub fn is_authorized(&self, permissions: &Value) -> bool {
        let requests = parse_permission_list(permissions);
        self.manager.is_authorized(&requests)
    }

    pub fn request_permissions(&self, permissions: &Value) -> BridgeResult<PermissionTicket> {
        let requests = parse_permission_list(permissions);
        Ok(self.manager.request_permissions(&requests)?)
    }

    /// Forward every host activity result here; unrelated ones are ignored.
    pub fn on_activity_result(&self, request_code: i32, result_code: i32) -> bool {
        self.manager.handle_external_result(request_code, result_code)
    }

    pub async fn subscribe_to_steps(&self) -> bool {
        self.manager.subscribe_to_steps().await
    }

    pub async fn subscribe_to_activity(&self) -> bool {
        self.manager.subscribe_to_activity().await
    }

    pub async fn get_steps(&self, start: f64, end: f64, interval: &str) -> BridgeResult<Value> {
        let range = TimeRange::from_epoch_f64(start, end);
        records_to_value(self.manager.get_steps(range, interval).await?)
    }

    pub async fn get_distance(&self, start: f64, end: f64, interval: &str) -> BridgeResult<Value> {
        let range = TimeRange::from_epoch_f64(start, end);
        records_to_value(self.manager.get_distance(range, interval).await?)
    }

    pub async fn get_calories(&self, start: f64, end: f64, interval: &str) -> BridgeResult<Value> {
        let range = TimeRange::from_epoch_f64(start, end);
        records_to_value(self.manager.get_calories(range, interval).await?)
    }

    pub async fn get_heart_rate(
        &self,
        start: f64,
        end: f64,
        interval: &str,
    ) -> BridgeResult<Value> {
        let range = TimeRange::from_epoch_f64(start, end);
        records_to_value(self.manager.get_heart_rate(range, interval).await?)
    }

    /// The latest weight record, or `null` when none exists.
    pub async fn get_weight(&self) -> BridgeResult<Value> {
        let weight = self.manager.get_weight().await?;
        Ok(serde_json::to_value(weight)?)
    }

    pub async fn save_activity(&self, activity: &str, start: f64, end: f64) -> BridgeResult<bool> {
        let range = TimeRange::from_epoch_f64(start, end);
        Ok(self.manager.save_activity(activity, range).await?)
    }
}

fn records_to_value(records: Vec<NormalizedRecord>) -> BridgeResult<Value> {
    Ok(serde_json::to_value(records)?)
}
