//! Capability-to-query translation and result normalization over a native
//! health-data store.
//!
//! The [`HealthStore`] trait is the only seam to the device store. Everything
//! else in this crate translates semantic requests into native declarations
//! and queries, and flattens native responses into uniform records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod broker;
pub mod config;
pub mod constants;
pub mod manager;
pub mod normalize;
pub mod permissions;
pub mod query;
pub mod registry;
pub mod utils;
pub mod write;

pub use broker::{PermissionBroker, PermissionTicket};
pub use config::Config;
pub use manager::FitnessManager;
pub use normalize::{
    Bucket, DataPoint, DataSet, Field, FieldValue, NormalizedRecord, ReadResponse, WeightRecord,
};
pub use permissions::{CapabilitySet, PermissionRequest, parse_permission_list};
pub use query::{AggregateMetric, DataSource, IntervalUnit, ReadRequest, TimeRange};
pub use registry::{AccessMode, ActivityKind, DataType, MetricKind};

#[derive(Debug, Error)]
pub enum FitnessError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("no signed-in session")]
    NoSession,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("failed to save activity: {0}")]
    SaveActivity(StoreError),
    #[error("failed to launch authorization: {0}")]
    AuthorizationLaunch(StoreError),
    #[error("all authorization request codes are in use")]
    AuthorizationBusy,
    #[error("authorization request {0} was abandoned")]
    AuthorizationAbandoned(i32),
}

impl FitnessError {
    /// Stable code handed to hosts alongside the message when a call is rejected.
    pub fn code(&self) -> &'static str {
        match self {
            FitnessError::Config(_) => "ConfigError",
            FitnessError::NoSession => "NoSessionError",
            FitnessError::Store(_) => "StoreError",
            FitnessError::SaveActivity(_) => "SaveActivityError",
            FitnessError::AuthorizationLaunch(_)
            | FitnessError::AuthorizationBusy
            | FitnessError::AuthorizationAbandoned(_) => "AuthorizationError",
        }
    }
}

/// Failure reported by the backing store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Opaque handle for the account currently signed in to the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub account_id: String,
}

impl Session {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

#[async_trait]
pub trait HealthStore: Send + Sync + 'static {
    /// Whether the store's client library is installed and usable.
    fn is_available(&self) -> bool;

    /// The last signed-in account, if any.
    fn signed_in_session(&self) -> Option<Session>;

    /// Whether `session` already holds every declaration in `capabilities`.
    fn has_permissions(&self, session: &Session, capabilities: &CapabilitySet) -> bool;

    /// Start the native authorization UI.
    ///
    /// Returns once the UI is launched. The user's decision is delivered later
    /// through [`FitnessManager::handle_external_result`] tagged with
    /// `request_code`.
    fn launch_authorization(
        &self,
        request_code: i32,
        session: &Session,
        capabilities: &CapabilitySet,
    ) -> Result<(), StoreError>;

    async fn read_data(
        &self,
        session: &Session,
        request: &ReadRequest,
    ) -> Result<ReadResponse, StoreError>;

    async fn insert_data(
        &self,
        session: &Session,
        source: &DataSource,
        data_set: &DataSet,
    ) -> Result<(), StoreError>;

    /// Ask the store to start background recording of `data_type`.
    async fn subscribe(&self, session: &Session, data_type: DataType) -> Result<(), StoreError>;
}
