//! Entry points that tie the registry, broker, query builder and
//! normalization pipeline to a [`HealthStore`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::broker::{PermissionBroker, PermissionTicket};
use crate::config::Config;
use crate::normalize::{self, NormalizedRecord, WeightRecord};
use crate::permissions::{CapabilitySet, PermissionRequest};
use crate::query::{AggregateMetric, ReadRequest, TimeRange};
use crate::registry::DataType;
use crate::write;
use crate::{FitnessError, HealthStore, Session};

pub struct FitnessManager {
    store: Arc<dyn HealthStore>,
    broker: PermissionBroker,
    config: Config,
}

impl FitnessManager {
    pub fn new(store: Arc<dyn HealthStore>, config: Config) -> Self {
        let broker = PermissionBroker::new(config.request_code_base);
        Self {
            store,
            broker,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn session(&self) -> Result<Session, FitnessError> {
        self.store
            .signed_in_session()
            .ok_or(FitnessError::NoSession)
    }

    /// Whether the signed-in account already holds every requested
    /// permission. Never fails: an unavailable store or a missing session
    /// both read as `false`.
    pub fn is_authorized(&self, requests: &[PermissionRequest]) -> bool {
        if !self.store.is_available() {
            debug!("health store unavailable, reporting unauthorized");
            return false;
        }
        let Some(session) = self.store.signed_in_session() else {
            return false;
        };
        let capabilities = CapabilitySet::build(requests);
        self.store.has_permissions(&session, &capabilities)
    }

    /// Launch the native authorization flow and return a ticket for its
    /// outcome. The outcome arrives once the host forwards the matching
    /// callback to [`handle_external_result`](Self::handle_external_result).
    pub fn request_permissions(
        &self,
        requests: &[PermissionRequest],
    ) -> Result<PermissionTicket, FitnessError> {
        let session = self.session()?;
        let capabilities = CapabilitySet::build(requests);
        let ticket = self.broker.register()?;
        let code = ticket.request_code();
        if let Err(err) = self
            .store
            .launch_authorization(code, &session, &capabilities)
        {
            warn!(request_code = code, error = %err, "failed to launch authorization flow");
            self.broker.forget(code);
            return Err(FitnessError::AuthorizationLaunch(err));
        }
        debug!(
            request_code = code,
            declarations = capabilities.len(),
            "authorization flow launched"
        );
        Ok(ticket)
    }

    /// Feed a host result callback. Returns `true` if it settled one of our
    /// pending permission requests.
    pub fn handle_external_result(&self, request_code: i32, result_code: i32) -> bool {
        self.broker.resolve(request_code, result_code)
    }

    pub fn pending_authorizations(&self) -> usize {
        self.broker.pending_count()
    }

    pub async fn get_steps(
        &self,
        range: TimeRange,
        interval: &str,
    ) -> Result<Vec<NormalizedRecord>, FitnessError> {
        self.read_aggregate(AggregateMetric::Step, range, interval)
            .await
    }

    pub async fn get_distance(
        &self,
        range: TimeRange,
        interval: &str,
    ) -> Result<Vec<NormalizedRecord>, FitnessError> {
        self.read_aggregate(AggregateMetric::Distance, range, interval)
            .await
    }

    pub async fn get_calories(
        &self,
        range: TimeRange,
        interval: &str,
    ) -> Result<Vec<NormalizedRecord>, FitnessError> {
        self.read_aggregate(AggregateMetric::Calories, range, interval)
            .await
    }

    pub async fn get_heart_rate(
        &self,
        range: TimeRange,
        interval: &str,
    ) -> Result<Vec<NormalizedRecord>, FitnessError> {
        self.read_aggregate(AggregateMetric::HeartRate, range, interval)
            .await
    }

    /// Build, run and flatten a bucketed read for `metric`.
    pub async fn read_aggregate(
        &self,
        metric: AggregateMetric,
        range: TimeRange,
        interval: &str,
    ) -> Result<Vec<NormalizedRecord>, FitnessError> {
        let session = self.session()?;
        let request = ReadRequest::aggregate(metric, range, interval);
        let response = self.store.read_data(&session, &request).await?;
        if response.buckets.is_empty() {
            debug!(?metric, "read returned no buckets, resolving with no records");
            return Ok(Vec::new());
        }
        Ok(normalize::flatten(&response, metric, self.config.utc_offset))
    }

    /// The most recent weight sample, or `None` when nothing was recorded.
    pub async fn get_weight(&self) -> Result<Option<WeightRecord>, FitnessError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.get_weight_at(now).await
    }

    pub async fn get_weight_at(&self, now_millis: i64) -> Result<Option<WeightRecord>, FitnessError> {
        let session = self.session()?;
        let request = ReadRequest::latest_weight(now_millis);
        let response = self.store.read_data(&session, &request).await?;
        let record = normalize::latest_weight(&response);
        if record.is_none() {
            debug!("no weight sample recorded");
        }
        Ok(record)
    }

    /// Insert one activity segment spanning `range`.
    pub async fn save_activity(
        &self,
        activity: &str,
        range: TimeRange,
    ) -> Result<bool, FitnessError> {
        let session = self.session()?;
        let label = write::activity_label(activity);
        let (source, data_set) = write::activity_segment(&label, range);
        self.store
            .insert_data(&session, &source, &data_set)
            .await
            .map_err(|err| {
                warn!(%label, error = %err, "problem inserting activity segment");
                FitnessError::SaveActivity(err)
            })?;
        Ok(true)
    }

    pub async fn subscribe_to_steps(&self) -> bool {
        self.subscribe(DataType::StepCountDelta).await
    }

    pub async fn subscribe_to_activity(&self) -> bool {
        self.subscribe(DataType::ActivitySamples).await
    }

    // Failures are reported as `false`, never as errors.
    async fn subscribe(&self, data_type: DataType) -> bool {
        let Some(session) = self.store.signed_in_session() else {
            return false;
        };
        match self.store.subscribe(&session, data_type).await {
            Ok(()) => true,
            Err(err) => {
                warn!(data_type = data_type.name(), error = %err, "recording subscription failed");
                false
            }
        }
    }
}
