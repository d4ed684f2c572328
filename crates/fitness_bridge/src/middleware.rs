//! Logging and metrics around any [`HealthStore`].

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use fitness_core::{
    CapabilitySet, DataSet, DataSource, DataType, HealthStore, ReadRequest, ReadResponse, Session,
    StoreError,
};
use tracing::debug;

/// Wraps a store so every call is traced and counted under
/// `fitness_store_calls_total{op, outcome}`.
pub struct LoggingMiddleware<S: HealthStore> {
    inner: S,
}

impl<S: HealthStore> LoggingMiddleware<S> {
    pub fn new(store: S) -> Self {
        Self { inner: store }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn observe<T, Fut>(&self, op: &'static str, fut: Fut) -> Result<T, StoreError>
    where
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let start = Instant::now();
        debug!("Starting store operation: {}", op);
        let result = fut.await;
        record(op, start, result.as_ref().err());
        result
    }
}

fn record(op: &'static str, start: Instant, error: Option<&StoreError>) {
    let duration = start.elapsed();
    match error {
        None => {
            debug!("Store operation completed: {} in {:?}", op, duration);
            metrics::counter!("fitness_store_calls_total", "op" => op, "outcome" => "ok")
                .increment(1);
        }
        Some(e) => {
            debug!("Store operation failed: {} in {:?} - error: {}", op, duration, e);
            metrics::counter!("fitness_store_calls_total", "op" => op, "outcome" => "error")
                .increment(1);
        }
    }
}

#[async_trait]
impl<S: HealthStore> HealthStore for LoggingMiddleware<S> {
    fn is_available(&self) -> bool {
        let available = self.inner.is_available();
        if !available {
            debug!("health store client is not available");
        }
        available
    }

    fn signed_in_session(&self) -> Option<Session> {
        self.inner.signed_in_session()
    }

    fn has_permissions(&self, session: &Session, capabilities: &CapabilitySet) -> bool {
        let granted = self.inner.has_permissions(session, capabilities);
        debug!(
            declarations = capabilities.len(),
            granted, "checked store permissions"
        );
        granted
    }

    fn launch_authorization(
        &self,
        request_code: i32,
        session: &Session,
        capabilities: &CapabilitySet,
    ) -> Result<(), StoreError> {
        let start = Instant::now();
        let result = self
            .inner
            .launch_authorization(request_code, session, capabilities);
        record("launch_authorization", start, result.as_ref().err());
        result
    }

    async fn read_data(
        &self,
        session: &Session,
        request: &ReadRequest,
    ) -> Result<ReadResponse, StoreError> {
        self.observe("read_data", self.inner.read_data(session, request))
            .await
    }

    async fn insert_data(
        &self,
        session: &Session,
        source: &DataSource,
        data_set: &DataSet,
    ) -> Result<(), StoreError> {
        self.observe(
            "insert_data",
            self.inner.insert_data(session, source, data_set),
        )
        .await
    }

    async fn subscribe(&self, session: &Session, data_type: DataType) -> Result<(), StoreError> {
        self.observe("subscribe", self.inner.subscribe(session, data_type))
            .await
    }
}
