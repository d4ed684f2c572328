//! Correlates in-flight permission requests with the host's result callbacks.
//!
//! Each request gets its own request code from a small window starting at the
//! configured base. The host later reports `(request_code, result_code)` and
//! the matching ticket is resolved exactly once; every other callback is
//! ignored.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::debug;

use crate::FitnessError;

/// Host result code for a completed flow.
pub const RESULT_OK: i32 = -1;
/// Host result code for a flow the user backed out of.
pub const RESULT_CANCELED: i32 = 0;

const CODE_WINDOW: i32 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Granted,
    Denied,
}

impl AuthorizationOutcome {
    pub fn from_result_code(result_code: i32) -> Option<Self> {
        match result_code {
            RESULT_OK => Some(AuthorizationOutcome::Granted),
            RESULT_CANCELED => Some(AuthorizationOutcome::Denied),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Pending {
    next_offset: i32,
    waiting: HashMap<i32, oneshot::Sender<bool>>,
}

pub struct PermissionBroker {
    base_code: i32,
    pending: Mutex<Pending>,
}

impl PermissionBroker {
    pub fn new(base_code: i32) -> Self {
        Self {
            base_code,
            pending: Mutex::new(Pending::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve a request code and the ticket its outcome will be delivered to.
    ///
    /// Codes whose ticket has been dropped are free again, even if the host
    /// never answered them.
    pub fn register(&self) -> Result<PermissionTicket, FitnessError> {
        let mut pending = self.lock();
        for _ in 0..CODE_WINDOW {
            let code = self.base_code.wrapping_add(pending.next_offset);
            pending.next_offset = (pending.next_offset + 1) % CODE_WINDOW;
            if let Some(sender) = pending.waiting.get(&code) {
                if !sender.is_closed() {
                    continue;
                }
                debug!(request_code = code, "reclaiming request code of a dropped ticket");
            }
            let (sender, receiver) = oneshot::channel();
            pending.waiting.insert(code, sender);
            debug!(request_code = code, "registered permission request");
            return Ok(PermissionTicket {
                request_code: code,
                receiver,
            });
        }
        Err(FitnessError::AuthorizationBusy)
    }

    /// Drop a registration whose flow never started. Its ticket then
    /// resolves as abandoned.
    pub fn forget(&self, request_code: i32) {
        self.lock().waiting.remove(&request_code);
    }

    /// Deliver a host callback. Returns `true` if it resolved a pending
    /// request.
    pub fn resolve(&self, request_code: i32, result_code: i32) -> bool {
        let Some(outcome) = AuthorizationOutcome::from_result_code(result_code) else {
            debug!(request_code, result_code, "ignoring unrecognized result code");
            return false;
        };
        let Some(sender) = self.lock().waiting.remove(&request_code) else {
            return false;
        };
        let granted = outcome == AuthorizationOutcome::Granted;
        if sender.send(granted).is_err() {
            debug!(request_code, "permission ticket was dropped before its outcome arrived");
        }
        true
    }

    pub fn pending_count(&self) -> usize {
        self.lock().waiting.len()
    }
}

/// Handle on one in-flight permission request.
#[derive(Debug)]
pub struct PermissionTicket {
    request_code: i32,
    receiver: oneshot::Receiver<bool>,
}

impl PermissionTicket {
    pub fn request_code(&self) -> i32 {
        self.request_code
    }

    /// Wait for the user's decision. There is no timeout.
    pub async fn outcome(self) -> Result<bool, FitnessError> {
        self.receiver
            .await
            .map_err(|_| FitnessError::AuthorizationAbandoned(self.request_code))
    }
}
