//! FIFO of named vendor calls made before the vendor backend is ready.
//!
//! Calls are queued with a ticket and replayed strictly in order once the
//! backend reports ready. `init` is a barrier: when its dispatch is deferred,
//! nothing behind it runs until the init result arrives.

use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Names of the queued vendor operations.
pub mod ops {
    pub const INIT: &str = "init";
    pub const COMMERCIAL_BREAK: &str = "commercialBreak";
    pub const GAMEPLAY_START: &str = "gameplayStart";
    pub const GAMEPLAY_STOP: &str = "gameplayStop";
    pub const ROUND_START: &str = "roundStart";
    pub const ROUND_END: &str = "roundEnd";
    pub const SEND_HIGHSCORE: &str = "sendHighscore";

    /// Fire-and-forget operations forwarded as-is.
    pub const PASSTHROUGH: [&str; 16] = [
        "captureError",
        "customEvent",
        "gameInteractive",
        "gameLoadingFinished",
        "gameLoadingProgress",
        "gameLoadingStart",
        GAMEPLAY_START,
        GAMEPLAY_STOP,
        "happyTime",
        "logError",
        "muteAd",
        ROUND_END,
        ROUND_START,
        SEND_HIGHSCORE,
        "setDebug",
        "setLogging",
    ];
}

/// Handle for collecting a queued call's result.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SdkError {
    #[error("operation '{0}' is not available")]
    UnknownOperation(String),
    #[error("'{op}' failed: {message}")]
    CallFailed { op: String, message: String },
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("malformed query parameter '{0}'")]
    MalformedParam(String),
}

/// Outcome of handing one call to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Done(Result<Value, SdkError>),
    /// Result arrives later through `CallQueue::resolve`.
    Deferred,
}

/// The vendor side of the queue.
pub trait SdkBackend {
    fn supports(&self, op: &str) -> bool;
    fn dispatch(&mut self, op: &str, args: &[Value]) -> Dispatch;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingCall {
    pub ticket: Ticket,
    pub op: String,
    pub args: Vec<Value>,
    /// Fire-and-forget: the result is logged on failure and never stored.
    pub detached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Load failed; queued calls stay pending forever.
    Failed(String),
}

pub struct CallQueue<B: SdkBackend> {
    backend: B,
    pending: VecDeque<PendingCall>,
    in_flight: Vec<(Ticket, bool)>,
    results: HashMap<Ticket, Result<Value, SdkError>>,
    init_barrier: Option<Ticket>,
    load_state: LoadState,
    next_ticket: Ticket,
}

impl<B: SdkBackend> CallQueue<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pending: VecDeque::new(),
            in_flight: Vec::new(),
            results: HashMap::new(),
            init_barrier: None,
            load_state: LoadState::Loading,
            next_ticket: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Calls not yet handed to the backend.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Finished results nobody has taken yet.
    pub fn retained_results(&self) -> usize {
        self.results.len()
    }

    /// Queue a call whose result is collected with `take_result`.
    /// Once the backend is ready the queue drains immediately.
    pub fn enqueue(&mut self, op: &str, args: Vec<Value>) -> Ticket {
        self.push(op, args, false)
    }

    /// Queue a call whose result is discarded on arrival.
    pub fn enqueue_detached(&mut self, op: &str, args: Vec<Value>) -> Ticket {
        self.push(op, args, true)
    }

    fn push(&mut self, op: &str, args: Vec<Value>, detached: bool) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.push_back(PendingCall {
            ticket,
            op: op.to_string(),
            args,
            detached,
        });
        self.drain();
        ticket
    }

    fn store(&mut self, ticket: Ticket, detached: bool, result: Result<Value, SdkError>) {
        if !detached {
            self.results.insert(ticket, result);
        }
    }

    /// The backend finished loading.
    pub fn mark_ready(&mut self) {
        self.load_state = LoadState::Ready;
        log::debug!("sdk ready, replaying {} queued calls", self.pending.len());
        self.drain();
    }

    /// The backend failed to load. No retry is attempted.
    pub fn mark_load_failed(&mut self, reason: &str) {
        log::error!("failed to load sdk backend: {}", reason);
        self.load_state = LoadState::Failed(reason.to_string());
    }

    /// Deliver the result of a deferred call. Resolving the init call lifts
    /// the barrier and resumes draining, whether init succeeded or not.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<Value, SdkError>) {
        let Some(pos) = self.in_flight.iter().position(|(t, _)| *t == ticket) else {
            log::warn!("ignoring result for unknown sdk ticket {}", ticket);
            return;
        };
        let (_, detached) = self.in_flight.swap_remove(pos);
        if let Err(e) = &result {
            log::error!("sdk call {} failed: {}", ticket, e);
        }
        self.store(ticket, detached, result);

        if self.init_barrier == Some(ticket) {
            self.init_barrier = None;
            self.drain();
        }
    }

    /// Take a finished call's result. `None` while it is still pending.
    pub fn take_result(&mut self, ticket: Ticket) -> Option<Result<Value, SdkError>> {
        self.results.remove(&ticket)
    }

    pub fn is_pending(&self, ticket: Ticket) -> bool {
        self.pending.iter().any(|c| c.ticket == ticket) || self.in_flight.iter().any(|(t, _)| *t == ticket)
    }

    fn drain(&mut self) {
        if self.load_state != LoadState::Ready {
            return;
        }

        while self.init_barrier.is_none() {
            let Some(call) = self.pending.pop_front() else {
                break;
            };

            if !self.backend.supports(&call.op) {
                log::error!("sdk operation '{}' is not available, dropping", call.op);
                self.store(
                    call.ticket,
                    call.detached,
                    Err(SdkError::UnknownOperation(call.op)),
                );
                continue;
            }

            match self.backend.dispatch(&call.op, &call.args) {
                Dispatch::Done(result) => {
                    if let Err(e) = &result {
                        log::error!("error in '{}': {}", call.op, e);
                    }
                    self.store(call.ticket, call.detached, result);
                }
                Dispatch::Deferred => {
                    self.in_flight.push((call.ticket, call.detached));
                    if call.op == ops::INIT {
                        self.init_barrier = Some(call.ticket);
                    }
                }
            }
        }
    }
}

/// Rewarded breaks are never shown.
pub fn rewarded_break() -> bool {
    false
}

pub fn shareable_url() -> Result<String, SdkError> {
    Err(SdkError::NotImplemented("shareableURL"))
}

/// Primary language subtag of a locale such as `en-US`, defaulting to `en`.
pub fn language(locale: Option<&str>) -> String {
    locale
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("en")
        .to_lowercase()
        .split(['-', '_'])
        .next()
        .unwrap_or("en")
        .to_string()
}
