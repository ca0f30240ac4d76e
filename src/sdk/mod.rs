//! Vendor SDK shim: a pending-call queue replayed once the vendor backend loads.

pub mod backend;
pub mod loader;
pub mod queue;

pub use backend::{forward_session_events, LogBackend, HISTORY_LIMIT};
pub use loader::{url_param, LoaderConfig, ScriptFlavour};
pub use queue::{ops, CallQueue, Dispatch, LoadState, SdkBackend, SdkError, Ticket};
