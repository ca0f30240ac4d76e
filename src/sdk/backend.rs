//! Local backend that logs vendor calls, and the mapping from session events to calls.

use super::queue::{ops, CallQueue, Dispatch, SdkBackend};
use crate::core::session::SessionEvent;
use serde_json::{json, Value};
use std::collections::VecDeque;

/// Most recent operations kept by [`LogBackend`].
pub const HISTORY_LIMIT: usize = 64;

/// Accepts every known operation and logs it instead of contacting a vendor.
#[derive(Debug, Default)]
pub struct LogBackend {
    /// The last [`HISTORY_LIMIT`] operations dispatched, oldest first.
    pub history: VecDeque<String>,
}

impl SdkBackend for LogBackend {
    fn supports(&self, op: &str) -> bool {
        op == ops::INIT || op == ops::COMMERCIAL_BREAK || ops::PASSTHROUGH.contains(&op)
    }

    fn dispatch(&mut self, op: &str, args: &[Value]) -> Dispatch {
        log::info!("sdk {}({})", op, Value::from(args.to_vec()));
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(op.to_string());
        Dispatch::Done(Ok(Value::Bool(true)))
    }
}

/// Queue the vendor calls that correspond to session events.
pub fn forward_session_events<B: SdkBackend>(queue: &mut CallQueue<B>, events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::Started => {
                queue.enqueue_detached(ops::ROUND_START, vec![]);
                queue.enqueue_detached(ops::GAMEPLAY_START, vec![]);
            }
            SessionEvent::Resumed => {
                queue.enqueue_detached(ops::GAMEPLAY_START, vec![]);
            }
            SessionEvent::Paused => {
                queue.enqueue_detached(ops::GAMEPLAY_STOP, vec![]);
            }
            SessionEvent::GameOver { score, .. } => {
                queue.enqueue_detached(ops::GAMEPLAY_STOP, vec![]);
                queue.enqueue_detached(ops::ROUND_END, vec![json!({ "score": score })]);
            }
            SessionEvent::NewHighScore { score, .. } => {
                queue.enqueue_detached(ops::SEND_HIGHSCORE, vec![json!(score)]);
            }
            SessionEvent::Jumped | SessionEvent::Scored { .. } | SessionEvent::ReturnedToMenu => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::CrashCause;

    #[test]
    fn test_log_backend_accepts_known_ops() {
        let backend = LogBackend::default();
        assert!(backend.supports("init"));
        assert!(backend.supports("happyTime"));
        assert!(!backend.supports("rewardedBreak"));
    }

    #[test]
    fn test_game_over_with_record() {
        let mut queue = CallQueue::new(LogBackend::default());
        queue.mark_ready();
        forward_session_events(
            &mut queue,
            &[
                SessionEvent::GameOver {
                    score: 3.0,
                    cause: CrashCause::HitPipe,
                },
                SessionEvent::NewHighScore {
                    score: 3.0,
                    previous: 1.0,
                },
            ],
        );
        assert_eq!(
            queue.backend().history,
            vec!["gameplayStop", "roundEnd", "sendHighscore"]
        );
    }

    #[test]
    fn test_forwarded_calls_keep_no_results() {
        let mut queue = CallQueue::new(LogBackend::default());
        queue.mark_ready();
        for round in 0..200 {
            forward_session_events(
                &mut queue,
                &[
                    SessionEvent::Started,
                    SessionEvent::GameOver {
                        score: round as f64,
                        cause: CrashCause::Fell,
                    },
                ],
            );
        }
        assert_eq!(queue.retained_results(), 0);
        assert_eq!(queue.backend().history.len(), HISTORY_LIMIT);
        assert_eq!(queue.backend().history.back().map(String::as_str), Some("roundEnd"));
    }

    #[test]
    fn test_jumps_are_not_forwarded() {
        let mut queue = CallQueue::new(LogBackend::default());
        queue.mark_ready();
        forward_session_events(&mut queue, &[SessionEvent::Jumped, SessionEvent::Scored { score: 0.5 }]);
        assert!(queue.backend().history.is_empty());
    }
}
