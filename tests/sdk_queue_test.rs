//! Integration test: vendor call queue with an asynchronous backend.

use flappy::sdk::{ops, CallQueue, Dispatch, LoaderConfig, SdkBackend, SdkError, ScriptFlavour};
use serde_json::{json, Value};

/// Defers every call; the test resolves them by hand like a vendor promise.
#[derive(Default)]
struct AsyncVendor {
    dispatched: Vec<(String, Vec<Value>)>,
}

impl SdkBackend for AsyncVendor {
    fn supports(&self, op: &str) -> bool {
        op != "rewardedBreak"
    }

    fn dispatch(&mut self, op: &str, args: &[Value]) -> Dispatch {
        self.dispatched.push((op.to_string(), args.to_vec()));
        Dispatch::Deferred
    }
}

fn dispatched_ops(queue: &CallQueue<AsyncVendor>) -> Vec<&str> {
    queue
        .backend()
        .dispatched
        .iter()
        .map(|(op, _)| op.as_str())
        .collect()
}

#[test]
fn test_calls_before_init_wait_for_it() {
    let mut queue = CallQueue::new(AsyncVendor::default());
    let early = queue.enqueue(ops::GAMEPLAY_START, vec![]);
    let init = queue.enqueue(ops::INIT, vec![json!({ "debug": true }), json!({})]);
    let late = queue.enqueue(ops::COMMERCIAL_BREAK, vec![json!({})]);

    queue.mark_ready();
    // Calls ahead of init run first; init then blocks the rest
    assert_eq!(dispatched_ops(&queue), vec!["gameplayStart", "init"]);
    assert!(queue.is_pending(late));

    queue.resolve(early, Ok(json!(true)));
    assert_eq!(dispatched_ops(&queue), vec!["gameplayStart", "init"]);

    queue.resolve(init, Ok(Value::Null));
    assert_eq!(
        dispatched_ops(&queue),
        vec!["gameplayStart", "init", "commercialBreak"]
    );

    queue.resolve(late, Ok(json!(false)));
    assert_eq!(queue.take_result(late), Some(Ok(json!(false))));
    assert_eq!(queue.take_result(early), Some(Ok(json!(true))));
    assert_eq!(queue.take_result(early), None);
}

#[test]
fn test_arguments_forwarded_unchanged() {
    let mut queue = CallQueue::new(AsyncVendor::default());
    queue.enqueue(ops::SEND_HIGHSCORE, vec![json!(12.5), json!("name")]);
    queue.mark_ready();
    assert_eq!(
        queue.backend().dispatched[0].1,
        vec![json!(12.5), json!("name")]
    );
}

#[test]
fn test_unsupported_call_does_not_block() {
    let mut queue = CallQueue::new(AsyncVendor::default());
    let bad = queue.enqueue("rewardedBreak", vec![]);
    queue.enqueue(ops::ROUND_START, vec![]);
    queue.mark_ready();

    assert_eq!(dispatched_ops(&queue), vec!["roundStart"]);
    assert_eq!(
        queue.take_result(bad),
        Some(Err(SdkError::UnknownOperation("rewardedBreak".to_string())))
    );
}

#[test]
fn test_resolving_unknown_ticket_is_ignored() {
    let mut queue = CallQueue::new(AsyncVendor::default());
    queue.mark_ready();
    queue.resolve(999, Ok(Value::Null));
    assert_eq!(queue.take_result(999), None);
}

#[test]
fn test_loader_picks_script() {
    let config = LoaderConfig::from_query("?tag=kids&ab=abc123", false, None);
    assert_eq!(config.flavour, ScriptFlavour::Kids);
    assert_eq!(config.script_url(), "scripts/abc123/poki-sdk-kids-abc123.js");
}
