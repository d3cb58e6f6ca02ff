//! Timing tests run on tokio's paused clock, so sleeps are instant and exact.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex, OnceLock, Weak};

use hrdesk_core::error::ErrorCode;
use hrdesk_gateway::debounce::{DebounceConfig, DebounceGateway, GatewayState};
use hrdesk_gateway::obs::DeskMetrics;
use tokio::time::{sleep, Duration, Instant};

type Seen = Arc<Mutex<Vec<(String, Instant)>>>;

fn collector() -> (Seen, impl Fn(String) + Send + Sync + 'static) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink = move |value: String| sink_seen.lock().unwrap().push((value, Instant::now()));
    (seen, sink)
}

fn values(seen: &Seen) -> Vec<String> {
    seen.lock().unwrap().iter().map(|(v, _)| v.clone()).collect()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn burst_delivers_only_last_value() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(300), sink);

    gw.submit("a").unwrap();
    sleep(ms(50)).await;
    gw.submit("ab").unwrap();
    sleep(ms(50)).await;
    let last = Instant::now();
    gw.submit("abc").unwrap();

    sleep(ms(299)).await;
    assert!(values(&seen).is_empty());

    sleep(ms(10)).await;
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "abc");
    let waited = seen[0].1 - last;
    assert!(waited >= ms(300) && waited <= ms(301), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn quiet_gaps_deliver_each_value_in_order() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);

    gw.submit("first").unwrap();
    sleep(ms(150)).await;
    gw.submit("second").unwrap();
    sleep(ms(150)).await;

    assert_eq!(values(&seen), vec!["first", "second"]);
}

#[test]
fn zero_delay_delivers_synchronously_without_runtime() {
    let (seen, sink) = collector_std();
    let gw = DebounceGateway::new(DebounceConfig::new(0).unwrap(), sink);

    gw.submit("now").unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["now".to_string()]);
    assert_eq!(gw.state(), GatewayState::Idle);
}

fn collector_std() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    (seen, move |value: String| sink_seen.lock().unwrap().push(value))
}

#[test]
fn scheduling_outside_runtime_is_an_error() {
    let (seen, sink) = collector_std();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(10), sink);

    let err = gw.submit("x").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Internal);
    assert_eq!(gw.state(), GatewayState::Idle);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn state_moves_idle_scheduled_idle() {
    let (_seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);

    assert_eq!(gw.state(), GatewayState::Idle);
    gw.submit("x").unwrap();
    assert_eq!(gw.state(), GatewayState::Scheduled);
    sleep(ms(101)).await;
    assert_eq!(gw.state(), GatewayState::Idle);
}

#[tokio::test(start_paused = true)]
async fn cancel_pending_suppresses_delivery() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);

    gw.submit("doomed").unwrap();
    sleep(ms(60)).await;
    assert!(gw.cancel_pending());
    assert!(!gw.cancel_pending());
    assert_eq!(gw.state(), GatewayState::Idle);

    sleep(ms(200)).await;
    assert!(values(&seen).is_empty());

    // Still usable afterwards.
    gw.submit("kept").unwrap();
    sleep(ms(101)).await;
    assert_eq!(values(&seen), vec!["kept"]);
}

#[tokio::test(start_paused = true)]
async fn cancel_with_nothing_pending_is_noop() {
    let (_seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::default(), sink);
    assert!(!gw.cancel_pending());
    assert_eq!(gw.state(), GatewayState::Idle);
}

#[tokio::test(start_paused = true)]
async fn dispose_is_terminal() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);

    gw.submit("lost").unwrap();
    gw.dispose();
    gw.dispose();
    assert_eq!(gw.state(), GatewayState::Disposed);

    let err = gw.submit("late").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Disposed);
    let err = gw.configure(10).expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Disposed);
    assert!(!gw.cancel_pending());
    assert_eq!(gw.state(), GatewayState::Disposed);

    sleep(ms(500)).await;
    assert!(values(&seen).is_empty());
}

#[tokio::test(start_paused = true)]
async fn negative_delay_is_rejected_at_configure() {
    let (_seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(250), sink);

    let err = gw.configure(-1).expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::InvalidConfig);
    assert_eq!(gw.delay(), ms(250));

    assert_eq!(DebounceConfig::new(-30).unwrap_err().code(), ErrorCode::InvalidConfig);
}

#[tokio::test(start_paused = true)]
async fn reconfigure_applies_to_next_submission() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(300), sink);

    let start = Instant::now();
    gw.submit("old-delay").unwrap();
    gw.configure(50).unwrap();
    assert_eq!(gw.delay(), ms(50));

    sleep(ms(100)).await;
    assert!(values(&seen).is_empty());
    sleep(ms(250)).await;
    assert_eq!(values(&seen), vec!["old-delay"]);
    assert!(seen.lock().unwrap()[0].1 - start >= ms(300));

    gw.submit("new-delay").unwrap();
    sleep(ms(51)).await;
    assert_eq!(values(&seen), vec!["old-delay", "new-delay"]);
}

#[tokio::test(start_paused = true)]
async fn reconfigure_to_zero_supersedes_pending() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);

    gw.submit("stale").unwrap();
    gw.configure(0).unwrap();
    gw.submit("fresh").unwrap();
    assert_eq!(values(&seen), vec!["fresh"]);

    sleep(ms(200)).await;
    assert_eq!(values(&seen), vec!["fresh"]);
}

#[tokio::test(start_paused = true)]
async fn panicking_sink_leaves_gateway_usable() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let gw = DebounceGateway::new(DebounceConfig::from_millis(10), move |value: String| {
        if value == "boom" {
            panic!("sink failure");
        }
        sink_seen.lock().unwrap().push(value);
    });

    gw.submit("boom").unwrap();
    sleep(ms(20)).await;
    assert_eq!(gw.state(), GatewayState::Idle);

    gw.submit("fine").unwrap();
    sleep(ms(20)).await;
    assert_eq!(*seen.lock().unwrap(), vec!["fine".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn metrics_count_superseded_and_delivered() {
    let (_seen, sink) = collector();
    let metrics = Arc::new(DeskMetrics::default());
    let gw = DebounceGateway::with_parts(
        "employee_search",
        DebounceConfig::from_millis(300),
        Arc::new(sink),
        Arc::clone(&metrics),
    );

    for v in ["j", "jo", "jon"] {
        gw.submit(v).unwrap();
        sleep(ms(50)).await;
    }
    sleep(ms(300)).await;

    assert_eq!(metrics.debounce_count("employee_search", "submitted"), 3);
    assert_eq!(metrics.debounce_count("employee_search", "superseded"), 2);
    assert_eq!(metrics.debounce_count("employee_search", "delivered"), 1);
    assert_eq!(metrics.debounce_count("employee_search", "canceled"), 0);

    let text = metrics.render();
    assert!(text.contains(
        "hrdesk_debounce_events_total{event=\"delivered\",field=\"employee_search\"} 1"
    ));
}

#[tokio::test(start_paused = true)]
async fn dropping_gateway_aborts_pending() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);
    gw.submit("orphan").unwrap();
    drop(gw);

    sleep(ms(200)).await;
    assert!(values(&seen).is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_before_timer_task_runs_wins() {
    let (seen, sink) = collector();
    let gw = DebounceGateway::new(DebounceConfig::from_millis(100), sink);

    gw.submit("raced").unwrap();
    // Deadline passes, but the timer task has not been polled yet.
    tokio::time::advance(ms(150)).await;
    assert!(gw.cancel_pending());
    assert_eq!(gw.state(), GatewayState::Idle);

    sleep(ms(200)).await;
    assert!(values(&seen).is_empty());
}

#[tokio::test(start_paused = true)]
async fn sink_may_resubmit_to_its_own_gateway() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let slot: Arc<OnceLock<Weak<DebounceGateway>>> = Arc::new(OnceLock::new());

    let sink_seen = Arc::clone(&seen);
    let sink_slot = Arc::clone(&slot);
    let gw = Arc::new(DebounceGateway::new(
        DebounceConfig::from_millis(100),
        move |value: String| {
            let resubmit = value == "a";
            sink_seen.lock().unwrap().push(value);
            if resubmit {
                if let Some(gw) = sink_slot.get().and_then(Weak::upgrade) {
                    gw.submit("b").unwrap();
                }
            }
        },
    ));
    slot.set(Arc::downgrade(&gw)).unwrap();

    gw.submit("a").unwrap();
    sleep(ms(150)).await;
    assert_eq!(gw.state(), GatewayState::Scheduled);

    sleep(ms(100)).await;
    assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(gw.state(), GatewayState::Idle);
}
