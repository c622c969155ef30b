use std::sync::Arc;
use std::time::Duration;

use site_monitor::services::monitor::{
    result_buffer, MonitorError, Prober, SiteOutcome, SiteTask,
};

use crate::common::{metrics, site, Reply, ScriptedTransport};

fn prober(transport: &Arc<ScriptedTransport>) -> Arc<Prober> {
    Arc::new(Prober::new(transport.clone(), Duration::from_secs(30)))
}

#[tokio::test]
async fn test_zero_interval_is_inactive() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let (tx, mut rx) = result_buffer();

    for interval in [Some(0), None] {
        let task = SiteTask::new(
            site(1, "example.com", interval, None),
            prober(&transport),
            tx.clone(),
            metrics(),
        );
        assert!(matches!(task.run().await, SiteOutcome::Inactive));
    }

    assert!(rx.pop_batch(10).is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_one_probe_per_cycle() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(204)));
    let (tx, mut rx) = result_buffer();
    let task = SiteTask::new(
        site(3, "example.com", Some(5), None),
        prober(&transport),
        tx,
        metrics(),
    );

    let handle = tokio::spawn(task.run());
    tokio::time::sleep(Duration::from_millis(10)).await;

    let first = rx.pop_batch(10);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].http_status_code, 204);
    assert_eq!(first[0].is_regex_pattern_compliant, None);
    assert_eq!(first[0].url, "example.com");
    assert_eq!(first[0].website_id, 3);

    // Nothing more until the full interval has passed.
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(rx.pop_batch(10).is_empty());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(rx.pop_batch(10).len(), 1);
    assert_eq!(transport.calls().len(), 2);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_keep_the_task_running() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Timeout));
    let (tx, mut rx) = result_buffer();
    let task = SiteTask::new(
        site(1, "slow.com", Some(1), None),
        prober(&transport),
        tx,
        metrics(),
    );

    let handle = tokio::spawn(task.run());
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let results = rx.pop_batch(10);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.http_status_code == 408 && r.response_time == 30.0));
    assert!(!handle.is_finished());

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_connection_failure_ends_the_task() {
    let transport = Arc::new(
        ScriptedTransport::always(Reply::Refused)
            .on("https://flaky.com", vec![Reply::Status(200)]),
    );
    let (tx, mut rx) = result_buffer();
    let registry = metrics();
    let task = SiteTask::new(
        site(1, "flaky.com", Some(10), None),
        prober(&transport),
        tx,
        registry.clone(),
    );

    let outcome = task.run().await;

    assert!(matches!(
        outcome,
        SiteOutcome::Failed(MonitorError::Connection { .. })
    ));
    assert_eq!(rx.pop_batch(10).len(), 1);
    assert_eq!(registry.probe_failures_total.get(), 1.0);
}

#[tokio::test]
async fn test_pattern_is_checked_against_body() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Body(
        200,
        "hello foo".to_string(),
    )));
    let (tx, mut rx) = result_buffer();
    let task = SiteTask::new(
        site(1, "example.com", Some(60), Some("foo")),
        prober(&transport),
        tx,
        metrics(),
    );

    let handle = tokio::spawn(task.run());
    tokio::task::yield_now().await;
    while rx.is_empty() {
        tokio::task::yield_now().await;
    }

    let results = rx.pop_batch(10);
    assert_eq!(results[0].is_regex_pattern_compliant, Some(true));
    assert_eq!(transport.calls()[0].0, "GET");

    handle.abort();
}

#[tokio::test]
async fn test_empty_pattern_falls_back_to_head() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let (tx, rx) = result_buffer();
    drop(rx);
    let task = SiteTask::new(
        site(1, "example.com", Some(60), Some("")),
        prober(&transport),
        tx,
        metrics(),
    );

    assert!(matches!(task.run().await, SiteOutcome::Closed));
    assert_eq!(transport.calls()[0].0, "HEAD");
}

#[tokio::test]
async fn test_invalid_pattern_fails_before_probing() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let (tx, _rx) = result_buffer();
    let task = SiteTask::new(
        site(1, "example.com", Some(60), Some("(unclosed")),
        prober(&transport),
        tx,
        metrics(),
    );

    assert!(matches!(
        task.run().await,
        SiteOutcome::Failed(MonitorError::InvalidPattern(_))
    ));
    assert!(transport.calls().is_empty());
}
