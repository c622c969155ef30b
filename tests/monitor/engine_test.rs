use std::sync::Arc;
use std::time::Duration;

use site_monitor::config::MonitoringSettings;
use site_monitor::services::monitor::{FlushOutcome, MonitorEngine, SiteStatus};

use crate::common::{metrics, site, FailingSink, RecordingSink, Reply, ScriptedTransport};

#[tokio::test(start_paused = true)]
async fn test_registered_site_reaches_the_sink() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let sink = Arc::new(RecordingSink::default());
    let mut engine = MonitorEngine::new(
        &MonitoringSettings::default(),
        transport,
        sink.clone(),
        metrics(),
    );

    engine
        .scheduler()
        .register(site(11, "example.com", Some(5), None))
        .await;

    let mut saved_count = None;
    for _ in 0..3 {
        if let FlushOutcome::Saved { count, .. } = engine.run_cycle().await {
            saved_count = Some(count);
            break;
        }
    }
    assert_eq!(saved_count, Some(1));

    let saved = sink.all();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].website_id, 11);
    assert_eq!(saved[0].url, "example.com");
    assert_eq!(saved[0].http_status_code, 200);
    assert_eq!(saved[0].is_regex_pattern_compliant, None);
}

#[tokio::test(start_paused = true)]
async fn test_sink_failure_does_not_stop_the_loop() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let sink = Arc::new(FailingSink::default());
    let mut engine = MonitorEngine::new(
        &MonitoringSettings::default(),
        transport,
        sink.clone(),
        metrics(),
    );

    engine
        .scheduler()
        .register(site(1, "example.com", Some(60), None))
        .await;

    let mut dropped_count = None;
    for _ in 0..3 {
        if let FlushOutcome::Dropped { count, .. } = engine.run_cycle().await {
            dropped_count = Some(count);
            break;
        }
    }
    assert_eq!(dropped_count, Some(1));
    assert!(engine.run_cycle().await.is_idle());
    assert_eq!(sink.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cycle_reaps_failed_sites() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Refused));
    let sink = Arc::new(RecordingSink::default());
    let mut engine = MonitorEngine::new(
        &MonitoringSettings::default(),
        transport,
        sink.clone(),
        metrics(),
    );
    let scheduler = engine.scheduler();

    scheduler.register(site(4, "gone.com", Some(5), None)).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    engine.run_cycle().await;

    assert!(matches!(scheduler.status(4).await, Some(SiteStatus::Failed(_))));
    assert_eq!(scheduler.live_tasks().await, 0);
    assert!(sink.batches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_run_starts_initial_sites() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let sink = Arc::new(RecordingSink::default());
    let engine = MonitorEngine::new(
        &MonitoringSettings::default(),
        transport,
        sink.clone(),
        metrics(),
    );
    let scheduler = engine.scheduler();

    let handle = tokio::spawn(engine.run(vec![
        site(1, "one.com", Some(30), None),
        site(2, "two.com", None, None),
    ]));
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(scheduler.live_tasks().await, 1);
    assert_eq!(scheduler.status(2).await, Some(SiteStatus::Inactive));
    assert_eq!(sink.all().len(), 1);

    handle.abort();
}
