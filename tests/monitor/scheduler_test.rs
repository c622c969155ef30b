use std::sync::Arc;
use std::time::Duration;

use site_monitor::services::monitor::{
    result_buffer, Prober, ResultReceiver, Scheduler, SiteOutcome, SiteStatus,
};

use crate::common::{metrics, site, Reply, ScriptedTransport};

fn build_scheduler(transport: Arc<ScriptedTransport>) -> (Scheduler, ResultReceiver) {
    let (tx, rx) = result_buffer();
    let prober = Arc::new(Prober::new(transport, Duration::from_secs(30)));
    (Scheduler::new(prober, tx, metrics()), rx)
}

#[tokio::test(start_paused = true)]
async fn test_start_launches_one_task_per_site() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let (scheduler, mut rx) = build_scheduler(transport);

    let launched = scheduler
        .start(vec![
            site(1, "one.com", Some(10), None),
            site(2, "two.com", Some(10), None),
            site(3, "off.com", Some(0), None),
        ])
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(launched, 3);

    let outcomes = scheduler.reap().await;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, 3);
    assert!(matches!(outcomes[0].1, SiteOutcome::Inactive));

    assert_eq!(scheduler.live_tasks().await, 2);
    assert_eq!(scheduler.status(1).await, Some(SiteStatus::Running));
    assert_eq!(scheduler.status(3).await, Some(SiteStatus::Inactive));

    let mut ids: Vec<i64> = rx.pop_batch(10).iter().map(|r| r.website_id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_site_is_recorded_and_others_continue() {
    let transport = Arc::new(
        ScriptedTransport::always(Reply::Status(200))
            .on("https://down.com", vec![Reply::Refused]),
    );
    let (scheduler, mut rx) = build_scheduler(transport);

    scheduler.register(site(1, "down.com", Some(5), None)).await;
    scheduler.register(site(2, "up.com", Some(5), None)).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let outcomes = scheduler.reap().await;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].0, 1);

    match scheduler.status(1).await {
        Some(SiteStatus::Failed(message)) => assert!(message.contains("down.com")),
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(scheduler.live_tasks().await, 1);

    // The healthy site keeps producing results.
    tokio::time::sleep(Duration::from_secs(5)).await;
    let results = rx.pop_batch(10);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.website_id == 2));
}

#[tokio::test(start_paused = true)]
async fn test_register_twice_keeps_a_single_task() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let (scheduler, mut rx) = build_scheduler(transport.clone());

    scheduler.register(site(1, "example.com", Some(10), None)).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    scheduler.register(site(1, "example.com", Some(10), None)).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(scheduler.live_tasks().await, 1);
    assert!(scheduler.reap().await.is_empty());
    assert_eq!(rx.pop_batch(10).len(), 2);

    // Only the replacement keeps probing.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(rx.pop_batch(10).len(), 1);
}

#[tokio::test]
async fn test_reap_without_finished_tasks() {
    let transport = Arc::new(ScriptedTransport::always(Reply::Status(200)));
    let (scheduler, _rx) = build_scheduler(transport);

    assert!(scheduler.reap().await.is_empty());
    assert_eq!(scheduler.live_tasks().await, 0);
    assert!(scheduler.statuses().await.is_empty());
    assert_eq!(scheduler.status(42).await, None);
}
