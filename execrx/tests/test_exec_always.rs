use crate::common::CallCounter;
use execrx::exec_always;
use execrx::mock::MockExecutor;
use execrx::Outcome;
use futures::{future, stream, StreamExt};
use std::time::Duration;
use tokio::time::{sleep, timeout};

mod common;

#[tokio::test]
async fn test_exec_always_delivers_initial_value_once() {
    let mock = MockExecutor::<i32, ()>::new();
    mock.mock_pending();

    let always = exec_always(mock, 0);
    let mut values = Box::pin(always.subscribe());

    assert_eq!(values.next().await, Some(0));
    let next = timeout(Duration::from_millis(100), values.next()).await;
    assert!(next.is_err(), "initial value delivered twice");
}

#[tokio::test]
async fn test_exec_always_suppresses_duplicates() {
    let mut mock = MockExecutor::<i32, ()>::new();
    mock.set_delay(Duration::from_millis(20));
    mock.mock_sequence_results(vec![
        Outcome::success(5),
        Outcome::success(5),
        Outcome::success(7),
    ]);

    let always = exec_always(mock, 0);
    let values = always.subscribe();

    let seen: Vec<i32> = timeout(Duration::from_secs(1), values.take(3).collect())
        .await
        .unwrap();
    assert_eq!(seen, vec![0, 5, 7]);
}

#[tokio::test]
async fn test_exec_always_skips_initial_value_after_first_emission() {
    let mut mock = MockExecutor::<i32, ()>::new();
    mock.set_delay(Duration::from_millis(20));
    mock.mock_sequence_results(vec![
        Outcome::success(1),
        Outcome::success(0),
        Outcome::success(2),
    ]);

    let always = exec_always(mock, 0);
    let values = always.subscribe();

    let seen: Vec<i32> = timeout(Duration::from_secs(1), values.take(3).collect())
        .await
        .unwrap();
    assert_eq!(seen, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_exec_always_invokes_per_subscription() {
    let counter = CallCounter::default();
    let counter_clone = counter.clone();
    let always = exec_always(
        move |_: Option<()>| {
            counter_clone.hit();
            stream::once(async { Ok::<_, String>(9) })
        },
        0,
    );

    let first = Box::pin(always.subscribe());
    let second = Box::pin(always.subscribe());
    assert_eq!(counter.count(), 2);

    let first: Vec<i32> = timeout(Duration::from_secs(1), first.take(2).collect())
        .await
        .unwrap();
    let second: Vec<i32> = timeout(
        Duration::from_secs(1),
        second.skip_while(|v| future::ready(*v == 0)).take(1).collect(),
    )
    .await
    .unwrap();
    assert_eq!(first, vec![0, 9]);
    assert_eq!(second, vec![9]);
    assert_eq!(always.get(), 9);
}

#[tokio::test]
async fn test_exec_always_late_subscriber_sees_latest_value() {
    let mock = MockExecutor::<i32, ()>::new();
    mock.mock_result(Outcome::success(3));
    mock.mock_pending();

    let always = exec_always(mock.clone(), 0);
    drop(always.subscribe());
    sleep(Duration::from_millis(50)).await;
    assert_eq!(always.get(), 3);

    let mut late = Box::pin(always.subscribe());
    assert_eq!(late.next().await, Some(3));
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_exec_always_delivers_every_emission_without_delay() {
    let always = exec_always(
        |_: Option<()>| stream::iter([Ok::<_, String>(1), Ok(2), Ok(3)]),
        0,
    );
    let values = always.subscribe();

    let seen: Vec<i32> = timeout(Duration::from_secs(1), values.take(4).collect())
        .await
        .unwrap();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_exec_always_suppresses_duplicates_without_delay() {
    let always = exec_always(
        |_: Option<()>| stream::iter([Ok::<_, String>(5), Ok(5), Ok(7)]),
        0,
    );
    let values = always.subscribe();

    let seen: Vec<i32> = timeout(Duration::from_secs(1), values.take(3).collect())
        .await
        .unwrap();
    assert_eq!(seen, vec![0, 5, 7]);
}
