use crate::common::{wait_for_value, CallCounter};
use execrx::exec_once;
use execrx::mock::MockExecutor;
use execrx::Outcome;
use futures::{stream, StreamExt};
use std::time::Duration;
use tokio::time::{sleep, timeout};

mod common;

#[tokio::test]
async fn test_exec_once_starts_with_initial_value() {
    let mock = MockExecutor::<i32, ()>::new();
    mock.mock_result_after(Outcome::success(42), Duration::from_millis(20));

    let state = exec_once(mock.clone(), 0);
    assert_eq!(state.get(), 0);

    wait_for_value(state.as_mutable(), 42).await;
    assert_eq!(mock.calls(), vec![None]);
}

#[tokio::test]
async fn test_exec_once_invokes_executor_once() {
    let counter = CallCounter::default();
    let counter_clone = counter.clone();
    let state = exec_once(
        move |_: Option<()>| {
            counter_clone.hit();
            stream::once(async { Ok::<_, String>("loaded".to_string()) })
        },
        String::new(),
    );
    assert_eq!(counter.count(), 1);

    let first = state.subscribe();
    let second = state.subscribe();
    wait_for_value(state.as_mutable(), "loaded".to_string()).await;

    let first: Vec<String> = first.take(2).collect().await;
    let second: Vec<String> = second.take(2).collect().await;
    assert_eq!(first, vec!["".to_string(), "loaded".to_string()]);
    assert_eq!(second, first);

    sleep(Duration::from_millis(20)).await;
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_exec_once_replays_every_emission() {
    let mock = MockExecutor::<u32, ()>::new();
    mock.mock_sequence_results(vec![
        Outcome::success(1),
        Outcome::success(2),
        Outcome::success(3),
    ]);

    let state = exec_once(mock, 0);
    let values = state.subscribe();

    let seen: Vec<u32> = timeout(Duration::from_secs(1), values.take(4).collect())
        .await
        .unwrap();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_exec_once_late_subscriber_starts_at_latest() {
    let mock = MockExecutor::<u32, ()>::new();
    mock.mock_sequence_results(vec![Outcome::success(1), Outcome::success(2)]);

    let state = exec_once(mock, 0);
    wait_for_value(state.as_mutable(), 2).await;

    let mut values = Box::pin(state.subscribe());
    assert_eq!(values.next().await, Some(2));
}

#[tokio::test]
async fn test_exec_once_stops_forwarding_on_failure() {
    let mut mock = MockExecutor::<u32, ()>::new();
    mock.set_delay(Duration::from_millis(5));
    mock.mock_sequence_results(vec![
        Outcome::success(1),
        Outcome::fail_with_message("broken"),
        Outcome::success(3),
    ]);

    let state = exec_once(mock, 0);
    wait_for_value(state.as_mutable(), 1).await;
    sleep(Duration::from_millis(50)).await;
    assert_eq!(state.get(), 1);
}
