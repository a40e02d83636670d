use crate::tracing_setup::tracing_init;
use execrx::exec_always;
use futures::{stream, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

mod tracing_setup;

#[tokio::main]
async fn main() {
    tracing_init();

    info!("==========================================");
    warn!("example: exec always, one run per subscriber");

    let runs = Arc::new(AtomicU64::new(0));
    let runs_clone = runs.clone();
    let temperature = exec_always(
        move |_: Option<()>| {
            let run = runs_clone.fetch_add(1, Ordering::SeqCst) + 1;
            debug!("Worker | sampling temperature, run {run}");
            stream::iter([20, 20, 21, 21, 22]).then(|celsius| async move {
                sleep(Duration::from_millis(100)).await;
                Ok::<_, String>(celsius)
            })
        },
        0,
    );

    let first = temperature.subscribe();
    let first = tokio::spawn(async move {
        first
            .take(4)
            .for_each(|celsius| async move {
                info!("  Subscriber A | temperature: {celsius}");
            })
            .await;
    });

    sleep(Duration::from_millis(250)).await;

    let second = temperature.subscribe();
    let second = tokio::spawn(async move {
        second
            .take(2)
            .for_each(|celsius| async move {
                info!("  Subscriber B | temperature: {celsius}");
            })
            .await;
    });

    let _ = tokio::join!(first, second);
    info!(
        "  Main | executor ran {} times, latest value {}",
        runs.load(Ordering::SeqCst),
        temperature.get()
    );
}
