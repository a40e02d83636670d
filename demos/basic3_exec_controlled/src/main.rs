use crate::tracing_setup::tracing_init;
use execrx::exec_controlled;
use futures::stream;
use futures_signals::signal::SignalExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

mod tracing_setup;

#[tokio::main]
async fn main() {
    tracing_init();

    info!("==========================================");
    warn!("example: exec controlled by an interval");

    let clock = exec_controlled(
        |tick: Option<u64>| {
            stream::once(async move {
                let tick = tick.unwrap_or(0);
                debug!("Worker | reading clock for tick {tick}");
                sleep(Duration::from_millis(20)).await;
                Ok::<_, String>(tick)
            })
        },
        |trigger| {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_millis(200));
                interval.tick().await;
                for tick in 1..=5 {
                    interval.tick().await;
                    trigger.trigger(Some(tick));
                }
            })
        },
        u64::MAX,
        true,
    );

    clock
        .signal_cloned()
        .stop_if(|tick| *tick == 5)
        .for_each(|tick| async move {
            info!("  Main | show tick: {tick}");
        })
        .await;

    info!("  Main | Finish");
}
