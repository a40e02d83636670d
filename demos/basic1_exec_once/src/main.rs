use crate::tracing_setup::tracing_init;
use execrx::exec_once;
use futures::stream;
use futures_signals::signal::SignalExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

mod tracing_setup;

#[derive(Debug, Clone, PartialEq)]
enum Profile {
    Unknown,
    Loaded { name: String, visits: u32 },
}

#[tokio::main]
async fn main() {
    tracing_init();

    info!("==========================================");
    warn!("example: exec once");

    let profile = exec_once(
        |_: Option<()>| stream::once(load_profile()),
        Profile::Unknown,
    );
    info!("  Main | initial state: {:?}", profile.get_cloned());

    profile
        .signal_cloned()
        .stop_if(|profile| matches!(profile, Profile::Loaded { .. }))
        .for_each(|profile| async move {
            info!("  Main | show state: {:?}", profile);
        })
        .await;

    info!("  Main | Finish");
}

async fn load_profile() -> Result<Profile, String> {
    debug!("Worker | loading profile");
    sleep(Duration::from_millis(300)).await;
    Ok(Profile::Loaded {
        name: "ferris".to_string(),
        visits: 42,
    })
}
