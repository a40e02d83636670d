use crate::tracing_setup::tracing_init;
use execrx::{ExecChannels, ExecError, ExecSubject};
use futures::stream;
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, SignalExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

mod tracing_setup;

#[tokio::main]
async fn main() {
    tracing_init();

    let error = Mutable::new(None::<ExecError>);
    let loading = Mutable::new(false);
    let search = ExecSubject::with_channels(
        |query: Option<String>| stream::once(search_users(query.unwrap_or_default())),
        Vec::<String>::new(),
        ExecChannels::new()
            .with_error(error.clone())
            .with_loading(loading.clone()),
    );

    let view = map_ref! {
        let results = search.signal(),
        let is_loading = loading.signal(),
        let last_error = error.signal_cloned() =>
        format!("results: {:?} | loading: {} | error: {:?}", results, is_loading, last_error)
    };
    let view = tokio::spawn(view.for_each(|line| async move {
        info!("  View | {line}");
    }));

    info!("==========================================");
    warn!("A. Typing quickly, only the last query wins");
    for query in ["f", "fe", "fer"] {
        search.exec(query.to_string());
        sleep(Duration::from_millis(30)).await;
    }
    sleep(Duration::from_millis(500)).await;

    info!("==========================================");
    warn!("B. A failing query keeps the previous results");
    search.exec(String::new());
    sleep(Duration::from_millis(500)).await;

    info!("==========================================");
    warn!("C. The subject keeps working after a failure");
    search.exec("bo".to_string());
    sleep(Duration::from_millis(500)).await;

    view.abort();
    info!("  Main | Finish");
}

async fn search_users(query: String) -> Result<Vec<String>, String> {
    debug!("Worker | searching {query:?}");
    sleep(Duration::from_millis(200)).await;
    if query.is_empty() {
        return Err("empty query".to_string());
    }
    let users = ["ferris", "fernando", "bob", "borrow-checker"];
    Ok(users
        .iter()
        .filter(|user| user.starts_with(&query))
        .map(|user| user.to_string())
        .collect())
}
