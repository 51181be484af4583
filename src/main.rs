//! Sisley - headless feed demo.
//!
//! Runs the feed screen through the shell until all pending work
//! settles, then reports where the scroll landed.

use sisley::feed::{FeedApp, FeedMessage};
use sisley::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Sisley feed demo");

    let config = AppConfig {
        title: String::from("Layouts Codelab"),
        window_size: (480.0, 800.0),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut shell = sisley::Shell::<FeedApp>::new(&config);

        // Fetch the shared avatar, then let everything settle.
        shell.dispatch(FeedMessage::LoadAvatar);
        shell.run_until_idle().await;

        // Exercise the scroll shortcuts the top bar exposes.
        shell.dispatch(FeedMessage::ScrollToEnd);
        shell.run_until_idle().await;

        let state = shell.state();
        tracing::info!(
            offset = state.scroll.offset,
            max = state.scroll.max.get(),
            rows = state.items.len(),
            "feed settled"
        );
        println!(
            "feed settled at offset {:.1} of {:.1} ({} rows)",
            state.scroll.offset,
            state.scroll.max.get(),
            state.items.len()
        );
    });

    Ok(())
}
