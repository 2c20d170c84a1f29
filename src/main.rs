//! Shelfmap
//!
//! Store aisle layout editor and product map
//!
//! This is the main entry point for the Dioxus Desktop application.

use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging (RUST_LOG overrides the default level)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .pretty()
        .init();

    shelfmap_ui::launch();
}
