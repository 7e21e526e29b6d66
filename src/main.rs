use std::sync::Arc;

use tracing::error;
use whelps_shell::config::{load_config, print_schema};
use whelps_shell::startup::run;
use whelps_shell::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Could not render config schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = Arc::new(load_config());

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
