use tracing::{error, info};

use preview_store::{Config, ScopedFileStore, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = preview_store::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        preview_store::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let store = match ScopedFileStore::new(&config.storage.path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize storage at {}: {}", config.storage.path, e);
            std::process::exit(1);
        }
    };
    info!("Storage root: {}", store.root().display());

    let server = match WebServer::new(&config.web, store) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
