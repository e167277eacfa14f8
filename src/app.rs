use tracing::{error, info};

use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::start_server;

pub fn run() -> std::io::Result<()> {
    let config = ConfigService::load().map_err(|err| {
        let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
        error!(error = %err, "Failed to load configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .try_init();

    let services = bootstrap::setup(&config).map_err(|err| {
        error!(error = %err, "Failed to initialise console");
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    })?;

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(services.console, services.logs, &config.server)?;
        info!(
            host = %config.server.host,
            port = config.server.port,
            "FAQ bot console listening"
        );
        server.await
    })
}
