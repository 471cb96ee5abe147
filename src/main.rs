use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tokio::sync::mpsc::{self, UnboundedSender};

use todo_api::config::Config;
use todo_api::repository::{Database, TodoStore};
use todo_api::{api, telemetry};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// A panic anywhere in the process is treated as fatal: log it, then let the
/// main task close the server.
fn install_panic_hook(fatal: UnboundedSender<()>) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Uncaught panic");
        let _ = fatal.send(());
        default_hook(info);
    }));
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(env!("CARGO_PKG_NAME"), &config.log_level)?;

    let database = Database::connect(&config.database_url)?;
    database.run_migrations()?;
    let store: Arc<dyn TodoStore> = Arc::new(database);
    let app_data = web::Data::from(store);

    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();
    install_panic_hook(fatal_tx);

    let server = HttpServer::new(move || api::app(app_data.clone()))
        .shutdown_timeout(SHUTDOWN_TIMEOUT.as_secs())
        .bind((config.host.as_str(), config.port))?
        .run();

    let handle = server.handle();
    let mut running = actix_web::rt::spawn(server);
    tracing::info!(host = %config.host, port = config.port, "Server is running");

    tokio::select! {
        result = &mut running => {
            result??;
            tracing::info!("Server closed");
            Ok(())
        }
        Some(()) = fatal_rx.recv() => {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle.stop(true)).await.is_err() {
                tracing::warn!("Server did not close in time, forcing exit");
            } else {
                tracing::info!("Server closed");
            }
            std::process::exit(1);
        }
    }
}
