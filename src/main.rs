use cardbot::config::Config;
use cardbot::db::Database;
use cardbot::logging;
use cardbot::orchestrator::SessionOrchestrator;
use cardbot::telegram::TelegramTransport;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let _log_guard = logging::init_tracing(&config.log_level);

    let db = match Database::connect(&config.database_url).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(error = %err, "failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(err) = db.setup().await {
        tracing::error!(error = %err, "failed to set up database schema");
        std::process::exit(1);
    }

    let transport = TelegramTransport::new(&config.bot_token);
    let mut orchestrator = SessionOrchestrator::new(db, transport, config);

    tracing::info!("cardbot started, polling for events");

    tokio::select! {
        _ = orchestrator.run() => {}
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, stopping");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
