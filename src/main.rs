use payments_gateway::config::AppConfig;
use payments_gateway::gateways::acquiring_bank::AcquiringBankClient;
use payments_gateway::gateways::mock::{MockBank, MockBehavior};
use payments_gateway::gateways::BankGateway;
use payments_gateway::http::router::build_router;
use payments_gateway::repo::payments_repo::PaymentsRepo;
use payments_gateway::service::payment_service::PaymentService;
use payments_gateway::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let bank: Arc<dyn BankGateway> = match cfg.bank_mock_behavior.as_deref() {
        Some(name) => {
            let behavior = MockBehavior::parse(name)
                .ok_or_else(|| anyhow::anyhow!("unknown BANK_MOCK_BEHAVIOR: {name}"))?;
            tracing::warn!(behavior = name, "using in-process mock bank");
            Arc::new(MockBank::new(behavior))
        }
        None => Arc::new(AcquiringBankClient::new(cfg.bank_url.clone(), cfg.bank_timeout_ms)),
    };

    let payments_repo = PaymentsRepo::spawn(cfg.ledger_buffer);
    let state = AppState {
        payment_service: PaymentService::new(payments_repo, bank),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {} (bank: {})", cfg.bind_addr, cfg.bank_url);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
