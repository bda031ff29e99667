use clap::Parser;
use openapi_doc_loader::core::runner::{run_once, ONCE_FAILURE_EXIT_CODE};
use openapi_doc_loader::utils::logger;
use openapi_doc_loader::{
    Bootstrap, CliConfig, ConfigProvider, OpenApiLoader, OperationCatalog, PeriodicTrigger,
    StartupTrigger,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting openapi-doc-loader");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let catalog = Arc::new(OperationCatalog::new());
    let loader = Arc::new(OpenApiLoader::from_config(Arc::clone(&catalog), &config)?);
    tracing::info!("📡 Document source: {}", loader.url());

    if cli.once {
        return match run_once(&loader, &catalog).await {
            Ok(snapshot) => {
                println!("{}", snapshot);
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(ONCE_FAILURE_EXIT_CODE);
            }
        };
    }

    let shutdown = CancellationToken::new();
    let periodic =
        PeriodicTrigger::new(Arc::clone(&loader), config.schedule()).spawn(shutdown.clone());

    let mut bootstrap = Bootstrap::new();
    bootstrap.register(Arc::new(StartupTrigger::new(Arc::clone(&loader))));
    bootstrap.signal_ready().await;

    shutdown_signal().await;
    shutdown.cancel();
    periodic.await?;

    tracing::info!("openapi-doc-loader stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, waiting for the current run to finish");
}
