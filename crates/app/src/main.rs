//! Demo entry point: seeds the default list, completes its first item and
//! reports what the handlers saw.

use app::seed::DEFAULT_ITEM_TITLES;
use app::{AppError, Application, Config};
use store::{InMemoryTodoStore, TodoStore};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, cancelling");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, cancelling");
        }
    }
}

async fn run<S: TodoStore>(
    application: &Application<S>,
    cancel: &CancellationToken,
) -> app::Result<()> {
    application.seed(cancel).await?;

    let service = application.service();
    let first = service
        .lists()
        .await?
        .into_iter()
        .flat_map(|view| view.items)
        .find(|item| item.title() == DEFAULT_ITEM_TITLES[0]);

    match first {
        Some(item) => service.complete_item(item.id(), cancel).await?,
        None => tracing::info!("no seeded item to complete"),
    }

    for view in service.lists().await? {
        tracing::info!(
            list = view.list.title(),
            colour = %view.list.colour(),
            items = view.items.len(),
            done = view.done_count(),
            "todo list summary"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    app::telemetry::init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Cancel every use case on shutdown
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            cancel.cancel();
        }
    });

    // 4. Bootstrap over the in-memory store and run the demo
    let application = Application::bootstrap(InMemoryTodoStore::new(), &config);
    tracing::info!(app_name = %application.config().app_name, "starting");

    let outcome = run(&application, &cancel).await;

    tracing::info!(metrics = %metrics_handle.render(), "metrics snapshot");

    match outcome {
        Ok(()) => {}
        Err(AppError::Cancelled) => tracing::info!("demo run cancelled"),
        Err(err) => {
            tracing::error!(error = %err, "demo run failed");
            std::process::exit(1);
        }
    }
}
