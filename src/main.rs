//! Pub-quiz backend binary entrypoint wiring REST routes and storage backends.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pubquiz_back::{
    config::{AppConfig, StorageBackend},
    dao::quiz_store::memory::MemoryQuizStore,
    routes,
    services::{notification_service::NotificationSender, storage_supervisor},
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    let app_state = AppState::with_notifier(NotificationSender::new(
        config.notify_webhook_url.clone(),
    ));

    start_storage(&config, app_state.clone()).await?;

    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, backend = ?config.backend, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Install the selected storage backend, spawning the reconnect supervisor
/// for the networked ones.
async fn start_storage(config: &AppConfig, state: SharedState) -> anyhow::Result<()> {
    match config.backend {
        StorageBackend::Memory => {
            state
                .install_quiz_store(Arc::new(MemoryQuizStore::new()))
                .await;
            info!("using embedded in-memory storage; data is lost on restart");
        }
        StorageBackend::Mongo => {
            #[cfg(feature = "mongo-store")]
            spawn_mongo_supervisor(state);
            #[cfg(not(feature = "mongo-store"))]
            anyhow::bail!("mongo backend selected but the mongo-store feature is disabled");
        }
        StorageBackend::Couch => {
            #[cfg(feature = "couch-store")]
            spawn_couch_supervisor(state);
            #[cfg(not(feature = "couch-store"))]
            anyhow::bail!("couch backend selected but the couch-store feature is disabled");
        }
    }

    Ok(())
}

#[cfg(feature = "mongo-store")]
fn spawn_mongo_supervisor(state: SharedState) {
    use pubquiz_back::dao::{
        quiz_store::{
            QuizStore,
            mongodb::{MongoConfig, MongoQuizStore},
        },
        storage::StorageError,
    };

    tokio::spawn(storage_supervisor::run(state, || async {
        let config = MongoConfig::from_env().await.map_err(StorageError::from)?;
        let store = MongoQuizStore::connect(config)
            .await
            .map_err(StorageError::from)?;
        Ok(Arc::new(store) as Arc<dyn QuizStore>)
    }));
}

#[cfg(feature = "couch-store")]
fn spawn_couch_supervisor(state: SharedState) {
    use pubquiz_back::dao::{
        quiz_store::{
            QuizStore,
            couchdb::{CouchConfig, CouchQuizStore},
        },
        storage::StorageError,
    };

    tokio::spawn(storage_supervisor::run(state, || async {
        let config = CouchConfig::from_env().map_err(StorageError::from)?;
        let store = CouchQuizStore::connect(config)
            .await
            .map_err(StorageError::from)?;
        Ok(Arc::new(store) as Arc<dyn QuizStore>)
    }));
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
