#![forbid(unsafe_code)]

use std::env;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bonfire_server::{
    build_router, validate_startup_config_contract, AppState, DocumentStore, MemoryStore,
    ServerConfig, SqliteStore, StoreUri,
};

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"),
        Err(_) => default,
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_json = env_bool("BONFIRE_LOG_JSON", true);
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("BONFIRE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let store_uri_raw = env::var("BONFIRE_STORE_URI")
        .map_err(|_| "BONFIRE_STORE_URI is required; use memory: or sqlite:/path/to.db".to_string())?;
    let api = ServerConfig {
        max_body_bytes: env_usize("BONFIRE_MAX_BODY_BYTES", 64 * 1024),
        ..ServerConfig::default()
    };
    validate_startup_config_contract(&api)?;

    let store: Arc<dyn DocumentStore> = match StoreUri::parse(&store_uri_raw)
        .map_err(|e| e.to_string())?
    {
        StoreUri::Memory => Arc::new(MemoryStore::new()),
        StoreUri::Sqlite(path) => Arc::new(
            SqliteStore::open(&path).map_err(|e| format!("open sqlite store failed: {e}"))?,
        ),
    };
    store
        .ping()
        .await
        .map_err(|e| format!("store ping failed at startup: {e}"))?;
    info!(backend = store.backend_tag(), "document store ready");

    let state = AppState::with_config(store, api);
    state.ready.store(true, Ordering::Relaxed);
    let ready = state.ready.clone();
    let app = build_router(state);

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket
        .set_keepalive(true)
        .map_err(|e| format!("set_keepalive failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("bonfire-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            // Report not-ready while in-flight requests drain.
            ready.store(false, Ordering::Relaxed);
        })
        .await
        .map_err(|e| format!("serve failed: {e}"))
}
