#[cfg(feature = "whisper")]
mod env;

#[cfg(feature = "whisper")]
#[tokio::main]
async fn main() -> std::io::Result<()> {
    use std::net::SocketAddr;
    use std::time::Duration;

    use tower_http::{
        cors::{self, CorsLayer},
        trace::TraceLayer,
    };
    use tracing_subscriber::prelude::*;

    use murmur_stt_engine::{EngineConfig, WhisperEngine};
    use murmur_transcribe_srt::ServiceConfig;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env = env::env();

    let mut engine = EngineConfig::new(&env.model_path);
    engine.device = env.device;
    engine.compute = env.compute_type;

    let mut config = ServiceConfig::new(&env.upload_dir, engine);
    config.options.beam_size = env.beam_size;
    config.max_segment_duration = env.max_segment_duration;
    config.transcribe_timeout = env.transcribe_timeout_secs.map(Duration::from_secs);
    config.max_upload_bytes = env.max_upload_mb * 1024 * 1024;

    let app = murmur_transcribe_srt::router::<WhisperEngine>(config)
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], env.port));
    tracing::info!(addr = %addr, "server_listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(feature = "whisper")]
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown_signal_received");
}

#[cfg(not(feature = "whisper"))]
fn main() {
    eprintln!("murmur-api was built without an inference backend; rebuild with `--features whisper`");
    std::process::exit(2);
}
