mod action;
mod app;
mod app_state;
mod component;
mod components;
mod permission;
mod scanner;
mod theme;
mod widgets;

use lottie_proto::cache::HttpDownloader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = lottie_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("lottiescan.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG overrides; HTTP client internals are noisy at debug.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("lottiescan log: {}", log_path.display());

    tracing::info!("lottiescan starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = lottie_proto::config::Config::load().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {}", e);
        Default::default()
    });
    tracing::debug!(
        "scanner={:?} device={} cache={}",
        config.scanner.source,
        config.scanner.device.display(),
        config.cache.dir.display()
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let downloader = HttpDownloader::new(&config.http)?;
    let app = app::App::new(&config, downloader, log_path);
    app.run().await
}
