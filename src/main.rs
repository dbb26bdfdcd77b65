mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let config = AppConfig::from_env().expect("should load configuration");
    let webview_data_dir = config
        .webview_data_dir()
        .expect("should resolve and create WebView2 data directory");
    tracing::info!(data_dir = %config.data_dir.display(), "starting tahfidz admin");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Tahfidz Admin"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
