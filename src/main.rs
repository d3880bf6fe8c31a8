use eframe::egui;
use std::sync::mpsc;
use tictac::app::TicTacApp;
use tictac::assistant::{AssistantClient, AssistantConfig};
use tictac::theme::Theme;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AssistantConfig::from_env();
    tracing::info!(
        model = %config.model,
        base_url = %config.base_url,
        api_key_var = %config.api_key_var,
        "assistant configured"
    );
    let (tx, rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("tictac-runtime")
        .build()?;

    let assistant = AssistantClient::new(config, tx, runtime.handle().clone())?;
    let theme = Theme::default();
    let app = TicTacApp::new(rx, assistant, theme.clone());
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tic Tac Toe",
        native_options,
        Box::new(move |creation_context| {
            theme.apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
