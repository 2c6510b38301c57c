//! Tavernkeep - desktop composition root binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tavernkeep_engine::{load_dotenv_from_repo_root, AppConfig};

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();
    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "tavernkeep_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(database = %config.database_path.display(), "Starting Tavernkeep");

    let css = load_player_css();
    let head = format!("<style>{}</style>", css);
    let window = dioxus_desktop::WindowBuilder::new()
        .with_title("Tavernkeep")
        .with_inner_size(dioxus_desktop::LogicalSize::new(1100.0, 800.0));
    let cfg = dioxus_desktop::Config::new()
        .with_custom_head(head)
        .with_window(window);

    // The engine needs a live async runtime, so `App` is built inside the UI.
    dioxus::LaunchBuilder::new()
        .with_cfg(cfg)
        .with_context(config)
        .launch(tavernkeep_player::ui::app);

    Ok(())
}

fn load_player_css() -> String {
    const FALLBACK_CSS: &str = include_str!("../assets/css/tavernkeep.css");

    let css_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("css")
        .join("tavernkeep.css");
    std::fs::read_to_string(css_path).unwrap_or_else(|_| FALLBACK_CSS.to_string())
}
