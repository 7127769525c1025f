//! Connect Four against a minimax engine, in a window or a terminal.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect4::cli::{Cli, Mode};
use connect4::text::TerminalIo;
use connect4::ui::ConnectFourApp;
use connect4::{run_session, AppConfig, GameSession};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("connect4=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    cli.apply(&mut config);
    config.validate().context("invalid settings")?;

    info!(
        depth = config.engine.depth,
        heuristic = ?config.engine.heuristic,
        mode = ?cli.mode(),
        "starting"
    );
    let session = GameSession::from_config(&config);

    match cli.mode() {
        Mode::Gui => run_gui(session),
        Mode::Text => {
            let mut session = session;
            let outcome = run_session(&mut session, &mut TerminalIo::stdio())?;
            info!(?outcome, "terminal session ended");
            Ok(())
        }
    }
}

fn run_gui(session: GameSession) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Connect Four"),
        ..Default::default()
    };

    eframe::run_native(
        "Connect Four",
        options,
        Box::new(|cc| Ok(Box::new(ConnectFourApp::new(cc, session)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
