//! Lore - a compendium viewer for folders of markdown
//!
//! Renders a directory of markdown entries in the terminal with clickable
//! links, a draggable scrollbar, and a title-sorted entry index.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod tui;

#[derive(Parser)]
#[command(name = "lore")]
#[command(about = "Browse a folder of markdown entries in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Compendium root directory (defaults to the current directory)
    #[arg(short, long)]
    directory: Option<String>,

    /// Entry opened on startup, relative to the root
    #[arg(short, long, default_value = "landing.md")]
    landing: String,

    /// Theme name
    #[arg(short, long, default_value = "parchment")]
    theme: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List available themes
    Themes,
}

/// Restore the terminal to a usable state.
fn restore_terminal() {
    use crossterm::event::DisableMouseCapture;
    use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

fn main() -> Result<()> {
    // Panics must restore the terminal before printing, or the message is
    // lost to the alternate screen.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Log to a file; stdout belongs to the TUI.
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lore")
        .join("logs");
    let log_path = if std::fs::create_dir_all(&log_dir).is_ok() {
        log_dir.join("lore.log")
    } else {
        std::env::temp_dir().join("lore.log")
    };
    if let Ok(log_file) = std::fs::File::create(&log_path) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Themes) => {
            println!("Available themes ({}):", tui::THEME_REGISTRY.count());
            for (name, theme) in tui::THEME_REGISTRY.list() {
                println!("  {} - {}", name, theme.display_name);
            }
            Ok(())
        }
        None => {
            let theme = tui::THEME_REGISTRY.get_or_default(&cli.theme).clone();
            tracing::info!("using theme: {} ({})", theme.display_name, theme.name);
            let root = match cli.directory {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir()?,
            };
            tui::run(root, &cli.landing, theme)
        }
    }
}
