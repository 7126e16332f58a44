#![allow(clippy::collapsible_if)]

// Core modules
pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod session;
mod ui;
pub mod utils;

pub use app::App;

// CLI argument parsing
use {
    crate::domain::Market,
    clap::Parser,
    std::path::PathBuf,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file with the instrument catalog (defaults to the built-in list)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Market tab to open on start
    #[arg(long, value_enum)]
    pub market: Option<Market>,

    /// Never connect to the exchange; chart every market from synthetic data
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Seed for synthetic price walks
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
