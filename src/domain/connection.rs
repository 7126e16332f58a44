use eframe::egui::Color32;

use crate::config::PLOT_CONFIG;

/// Health of the active tick source. Drives the status indicator only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Connecting,
    Open,
    #[default]
    Closed,
    Errored,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "Connecting…",
            Self::Open => "Live",
            Self::Closed => "Disconnected",
            Self::Errored => "Connection error",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Connecting => PLOT_CONFIG.status_connecting,
            Self::Open => PLOT_CONFIG.status_open,
            Self::Closed => PLOT_CONFIG.status_closed,
            Self::Errored => PLOT_CONFIG.status_errored,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Open)
    }
}
