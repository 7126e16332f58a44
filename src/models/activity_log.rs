use std::collections::VecDeque;

use eframe::egui::Color32;

use crate::config::PLOT_CONFIG;
use crate::utils::format_clock_hms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Info,
    Success,
    Warning,
    Error,
    Price,
}

impl ActivityKind {
    pub fn color(&self) -> Color32 {
        match self {
            Self::Info => PLOT_CONFIG.log_info,
            Self::Success => PLOT_CONFIG.log_success,
            Self::Warning => PLOT_CONFIG.log_warning,
            Self::Error => PLOT_CONFIG.log_error,
            Self::Price => PLOT_CONFIG.log_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub time: String,
    pub message: String,
    pub kind: ActivityKind,
}

/// User-facing session feed. Newest entry first, bounded.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, kind: ActivityKind, message: impl Into<String>) {
        self.push_at(crate::utils::TimeUtils::now_timestamp_ms(), kind, message);
    }

    pub fn push_at(&mut self, epoch_ms: i64, kind: ActivityKind, message: impl Into<String>) {
        self.entries.push_front(ActivityEntry {
            time: format_clock_hms(epoch_ms),
            message: message.into(),
            kind,
        });
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(crate::config::CHART.activity_log_capacity)
    }
}
