//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit one log line per live tick (very noisy).
    pub log_stream_ticks: bool,

    /// Selection changes, generation bumps and dropped stale events.
    pub log_session: bool,

    /// Backfill requests and their outcome.
    pub log_backfill: bool,

    pub log_interaction: bool,
}

pub const DF: LogFlags = LogFlags {
    log_session: true,
    log_backfill: true,

    log_stream_ticks: false,
    log_interaction: false,
};
