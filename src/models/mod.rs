mod activity_log;
mod catalog;
mod quote_board;
mod window;

pub use {
    activity_log::{ActivityEntry, ActivityKind, ActivityLog},
    catalog::Catalog,
    quote_board::{Quote, QuoteBoard},
    window::TimeSeriesWindow,
};
