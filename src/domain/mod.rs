// Domain types and value objects
mod connection;
mod instrument;
mod market;
mod sample;

pub use connection::ConnectionState;
pub use instrument::Instrument;
pub use market::{Market, MarketStatus};
pub use sample::Sample;
