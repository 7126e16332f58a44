mod controller;

pub use controller::{ChartSession, SessionOptions};
