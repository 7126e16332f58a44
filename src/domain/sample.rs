use serde::{Deserialize, Serialize};

/// One `{time, price}` observation. `time` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: i64,
    pub price: f64,
}

impl Sample {
    pub const fn new(time: i64, price: f64) -> Self {
        Self { time, price }
    }
}
