mod time_utils;

pub use time_utils::{TimeUtils, format_clock_hm, format_clock_hms};
