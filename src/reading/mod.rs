pub mod cf_time;
pub mod nc;
pub mod xrays;

pub use nc::read_series;
pub use xrays::parse_xrays;
