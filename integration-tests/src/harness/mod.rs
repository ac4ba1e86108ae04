mod fixtures;
pub mod tracing;

pub use fixtures::{AccessLogBuilder, write_config, write_log};
pub use self::tracing::{CapturedEvent, init_test_tracing};
