
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;

pub fn init() {
    let formatter = format::DefaultFields::new().delimited(",");
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trace")
        .fmt_fields(formatter)
        .try_init();
}
