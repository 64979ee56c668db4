use tracing::info;

use crate::Status;

pub fn counter(name: &str, description: &str) {
    info!(
        labels.log_type = COUNTERS,
        labels.counter = name,
        description
    );
}

pub fn error_counter(name: &str, description: &str, status: &Status) {
    info!(
        labels.log_type = COUNTERS,
        labels.counter_type = "error",
        labels.status = status.to_string(),
        labels.counter = name,
        description
    );
}

pub const COUNTERS: &str = "counters";
