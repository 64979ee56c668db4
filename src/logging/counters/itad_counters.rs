use std::time::Instant;

use tracing::info;

use crate::Status;

use super::counters::*;

pub struct ItadRequestCounter<'a> {
    request: &'a str,
    start: Instant,
}

impl<'a> ItadRequestCounter<'a> {
    pub fn new(request: &'a str) -> Self {
        Self {
            request,
            start: Instant::now(),
        }
    }

    pub fn log(self) {
        info!(
            labels.log_type = COUNTERS,
            labels.counter = self.request,
            itad_request.latency = self.start.elapsed().as_millis() as u64,
            "ITAD request: {}",
            self.request,
        );
    }

    pub fn log_error(self, status: &Status) {
        error_counter(
            &format!("{}_fail", self.request),
            &format!("ITAD request failed: {}", self.request),
            status,
        )
    }
}
