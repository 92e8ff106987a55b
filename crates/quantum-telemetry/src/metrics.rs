//! Prometheus text exposition.
//!
//! Subsystems register their counters in the default registry; this module
//! only renders whatever is registered there.

use crate::TelemetryError;
use prometheus::{Encoder, TextEncoder};

/// Render all metrics in the default registry in the text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
