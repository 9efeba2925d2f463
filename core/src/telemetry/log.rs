use log::{info, warn};

/// Thin diagnostics seam over the `log` facade.
///
/// Constructors and pure accessors stay silent; only build and workflow
/// paths report through here, so callers that want quiet operation simply
/// configure no logger.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn record_warning(&self, message: &str) {
        warn!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
