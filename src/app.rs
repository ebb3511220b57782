//! Application wiring
//!
//! Builds the handler stack from configuration: `AccessLog<Router>`.

use crate::clock::{Clock, UptimeTracker};
use crate::config::Config;
use crate::handler::{AccessLog, HealthCheck, LatencyProbe, Router, StaticPage};
use crate::logger::Logger;
use std::sync::Arc;

/// Full handler stack served by the listener
pub type App = AccessLog<Router>;

pub fn build_app(
    config: &Config,
    logger: &Logger,
    clock: Arc<dyn Clock>,
    uptime: UptimeTracker,
) -> App {
    let router = Router::new(
        StaticPage::new(config.static_page.index_file.clone(), logger.clone()),
        LatencyProbe::new(Arc::clone(&clock), config.server_location(), logger.clone()),
        HealthCheck::new(uptime, clock, logger.clone()),
    );
    AccessLog::new(router, logger.clone())
}
