use std::sync::Arc;

use latency_server::app::build_app;
use latency_server::clock::{Clock, SystemClock, UptimeTracker};
use latency_server::config::{Config, DEFAULT_CONFIG_PATH};
use latency_server::logger::Logger;
use latency_server::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let uptime = UptimeTracker::start(clock.as_ref());

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    let logger = Logger::from_config(&cfg.logging)?;

    // Worker thread count defaults to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&w| w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, logger, clock, uptime))
}

async fn async_main(
    cfg: Config,
    logger: Logger,
    clock: Arc<dyn Clock>,
    uptime: UptimeTracker,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let app = Arc::new(build_app(&cfg, &logger, clock, uptime));

    logger.log_server_start(&addr, &cfg);

    let listener = match server::bind_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger.log_bind_failed(&addr, &e);
            std::process::exit(1);
        }
    };

    server::serve(
        listener,
        app,
        logger,
        cfg.server.keep_alive,
        server::shutdown_signal(),
    )
    .await;

    Ok(())
}
