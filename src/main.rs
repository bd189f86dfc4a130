mod commands;
mod host;

use anyhow::{Context, anyhow};

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .context("failed to build logger instance")?;

    let channels = hotelpush_bridge::BridgeChannels::default();
    let backend = hotelpush_backend::run(channels.backend_rx, channels.backend_tx)
        .context("failed to start notification backend")?;
    let events = host::spawn_event_logger(channels.host_rx);

    host::run_shell(channels.host_tx)?;

    backend
        .join()
        .map_err(|_| anyhow!("notification backend panicked"))?;
    events
        .join()
        .map_err(|_| anyhow!("event logger panicked"))?;
    Ok(())
}
