//! pingmon - Live Terminal Ping Dashboard
//!
//! Demo driver for the rendering engine: each host is fed by a synthetic
//! prober task so the live table can be exercised without network access.
//! A real deployment swaps the simulation for an actual probing engine
//! mutating the same [`MonitoredHost`](pingmon::MonitoredHost) state.

use anyhow::Result;
use clap::{Arg, Command};
use pingmon::{Host, Layout, LegacyLayout, MonitoredHost, PingResult};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = Command::new("pingmon")
        .version(pingmon::VERSION)
        .about("Live terminal dashboard for multi-host ping monitoring")
        .arg(
            Arg::new("hosts")
                .help("Labels of the hosts to monitor")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .help("Probe interval in seconds")
                .value_parser(clap::value_parser!(f64))
                .default_value("1.0"),
        )
        .arg(
            Arg::new("count")
                .short('c')
                .long("count")
                .help("Stop each host after this many probes (0 = run until interrupted)")
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .get_matches();

    let interval_secs = *matches
        .get_one::<f64>("interval")
        .expect("interval has a default");
    if !interval_secs.is_finite() || interval_secs <= 0.0 {
        anyhow::bail!("Probe interval must be a positive number of seconds");
    }
    let interval = Duration::from_secs_f64(interval_secs);
    let count = *matches.get_one::<u64>("count").expect("count has a default");

    let hosts: Vec<Arc<MonitoredHost>> = matches
        .get_many::<String>("hosts")
        .expect("hosts are required")
        .map(|label| Arc::new(MonitoredHost::new(label.clone())))
        .collect();

    for host in &hosts {
        spawn_probe_simulation(Arc::clone(host), interval, count);
    }

    let views: Vec<Arc<dyn Host>> = hosts
        .iter()
        .map(|host| Arc::clone(host) as Arc<dyn Host>)
        .collect();

    let mut layout = LegacyLayout::new();
    layout.run(&views, interval).await?;

    Ok(())
}

/// Feed a host with synthetic probe results at the given interval.
fn spawn_probe_simulation(
    host: Arc<MonitoredHost>,
    interval: Duration,
    count: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        host.set_running(true);
        let mut sent = 0u64;

        loop {
            tokio::time::sleep(interval).await;

            // ThreadRng is not Send, so it never lives across an await
            let result = {
                let mut rng = rand::thread_rng();
                if rng.gen_bool(0.05) {
                    PingResult::loss()
                } else if rng.gen_bool(0.02) {
                    PingResult::degraded(rng.gen_range(8.0..60.0))
                } else {
                    PingResult::reply(rng.gen_range(8.0..60.0))
                }
            };
            host.add_result(result);

            sent += 1;
            if count > 0 && sent >= count {
                break;
            }
        }

        log::debug!("simulation for {} finished", host.rendered_label());
        host.set_running(false);
    })
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_constant() {
        // Ensure version is accessible
        assert!(!pingmon::VERSION.is_empty());
    }
}
