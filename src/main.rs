/// Service entry point: wires configuration, logging, the fleet, a reading
/// source, and the notification sink into the periodic evaluation loop.
///
/// The loop itself is plain: sleep, run one cycle, repeat. All decision
/// logic lives behind `Fleet::run_cycle`.

use std::env;
use std::thread;
use std::time::Duration;

use buoymon_service::config::{self, DEFAULT_CONFIG_PATH};
use buoymon_service::geocode;
use buoymon_service::logging::{self, DataSource};
use buoymon_service::monitor::{ConsoleNotifier, Fleet, ReadingSource};
use buoymon_service::simulate::{FloodDemo, RandomWalkSimulator};

fn main() {
    dotenv::dotenv().ok();

    let config_path =
        env::var("BUOYMON_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = match config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    config.apply_env_overrides();

    logging::init_logger(config.parsed_log_level(), config.log_file.as_deref(), true);
    logging::info(
        DataSource::System,
        None,
        &format!(
            "starting buoy monitor: {}s cycle, demo_mode={}",
            config.tick_interval_secs, config.demo_mode
        ),
    );

    let mut fleet = Fleet::with_capacities(config.series_capacity, config.activity_log_capacity);
    for summary in fleet.summaries() {
        logging::info(
            DataSource::Monitor,
            Some(&summary.id),
            &format!("{} deployed, initial status: {}", summary.name, summary.status),
        );
    }

    // Address resolution is cosmetic; run without it if the client cannot
    // be built.
    let http_client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => Some(client),
        Err(e) => {
            logging::error(
                DataSource::Geocode,
                None,
                &format!("HTTP client unavailable, addresses will not resolve: {}", e),
            );
            None
        }
    };

    let mut notifier = ConsoleNotifier;
    let interval = Duration::from_secs(config.tick_interval_secs.max(1));

    if config.demo_mode {
        let mut demo = FloodDemo::new();
        while !demo.is_complete() {
            run_one_cycle(&mut fleet, &mut demo, &mut notifier, http_client.as_ref());
            thread::sleep(interval);
        }
        logging::info(DataSource::System, None, "flood demo complete, exiting");
    } else {
        let mut simulator = RandomWalkSimulator::new();
        loop {
            run_one_cycle(&mut fleet, &mut simulator, &mut notifier, http_client.as_ref());
            thread::sleep(interval);
        }
    }
}

fn run_one_cycle(
    fleet: &mut Fleet,
    source: &mut dyn ReadingSource,
    notifier: &mut ConsoleNotifier,
    http_client: Option<&reqwest::blocking::Client>,
) {
    if let Some(client) = http_client {
        geocode::resolve_missing_addresses(client, fleet);
    }

    let outcome = fleet.run_cycle(source, notifier);

    let counts = &outcome.counts;
    logging::info(
        DataSource::Monitor,
        None,
        &format!(
            "cycle complete: {} normal, {} warning, {} flood ({} with sediments)",
            counts.normal,
            counts.warning,
            counts.flood,
            counts.normal_with_sediments
                + counts.warning_with_sediments
                + counts.flood_with_sediments,
        ),
    );
}
