//! YatraNav - Waypoint tour demo
//!
//! Drives the fixed waypoint tour against the in-process simulated service
//! while logging obstacle ranges from the synthetic laser scanner.

use std::path::Path;
use std::sync::mpsc;

use tracing::info;

use yatra_nav::config::YatraConfig;
use yatra_nav::error::Result;
use yatra_nav::navigator::Navigator;
use yatra_nav::pose::Pose;
use yatra_nav::scan::subscribe_scan_logger;
use yatra_nav::sequencer::WaypointSequencer;
use yatra_nav::sim::{SimConfig, SimulatedNav};
use yatra_nav::spin::Spinner;

/// The fixed tour. Each pose is a fresh value; nothing is reused between
/// submissions.
fn tour_waypoints() -> Vec<Pose> {
    vec![
        Pose::with_yaw(2.0, -0.5, 0.0),
        Pose::with_yaw(2.0, 0.5, 0.0),
        Pose::with_yaw(-2.0, 0.5, 0.0),
        Pose::with_yaw(-0.5, 2.0, 0.0),
        Pose::with_yaw(-0.5, -2.0, 0.0),
        Pose::with_yaw(0.5, -2.0, 0.0),
        Pose::with_yaw(0.5, 2.0, 0.0),
        Pose::with_yaw(2.0, -1.0, 0.0),
        Pose::with_yaw(2.0, -1.0, 0.0),
        Pose::with_yaw(0.5, -2.0, 0.0),
        Pose::with_yaw(-2.0, -0.5, 0.0),
    ]
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yatra_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        YatraConfig::load(config_path)?
    } else if Path::new("yatra.toml").exists() {
        info!("Loading configuration from yatra.toml");
        YatraConfig::load(Path::new("yatra.toml"))?
    } else {
        info!("Using default configuration");
        YatraConfig::default()
    };

    info!("YatraNav v{}", env!("CARGO_PKG_VERSION"));

    // Wire up the cooperative dispatcher, the simulated service, and the
    // scan subscription. Scans advance only while the tour loops spin.
    let mut spinner = Spinner::new();

    let sim = SimulatedNav::new(SimConfig {
        activation_spins: 20,
        goal_spins: 40,
        scan_every: Some(15),
    });
    sim.attach(&mut spinner);

    let (scan_tx, scan_rx) = mpsc::channel();
    sim.set_scan_sink(scan_tx);
    subscribe_scan_logger(&mut spinner, scan_rx);

    // Initial pose is mandatory before anything else.
    let mut navigator = Navigator::new(sim.clone());
    navigator.set_initial_pose(&Pose::with_yaw(-2.0, -0.5, 0.0))?;

    // Wait for the navigation service to become operational.
    navigator.wait_until_active(&mut spinner, config.activation_timeout())?;

    let sequencer = WaypointSequencer::new(tour_waypoints(), config.sequencer_config());
    let report = sequencer.run(&mut navigator, &mut spinner)?;

    info!(
        "Tour {}: {}/{} waypoints succeeded ({} goals submitted)",
        if report.completed {
            "completed"
        } else {
            "aborted"
        },
        report.succeeded(),
        sequencer.waypoint_count(),
        sim.submission_count()
    );

    Ok(())
}
