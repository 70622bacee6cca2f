//! End-to-end tour tests against the simulated navigation service.
//!
//! These exercise the full chain: initial pose announcement, activation
//! gate, sequential goal submission, cooperative polling, and scan delivery
//! interleaved with navigation.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use yatra_nav::{
    FailurePolicy, GoalOutcome, LaserScan, Navigator, Pose, SequencerConfig, SimConfig,
    SimulatedNav, Spinner, WaypointSequencer,
};

fn fast_sequencer(waypoints: Vec<Pose>) -> WaypointSequencer {
    WaypointSequencer::new(
        waypoints,
        SequencerConfig {
            poll_interval: Duration::from_millis(1),
            ..Default::default()
        },
    )
}

#[test]
fn test_three_goal_tour_strictly_sequential() {
    let sim = SimulatedNav::new(SimConfig {
        activation_spins: 3,
        goal_spins: 5,
        ..Default::default()
    });
    let mut spinner = Spinner::new();
    sim.attach(&mut spinner);

    let mut navigator = Navigator::new(sim.clone());
    navigator
        .set_initial_pose(&Pose::with_yaw(-2.0, -0.5, 0.0))
        .unwrap();
    navigator.wait_until_active(&mut spinner, None).unwrap();

    let sequencer = fast_sequencer(vec![
        Pose::with_yaw(2.0, -0.5, 0.0),
        Pose::with_yaw(2.0, 0.5, 0.0),
        Pose::with_yaw(-2.0, 0.5, 0.0),
    ]);
    let report = sequencer.run(&mut navigator, &mut spinner).unwrap();

    // All three goals reached a terminal state before the sequencer
    // reported overall completion.
    assert!(report.completed);
    assert_eq!(report.visited.len(), 3);
    assert!(report.visited.iter().all(|r| r.outcome.is_success()));

    // Exactly 3 submissions, each only after the prior terminal report.
    assert_eq!(sim.submission_count(), 3);
    assert!(!sim.overlap_detected());
    assert!(!navigator.has_outstanding_goal());
}

#[test]
fn test_scans_processed_while_goal_executing() {
    let sim = SimulatedNav::new(SimConfig {
        activation_spins: 1,
        goal_spins: 10,
        scan_every: Some(2),
    });
    let (scan_tx, scan_rx) = mpsc::channel();
    sim.set_scan_sink(scan_tx);

    let mut spinner = Spinner::new();
    sim.attach(&mut spinner);

    // Collect lateral projections delivered on the subscription path.
    let laterals: Rc<RefCell<Vec<Vec<f64>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&laterals);
    spinner.subscribe(scan_rx, move |scan: LaserScan| {
        sink.borrow_mut().push(scan.lateral_distances());
    });

    let mut navigator = Navigator::new(sim.clone());
    navigator
        .set_initial_pose(&Pose::with_yaw(0.0, 0.0, 0.0))
        .unwrap();
    navigator.wait_until_active(&mut spinner, None).unwrap();

    let sequencer = fast_sequencer(vec![Pose::with_yaw(1.0, 1.0, 0.0)]);
    let report = sequencer.run(&mut navigator, &mut spinner).unwrap();
    assert!(report.completed);

    // The goal needed 10 spins, scans arrive every 2: the polling loop
    // serviced the scan path while the goal was outstanding.
    let laterals = laterals.borrow();
    assert!(
        laterals.len() >= 3,
        "expected several scans during the goal, got {}",
        laterals.len()
    );
    for lateral in laterals.iter() {
        assert_eq!(lateral.len(), 8);
        for x in lateral {
            assert!(x.is_finite());
        }
    }
}

#[test]
fn test_tour_tolerates_failures_under_continue() {
    let sim = SimulatedNav::new(SimConfig {
        activation_spins: 1,
        goal_spins: 2,
        ..Default::default()
    });
    sim.script_outcomes(vec![
        GoalOutcome::Succeeded,
        GoalOutcome::Aborted,
        GoalOutcome::Canceled,
        GoalOutcome::Succeeded,
    ]);
    let mut spinner = Spinner::new();
    sim.attach(&mut spinner);

    let mut navigator = Navigator::new(sim.clone());
    navigator
        .set_initial_pose(&Pose::with_yaw(0.0, 0.0, 0.0))
        .unwrap();
    navigator.wait_until_active(&mut spinner, None).unwrap();

    let sequencer = fast_sequencer(vec![
        Pose::with_yaw(1.0, 0.0, 0.0),
        Pose::with_yaw(1.0, 1.0, 0.0),
        Pose::with_yaw(0.0, 1.0, 0.0),
        Pose::with_yaw(0.0, 0.0, 0.0),
    ]);
    let report = sequencer.run(&mut navigator, &mut spinner).unwrap();

    // Every waypoint visited regardless of individual outcome.
    assert!(report.completed);
    assert_eq!(report.visited.len(), 4);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.visited[1].outcome, GoalOutcome::Aborted);
    assert_eq!(report.visited[2].outcome, GoalOutcome::Canceled);
    assert_eq!(sim.submission_count(), 4);
    assert!(!sim.overlap_detected());
}

#[test]
fn test_abort_policy_ends_tour_at_failure() {
    let sim = SimulatedNav::new(SimConfig {
        activation_spins: 1,
        goal_spins: 1,
        ..Default::default()
    });
    sim.script_outcomes(vec![GoalOutcome::Aborted]);
    let mut spinner = Spinner::new();
    sim.attach(&mut spinner);

    let mut navigator = Navigator::new(sim.clone());
    navigator
        .set_initial_pose(&Pose::with_yaw(0.0, 0.0, 0.0))
        .unwrap();
    navigator.wait_until_active(&mut spinner, None).unwrap();

    let sequencer = WaypointSequencer::new(
        vec![Pose::with_yaw(1.0, 0.0, 0.0), Pose::with_yaw(2.0, 0.0, 0.0)],
        SequencerConfig {
            on_failure: FailurePolicy::Abort,
            poll_interval: Duration::from_millis(1),
            ..Default::default()
        },
    );
    let report = sequencer.run(&mut navigator, &mut spinner).unwrap();

    assert!(!report.completed);
    assert_eq!(report.visited.len(), 1);
    assert_eq!(sim.submission_count(), 1);
}
