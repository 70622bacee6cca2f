//! In-process navigation service simulation.
//!
//! [`SimulatedNav`] stands in for the external motion service so the binary
//! runs self-contained and tests can script goal outcomes. Execution
//! progresses only when the dispatcher spins: [`SimulatedNav::attach`]
//! registers a step task, each step advances activation and the current
//! goal by one tick. Single-threaded by design, so the core lives behind
//! `Rc<RefCell<..>>` and handles are cheap clones.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::mpsc::{self, Sender};

use crate::error::{Result, YatraError};
use crate::pose::Pose;
use crate::scan::LaserScan;
use crate::service::{GoalHandle, GoalOutcome, NavService};
use crate::spin::Spinner;

/// Simulation timing, in dispatcher steps.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Steps before the service reports active.
    pub activation_spins: u32,
    /// Steps a goal executes before its terminal report.
    pub goal_spins: u32,
    /// Emit a synthetic laser scan every N steps (None = no scans).
    pub scan_every: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            activation_spins: 5,
            goal_spins: 10,
            scan_every: None,
        }
    }
}

struct ActiveGoal {
    id: u64,
    remaining: u32,
    outcome: GoalOutcome,
    completion: Sender<GoalOutcome>,
}

struct SimCore {
    config: SimConfig,
    steps: u32,
    active: bool,
    initial_pose: Option<Pose>,
    current: Option<ActiveGoal>,
    /// Outcomes to hand out per submission, front first. Empty = Succeeded.
    scripted: VecDeque<GoalOutcome>,
    next_id: u64,
    submissions: usize,
    /// Set if a goal was ever submitted while another was executing.
    overlap: bool,
    scan_tx: Option<Sender<LaserScan>>,
}

impl SimCore {
    fn step(&mut self) {
        self.steps = self.steps.saturating_add(1);

        if !self.active && self.steps >= self.config.activation_spins {
            self.active = true;
            tracing::debug!("Simulated service active after {} steps", self.steps);
        }

        let finished = match &mut self.current {
            Some(goal) => {
                goal.remaining = goal.remaining.saturating_sub(1);
                goal.remaining == 0
            }
            None => false,
        };
        if finished
            && let Some(goal) = self.current.take()
        {
            // Terminal report: send once, drop the sender.
            tracing::debug!("Simulated goal {} terminal: {}", goal.id, goal.outcome.as_str());
            let _ = goal.completion.send(goal.outcome);
        }

        if let Some(every) = self.config.scan_every
            && every > 0
            && self.steps % every == 0
            && let Some(tx) = &self.scan_tx
        {
            let _ = tx.send(synthetic_scan());
        }
    }

    fn submit(&mut self, goal: &Pose) -> Result<GoalHandle> {
        if !self.active {
            return Err(YatraError::Service(
                "goal rejected: service not active".into(),
            ));
        }
        if self.current.is_some() {
            // Accepted anyway so tests can observe the invariant violation.
            self.overlap = true;
        }

        self.next_id += 1;
        self.submissions += 1;
        tracing::debug!(
            "Simulated goal {} accepted: ({:.2}, {:.2})",
            self.next_id,
            goal.x,
            goal.y
        );

        let outcome = self
            .scripted
            .pop_front()
            .unwrap_or(GoalOutcome::Succeeded);
        let (tx, rx) = mpsc::channel();
        self.current = Some(ActiveGoal {
            id: self.next_id,
            remaining: self.config.goal_spins.max(1),
            outcome,
            completion: tx,
        });

        Ok(GoalHandle::new(self.next_id, rx))
    }
}

/// Eight returns at 1m sweeping a half turn in front of the robot.
fn synthetic_scan() -> LaserScan {
    LaserScan {
        angle_min: -std::f64::consts::FRAC_PI_2,
        angle_increment: std::f64::consts::PI / 7.0,
        ranges: vec![1.0; 8],
    }
}

/// Cloneable handle to the simulated service.
#[derive(Clone)]
pub struct SimulatedNav {
    core: Rc<RefCell<SimCore>>,
}

impl SimulatedNav {
    pub fn new(config: SimConfig) -> Self {
        Self {
            core: Rc::new(RefCell::new(SimCore {
                config,
                steps: 0,
                active: false,
                initial_pose: None,
                current: None,
                scripted: VecDeque::new(),
                next_id: 0,
                submissions: 0,
                overlap: false,
                scan_tx: None,
            })),
        }
    }

    /// Register the simulation step task on the dispatcher. Without this,
    /// the service never activates and no goal ever completes.
    pub fn attach(&self, spinner: &mut Spinner) {
        let core = Rc::clone(&self.core);
        spinner.add_task(move || core.borrow_mut().step());
    }

    /// Route synthetic scans into `tx` (enabled by `config.scan_every`).
    pub fn set_scan_sink(&self, tx: Sender<LaserScan>) {
        self.core.borrow_mut().scan_tx = Some(tx);
    }

    /// Queue terminal outcomes for upcoming submissions, front first.
    /// Submissions beyond the script succeed.
    pub fn script_outcomes(&self, outcomes: Vec<GoalOutcome>) {
        self.core.borrow_mut().scripted = outcomes.into();
    }

    /// Pose announced via `announce_initial_pose`, if any.
    pub fn initial_pose(&self) -> Option<Pose> {
        self.core.borrow().initial_pose
    }

    /// Total goals accepted.
    pub fn submission_count(&self) -> usize {
        self.core.borrow().submissions
    }

    /// Whether any submission arrived while a goal was still executing.
    pub fn overlap_detected(&self) -> bool {
        self.core.borrow().overlap
    }
}

impl NavService for SimulatedNav {
    fn announce_initial_pose(&mut self, pose: &Pose) {
        self.core.borrow_mut().initial_pose = Some(*pose);
    }

    fn is_active(&mut self) -> bool {
        self.core.borrow().active
    }

    fn submit_goal(&mut self, goal: &Pose) -> Result<GoalHandle> {
        self.core.borrow_mut().submit(goal)
    }
}
