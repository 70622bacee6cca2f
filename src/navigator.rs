//! Navigation goal client.
//!
//! The [`Navigator`] owns the lifecycle of at most one in-flight goal
//! against a [`NavService`]: initial-pose announcement, the readiness gate,
//! goal submission, and non-blocking completion polling.
//!
//! Per goal the lifecycle is
//! `Idle → Submitted → Executing → {Succeeded | Aborted | Canceled}`;
//! the client observes the terminal edge only through [`is_task_complete`]
//! polls driven by the caller's cooperative loop, never through a push
//! notification.
//!
//! Call-order contract (violations are [`YatraError::Usage`], fail fast):
//! `set_initial_pose` exactly once, then `wait_until_active` once, then
//! `go_to_pose` / `is_task_complete` pairs, never submitting while a prior
//! goal is still non-terminal.
//!
//! [`is_task_complete`]: Navigator::is_task_complete

use std::time::{Duration, Instant};

use crate::error::{Result, YatraError};
use crate::pose::Pose;
use crate::service::{GoalHandle, GoalOutcome, NavService};
use crate::spin::Spinner;

/// Sleep between yield-and-check cycles while waiting for activation.
/// Keeps the wait cooperative without spinning hot.
const ACTIVATION_POLL: Duration = Duration::from_millis(10);

/// Client for a single robot session against an asynchronous navigation
/// service.
pub struct Navigator<S: NavService> {
    service: S,
    initial_pose_set: bool,
    service_ready: bool,
    /// At most one non-terminal goal exists at a time.
    current_goal: Option<GoalHandle>,
    /// Last terminal status observed; cleared on each new submission.
    last_outcome: Option<GoalOutcome>,
}

impl<S: NavService> Navigator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            initial_pose_set: false,
            service_ready: false,
            current_goal: None,
            last_outcome: None,
        }
    }

    /// Announce the robot's believed starting pose to the service.
    ///
    /// Must be called exactly once, before [`wait_until_active`] and before
    /// any goal submission.
    ///
    /// [`wait_until_active`]: Navigator::wait_until_active
    pub fn set_initial_pose(&mut self, pose: &Pose) -> Result<()> {
        if self.initial_pose_set {
            return Err(YatraError::Usage(
                "initial pose already set for this session".into(),
            ));
        }

        self.service.announce_initial_pose(pose);
        self.initial_pose_set = true;
        tracing::info!("Initial pose announced: ({:.2}, {:.2})", pose.x, pose.y);
        Ok(())
    }

    /// Block cooperatively until the service reports it is ready to accept
    /// goals, spinning the dispatcher between checks.
    ///
    /// `timeout` is an explicit choice: `None` waits forever, which callers
    /// must opt into rather than get by default.
    pub fn wait_until_active(
        &mut self,
        spinner: &mut Spinner,
        timeout: Option<Duration>,
    ) -> Result<()> {
        if !self.initial_pose_set {
            return Err(YatraError::Usage(
                "wait_until_active called before set_initial_pose".into(),
            ));
        }
        if self.service_ready {
            return Ok(());
        }

        let start = Instant::now();
        tracing::info!("Waiting for navigation service to become active...");

        loop {
            spinner.spin_some();

            if self.service.is_active() {
                self.service_ready = true;
                tracing::info!(
                    "Navigation service active after {:.2}s",
                    start.elapsed().as_secs_f32()
                );
                return Ok(());
            }

            if let Some(limit) = timeout
                && start.elapsed() >= limit
            {
                return Err(YatraError::ActivationTimeout(limit.as_secs_f32()));
            }

            std::thread::sleep(ACTIVATION_POLL);
        }
    }

    /// Submit `goal` as the new active goal.
    ///
    /// Returns as soon as the submission is acknowledged; completion is
    /// observed via [`is_task_complete`](Navigator::is_task_complete).
    /// Clears the last outcome.
    pub fn go_to_pose(&mut self, goal: &Pose) -> Result<()> {
        if !self.initial_pose_set {
            return Err(YatraError::Usage(
                "goal submitted before set_initial_pose".into(),
            ));
        }
        if !self.service_ready {
            return Err(YatraError::Usage(
                "goal submitted before wait_until_active".into(),
            ));
        }
        if self.current_goal.is_some() {
            return Err(YatraError::Usage(
                "goal submitted while a prior goal is still outstanding".into(),
            ));
        }

        let handle = self.service.submit_goal(goal)?;
        tracing::info!(
            "Goal {} submitted: ({:.2}, {:.2})",
            handle.id(),
            goal.x,
            goal.y
        );

        self.last_outcome = None;
        self.current_goal = Some(handle);
        Ok(())
    }

    /// Single non-blocking completion check.
    ///
    /// Returns `true` once the current goal has reached a terminal state,
    /// recording the outcome, and stays `true` until the next submission.
    /// Returns `false` while the goal is executing, or if nothing has been
    /// submitted since construction.
    pub fn is_task_complete(&mut self) -> bool {
        let Some(handle) = &self.current_goal else {
            return self.last_outcome.is_some();
        };

        match handle.poll().outcome() {
            Some(outcome) => {
                tracing::info!("Goal {} {}", handle.id(), outcome.as_str());
                self.last_outcome = Some(outcome);
                self.current_goal = None;
                true
            }
            None => false,
        }
    }

    /// Terminal status of the last completed goal, if any.
    pub fn result(&self) -> Option<GoalOutcome> {
        self.last_outcome
    }

    /// Whether a submitted goal has not yet been observed terminal.
    pub fn has_outstanding_goal(&self) -> bool {
        self.current_goal.is_some()
    }

    /// Access the underlying service.
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }
}
