//! Waypoint sequencing.
//!
//! The [`WaypointSequencer`] feeds an ordered list of poses into the
//! [`Navigator`] one at a time: submit, then alternate a dispatcher spin
//! with a completion poll until the goal is terminal, then apply the
//! failure policy before advancing. Goal N+1 is never submitted before
//! goal N reaches a terminal state.
//!
//! A failed waypoint never terminates the program; what it does to the
//! sequence is the [`FailurePolicy`] configuration.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::error::{Result, YatraError};
use crate::navigator::Navigator;
use crate::pose::Pose;
use crate::service::{GoalOutcome, NavService};
use crate::spin::Spinner;

/// What to do when a waypoint ends Aborted or Canceled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and advance to the next waypoint.
    #[default]
    Continue,
    /// Stop the tour at the failed waypoint.
    Abort,
    /// Resubmit the same waypoint up to `max_retries` times, then advance.
    Retry,
}

/// Sequencer tuning.
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    pub on_failure: FailurePolicy,
    /// Extra attempts per waypoint under [`FailurePolicy::Retry`].
    pub max_retries: u32,
    /// Sleep between completion polls.
    pub poll_interval: Duration,
    /// Per-goal completion deadline. `None` trusts the service to always
    /// terminate every goal.
    pub goal_timeout: Option<Duration>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            on_failure: FailurePolicy::Continue,
            max_retries: 2,
            poll_interval: Duration::from_millis(20),
            goal_timeout: None,
        }
    }
}

/// Result of one waypoint.
#[derive(Clone, Debug)]
pub struct WaypointRecord {
    /// Index into the waypoint list.
    pub index: usize,
    pub goal: Pose,
    /// Terminal outcome of the last attempt.
    pub outcome: GoalOutcome,
    /// Submissions made for this waypoint (1 unless retried).
    pub attempts: u32,
}

/// Summary of a tour run.
#[derive(Clone, Debug, Default)]
pub struct TourReport {
    pub visited: Vec<WaypointRecord>,
    /// False when the tour stopped early under [`FailurePolicy::Abort`].
    pub completed: bool,
}

impl TourReport {
    pub fn succeeded(&self) -> usize {
        self.visited
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.visited.len() - self.succeeded()
    }
}

/// Drives an ordered waypoint list to completion, one goal at a time.
pub struct WaypointSequencer {
    waypoints: Vec<Pose>,
    config: SequencerConfig,
}

impl WaypointSequencer {
    pub fn new(waypoints: Vec<Pose>, config: SequencerConfig) -> Self {
        Self { waypoints, config }
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Run the tour.
    ///
    /// Precondition: the navigator has its initial pose set and the service
    /// is active; violations surface as `Usage` errors from the first
    /// submission.
    pub fn run<S: NavService>(
        &self,
        navigator: &mut Navigator<S>,
        spinner: &mut Spinner,
    ) -> Result<TourReport> {
        let total = self.waypoints.len();
        let mut report = TourReport {
            visited: Vec::with_capacity(total),
            completed: true,
        };

        tracing::info!("Starting tour with {} waypoints", total);

        for (index, goal) in self.waypoints.iter().enumerate() {
            let record = self.drive_waypoint(navigator, spinner, index, goal)?;
            let outcome = record.outcome;
            report.visited.push(record);

            match outcome {
                GoalOutcome::Succeeded => {
                    tracing::info!("Waypoint {}/{} reached", index + 1, total);
                }
                _ if self.config.on_failure == FailurePolicy::Abort => {
                    tracing::warn!(
                        "Waypoint {}/{} {}, aborting tour",
                        index + 1,
                        total,
                        outcome.as_str()
                    );
                    report.completed = false;
                    break;
                }
                _ => {
                    tracing::warn!(
                        "Waypoint {}/{} {}, continuing",
                        index + 1,
                        total,
                        outcome.as_str()
                    );
                }
            }
        }

        tracing::info!(
            "Tour finished: {} visited, {} succeeded, {} failed",
            report.visited.len(),
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Submit one waypoint and poll it to a terminal outcome, retrying per
    /// policy.
    fn drive_waypoint<S: NavService>(
        &self,
        navigator: &mut Navigator<S>,
        spinner: &mut Spinner,
        index: usize,
        goal: &Pose,
    ) -> Result<WaypointRecord> {
        let max_attempts = match self.config.on_failure {
            FailurePolicy::Retry => 1 + self.config.max_retries,
            _ => 1,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            navigator.go_to_pose(goal)?;
            let outcome = self.poll_to_completion(navigator, spinner)?;

            if outcome.is_success() || attempts >= max_attempts {
                return Ok(WaypointRecord {
                    index,
                    goal: *goal,
                    outcome,
                    attempts,
                });
            }

            tracing::warn!(
                "Waypoint {} {} (attempt {}/{}), retrying",
                index + 1,
                outcome.as_str(),
                attempts,
                max_attempts
            );
        }
    }

    /// The cooperative polling loop: yield to pending work, check once,
    /// repeat.
    fn poll_to_completion<S: NavService>(
        &self,
        navigator: &mut Navigator<S>,
        spinner: &mut Spinner,
    ) -> Result<GoalOutcome> {
        let start = Instant::now();

        while !navigator.is_task_complete() {
            spinner.spin_some();

            if let Some(limit) = self.config.goal_timeout
                && start.elapsed() >= limit
            {
                return Err(YatraError::GoalTimeout(limit.as_secs_f32()));
            }

            std::thread::sleep(self.config.poll_interval);
        }

        // is_task_complete() == true guarantees a recorded outcome; a
        // missing one means the navigator contract was broken.
        navigator
            .result()
            .ok_or_else(|| YatraError::Usage("goal complete without recorded outcome".into()))
    }
}
