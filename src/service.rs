//! Navigation service interface.
//!
//! The motion planner/controller is an external collaborator. This module
//! defines the boundary the [`Navigator`](crate::navigator::Navigator) talks
//! to: pose announcement, an activation flag, and goal submission returning
//! a [`GoalHandle`] that carries the completion signal.
//!
//! Completion is signalled through an mpsc channel rather than a status
//! field the client has to re-read: the service sends the terminal outcome
//! exactly once, and [`GoalHandle::poll`] observes it with a single
//! non-blocking `try_recv`.

use std::sync::mpsc::{Receiver, TryRecvError};

use crate::error::Result;
use crate::pose::Pose;

/// Terminal outcome of a goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalOutcome {
    Succeeded,
    Aborted,
    Canceled,
}

impl GoalOutcome {
    /// Whether this outcome counts as a navigation success.
    pub fn is_success(&self) -> bool {
        matches!(self, GoalOutcome::Succeeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalOutcome::Succeeded => "succeeded",
            GoalOutcome::Aborted => "aborted",
            GoalOutcome::Canceled => "canceled",
        }
    }
}

/// Status of a submitted goal as seen by one poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalStatus {
    /// Goal accepted, no terminal report yet.
    Executing,
    Succeeded,
    Aborted,
    Canceled,
}

impl GoalStatus {
    /// Terminal outcome, if the goal has reached one.
    pub fn outcome(&self) -> Option<GoalOutcome> {
        match self {
            GoalStatus::Executing => None,
            GoalStatus::Succeeded => Some(GoalOutcome::Succeeded),
            GoalStatus::Aborted => Some(GoalOutcome::Aborted),
            GoalStatus::Canceled => Some(GoalOutcome::Canceled),
        }
    }
}

impl From<GoalOutcome> for GoalStatus {
    fn from(outcome: GoalOutcome) -> Self {
        match outcome {
            GoalOutcome::Succeeded => GoalStatus::Succeeded,
            GoalOutcome::Aborted => GoalStatus::Aborted,
            GoalOutcome::Canceled => GoalStatus::Canceled,
        }
    }
}

/// Handle to one submitted goal.
///
/// Owned exclusively by the navigator; dropped once the goal is terminal.
#[derive(Debug)]
pub struct GoalHandle {
    id: u64,
    completion: Receiver<GoalOutcome>,
}

impl GoalHandle {
    /// Create a handle from a submission acknowledgment.
    ///
    /// The service keeps the sending half and sends the terminal outcome
    /// exactly once when execution ends.
    pub fn new(id: u64, completion: Receiver<GoalOutcome>) -> Self {
        Self { id, completion }
    }

    /// Goal identifier assigned by the service.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Single non-blocking status check.
    ///
    /// A disconnected channel with no buffered outcome means the service
    /// dropped the goal without reporting; that is treated as `Aborted`.
    pub fn poll(&self) -> GoalStatus {
        match self.completion.try_recv() {
            Ok(outcome) => outcome.into(),
            Err(TryRecvError::Empty) => GoalStatus::Executing,
            Err(TryRecvError::Disconnected) => GoalStatus::Aborted,
        }
    }
}

/// Asynchronous action-style navigation service.
///
/// The service owns all execution state (planner, controller, localization);
/// the client only announces, activates, and submits.
pub trait NavService {
    /// Publish the robot's believed starting pose so the service can
    /// initialize localization and planning.
    fn announce_initial_pose(&mut self, pose: &Pose);

    /// Whether the planning/execution subsystem is ready to accept goals.
    /// Progress toward activation is made by spinning the dispatcher.
    fn is_active(&mut self) -> bool;

    /// Submit a pose goal. Returns the acknowledgment handle without
    /// waiting for execution.
    fn submit_goal(&mut self, goal: &Pose) -> Result<GoalHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_poll_executing_then_terminal() {
        let (tx, rx) = mpsc::channel();
        let handle = GoalHandle::new(1, rx);

        assert_eq!(handle.poll(), GoalStatus::Executing);
        assert_eq!(handle.poll(), GoalStatus::Executing);

        tx.send(GoalOutcome::Succeeded).unwrap();
        assert_eq!(handle.poll(), GoalStatus::Succeeded);
    }

    #[test]
    fn test_poll_buffered_outcome_survives_sender_drop() {
        let (tx, rx) = mpsc::channel();
        let handle = GoalHandle::new(2, rx);

        tx.send(GoalOutcome::Canceled).unwrap();
        drop(tx);

        // The buffered terminal report is still observable.
        assert_eq!(handle.poll(), GoalStatus::Canceled);
    }

    #[test]
    fn test_poll_abandoned_goal_is_aborted() {
        let (tx, rx) = mpsc::channel::<GoalOutcome>();
        let handle = GoalHandle::new(3, rx);

        drop(tx);
        assert_eq!(handle.poll(), GoalStatus::Aborted);
    }

    #[test]
    fn test_status_outcome_mapping() {
        assert_eq!(GoalStatus::Executing.outcome(), None);
        assert_eq!(
            GoalStatus::Succeeded.outcome(),
            Some(GoalOutcome::Succeeded)
        );
        assert!(GoalOutcome::Succeeded.is_success());
        assert!(!GoalOutcome::Aborted.is_success());
    }
}
