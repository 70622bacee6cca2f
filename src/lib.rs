//! YatraNav - Waypoint tour driver for an asynchronous navigation service
//!
//! The core is the [`Navigator`]: a client that submits one pose goal at a
//! time to an action-style motion service, tracks the goal's lifecycle
//! without blocking, and reports completion to a caller-driven cooperative
//! polling loop.
//!
//! ## Architecture
//!
//! Everything runs on one thread of control:
//!
//! - [`Spinner`] — cooperative dispatch; waiting loops yield to it so
//!   activation, goal progress, and scan delivery can advance
//! - [`Navigator`] — initial-pose announcement, readiness gate, goal
//!   submission, non-blocking completion polling
//! - [`WaypointSequencer`] — feeds an ordered pose list into the navigator
//!   one goal at a time, applying a configurable failure policy
//! - [`LaserScan`] — stateless lateral-projection transform on a parallel
//!   subscription path, independent of navigation
//!
//! The external motion service is reached through the [`NavService`] trait;
//! [`SimulatedNav`] is the in-process implementation used by the binary and
//! the test suite.

pub mod config;
pub mod error;
pub mod navigator;
pub mod pose;
pub mod scan;
pub mod sequencer;
pub mod service;
pub mod sim;
pub mod spin;

pub use config::YatraConfig;
pub use error::{Result, YatraError};
pub use navigator::Navigator;
pub use pose::{Pose, Quaternion};
pub use scan::LaserScan;
pub use sequencer::{FailurePolicy, SequencerConfig, TourReport, WaypointSequencer};
pub use service::{GoalHandle, GoalOutcome, GoalStatus, NavService};
pub use sim::{SimConfig, SimulatedNav};
pub use spin::Spinner;
