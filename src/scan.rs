//! Laser scan processing.
//!
//! A scan is a set of range returns swept from `angle_min` in steps of
//! `angle_increment`. The processor is a stateless per-sample transform:
//! the lateral (x-axis) projection of each return, in sample order. It runs
//! on the dispatch path and never touches navigation state.

use crate::spin::Spinner;
use std::sync::mpsc::Receiver;

/// One delivered laser scan sample set.
#[derive(Clone, Debug)]
pub struct LaserScan {
    /// Bearing of the first range sample (radians).
    pub angle_min: f64,
    /// Angular resolution between successive samples (radians).
    pub angle_increment: f64,
    /// Range returns in sweep order (meters).
    pub ranges: Vec<f64>,
}

impl LaserScan {
    /// Project every range onto the x-axis: `range * cos(angle)`, where the
    /// angle of sample `i` is `angle_min + i * angle_increment`.
    pub fn lateral_distances(&self) -> Vec<f64> {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, range)| range * (self.angle_min + i as f64 * self.angle_increment).cos())
            .collect()
    }
}

/// Subscribe a scan logger on the dispatcher.
///
/// Each delivered scan is reduced to its lateral projections and narrated
/// at debug level; the nearest lateral return is reported at info level so
/// tour logs show obstacle proximity.
pub fn subscribe_scan_logger(spinner: &mut Spinner, rx: Receiver<LaserScan>) {
    spinner.subscribe(rx, |scan: LaserScan| {
        let lateral = scan.lateral_distances();
        tracing::debug!("Laser scan received: {} ranges", lateral.len());
        for x in &lateral {
            tracing::trace!("Range: {:.3}", x);
        }
        if let Some(nearest) = lateral
            .iter()
            .copied()
            .filter(|x| x.is_finite())
            .min_by(|a, b| a.abs().total_cmp(&b.abs()))
        {
            tracing::info!(
                "Scan: {} samples, nearest lateral return {:.3}m",
                lateral.len(),
                nearest
            );
        }
    });
}
