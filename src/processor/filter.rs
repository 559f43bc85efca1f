//! Observation filtering
//!
//! Decides whether a parsed observation goes into a segment. Checks run in
//! a fixed order and the first failing one names the rejection reason.

use crate::config::FilterConfig;
use crate::constants::GRID_STEP_DEGREES;
use crate::models::{Coordinates, Observation, RejectReason};
use tracing::trace;

/// Check an observation against the filter policy
///
/// Returns the reason for the first failed check, or `Ok(())` if the
/// observation should be kept.
pub fn check_observation(
    observation: &Observation,
    filter: &FilterConfig,
) -> std::result::Result<(), RejectReason> {
    let Some(coords) = observation.coordinates else {
        return Err(RejectReason::InvalidCoordinates);
    };

    if filter.reject_grid_aligned && is_grid_aligned(&coords) {
        trace!(
            "Rejecting grid-aligned position ({}, {})",
            coords.latitude, coords.longitude
        );
        return Err(RejectReason::GridAligned);
    }

    if filter.ship_only && !observation.is_ship() {
        return Err(RejectReason::NotShip);
    }

    if let Some(min_precision) = filter.min_precision_indicator {
        if observation
            .precision_indicator
            .is_none_or(|li| li < min_precision)
        {
            return Err(RejectReason::LowPrecision);
        }
    }

    Ok(())
}

/// Both coordinates fall on the 10 degree grid
///
/// Such positions are usually placeholders, e.g. (0, 0).
pub fn is_grid_aligned(coords: &Coordinates) -> bool {
    coords.latitude % GRID_STEP_DEGREES == 0.0 && coords.longitude % GRID_STEP_DEGREES == 0.0
}
