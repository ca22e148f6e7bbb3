use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// User specification for an image survey dataset.
///
/// Immutable value object; constructed once by a configuration loader and
/// borrowed by all plan computations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Fractional overlap between consecutive images along the flight
    /// direction, in [0, 1)
    pub overlap: f64,
    /// Fractional overlap between adjacent rows, in [0, 1)
    pub sidelap: f64,
    /// Flight height above the surface (in m)
    pub height: f64,
    /// Scan area extent along the x axis (in m)
    pub scan_dimension_x: f64,
    /// Scan area extent along the y axis (in m)
    pub scan_dimension_y: f64,
    /// Exposure time per photo (in ms)
    pub exposure_time_ms: f64,
    /// Camera tilt from nadir (in degrees)
    pub camera_angle: f64,
}

impl DatasetSpec {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        overlap: f64,
        sidelap: f64,
        height: f64,
        scan_dimension_x: f64,
        scan_dimension_y: f64,
        exposure_time_ms: f64,
        camera_angle: f64,
    ) -> Result<DatasetSpec> {
        let spec = DatasetSpec {
            overlap,
            sidelap,
            height,
            scan_dimension_x,
            scan_dimension_y,
            exposure_time_ms,
            camera_angle,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(PlanError::InvalidSpec(format!(
                "overlap must be in [0, 1), got {}",
                self.overlap
            )));
        }
        if !(0.0..1.0).contains(&self.sidelap) {
            return Err(PlanError::InvalidSpec(format!(
                "sidelap must be in [0, 1), got {}",
                self.sidelap
            )));
        }
        if !(self.height > 0.0) || !self.height.is_finite() {
            return Err(PlanError::InvalidSpec(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if !(self.scan_dimension_x > 0.0) || !self.scan_dimension_x.is_finite() {
            return Err(PlanError::InvalidSpec(format!(
                "scan_dimension_x must be positive, got {}",
                self.scan_dimension_x
            )));
        }
        if !(self.scan_dimension_y > 0.0) || !self.scan_dimension_y.is_finite() {
            return Err(PlanError::InvalidSpec(format!(
                "scan_dimension_y must be positive, got {}",
                self.scan_dimension_y
            )));
        }
        if self.exposure_time_ms < 0.0 || !self.exposure_time_ms.is_finite() {
            return Err(PlanError::InvalidSpec(format!(
                "exposure_time_ms must be non-negative, got {}",
                self.exposure_time_ms
            )));
        }
        if !(0.0..90.0).contains(&self.camera_angle) {
            return Err(PlanError::InvalidSpec(format!(
                "camera_angle must be in [0, 90) degrees, got {}",
                self.camera_angle
            )));
        }
        Ok(())
    }
}
