use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::{
    compute_ground_sampling_distance, compute_image_footprint_on_surface,
    compute_image_footprint_on_surface_with_angle, Camera,
};
use crate::dataset::DatasetSpec;
use crate::error::{PlanError, Result};

/// Movement budget during one exposure, in pixels.
pub const DEFAULT_ALLOWED_MOVEMENT_PX: f64 = 1.0;

/// A position where the drone flies to and captures a photo.
///
/// Produced only by [`generate_photo_plan_on_grid`]; downstream consumers
/// (plotters, flight-controller exporters) read it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Position along the x axis (in m, world frame)
    pub x: f64,
    /// Position along the y axis (in m, world frame)
    pub y: f64,
    /// Position along the z axis (in m, world frame)
    pub z: f64,
    /// Camera tilt from nadir (in degrees, 0 = straight down)
    pub camera_angle: f64,
    /// Ground point the camera aims at
    pub look_at: Option<DVec3>,
    /// Maximum speed while capturing (in m/s)
    pub speed: f64,
    /// Estimated time of arrival from flight start (in s)
    pub timestamp: Option<f64>,
}

/// An ordered flight plan.
///
/// The sequence is immutable and its order is the flight order; consumers
/// can iterate or borrow the waypoints but not reorder them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoPlan {
    waypoints: Vec<Waypoint>,
}

impl PhotoPlan {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn into_vec(self) -> Vec<Waypoint> {
        self.waypoints
    }
}

impl std::ops::Index<usize> for PhotoPlan {
    type Output = Waypoint;

    fn index(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }
}

impl<'a> IntoIterator for &'a PhotoPlan {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

/// Distance in meters between consecutive images `(dx)` and between
/// adjacent rows `(dy)` for the requested overlap and sidelap, nadir camera.
pub fn compute_distance_between_images(camera: &Camera, dataset_spec: &DatasetSpec) -> (f64, f64) {
    let footprint = compute_image_footprint_on_surface(camera, dataset_spec.height);
    let distance_x = (1.0 - dataset_spec.overlap) * footprint[0];
    let distance_y = (1.0 - dataset_spec.sidelap) * footprint[1];
    (distance_x, distance_y)
}

/// Same as [`compute_distance_between_images`] but on the tilt-aware
/// footprint at `dataset_spec.camera_angle`.
pub fn compute_distance_between_images_with_angle(
    camera: &Camera,
    dataset_spec: &DatasetSpec,
) -> Result<(f64, f64)> {
    let footprint = compute_image_footprint_on_surface_with_angle(
        camera,
        dataset_spec.height,
        dataset_spec.camera_angle,
    )?;
    let distance_x = (1.0 - dataset_spec.overlap) * footprint[0];
    let distance_y = (1.0 - dataset_spec.sidelap) * footprint[1];
    Ok((distance_x, distance_y))
}

/// Maximum drone speed during an active capture that keeps motion blur
/// within `allowed_movement_px` pixels.
pub fn compute_speed_during_photo_capture(
    camera: &Camera,
    dataset_spec: &DatasetSpec,
    allowed_movement_px: f64,
) -> Result<f64> {
    if dataset_spec.exposure_time_ms <= 0.0 {
        return Err(PlanError::InvalidSpec(format!(
            "zero exposure time (exposure_time_ms = {})",
            dataset_spec.exposure_time_ms
        )));
    }
    let gsd = compute_ground_sampling_distance(camera, dataset_spec.height);
    let exposure_time_s = dataset_spec.exposure_time_ms / 1000.0;
    Ok(gsd * allowed_movement_px / exposure_time_s)
}

/// Ground point a camera at `(x, y, height)` tilted `angle_deg` from nadir
/// about its x axis is aimed at.
fn look_at_point(x: f64, y: f64, height: f64, angle_deg: f64) -> DVec3 {
    // At nadir this is exactly (x, y, 0).
    DVec3::new(x, y + height * angle_deg.to_radians().tan(), 0.0)
}

/// Generates the complete photo plan as waypoints in a lawn-mower pattern.
///
/// Images are spaced by the nadir overlap/sidelap distances; rows alternate
/// traversal direction so the drone never flies a long reset move back to
/// the row start. Every waypoint shares the survey height and the blur-safe
/// capture speed; timestamps assume straight-line travel at that speed.
pub fn generate_photo_plan_on_grid(camera: &Camera, dataset_spec: &DatasetSpec) -> Result<PhotoPlan> {
    camera.validate()?;
    dataset_spec.validate()?;

    let (distance_x, distance_y) = compute_distance_between_images(camera, dataset_spec);
    if !(distance_x > 0.0 && distance_x.is_finite())
        || !(distance_y > 0.0 && distance_y.is_finite())
    {
        return Err(PlanError::InvalidSpec(format!(
            "degenerate image spacing dx = {}, dy = {}",
            distance_x, distance_y
        )));
    }

    let num_images_x = (dataset_spec.scan_dimension_x / distance_x).ceil() as usize;
    let num_images_y = (dataset_spec.scan_dimension_y / distance_y).ceil() as usize;
    let speed = compute_speed_during_photo_capture(camera, dataset_spec, DEFAULT_ALLOWED_MOVEMENT_PX)?;
    log::debug!(
        "photo plan grid: {}x{} images, dx = {:.3} m, dy = {:.3} m, speed = {:.3} m/s",
        num_images_x,
        num_images_y,
        distance_x,
        distance_y,
        speed
    );

    // Travel time per row: (num_images_x - 1) in-row steps plus one row change.
    let row_duration_s = ((num_images_x - 1) as f64 * distance_x + distance_y) / speed;
    let step_duration_s = distance_x / speed;

    // Rows are independent pure computations.
    let waypoints: Vec<Waypoint> = (0..num_images_y)
        .into_par_iter()
        .flat_map_iter(|i| {
            let y = i as f64 * distance_y;
            (0..num_images_x).map(move |j| {
                let x = if i % 2 == 1 {
                    // backward traversal on odd rows
                    (num_images_x - 1 - j) as f64 * distance_x
                } else {
                    j as f64 * distance_x
                };
                let z = dataset_spec.height;
                Waypoint {
                    x,
                    y,
                    z,
                    camera_angle: dataset_spec.camera_angle,
                    look_at: Some(look_at_point(x, y, z, dataset_spec.camera_angle)),
                    speed,
                    timestamp: Some(i as f64 * row_duration_s + j as f64 * step_duration_s),
                }
            })
        })
        .collect();

    Ok(PhotoPlan { waypoints })
}
