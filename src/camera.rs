use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Simple pinhole camera model.
///
/// Focal lengths and the principal point are in pixels, the sensor size in
/// millimeters. Immutable once constructed; all computations borrow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Focal length along the x axis (in pixels)
    pub fx: f64,
    /// Focal length along the y axis (in pixels)
    pub fy: f64,
    /// Optical center along the x axis (in pixels)
    pub cx: f64,
    /// Optical center along the y axis (in pixels)
    pub cy: f64,
    /// Sensor size along the x axis (in mm)
    pub sensor_size_x_mm: f64,
    /// Sensor size along the y axis (in mm)
    pub sensor_size_y_mm: f64,
    /// Image width in pixels
    pub image_size_x: u32,
    /// Image height in pixels
    pub image_size_y: u32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
        sensor_size_x_mm: f64,
        sensor_size_y_mm: f64,
        image_size_x: u32,
        image_size_y: u32,
    ) -> Result<Camera> {
        let camera = Camera {
            fx,
            fy,
            cx,
            cy,
            sensor_size_x_mm,
            sensor_size_y_mm,
            image_size_x,
            image_size_y,
        };
        camera.validate()?;
        Ok(camera)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("fx", self.fx),
            ("fy", self.fy),
            ("sensor_size_x_mm", self.sensor_size_x_mm),
            ("sensor_size_y_mm", self.sensor_size_y_mm),
            ("image_size_x", self.image_size_x as f64),
            ("image_size_y", self.image_size_y as f64),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(PlanError::InvalidCameraParameter { name, value });
            }
        }
        // The principal point may sit anywhere, including 0, but not NaN/Inf.
        for (name, value) in [("cx", self.cx), ("cy", self.cy)] {
            if !value.is_finite() {
                return Err(PlanError::InvalidCameraParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Projects a 3D world point into pixel coordinates.
///
/// Points at or behind the camera plane (`Z <= 0`) have no defined
/// projection and raise a domain error instead of producing Inf.
pub fn project_world_point_to_image(
    camera: &Camera,
    point: &na::Vector3<f64>,
) -> Result<na::Vector2<f64>> {
    let z = point[2];
    if z <= 0.0 {
        return Err(PlanError::GeometryDomain(format!(
            "cannot project point with Z = {} (behind camera)",
            z
        )));
    }
    let u = camera.fx * point[0] / z + camera.cx;
    let v = camera.fy * point[1] / z + camera.cy;
    Ok(na::Vector2::new(u, v))
}

/// Reprojects a pixel back to a 3D world point at depth `z`.
pub fn reproject_image_point_to_world(
    camera: &Camera,
    pixel: &na::Vector2<f64>,
    z: f64,
) -> na::Vector3<f64> {
    let x = (pixel[0] - camera.cx) * z / camera.fx;
    let y = (pixel[1] - camera.cy) * z / camera.fy;
    na::Vector3::new(x, y, z)
}

/// Computes the ground footprint `[width, height]` in meters of one image
/// captured at the given distance from the surface, camera at nadir.
///
/// Reprojects the four image corners to the surface plane and measures the
/// extent between them.
pub fn compute_image_footprint_on_surface(
    camera: &Camera,
    distance_from_surface: f64,
) -> na::Vector2<f64> {
    let w = camera.image_size_x as f64;
    let h = camera.image_size_y as f64;
    let corners = [
        na::Vector2::new(0.0, 0.0),
        na::Vector2::new(w, 0.0),
        na::Vector2::new(w, h),
        na::Vector2::new(0.0, h),
    ];
    let world: Vec<na::Vector3<f64>> = corners
        .iter()
        .map(|c| reproject_image_point_to_world(camera, c, distance_from_surface))
        .collect();

    let width = (world[1][0] - world[0][0]).abs();
    let height = (world[3][1] - world[0][1]).abs();
    na::Vector2::new(width, height)
}

/// Tilt-aware ground footprint.
///
/// The camera is tilted `angle_deg` from nadir about its x axis, so the
/// footprint along y (the tilt direction) stretches by the slant range
/// (`1/cos`) and the ground obliquity (another `1/cos`), while the x extent
/// keeps its nadir value to first order. Identical to
/// [`compute_image_footprint_on_surface`] at zero angle.
pub fn compute_image_footprint_on_surface_with_angle(
    camera: &Camera,
    distance_from_surface: f64,
    angle_deg: f64,
) -> Result<na::Vector2<f64>> {
    if angle_deg.abs() >= 90.0 {
        return Err(PlanError::GeometryDomain(format!(
            "camera angle {} deg does not intersect the surface",
            angle_deg
        )));
    }
    let nadir = compute_image_footprint_on_surface(camera, distance_from_surface);
    let cos = angle_deg.to_radians().cos();
    Ok(na::Vector2::new(nadir[0], nadir[1] / (cos * cos)))
}

/// Ground sampling distance in meters per pixel at the given distance.
///
/// Mean of the per-axis footprint/resolution ratios.
pub fn compute_ground_sampling_distance(camera: &Camera, distance_from_surface: f64) -> f64 {
    let footprint = compute_image_footprint_on_surface(camera, distance_from_surface);
    let gsd_x = footprint[0] / camera.image_size_x as f64;
    let gsd_y = footprint[1] / camera.image_size_y as f64;
    (gsd_x + gsd_y) / 2.0
}

/// Converts the pixel-unit focal lengths to millimeters.
pub fn compute_focal_length_in_mm(camera: &Camera) -> na::Vector2<f64> {
    let pixel_to_mm_x = camera.sensor_size_x_mm / camera.image_size_x as f64;
    let pixel_to_mm_y = camera.sensor_size_y_mm / camera.image_size_y as f64;
    na::Vector2::new(camera.fx * pixel_to_mm_x, camera.fy * pixel_to_mm_y)
}
