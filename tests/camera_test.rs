use nalgebra as na;
use survey_photo_plan::camera::{
    compute_focal_length_in_mm, compute_ground_sampling_distance,
    compute_image_footprint_on_surface, compute_image_footprint_on_surface_with_angle,
    project_world_point_to_image, reproject_image_point_to_world,
};
use survey_photo_plan::{Camera, PlanError};

fn test_camera() -> Camera {
    Camera::new(1000.0, 1000.0, 500.0, 500.0, 10.0, 10.0, 1000, 1000).unwrap()
}

#[test]
fn test_camera_validation() {
    assert!(Camera::new(1000.0, 1000.0, 500.0, 500.0, 10.0, 10.0, 1000, 1000).is_ok());

    let bad_fx = Camera::new(0.0, 1000.0, 500.0, 500.0, 10.0, 10.0, 1000, 1000);
    assert!(matches!(
        bad_fx,
        Err(PlanError::InvalidCameraParameter { name: "fx", .. })
    ));

    let bad_fy = Camera::new(1000.0, -5.0, 500.0, 500.0, 10.0, 10.0, 1000, 1000);
    assert!(bad_fy.is_err());

    let bad_width = Camera::new(1000.0, 1000.0, 500.0, 500.0, 10.0, 10.0, 0, 1000);
    assert!(matches!(
        bad_width,
        Err(PlanError::InvalidCameraParameter { name: "image_size_x", .. })
    ));

    let bad_sensor = Camera::new(1000.0, 1000.0, 500.0, 500.0, 0.0, 10.0, 1000, 1000);
    assert!(bad_sensor.is_err());
}

#[test]
fn test_camera_rejects_nonfinite_principal_point() {
    let nan_cx = Camera::new(1000.0, 1000.0, f64::NAN, 500.0, 10.0, 10.0, 1000, 1000);
    assert!(matches!(
        nan_cx,
        Err(PlanError::InvalidCameraParameter { name: "cx", .. })
    ));

    let inf_cy = Camera::new(1000.0, 1000.0, 500.0, f64::INFINITY, 10.0, 10.0, 1000, 1000);
    assert!(matches!(
        inf_cy,
        Err(PlanError::InvalidCameraParameter { name: "cy", .. })
    ));

    // A principal point at the image origin is legal.
    assert!(Camera::new(1000.0, 1000.0, 0.0, 0.0, 10.0, 10.0, 1000, 1000).is_ok());
}

#[test]
fn test_project_center() {
    let camera = test_camera();
    // A point on the optical axis lands on the principal point.
    let uv = project_world_point_to_image(&camera, &na::Vector3::new(0.0, 0.0, 5.0)).unwrap();
    assert!((uv[0] - 500.0).abs() < 1e-9);
    assert!((uv[1] - 500.0).abs() < 1e-9);
}

#[test]
fn test_project_behind_camera_fails() {
    let camera = test_camera();
    let at_plane = project_world_point_to_image(&camera, &na::Vector3::new(1.0, 1.0, 0.0));
    assert!(matches!(at_plane, Err(PlanError::GeometryDomain(_))));

    let behind = project_world_point_to_image(&camera, &na::Vector3::new(1.0, 1.0, -2.0));
    assert!(behind.is_err());
}

#[test]
fn test_project_reproject_round_trip() {
    let camera = Camera::new(800.0, 820.0, 640.0, 360.0, 36.0, 24.0, 1280, 720).unwrap();
    let points = [
        na::Vector3::new(0.0, 0.0, 1.0),
        na::Vector3::new(1.5, -2.0, 10.0),
        na::Vector3::new(-3.0, 4.0, 25.0),
        na::Vector3::new(0.25, 0.75, 0.5),
    ];
    for p in &points {
        let uv = project_world_point_to_image(&camera, p).unwrap();
        let back = reproject_image_point_to_world(&camera, &uv, p[2]);
        assert!((back - p).norm() < 1e-9);
    }
}

#[test]
fn test_footprint_nadir() {
    let camera = test_camera();
    // fx = image width => horizontal FOV spans exactly the flight height.
    let footprint = compute_image_footprint_on_surface(&camera, 10.0);
    assert!((footprint[0] - 20.0).abs() < 1e-9);
    assert!((footprint[1] - 20.0).abs() < 1e-9);

    // Footprint scales linearly with distance.
    let footprint2 = compute_image_footprint_on_surface(&camera, 20.0);
    assert!((footprint2[0] - 40.0).abs() < 1e-9);
    assert!((footprint2[1] - 40.0).abs() < 1e-9);
}

#[test]
fn test_footprint_with_zero_angle_matches_nadir() {
    let camera = Camera::new(1200.0, 900.0, 640.0, 360.0, 36.0, 24.0, 1280, 720).unwrap();
    for d in [1.0, 5.0, 37.5, 120.0] {
        let nadir = compute_image_footprint_on_surface(&camera, d);
        let tilted = compute_image_footprint_on_surface_with_angle(&camera, d, 0.0).unwrap();
        assert_eq!(nadir, tilted);
    }
}

#[test]
fn test_footprint_with_angle_elongates_tilt_direction() {
    let camera = test_camera();
    let nadir = compute_image_footprint_on_surface(&camera, 10.0);
    let tilted = compute_image_footprint_on_surface_with_angle(&camera, 10.0, 45.0).unwrap();
    // x extent untouched, y extent stretched by 1/cos^2(45 deg) = 2.
    assert!((tilted[0] - nadir[0]).abs() < 1e-9);
    assert!((tilted[1] - 2.0 * nadir[1]).abs() < 1e-9);
}

#[test]
fn test_footprint_with_grazing_angle_fails() {
    let camera = test_camera();
    let result = compute_image_footprint_on_surface_with_angle(&camera, 10.0, 90.0);
    assert!(matches!(result, Err(PlanError::GeometryDomain(_))));
    assert!(compute_image_footprint_on_surface_with_angle(&camera, 10.0, 135.0).is_err());
}

#[test]
fn test_gsd_value_and_monotonicity() {
    let camera = test_camera();
    // 20 m footprint over 1000 px => 2 cm per pixel.
    let gsd = compute_ground_sampling_distance(&camera, 10.0);
    assert!((gsd - 0.02).abs() < 1e-9);

    let mut previous = 0.0;
    for d in [1.0, 2.0, 5.0, 10.0, 50.0, 200.0] {
        let gsd = compute_ground_sampling_distance(&camera, d);
        assert!(gsd > previous);
        previous = gsd;
    }
}

#[test]
fn test_focal_length_in_mm() {
    // 10 mm sensor over 1000 px => 0.01 mm per px, fx = 1000 px => 10 mm.
    let camera = test_camera();
    let f_mm = compute_focal_length_in_mm(&camera);
    assert!((f_mm[0] - 10.0).abs() < 1e-9);
    assert!((f_mm[1] - 10.0).abs() < 1e-9);

    let asymmetric = Camera::new(2400.0, 2400.0, 960.0, 540.0, 36.0, 24.0, 1920, 1080).unwrap();
    let f_mm = compute_focal_length_in_mm(&asymmetric);
    assert!((f_mm[0] - 2400.0 * 36.0 / 1920.0).abs() < 1e-9);
    assert!((f_mm[1] - 2400.0 * 24.0 / 1080.0).abs() < 1e-9);
}
