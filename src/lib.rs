pub mod camera;
pub mod dataset;
pub mod error;
pub mod plan;

pub use camera::Camera;
pub use dataset::DatasetSpec;
pub use error::{PlanError, Result};
pub use plan::{PhotoPlan, Waypoint};
