// mod.rs - Project model module root

pub mod chassis;
pub mod file;
pub mod json;
pub mod traits;

// Re-export main types for convenience
pub use chassis::{ChassisEntry, CHASSIS_FIELD, MGMT_IP_PATH};
pub use file::{load_project, read_document};
pub use json::{JsonProject, ProjectFlags, ProjectMeta, PROJECT_FIELD};
pub use traits::AggregateRecord;
