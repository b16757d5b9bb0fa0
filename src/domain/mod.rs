//! Domain logic - pure release rules independent of git operations

pub mod plan;
pub mod template;
pub mod version;

pub use plan::ReleasePlan;
pub use template::{Template, VERSION_PLACEHOLDER};
pub use version::ReleaseVersion;
