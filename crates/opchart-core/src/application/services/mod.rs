//! Application services (use case orchestrators).

mod chart_service;
mod default_cr_service;
mod project_service;

pub use chart_service::{BuildOptions, ChartService};
pub use default_cr_service::DefaultCrService;
pub use project_service::ProjectService;
