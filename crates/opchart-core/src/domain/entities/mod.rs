pub mod chart;
pub mod project;

pub use crate::domain::DomainError;
pub use chart::{ChartLayout, ChartMetadata, ChartName, ChartPlan, PlannedFile, PlannedMove};
pub use project::{Project, ProjectDescriptor, ResourceDescriptor};
