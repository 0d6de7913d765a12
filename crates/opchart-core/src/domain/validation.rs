use crate::domain::{
    entities::{ChartName, Project},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_layout(project: &Project) -> Result<(), DomainError> {
        project.validate_layout()
    }

    pub fn validate_chart_name(name: &str) -> Result<ChartName, DomainError> {
        ChartName::from_qualified(name)
    }
}
