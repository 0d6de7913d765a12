//! Supported kubebuilder project layouts.
//!
//! The chart pipeline relies on directory conventions (`config/default`,
//! `config/samples`) that only the layouts listed here guarantee.

use crate::domain::error::DomainError;

/// kubebuilder Go plugin, layout v3.
pub const V3: &str = "go.kubebuilder.io/v3";
/// kubebuilder Go plugin, layout v4 preview.
pub const V4_ALPHA: &str = "go.kubebuilder.io/v4-alpha";
/// kubebuilder Go plugin, layout v4.
pub const V4: &str = "go.kubebuilder.io/v4";

pub const SUPPORTED_LAYOUTS: &[&str] = &[V3, V4_ALPHA, V4];

pub fn is_supported(layout: &str) -> bool {
    SUPPORTED_LAYOUTS.contains(&layout)
}

/// Accept the declared layouts if at least one of them is supported.
pub fn validate_layouts(layouts: &[String]) -> Result<(), DomainError> {
    if layouts.iter().any(|l| is_supported(l)) {
        Ok(())
    } else {
        Err(DomainError::UnsupportedLayout {
            layouts: layouts.to_vec(),
        })
    }
}
