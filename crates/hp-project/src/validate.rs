//! Project validation logic.

use hp_model::ConfigError;

use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid layout: {0}")]
    Layout(#[from] ConfigError),
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: project.name.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    for (field, unit) in [
        ("units.T", &project.units.temperature),
        ("units.p", &project.units.pressure),
        ("units.h", &project.units.enthalpy),
        ("units.m", &project.units.mass_flow),
    ] {
        if unit.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: unit.clone(),
                reason: "must not be empty".to_string(),
            });
        }
    }

    project.to_cycle_config().validate()?;
    Ok(())
}
