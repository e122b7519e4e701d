//! Structural checks run before any file is written.

use std::path::{Component, Path};

use dockbuild_common::error::{BuildError, Result};

use crate::descriptor::{BuildDescriptor, ConfigurationUnit};

/// Validates a build descriptor.
///
/// # Checks performed
///
/// 1. The build declares at least one node.
/// 2. Every node passes [`validate_unit`].
///
/// # Errors
///
/// Returns [`BuildError::Validation`] describing the first failed check.
pub fn validate_build(build: &BuildDescriptor) -> Result<()> {
    if build.nodes.is_empty() {
        return Err(BuildError::Validation {
            message: "build must contain at least one node".into(),
        });
    }
    for (name, node) in &build.nodes {
        if !name.is_empty() {
            validate_name("node", name)?;
        }
        validate_unit(&format!("node \"{name}\""), node)?;
    }
    Ok(())
}

/// Validates one configuration unit; `label` names it in error messages.
///
/// # Checks performed
///
/// 1. The unit declares at least one container.
/// 2. Every container names a template file.
///
/// # Errors
///
/// Returns [`BuildError::Validation`] describing the first failed check.
pub fn validate_unit(label: &str, unit: &ConfigurationUnit) -> Result<()> {
    if unit.containers.is_empty() {
        return Err(BuildError::Validation {
            message: format!("{label} must have at least one container"),
        });
    }
    for (name, container) in &unit.containers {
        if container.file.as_os_str().is_empty() {
            return Err(BuildError::Validation {
                message: format!("container \"{name}\" in {label} has no template file"),
            });
        }
    }
    Ok(())
}

/// Checks that `name` can be used as a single file or directory name.
///
/// Build and node names are joined onto the builds directory, so anything
/// other than one normal path component (empty, `.`, `..`, separators,
/// absolute paths) is rejected before a path is formed.
///
/// # Errors
///
/// Returns [`BuildError::Validation`] if `name` is not a plain name.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    );
    if plain {
        Ok(())
    } else {
        Err(BuildError::Validation {
            message: format!("invalid {kind} name \"{name}\""),
        })
    }
}
