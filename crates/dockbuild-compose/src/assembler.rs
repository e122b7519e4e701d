//! Composite document assembly.
//!
//! Each container contributes one fragment: its rendered template, an
//! optional `env_file` line, and its links block. Fragments are
//! concatenated in container-name order. The first failing container
//! aborts assembly and nothing is returned.

use std::path::Path;

use dockbuild_common::error::Result;

use crate::descriptor::{ConfigurationUnit, ContainerSpec};
use crate::links::{inject_env_file, inject_links};
use crate::template::render_file;
use crate::variables::ResolvedVariables;

/// Renders a single container's fragment.
///
/// # Errors
///
/// Returns an error if the template cannot be read, parsed, or rendered.
pub fn assemble_container(
    name: &str,
    container: &ContainerSpec,
    vars: &ResolvedVariables,
    env_file: Option<&Path>,
) -> Result<String> {
    let mut fragment = render_file(name, &container.file, vars)?;
    if let Some(env_file) = env_file {
        inject_env_file(&mut fragment, &env_file.to_string_lossy());
    }
    inject_links(&mut fragment, &container.links)?;
    Ok(fragment)
}

/// Renders every container of `unit` and concatenates the fragments.
///
/// When `env_file` is given, every fragment declares it.
///
/// # Errors
///
/// Returns the first error raised by any container.
pub fn assemble(
    unit: &ConfigurationUnit,
    vars: &ResolvedVariables,
    env_file: Option<&Path>,
) -> Result<String> {
    let mut document = String::new();
    for (name, container) in &unit.containers {
        tracing::debug!(container = %name, links = container.links.len(), "assembling container");
        document.push_str(&assemble_container(name, container, vars, env_file)?);
    }
    tracing::info!(containers = unit.containers.len(), "assembled compose document");
    Ok(document)
}
