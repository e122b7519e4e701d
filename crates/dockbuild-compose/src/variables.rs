//! Variable resolution.
//!
//! Turns `cmd`/`value` specs into a flat name → value map. Variables never
//! reference each other, so each one resolves independently; the first
//! failure aborts resolution and discards everything resolved so far.

use std::collections::BTreeMap;

use dockbuild_common::error::{BuildError, Result};

use crate::command::CommandRunner;
use crate::descriptor::VariableSpec;

/// Resolved variables of one configuration unit, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVariables(BTreeMap<String, String>);

impl ResolvedVariables {
    /// Returns the value of `name`, if resolved.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of resolved variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variables were resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the variables as a docker-compose `env_file`, one
    /// `NAME=value` line each.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Validation`] if a value contains a line
    /// terminator, since the env file has no way to express one.
    pub fn to_env_file(&self) -> Result<String> {
        let mut out = String::new();
        for (name, value) in self.iter() {
            if value.contains(['\n', '\r']) {
                return Err(BuildError::Validation {
                    message: format!("variable \"{name}\" spans multiple lines"),
                });
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Resolves every spec in `specs`.
///
/// Literal values are stored verbatim. Command output only has its trailing
/// `\n`/`\r` characters removed; leading and trailing spaces or tabs are
/// kept, as are line breaks inside the output.
///
/// # Errors
///
/// Returns [`BuildError::ConflictingVariableSpec`] when a spec sets both
/// `cmd` and `value`, [`BuildError::MissingVariableSpec`] when it sets
/// neither, or the runner's error when a command fails.
pub fn resolve_variables(
    specs: &BTreeMap<String, VariableSpec>,
    runner: &dyn CommandRunner,
) -> Result<ResolvedVariables> {
    let mut resolved = BTreeMap::new();
    for (name, spec) in specs {
        let value = resolve_one(name, spec, runner)?;
        let _ = resolved.insert(name.clone(), value);
    }
    tracing::debug!(count = resolved.len(), "resolved variables");
    Ok(ResolvedVariables(resolved))
}

fn resolve_one(name: &str, spec: &VariableSpec, runner: &dyn CommandRunner) -> Result<String> {
    match (spec.command.is_empty(), spec.value.is_empty()) {
        (false, false) => Err(BuildError::ConflictingVariableSpec { name: name.into() }),
        (false, true) => {
            tracing::debug!(variable = name, "resolving variable from command");
            let output = runner.run(&spec.command)?;
            Ok(output.trim_end_matches(['\n', '\r']).to_owned())
        }
        (true, false) => Ok(spec.value.clone()),
        (true, true) => Err(BuildError::MissingVariableSpec { name: name.into() }),
    }
}
