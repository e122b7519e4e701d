//! Reading descriptors from disk.
//!
//! The loader only enforces document shape; structural rules such as
//! "at least one node" belong to the validator.

use std::path::Path;

use dockbuild_common::error::{BuildError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::descriptor::{BuildDescriptor, ConfigurationUnit};

/// Loads a multi-node build descriptor.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid descriptor.
pub fn load_build_descriptor(path: &Path) -> Result<BuildDescriptor> {
    load(path)
}

/// Loads a single-file descriptor or a generated node file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid descriptor.
pub fn load_configuration_unit(path: &Path) -> Result<ConfigurationUnit> {
    load(path)
}

/// Serializes a descriptor back to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    tracing::debug!(path = %path.display(), "loading descriptor");
    let source = std::fs::read_to_string(path).map_err(|source| BuildError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&source).map_err(|source| BuildError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::descriptor::VariableSpec;

    #[test]
    fn load_build_descriptor_with_nodes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prod.yml");
        std::fs::write(
            &path,
            r"variables:
  TAG:
    value: v1
nodes:
  web1:
    containers:
      web:
        file: templates/web.tmpl
        links:
          - db
      db:
        file: templates/db.tmpl
",
        )
        .expect("write descriptor");

        let build = load_build_descriptor(&path).expect("should load");
        assert_eq!(build.variables.get("TAG"), Some(&VariableSpec::value("v1")));
        let node = build.nodes.get("web1").expect("web1 node");
        assert_eq!(node.containers.len(), 2);
        assert_eq!(
            node.containers.get("web").map(|c| c.file.clone()),
            Some(PathBuf::from("templates/web.tmpl"))
        );
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_configuration_unit(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, BuildError::ConfigRead { .. }), "got: {err}");
    }

    #[test]
    fn load_malformed_yaml_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "containers: [unterminated").expect("write");
        let err = load_configuration_unit(&path).unwrap_err();
        assert!(matches!(err, BuildError::ConfigParse { .. }), "got: {err}");
    }

    #[test]
    fn node_roundtrips_through_yaml() {
        let yaml = "variables:\n  SHA:\n    cmd: git rev-parse HEAD\ncontainers:\n  web:\n    file: web.tmpl\n";
        let unit: ConfigurationUnit = serde_yaml::from_str(yaml).expect("parse");
        let written = to_yaml(&unit).expect("serialize");
        let back: ConfigurationUnit = serde_yaml::from_str(&written).expect("reparse");
        assert_eq!(back, unit);
    }
}
