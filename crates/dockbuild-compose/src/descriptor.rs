//! Build, node, and container definitions.
//!
//! These mirror the YAML documents read by the loader: a build descriptor
//! holds nodes, each node (or single-file descriptor) holds containers, and
//! both levels may declare variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How one variable obtains its value.
///
/// Exactly one of `command` and `value` must be non-empty; the resolver
/// rejects every other combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Shell command whose standard output becomes the value.
    #[serde(rename = "cmd", default, skip_serializing_if = "String::is_empty")]
    pub command: String,
    /// Literal value.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl VariableSpec {
    /// A spec resolved by running `command` through the shell.
    #[must_use]
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            value: String::new(),
        }
    }

    /// A spec holding a literal value.
    #[must_use]
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            command: String::new(),
            value: value.into(),
        }
    }
}

/// One service definition: a template plus optional links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Template file, relative to the working directory.
    #[serde(default, skip_serializing_if = "path_is_empty")]
    pub file: PathBuf,
    /// Services this container links to, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    /// Names of variables scoped to this container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
}

/// A set of containers rendered into one composite document.
///
/// This is either a whole single-file descriptor (where the container map
/// is spelled `bricks`) or one node of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationUnit {
    /// Variables available to every container template of this unit.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableSpec>,
    /// Containers keyed by service name.
    #[serde(default, alias = "bricks", skip_serializing_if = "BTreeMap::is_empty")]
    pub containers: BTreeMap<String, ContainerSpec>,
}

/// A multi-node build read from `<conf>/<build>.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Variables resolved once and shared by every node via the env file.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableSpec>,
    /// Nodes keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, ConfigurationUnit>,
}

fn path_is_empty(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_spec_reads_cmd_key() {
        let spec: VariableSpec =
            serde_yaml::from_str("cmd: git rev-parse HEAD").expect("should parse");
        assert_eq!(spec, VariableSpec::command("git rev-parse HEAD"));
    }

    #[test]
    fn unit_accepts_bricks_alias() {
        let yaml = "bricks:\n  web:\n    file: web.tmpl\n    links: [db]\n";
        let unit: ConfigurationUnit = serde_yaml::from_str(yaml).expect("should parse");
        let web = unit.containers.get("web").expect("web brick");
        assert_eq!(web.file, PathBuf::from("web.tmpl"));
        assert_eq!(web.links, vec!["db"]);
    }

    #[test]
    fn empty_fields_are_not_serialized() {
        let mut unit = ConfigurationUnit::default();
        let _ = unit.containers.insert(
            "db".into(),
            ContainerSpec {
                file: PathBuf::from("db.tmpl"),
                ..ContainerSpec::default()
            },
        );
        let yaml = serde_yaml::to_string(&unit).expect("serialize");
        assert!(!yaml.contains("links"), "got: {yaml}");
        assert!(!yaml.contains("variables"), "got: {yaml}");
        assert!(yaml.contains("file: db.tmpl"), "got: {yaml}");
    }
}
