//! Workspace layout configuration.
//!
//! All paths are relative to the process working directory unless
//! configured otherwise.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where descriptors are read from and where generated files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Directory holding build descriptors.
    pub conf_dir: PathBuf,
    /// Directory holding generated builds.
    pub builds_dir: PathBuf,
    /// Composite document destination.
    pub output_file: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            conf_dir: PathBuf::from(constants::DEFAULT_CONF_DIR),
            builds_dir: PathBuf::from(constants::DEFAULT_BUILDS_DIR),
            output_file: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Layout {
    /// Returns a layout rooted at `root`, using the default relative names.
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            conf_dir: root.join(constants::DEFAULT_CONF_DIR),
            builds_dir: root.join(constants::DEFAULT_BUILDS_DIR),
            output_file: root.join(constants::DEFAULT_OUTPUT_FILE),
        }
    }

    /// Path of the descriptor for `build`.
    #[must_use]
    pub fn descriptor_path(&self, build: &str) -> PathBuf {
        self.conf_dir
            .join(format!("{build}.{}", constants::DESCRIPTOR_EXTENSION))
    }

    /// Directory holding the generated files of `build`.
    #[must_use]
    pub fn build_dir(&self, build: &str) -> PathBuf {
        self.builds_dir.join(build)
    }

    /// Shared environment file of `build`.
    #[must_use]
    pub fn env_file(&self, build: &str) -> PathBuf {
        self.build_dir(build).join(constants::ENV_FILE_NAME)
    }
}

/// Returns the descriptor file for `node` inside `build_dir`.
///
/// The unnamed node maps to `docker-build.yml`; any other node maps to
/// `docker-build-<node>.yml`.
#[must_use]
pub fn node_file(build_dir: &Path, node: Option<&str>) -> PathBuf {
    let name = match node {
        None | Some("") => format!(
            "{}.{}",
            constants::NODE_FILE_PREFIX,
            constants::DESCRIPTOR_EXTENSION
        ),
        Some(node) => format!(
            "{}-{node}.{}",
            constants::NODE_FILE_PREFIX,
            constants::DESCRIPTOR_EXTENSION
        ),
    };
    build_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_uses_relative_conventions() {
        let layout = Layout::default();
        assert_eq!(layout.descriptor_path("prod"), PathBuf::from("conf/prod.yml"));
        assert_eq!(layout.build_dir("prod"), PathBuf::from("builds/prod"));
        assert_eq!(
            layout.env_file("prod"),
            PathBuf::from("builds/prod/docker-build.env")
        );
        assert_eq!(layout.output_file, PathBuf::from("docker-compose.yml"));
    }

    #[test]
    fn node_file_for_default_node() {
        let dir = Path::new("builds/prod");
        assert_eq!(
            node_file(dir, None),
            PathBuf::from("builds/prod/docker-build.yml")
        );
        assert_eq!(
            node_file(dir, Some("")),
            PathBuf::from("builds/prod/docker-build.yml")
        );
    }

    #[test]
    fn node_file_for_named_node() {
        assert_eq!(
            node_file(Path::new("builds/prod"), Some("web1")),
            PathBuf::from("builds/prod/docker-build-web1.yml")
        );
    }

    #[test]
    fn rooted_layout_joins_root() {
        let layout = Layout::rooted_at(Path::new("/srv/deploy"));
        assert_eq!(layout.conf_dir, PathBuf::from("/srv/deploy/conf"));
        assert_eq!(
            layout.output_file,
            PathBuf::from("/srv/deploy/docker-compose.yml")
        );
    }
}
