//! Build workspace operations.
//!
//! Every operation computes all of its output before touching the
//! filesystem, so a failure leaves no partial build or compose file behind.

use std::path::{Path, PathBuf};

use dockbuild_common::config::{Layout, node_file};
use dockbuild_common::error::{BuildError, Result};

use crate::assembler::assemble;
use crate::command::CommandRunner;
use crate::loader::{load_build_descriptor, load_configuration_unit, to_yaml};
use crate::validator::{validate_build, validate_name, validate_unit};
use crate::variables::resolve_variables;

/// Files written by [`make`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeReport {
    /// Directory that now holds the build.
    pub build_dir: PathBuf,
    /// Shared environment file, if the build declares variables.
    pub env_file: Option<PathBuf>,
    /// One descriptor per node.
    pub node_files: Vec<PathBuf>,
}

/// Generates the per-node descriptors of `build` under the builds directory.
///
/// Build-level variables are resolved once and written to the shared env
/// file. Node-level variables are kept unresolved so that `checkout`
/// evaluates them against the current state of the machine.
///
/// # Errors
///
/// Returns an error if the build name is not a plain file name, the
/// descriptor is missing or invalid, the build already exists, a variable
/// fails to resolve or spans several lines, or a file cannot be written.
pub fn make(layout: &Layout, build: &str, runner: &dyn CommandRunner) -> Result<MakeReport> {
    tracing::info!(build, "making build");
    validate_name("build", build)?;

    let descriptor_path = layout.descriptor_path(build);
    if !exists(&descriptor_path)? {
        return Err(BuildError::NotFound {
            kind: "build",
            id: build.into(),
        });
    }
    let build_dir = layout.build_dir(build);
    if exists(&build_dir)? {
        return Err(BuildError::AlreadyExists {
            kind: "build",
            id: build.into(),
        });
    }

    let descriptor = load_build_descriptor(&descriptor_path)?;
    validate_build(&descriptor)?;

    let env = if descriptor.variables.is_empty() {
        None
    } else {
        let vars = resolve_variables(&descriptor.variables, runner)?;
        Some((layout.env_file(build), vars.to_env_file()?))
    };

    let nodes = descriptor
        .nodes
        .iter()
        .map(|(name, node)| Ok((node_file(&build_dir, Some(name)), to_yaml(node)?)))
        .collect::<Result<Vec<_>>>()?;

    commit_build(&build_dir, env.as_ref(), &nodes)?;

    tracing::info!(build, nodes = nodes.len(), "build created");
    Ok(MakeReport {
        build_dir,
        env_file: env.map(|(path, _)| path),
        node_files: nodes.into_iter().map(|(path, _)| path).collect(),
    })
}

/// Creates `build_dir` and writes every file into it. On a failed write the
/// directory is removed again.
fn commit_build(
    build_dir: &Path,
    env: Option<&(PathBuf, String)>,
    nodes: &[(PathBuf, String)],
) -> Result<()> {
    std::fs::create_dir_all(build_dir).map_err(|source| BuildError::Io {
        path: build_dir.to_path_buf(),
        source,
    })?;

    let written = env
        .into_iter()
        .chain(nodes)
        .try_for_each(|(path, contents)| write_output(path, contents));
    if written.is_err() {
        tracing::warn!(path = %build_dir.display(), "removing incomplete build");
        if let Err(e) = std::fs::remove_dir_all(build_dir) {
            tracing::warn!(
                error = %e,
                path = %build_dir.display(),
                "unable to remove incomplete build"
            );
        }
    }
    written
}

/// Deletes a generated build and everything in it.
///
/// # Errors
///
/// Returns an error if the build name is not a plain file name, or the
/// build does not exist or cannot be removed.
pub fn remove(layout: &Layout, build: &str) -> Result<PathBuf> {
    validate_name("build", build)?;
    let build_dir = layout.build_dir(build);
    if !exists(&build_dir)? {
        return Err(BuildError::NotFound {
            kind: "build",
            id: build.into(),
        });
    }
    tracing::info!(build, path = %build_dir.display(), "removing build");
    std::fs::remove_dir_all(&build_dir).map_err(|source| BuildError::Io {
        path: build_dir.clone(),
        source,
    })?;
    Ok(build_dir)
}

/// Writes the compose document for one node of `build`.
///
/// `None` selects the build's unnamed node. When the build has a shared env
/// file, every service declares it.
///
/// # Errors
///
/// Returns an error if a name is not a plain file name, the build or node
/// does not exist, the node is invalid, or resolution, rendering, or writing
/// fails.
pub fn checkout(
    layout: &Layout,
    build: &str,
    node: Option<&str>,
    runner: &dyn CommandRunner,
) -> Result<PathBuf> {
    tracing::info!(build, node = node.unwrap_or_default(), "checking out node");
    validate_name("build", build)?;
    if let Some(name) = node.filter(|n| !n.is_empty()) {
        validate_name("node", name)?;
    }

    let build_dir = layout.build_dir(build);
    if !exists(&build_dir)? {
        return Err(BuildError::NotFound {
            kind: "build",
            id: build.into(),
        });
    }

    let env_file = layout.env_file(build);
    let env_file = exists(&env_file)?.then_some(env_file);

    let node_path = node_file(&build_dir, node);
    if !exists(&node_path)? {
        return Err(BuildError::NotFound {
            kind: "node",
            id: node.unwrap_or_default().into(),
        });
    }

    let unit = load_configuration_unit(&node_path)?;
    validate_unit(&format!("node file {}", node_path.display()), &unit)?;
    let vars = resolve_variables(&unit.variables, runner)?;
    let document = assemble(&unit, &vars, env_file.as_deref())?;

    write_output(&layout.output_file, &document)?;
    Ok(layout.output_file.clone())
}

/// Writes the compose document for a single-file descriptor.
///
/// # Errors
///
/// Returns an error if the descriptor is missing or invalid, or resolution,
/// rendering, or writing fails.
pub fn generate(layout: &Layout, descriptor: &Path, runner: &dyn CommandRunner) -> Result<PathBuf> {
    tracing::info!(descriptor = %descriptor.display(), "generating compose document");

    let unit = load_configuration_unit(descriptor)?;
    validate_unit(&format!("descriptor {}", descriptor.display()), &unit)?;
    let vars = resolve_variables(&unit.variables, runner)?;
    let document = assemble(&unit, &vars, None)?;

    write_output(&layout.output_file, &document)?;
    Ok(layout.output_file.clone())
}

/// Removes the active compose document.
///
/// Returns `false` when there was nothing to remove.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clean(layout: &Layout) -> Result<bool> {
    let path = &layout.output_file;
    if !exists(path)? {
        tracing::info!(path = %path.display(), "nothing to clean");
        return Ok(false);
    }
    std::fs::remove_file(path).map_err(|source| BuildError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "removed compose document");
    Ok(true)
}

fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    tracing::debug!(path = %path.display(), bytes = contents.len(), "writing file");
    std::fs::write(path, contents).map_err(|source| BuildError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_write_removes_incomplete_build() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let build_dir = tmp.path().join("prod");
        let env = (build_dir.join("docker-build.env"), "TAG=v1\n".to_owned());
        let nodes = [(build_dir.join("missing").join("docker-build.yml"), String::new())];

        let err = commit_build(&build_dir, Some(&env), &nodes).unwrap_err();

        assert!(matches!(err, BuildError::OutputWrite { .. }), "got: {err}");
        assert!(!build_dir.exists());
    }

    #[test]
    fn successful_commit_writes_every_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let build_dir = tmp.path().join("prod");
        let nodes = [
            (build_dir.join("docker-build.yml"), "a".to_owned()),
            (build_dir.join("docker-build-web.yml"), "b".to_owned()),
        ];

        commit_build(&build_dir, None, &nodes).expect("should commit");

        for (path, contents) in &nodes {
            assert_eq!(&std::fs::read_to_string(path).expect("read"), contents);
        }
    }
}
