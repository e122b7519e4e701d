//! Unified error types for the docker-build workspace.
//!
//! Every failure in the build pipeline is fatal to the current invocation,
//! so a single enum covers resolution, rendering, assembly, and the
//! workspace operations that wrap them.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A configuration document could not be read.
    #[error("unable to read config {path}: {source}")]
    ConfigRead {
        /// Path of the configuration document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration document is not well-formed YAML for its expected shape.
    #[error("unable to parse config {path}: {source}")]
    ConfigParse {
        /// Path of the configuration document.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A variable declares both `cmd` and `value`.
    #[error("variable \"{name}\" can not contain both a cmd and value entry")]
    ConflictingVariableSpec {
        /// Name of the offending variable.
        name: String,
    },

    /// A variable declares neither `cmd` nor `value`.
    #[error("variable \"{name}\" must have a cmd or a value")]
    MissingVariableSpec {
        /// Name of the offending variable.
        name: String,
    },

    /// A command runner was handed an empty command string.
    #[error("no command to execute")]
    EmptyCommand,

    /// A variable command failed to run or reported failure.
    #[error("command `{command}` failed: {source}")]
    CommandExecution {
        /// The shell command that was executed.
        command: String,
        /// Why the command was considered failed.
        source: CommandFailure,
    },

    /// A container template could not be read.
    #[error("unable to read template {path} for container \"{container}\": {source}")]
    TemplateFileUnreadable {
        /// Container that owns the template.
        container: String,
        /// Template path as declared in the descriptor.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A container template could not be parsed.
    #[error("invalid template {path} for container \"{container}\": {message}")]
    TemplateSyntax {
        /// Container that owns the template.
        container: String,
        /// Template path as declared in the descriptor.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A container template failed during substitution.
    #[error("unable to render template {path} for container \"{container}\": {message}")]
    TemplateRender {
        /// Container that owns the template.
        container: String,
        /// Template path as declared in the descriptor.
        path: PathBuf,
        /// Renderer diagnostic.
        message: String,
    },

    /// A generated file could not be written.
    #[error("unable to write {path}: {source}")]
    OutputWrite {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A descriptor failed a structural check.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Description of the failed check.
        message: String,
    },

    /// A required build, node, or descriptor was not found.
    #[error("{kind} {id} does not exist")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A resource that must be created fresh already exists.
    #[error("{kind} {id} already exists")]
    AlreadyExists {
        /// Type of the existing resource.
        kind: &'static str,
        /// Identifier of the existing resource.
        id: String,
    },

    /// Serializing a generated YAML document failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// A filesystem operation outside of reading config or writing output failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Reason a shell command was treated as failed.
#[derive(Debug, Error)]
pub enum CommandFailure {
    /// The shell process could not be started or awaited.
    #[error("unable to start shell: {0}")]
    Spawn(#[from] std::io::Error),

    /// The process exited unsuccessfully.
    #[error("{status}: {stderr}")]
    ExitStatus {
        /// Exit status reported by the operating system.
        status: std::process::ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// The process exited successfully but wrote to standard error.
    #[error("wrote to stderr: {stderr}")]
    Stderr {
        /// Captured standard error.
        stderr: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BuildError>;
