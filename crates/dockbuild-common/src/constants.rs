//! Filesystem naming conventions and defaults.

/// Directory holding build descriptors (`<conf>/<build>.yml`).
pub const DEFAULT_CONF_DIR: &str = "conf";

/// Directory holding generated builds (`<builds>/<build>/`).
pub const DEFAULT_BUILDS_DIR: &str = "builds";

/// Composite document written by `checkout` and `generate`.
pub const DEFAULT_OUTPUT_FILE: &str = "docker-compose.yml";

/// Single-file descriptor read by `generate` when no file is given.
pub const DEFAULT_DESCRIPTOR_FILE: &str = "docker-build.yml";

/// Extension of build descriptors inside the conf directory.
pub const DESCRIPTOR_EXTENSION: &str = "yml";

/// Shared environment file written into every build directory.
pub const ENV_FILE_NAME: &str = "docker-build.env";

/// Prefix of per-node descriptor files inside a build directory.
pub const NODE_FILE_PREFIX: &str = "docker-build";

/// Environment variable overriding the conf directory.
pub const CONF_DIR_ENV: &str = "DOCKER_BUILD_CONF_DIR";

/// Environment variable overriding the builds directory.
pub const BUILDS_DIR_ENV: &str = "DOCKER_BUILD_BUILDS_DIR";

/// Environment variable overriding the composite output file.
pub const OUTPUT_FILE_ENV: &str = "DOCKER_BUILD_OUTPUT";
