//! # dockbuild-compose
//!
//! Builds `docker-compose.yml` documents from per-container templates.
//!
//! Handles:
//! - **Descriptor**: Build, node, and container definitions as read from YAML.
//! - **Loader**: Reading descriptors from disk.
//! - **Command**: The shell command port used by `cmd` variables.
//! - **Variables**: Resolution of `cmd`/`value` variable specs.
//! - **Template**: Rendering one container template against resolved variables.
//! - **Links**: Appending the nested `links` block to a rendered fragment.
//! - **Assembler**: Concatenating every container fragment into one document.
//! - **Validator**: Structural checks run before anything is written.
//! - **Workspace**: The `make`, `remove`, `checkout`, `clean`, and `generate` operations.

pub mod assembler;
pub mod command;
pub mod descriptor;
pub mod links;
pub mod loader;
pub mod template;
pub mod validator;
pub mod variables;
pub mod workspace;
