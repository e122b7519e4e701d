//! Container template rendering.
//!
//! Templates are plain text with `{{NAME}}` placeholders. Rendering never
//! substitutes an empty string for an unknown name; it fails instead.
//! Everything outside `{{ ... }}` is copied through untouched, including
//! sequences such as `{%` and `{#` that tera would otherwise interpret.

use std::error::Error as _;
use std::path::Path;

use dockbuild_common::error::{BuildError, Result};
use tera::{Context, Tera};

use crate::variables::ResolvedVariables;

/// Reads `path` and renders it for `container`.
///
/// # Errors
///
/// Returns [`BuildError::TemplateFileUnreadable`] if the file cannot be
/// read, otherwise see [`render_str`].
pub fn render_file(container: &str, path: &Path, vars: &ResolvedVariables) -> Result<String> {
    let source = std::fs::read_to_string(path).map_err(|source| {
        BuildError::TemplateFileUnreadable {
            container: container.into(),
            path: path.to_path_buf(),
            source,
        }
    })?;
    render_str(container, path, &source, vars)
}

/// Renders template `source` for `container`; `path` is only used in errors.
///
/// # Errors
///
/// Returns [`BuildError::TemplateSyntax`] if the template does not parse and
/// [`BuildError::TemplateRender`] if substitution fails, e.g. on a reference
/// to an undefined variable.
pub fn render_str(
    container: &str,
    path: &Path,
    source: &str,
    vars: &ResolvedVariables,
) -> Result<String> {
    tracing::debug!(container, path = %path.display(), "rendering template");

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(container, &protect_literals(source))
        .map_err(|e| BuildError::TemplateSyntax {
            container: container.into(),
            path: path.to_path_buf(),
            message: describe(&e),
        })?;

    let mut context = Context::new();
    for (name, value) in vars.iter() {
        context.insert(name, value);
    }

    tera.render(container, &context)
        .map_err(|e| BuildError::TemplateRender {
            container: container.into(),
            path: path.to_path_buf(),
            message: describe(&e),
        })
}

/// Rewrites `source` so that only `{{ ... }}` placeholders reach the tera
/// parser. Literal text is wrapped in raw blocks; an unterminated `{{` is
/// left as is so that it still fails to parse.
fn protect_literals(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 32);
    let mut rest = source;
    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start..].find("}}") else {
            push_literal(&mut out, &rest[..start]);
            out.push_str(&rest[start..]);
            return out;
        };
        let end = start + len + 2;
        push_literal(&mut out, &rest[..start]);
        out.push_str(&rest[start..end]);
        rest = &rest[end..];
    }
    push_literal(&mut out, rest);
    out
}

/// Appends `text` verbatim. A raw block ends at the first `{%`, so each
/// `{%` is emitted as a string expression between blocks.
fn push_literal(out: &mut String, text: &str) {
    for (i, part) in text.split("{%").enumerate() {
        if i > 0 {
            out.push_str(r#"{{ "{%" }}"#);
        }
        if !part.is_empty() {
            out.push_str("{% raw %}");
            out.push_str(part);
            out.push_str("{% endraw %}");
        }
    }
}

/// Flattens a tera error and its causes into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}
