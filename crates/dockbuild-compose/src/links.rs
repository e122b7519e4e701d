//! Nested `links` block injection.
//!
//! Container templates are assumed to define exactly one top-level service
//! key with its properties indented by two spaces. The injected block is
//! written at that property level, with list items indented by three.

use dockbuild_common::error::Result;
use serde::Serialize;

/// Indentation of a property under the service key.
const PROPERTY_INDENT: &str = "  ";

/// Indentation of each link item under `links:`.
const ITEM_INDENT: &str = "   ";

#[derive(Serialize)]
struct LinksBlock<'a> {
    links: &'a [String],
}

/// Appends the `links` block for `links` to `fragment`, or a single line
/// break when there are no links.
///
/// # Errors
///
/// Returns an error if the block cannot be serialized.
pub fn inject_links(fragment: &mut String, links: &[String]) -> Result<()> {
    if links.is_empty() {
        fragment.push('\n');
        return Ok(());
    }

    let block = serde_yaml::to_string(&LinksBlock { links })?;
    let block = block.replacen('\n', &format!("\n{ITEM_INDENT}"), links.len());

    fragment.push('\n');
    fragment.push_str(PROPERTY_INDENT);
    fragment.push_str(&block);
    Ok(())
}

/// Appends an `env_file` declaration at property level.
pub fn inject_env_file(fragment: &mut String, env_file: &str) {
    fragment.push('\n');
    fragment.push_str(PROPERTY_INDENT);
    fragment.push_str("env_file: ");
    fragment.push_str(env_file);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn no_links_appends_line_break() {
        let mut fragment = String::from("db:\n  image: postgres\n");
        inject_links(&mut fragment, &[]).expect("inject");
        assert_eq!(fragment, "db:\n  image: postgres\n\n");
    }

    #[test]
    fn single_link_is_nested() {
        let mut fragment = String::from("web:\n  image: myapp\n");
        inject_links(&mut fragment, &links(&["db"])).expect("inject");
        assert_eq!(fragment, "web:\n  image: myapp\n\n  links:\n   - db\n");
    }

    #[test]
    fn links_keep_declaration_order() {
        let mut fragment = String::from("web:\n  image: myapp");
        inject_links(&mut fragment, &links(&["redis", "db", "auth"])).expect("inject");
        assert_eq!(
            fragment,
            "web:\n  image: myapp\n  links:\n   - redis\n   - db\n   - auth\n"
        );
    }

    #[test]
    fn injected_block_parses_under_service_key() {
        let mut fragment = String::from("web:\n  image: myapp");
        inject_links(&mut fragment, &links(&["db", "cache"])).expect("inject");
        let doc: serde_yaml::Value = serde_yaml::from_str(&fragment).expect("valid yaml");
        let linked: Vec<&str> = doc["web"]["links"]
            .as_sequence()
            .expect("links sequence")
            .iter()
            .filter_map(serde_yaml::Value::as_str)
            .collect();
        assert_eq!(linked, vec!["db", "cache"]);
    }

    #[test]
    fn env_file_is_property_level() {
        let mut fragment = String::from("web:\n  image: myapp");
        inject_env_file(&mut fragment, "builds/prod/docker-build.env");
        assert_eq!(
            fragment,
            "web:\n  image: myapp\n  env_file: builds/prod/docker-build.env"
        );
    }
}
