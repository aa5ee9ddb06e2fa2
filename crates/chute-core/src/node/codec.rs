//! Text codec for config node trees.
//!
//! File format:
//! ```text
//! REALCHUTE_SETTINGS
//! {
//! 	autoArm = False
//! 	PRESET
//! 	{
//! 		name = Default
//! 	}
//! }
//! ```
//! The file itself is the unnamed root node.  Values are written one per line
//! as `key = value`; nodes are a name line followed by a brace-delimited body.
//! Nesting is indented with one tab per level.
//!
//! On read the parser also accepts `//` comments, blank lines, and an opening
//! brace on the same line as the node name (`PRESET {`).  Only the first `=`
//! on a line separates key from value, so values may themselves contain `=`.
//!
//! # Value escaping
//!
//! Values are escaped on write so that any string survives a round trip:
//!
//! | In the value       | Written as |
//! |--------------------|------------|
//! | `\`               | `\\`     |
//! | line feed          | `\n`      |
//! | carriage return    | `\r`      |
//! | `/` after a `/`    | `\/`      |
//!
//! The written text therefore never contains a line break or `//` inside a
//! value, so a value can neither end its line early nor be cut off as a
//! comment.  On read, an unknown escape such as `\q` is kept as-is.

use thiserror::Error;

use super::tree::ConfigNode;

/// Errors that can occur while parsing a config file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NodeError {
    /// A `}` appeared with no open node to close.
    #[error("line {line}: closing brace without a matching open node")]
    UnexpectedClose { line: usize },

    /// The input ended while a node was still open.
    #[error("node {name:?} is never closed")]
    Unclosed { name: String },

    /// A node name was not followed by `{`.
    #[error("line {line}: node name is not followed by an opening brace")]
    MissingOpen { line: usize },

    /// The line matches none of the accepted shapes.
    #[error("line {line}: malformed entry {text:?}")]
    Malformed { line: usize, text: String },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parses the full text of a config file into an unnamed root node.
///
/// # Errors
///
/// Returns [`NodeError`] if braces are unbalanced or a line is malformed.
///
/// # Examples
///
/// ```rust
/// use chute_core::node::parse_tree;
///
/// let root = parse_tree("REALCHUTE_SETTINGS\n{\n\tautoArm = True\n}\n").unwrap();
/// let settings = root.get_node("REALCHUTE_SETTINGS").unwrap();
/// assert_eq!(settings.get_value("autoArm"), Some("True"));
/// ```
pub fn parse_tree(text: &str) -> Result<ConfigNode, NodeError> {
    // stack[0] is the root; every other entry is an open node.
    let mut stack: Vec<ConfigNode> = vec![ConfigNode::new()];
    // A bare name line waiting for its `{`, with the line it appeared on.
    let mut pending: Option<(String, usize)> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if line == "{" {
            let (name, _) = pending.take().ok_or_else(|| NodeError::Malformed {
                line: line_no,
                text: line.to_string(),
            })?;
            stack.push(ConfigNode::named(name));
            continue;
        }

        if let Some((_, name_line)) = &pending {
            return Err(NodeError::MissingOpen { line: *name_line });
        }

        if line == "}" {
            close_node(&mut stack, line_no)?;
        } else if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                return Err(NodeError::Malformed {
                    line: line_no,
                    text: line.to_string(),
                });
            }
            top(&mut stack).add_raw(key, unescape_value(value.trim()));
        } else if let Some(name) = line.strip_suffix('{') {
            stack.push(ConfigNode::named(name.trim()));
        } else if line.contains('{') || line.contains('}') {
            return Err(NodeError::Malformed {
                line: line_no,
                text: line.to_string(),
            });
        } else {
            pending = Some((line.to_string(), line_no));
        }
    }

    if let Some((_, line)) = pending {
        return Err(NodeError::MissingOpen { line });
    }
    if stack.len() > 1 {
        let name = top(&mut stack).name().to_string();
        return Err(NodeError::Unclosed { name });
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Formats a tree as config file text.
///
/// The name of `root` itself is not written; its values and children become
/// the top level of the file, mirroring how [`parse_tree`] returns an unnamed
/// root.
///
/// # Examples
///
/// ```rust
/// use chute_core::node::{write_tree, ConfigNode};
///
/// let mut settings = ConfigNode::named("REALCHUTE_SETTINGS");
/// settings.add_value("autoArm", false);
/// let mut root = ConfigNode::new();
/// root.add_node(settings);
///
/// assert_eq!(write_tree(&root), "REALCHUTE_SETTINGS\n{\n\tautoArm = False\n}\n");
/// ```
pub fn write_tree(root: &ConfigNode) -> String {
    let mut out = String::new();
    write_body(&mut out, root, 0);
    out
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous = None;
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '/' if previous == Some('/') => out.push_str("\\/"),
            _ => out.push(c),
        }
        previous = Some(c);
    }
    out
}

fn unescape_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn top(stack: &mut [ConfigNode]) -> &mut ConfigNode {
    let last = stack.len() - 1;
    &mut stack[last]
}

fn close_node(stack: &mut Vec<ConfigNode>, line: usize) -> Result<(), NodeError> {
    if stack.len() < 2 {
        return Err(NodeError::UnexpectedClose { line });
    }
    let finished = stack.pop().ok_or(NodeError::UnexpectedClose { line })?;
    top(stack).add_node(finished);
    Ok(())
}

fn write_body(out: &mut String, node: &ConfigNode, depth: usize) {
    for (key, value) in node.values() {
        indent(out, depth);
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(&escape_value(value));
        out.push('\n');
    }
    for child in node.nodes() {
        indent(out, depth);
        out.push_str(child.name());
        out.push('\n');
        indent(out, depth);
        out.push_str("{\n");
        write_body(out, child, depth + 1);
        indent(out, depth);
        out.push_str("}\n");
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "REALCHUTE_SETTINGS\n{\n\tautoArm = False\n\tjokeActivated = False\n\tuseStaging = True\n\thideIcon = False\n}\n";

    #[test]
    fn test_parse_sample_settings_file() {
        // Act
        let root = parse_tree(SAMPLE).expect("parse");

        // Assert
        assert_eq!(root.name(), "");
        let settings = root.get_node("REALCHUTE_SETTINGS").expect("section");
        assert_eq!(settings.get_value("autoArm"), Some("False"));
        assert_eq!(settings.get_value("useStaging"), Some("True"));
        assert_eq!(settings.values().count(), 4);
    }

    #[test]
    fn test_write_matches_sample_layout() {
        let root = parse_tree(SAMPLE).expect("parse");
        assert_eq!(write_tree(&root), SAMPLE);
    }

    #[test]
    fn test_parse_accepts_brace_on_name_line_and_comments() {
        let text = "// RealChute settings\nREALCHUTE_SETTINGS {\n  autoArm = True // armed\n\n}\n";

        let root = parse_tree(text).expect("parse");

        let settings = root.get_node("REALCHUTE_SETTINGS").expect("section");
        assert_eq!(settings.get_value("autoArm"), Some("True"));
    }

    #[test]
    fn test_parse_nested_nodes() {
        let text = "A\n{\n\tB\n\t{\n\t\tx = 1\n\t}\n\ty = 2\n}\n";

        let root = parse_tree(text).expect("parse");

        let a = root.get_node("A").expect("A");
        assert_eq!(a.get_value("y"), Some("2"));
        assert_eq!(a.get_node("B").and_then(|b| b.get_value("x")), Some("1"));
    }

    #[test]
    fn test_parse_value_keeps_text_after_first_equals() {
        let root = parse_tree("description = a = b\n").expect("parse");
        assert_eq!(root.get_value("description"), Some("a = b"));
    }

    #[test]
    fn test_parse_empty_text_yields_empty_root() {
        let root = parse_tree("\n\n  \n").expect("parse");
        assert!(root.is_empty());
    }

    #[test]
    fn test_parse_rejects_unexpected_close() {
        assert_eq!(
            parse_tree("x = 1\n}\n"),
            Err(NodeError::UnexpectedClose { line: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_unclosed_node() {
        assert_eq!(
            parse_tree("REALCHUTE_SETTINGS\n{\n\tautoArm = True\n"),
            Err(NodeError::Unclosed {
                name: "REALCHUTE_SETTINGS".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_name_without_open_brace() {
        assert_eq!(
            parse_tree("REALCHUTE_SETTINGS\nautoArm = True\n"),
            Err(NodeError::MissingOpen { line: 1 })
        );
        assert_eq!(
            parse_tree("REALCHUTE_SETTINGS\n"),
            Err(NodeError::MissingOpen { line: 1 })
        );
    }

    #[test]
    fn test_parse_rejects_empty_key() {
        assert!(matches!(
            parse_tree(" = value\n"),
            Err(NodeError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_anonymous_open_brace() {
        assert!(matches!(
            parse_tree("{\n}\n"),
            Err(NodeError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_value_with_line_breaks_and_braces_round_trips() {
        // Arrange
        let mut preset = ConfigNode::named("PRESET");
        preset.add_raw("description", "line one\n}\r\nline two {");
        let mut root = ConfigNode::new();
        root.add_node(preset);

        // Act
        let text = write_tree(&root);
        let restored = parse_tree(&text).expect("parse");

        // Assert
        assert_eq!(text.lines().count(), 4);
        assert_eq!(restored, root);
    }

    #[test]
    fn test_value_with_double_slash_is_not_cut_as_comment() {
        let mut root = ConfigNode::new();
        root.add_raw("description", "see http://example.com ///");

        let text = write_tree(&root);
        let restored = parse_tree(&text).expect("parse");

        assert!(!text.contains("//"));
        assert_eq!(
            restored.get_value("description"),
            Some("see http://example.com ///")
        );
    }

    #[test]
    fn test_value_with_backslashes_round_trips() {
        let mut root = ConfigNode::new();
        root.add_raw("path", "C:\\GameData\\n\\");

        let restored = parse_tree(&write_tree(&root)).expect("parse");

        assert_eq!(restored.get_value("path"), Some("C:\\GameData\\n\\"));
    }

    #[test]
    fn test_unknown_escape_is_kept_verbatim() {
        let root = parse_tree("key = a\\qb\\\n").expect("parse");
        assert_eq!(root.get_value("key"), Some("a\\qb\\"));
    }

    #[test]
    fn test_write_root_values_before_children() {
        let mut root = ConfigNode::new();
        root.add_node(ConfigNode::named("EMPTY"));
        root.add_raw("top", "level");

        assert_eq!(write_tree(&root), "top = level\nEMPTY\n{\n}\n");
    }
}
