//! Line-oriented decoder for the indented TXT data format.
//!
//! The format is one item per line: a run of leading tabs gives the nesting
//! level, followed by the item name, an optional `:index` suffix, and an
//! optional value token separated by a single space. The decoder turns a
//! sequence of such lines into a [`Tree`] rooted at a synthetic `root` node.
//!
//! Decoding is strict: a line that does not match the grammar, or that nests
//! more than one level deeper than its predecessor, fails the whole document.
//! No partial trees are ever returned.

use crate::{Error, Node, Result, Value, EMPTY_TAG};

/// A decoded document: the synthetic root node and its descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Node,
}

/// One content line, split into its grammatical parts.
struct ParsedLine<'a> {
    level: usize,
    name: &'a str,
    index: Option<&'a str>,
    value: Option<&'a str>,
}

/// Parse one line against the grammar
/// `(<tabs>)(<name>)(:<index>)?( <value-rest>)?`.
///
/// Returns `None` when the line does not match.
fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let tabs = line.bytes().take_while(|&b| b == b'\t').count();
    let rest = &line[tabs..];

    // Name: everything up to the first colon or whitespace. May be empty.
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    let mut rest = &rest[name_end..];

    // Optional `:index`, where index is a non-empty non-whitespace run.
    let mut index = None;
    if let Some(after_colon) = rest.strip_prefix(':') {
        let index_end = after_colon
            .find(char::is_whitespace)
            .unwrap_or(after_colon.len());
        if index_end == 0 {
            return None;
        }
        index = Some(&after_colon[..index_end]);
        rest = &after_colon[index_end..];
    }

    // Optional value: a single space, then the remainder of the line whole.
    // Embedded spaces belong to the value token.
    let value = if rest.is_empty() {
        None
    } else if let Some(v) = rest.strip_prefix(' ') {
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    } else {
        return None;
    };

    Some(ParsedLine {
        level: tabs + 1,
        name,
        index,
        value,
    })
}

/// Pop completed nodes until the stack is `level` entries deep, attaching
/// each to its parent. The root at level 0 is never popped.
fn fold_to(stack: &mut Vec<Node>, level: usize) {
    while stack.len() > level {
        if let Some(done) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.children.push(done);
            }
        }
    }
}

impl Tree {
    /// Decode a document from its content lines (marker line already
    /// consumed). Trailing `\n`/`\r\n` on lines is ignored.
    ///
    /// The same line sequence always decodes to an identical tree.
    pub fn decode<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Last-node-per-level stack. Invariant: stack[0] is the synthetic
        // root at level 0, and stack.len() == last_level + 1.
        let mut stack: Vec<Node> = vec![Node::root()];

        for (line_index, line) in lines.into_iter().enumerate() {
            let raw = line.as_ref();
            let raw = raw.strip_suffix('\n').unwrap_or(raw);
            let raw = raw.strip_suffix('\r').unwrap_or(raw);

            let parsed = parse_line(raw).ok_or_else(|| Error::Malformed {
                line: line_index + 1,
                content: raw.to_owned(),
            })?;

            // A line may nest one level deeper than its predecessor, never
            // more. Skipping a level means the document is corrupt.
            if parsed.level > stack.len() {
                return Err(Error::LevelSkip {
                    line: line_index + 1,
                    level: parsed.level,
                    max: stack.len(),
                });
            }

            fold_to(&mut stack, parsed.level);

            let mut node = Node::new(parsed.name);
            node.index = parsed.index.map(str::to_owned);
            node.value = parsed.value.map(Value::infer);
            stack.push(node);
        }

        fold_to(&mut stack, 1);
        let root = stack.pop().unwrap_or_else(Node::root);
        Ok(Self { root })
    }

    /// The synthetic root node holding the top-level items as children.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consume the tree, returning its root node.
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Re-serialize the tree back to the line grammar.
    ///
    /// Decoding the result yields a tree isomorphic to this one. String
    /// values are re-quoted; everything else is written as its stored text.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for child in &self.root.children {
            write_node(child, 0, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, depth: usize, out: &mut Vec<String>) {
    let mut line = "\t".repeat(depth);
    if node.tag != EMPTY_TAG {
        line.push_str(&node.tag);
    }
    if let Some(index) = &node.index {
        line.push(':');
        line.push_str(index);
    }
    if let Some(value) = &node.value {
        line.push(' ');
        match value {
            Value::Str(s) => {
                line.push('"');
                line.push_str(s);
                line.push('"');
            }
            other => line.push_str(other.text()),
        }
    }
    out.push(line);
    for child in &node.children {
        write_node(child, depth + 1, out);
    }
}
