//! Path queries over decoded trees.
//!
//! This is deliberately not a general XPath engine. Consumers of the data
//! files only ever use a handful of shapes, and those are what the
//! evaluator supports:
//!
//! - `basePrice/credits` — direct children by tag, composed with `/`;
//! - `StringInfo[ID="IDS_X"]/Value` — a single child-text predicate;
//! - `Page[@index="0"]/entityDefName` — a single attribute predicate;
//! - `NameStringID|nameStringID` — alternation of two whole stems, used to
//!   probe two possible locations for the same logical field.
//!
//! Matches are returned in document order; for alternation, each stem's
//! internal order is preserved and the results concatenated.

use crate::{Error, Node, Result};

/// One `/`-separated segment of a path stem.
enum Segment<'a> {
    /// `tag` — direct children with this tag.
    Tag(&'a str),
    /// `tag[child="literal"]` — direct children with this tag whose direct
    /// child `child` has text equal to `literal`.
    Predicate {
        tag: &'a str,
        child: &'a str,
        literal: &'a str,
    },
    /// `tag[@attr="literal"]` — direct children with this tag whose
    /// attribute `attr` equals `literal`.
    AttrPredicate {
        tag: &'a str,
        attr: &'a str,
        literal: &'a str,
    },
}

impl<'a> Segment<'a> {
    fn parse(segment: &'a str) -> Option<Self> {
        if segment.is_empty() {
            return None;
        }
        let Some(bracket) = segment.find('[') else {
            if segment.contains(']') {
                return None;
            }
            return Some(Segment::Tag(segment));
        };

        let tag = &segment[..bracket];
        let inner = segment[bracket + 1..].strip_suffix(']')?;
        let (child, literal) = inner.split_once('=')?;
        let literal = literal
            .strip_prefix('"')
            .and_then(|l| l.strip_suffix('"'))?;
        if tag.is_empty() || child.is_empty() {
            return None;
        }
        if let Some(attr) = child.strip_prefix('@') {
            if attr.is_empty() {
                return None;
            }
            return Some(Segment::AttrPredicate { tag, attr, literal });
        }
        Some(Segment::Predicate { tag, child, literal })
    }
}

impl Node {
    /// Evaluate a path expression against this node, returning all matches
    /// in document order.
    ///
    /// Stems joined by `|` are evaluated independently and their results
    /// concatenated.
    pub fn select<'a>(&'a self, path: &str) -> Result<Vec<&'a Node>> {
        let mut out = Vec::new();
        for stem in path.split('|') {
            if stem.is_empty() {
                return Err(Error::PathSyntax(path.to_owned()));
            }
            self.select_stem(stem, path, &mut out)?;
        }
        Ok(out)
    }

    fn select_stem<'a>(&'a self, stem: &str, full: &str, out: &mut Vec<&'a Node>) -> Result<()> {
        let mut current: Vec<&Node> = vec![self];
        for raw_segment in stem.split('/') {
            let segment =
                Segment::parse(raw_segment).ok_or_else(|| Error::PathSyntax(full.to_owned()))?;
            // Filter inline rather than through the typed helpers: the
            // segment borrows from the path string, which lives shorter
            // than the returned node borrows.
            let mut next = Vec::new();
            for node in current {
                for child in &node.children {
                    let matched = match &segment {
                        Segment::Tag(tag) => child.tag == *tag,
                        Segment::Predicate { tag, child: pred, literal } => {
                            child.tag == *tag
                                && child
                                    .children
                                    .iter()
                                    .any(|g| g.tag == *pred && g.text() == Some(*literal))
                        }
                        Segment::AttrPredicate { tag, attr, literal } => {
                            child.tag == *tag && child.attr(attr) == Some(*literal)
                        }
                    };
                    if matched {
                        next.push(child);
                    }
                }
            }
            current = next;
        }
        out.extend(current);
        Ok(())
    }

    /// Evaluate a path and project the scalar text of each match. Matches
    /// without a value are skipped.
    pub fn select_text<'a>(&'a self, path: &str) -> Result<Vec<&'a str>> {
        Ok(self.select(path)?.into_iter().filter_map(Node::text).collect())
    }

    /// Evaluate a path and project a named attribute of each match.
    ///
    /// A matched node missing the attribute is an error.
    pub fn select_attr<'a>(&'a self, path: &str, attr: &str) -> Result<Vec<&'a str>> {
        let mut out = Vec::new();
        for node in self.select(path)? {
            out.push(node.attr(attr).ok_or_else(|| Error::MissingAttribute {
                tag: node.tag.clone(),
                attr: attr.to_owned(),
            })?);
        }
        Ok(out)
    }

    /// The text of the single node a path matches.
    ///
    /// Zero matches, or a match without a value, is [`Error::MissingValue`];
    /// several matches is [`Error::Ambiguous`].
    pub fn single_text<'a>(&'a self, path: &str) -> Result<&'a str> {
        self.single_text_opt(path)?.ok_or_else(|| Error::MissingValue {
            path: path.to_owned(),
        })
    }

    /// Like [`Node::single_text`], but absence (zero matches, or a valueless
    /// match) is `Ok(None)` rather than an error. Several matches is still
    /// ambiguous.
    pub fn single_text_opt<'a>(&'a self, path: &str) -> Result<Option<&'a str>> {
        let matches = self.select(path)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches[0].text()),
            found => Err(Error::Ambiguous {
                path: path.to_owned(),
                found,
            }),
        }
    }

    /// The single node a path matches, for callers that need its subtree
    /// rather than a scalar.
    pub fn single<'a>(&'a self, path: &str) -> Result<&'a Node> {
        let matches = self.select(path)?;
        match matches.len() {
            1 => Ok(matches[0]),
            0 => Err(Error::MissingValue {
                path: path.to_owned(),
            }),
            found => Err(Error::Ambiguous {
                path: path.to_owned(),
                found,
            }),
        }
    }
}
