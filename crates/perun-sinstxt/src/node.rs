//! Attributed tree nodes and the typed query primitives over them.

use crate::{Error, Result, Value};

/// Tag given to nodes whose source line had an empty name.
///
/// Blank names occur in some record kinds, e.g. mesh list elements.
pub const EMPTY_TAG: &str = "EMPTY";

/// Tag of the synthetic document root.
pub const ROOT_TAG: &str = "root";

/// Tag of per-level progression entries.
pub const LEVEL_TAG: &str = "Level";

/// A node in a decoded data-file tree.
///
/// Child order is insertion order and is significant: it encodes array and
/// list order from the source document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json-export", derive(serde::Serialize))]
pub struct Node {
    /// Node name from the source line (`EMPTY` for blank names).
    pub tag: String,
    /// Explicit positional index, when the source line carried one.
    #[cfg_attr(feature = "json-export", serde(skip_serializing_if = "Option::is_none"))]
    pub index: Option<String>,
    /// Typed scalar payload, when the source line carried one.
    #[cfg_attr(feature = "json-export", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<Value>,
    /// Ordered children.
    #[cfg_attr(feature = "json-export", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no index, value, or children.
    ///
    /// An empty tag is normalized to [`EMPTY_TAG`].
    pub fn new(tag: &str) -> Self {
        Self {
            tag: if tag.is_empty() { EMPTY_TAG.to_owned() } else { tag.to_owned() },
            index: None,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create the synthetic document root.
    pub fn root() -> Self {
        Self::new(ROOT_TAG)
    }

    /// The scalar value text of this node, if it has one.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().map(Value::text)
    }

    /// A named attribute of this node. The only attribute the format
    /// carries is `index`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "index" => self.index.as_deref(),
            _ => None,
        }
    }

    /// Direct children with the given tag, in document order.
    pub fn children_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Direct children with the given tag whose own direct child
    /// `child_tag` has text equal to `text`.
    ///
    /// This is the `tag[childTag="literal"]` query shape.
    pub fn children_where<'a>(
        &'a self,
        tag: &'a str,
        child_tag: &'a str,
        text: &'a str,
    ) -> impl Iterator<Item = &'a Node> {
        self.children_by_tag(tag)
            .filter(move |c| c.children_by_tag(child_tag).any(|g| g.text() == Some(text)))
    }

    /// Direct children with the given tag whose attribute `attr` equals
    /// `value`.
    ///
    /// This is the `tag[@attr="literal"]` query shape, used for
    /// page-indexed entity lists.
    pub fn children_where_attr<'a>(
        &'a self,
        tag: &'a str,
        attr: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = &'a Node> {
        self.children_by_tag(tag)
            .filter(move |c| c.attr(attr) == Some(value))
    }

    /// Direct `Level` children sorted ascending by their numeric `index`
    /// attribute. Used to reconstruct per-level progressions.
    pub fn sorted_levels(&self) -> Result<Vec<&Node>> {
        let mut keyed = Vec::new();
        for child in self.children_by_tag(LEVEL_TAG) {
            let index = child.index.as_deref().ok_or_else(|| Error::MissingAttribute {
                tag: child.tag.clone(),
                attr: "index".to_owned(),
            })?;
            let key: i64 = index.parse().map_err(|_| Error::BadLevelIndex {
                index: index.to_owned(),
            })?;
            keyed.push((key, child));
        }
        keyed.sort_by_key(|&(key, _)| key);
        Ok(keyed.into_iter().map(|(_, child)| child).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, value: &str) -> Node {
        let mut n = Node::new(tag);
        n.value = Some(Value::infer(value));
        n
    }

    #[test]
    fn test_empty_tag_normalized() {
        assert_eq!(Node::new("").tag, EMPTY_TAG);
        assert_eq!(Node::new("a").tag, "a");
    }

    #[test]
    fn test_children_by_tag_preserves_order() {
        let mut root = Node::root();
        root.children.push(leaf("a", "1"));
        root.children.push(leaf("b", "2"));
        root.children.push(leaf("a", "3"));

        let texts: Vec<_> = root.children_by_tag("a").filter_map(Node::text).collect();
        assert_eq!(texts, ["1", "3"]);
    }

    #[test]
    fn test_children_where() {
        let mut info = Node::new("StringInfo");
        info.children.push(leaf("ID", "IDS_SHIP"));
        info.children.push(leaf("Value", "\"Kol Battleship\""));

        let mut other = Node::new("StringInfo");
        other.children.push(leaf("ID", "IDS_OTHER"));
        other.children.push(leaf("Value", "\"Other\""));

        let mut root = Node::root();
        root.children.push(info);
        root.children.push(other);

        let hits: Vec<_> = root.children_where("StringInfo", "ID", "IDS_SHIP").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].children_by_tag("Value").next().and_then(Node::text), Some("Kol Battleship"));
    }

    #[test]
    fn test_children_where_attr() {
        let mut root = Node::root();
        for idx in ["0", "1"] {
            let mut page = Node::new("Page");
            page.index = Some(idx.to_owned());
            page.children.push(leaf("entityDefName", "Ship"));
            root.children.push(page);
        }

        let hits: Vec<_> = root.children_where_attr("Page", "index", "1").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index.as_deref(), Some("1"));
        assert_eq!(root.children_where_attr("Page", "index", "9").count(), 0);
    }

    #[test]
    fn test_sorted_levels() {
        let mut root = Node::root();
        for idx in ["1", "0", "10", "2"] {
            let mut level = leaf(LEVEL_TAG, "5.0");
            level.index = Some(idx.to_owned());
            root.children.push(level);
        }

        let sorted = root.sorted_levels().unwrap();
        let order: Vec<_> = sorted.iter().filter_map(|n| n.index.as_deref()).collect();
        // Numeric ordering, not lexicographic.
        assert_eq!(order, ["0", "1", "2", "10"]);
    }

    #[test]
    fn test_sorted_levels_missing_index() {
        let mut root = Node::root();
        root.children.push(leaf(LEVEL_TAG, "5.0"));
        assert!(matches!(root.sorted_levels(), Err(Error::MissingAttribute { .. })));
    }

    #[test]
    fn test_sorted_levels_bad_index() {
        let mut root = Node::root();
        let mut level = leaf(LEVEL_TAG, "5.0");
        level.index = Some("first".to_owned());
        root.children.push(level);
        assert!(matches!(root.sorted_levels(), Err(Error::BadLevelIndex { .. })));
    }
}
