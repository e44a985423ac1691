//! JSON export of decoded trees.

use crate::{Node, Tree};

/// Render a node and its subtree as pretty-printed JSON.
pub fn to_json_string(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}

/// Render a whole document as pretty-printed JSON, rooted at its
/// synthetic root node.
pub fn tree_to_json_string(tree: &Tree) -> serde_json::Result<String> {
    to_json_string(tree.root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as Json;

    #[test]
    fn test_json_shape() {
        let tree = Tree::decode(["hasLevels TRUE", "levels", "\tLevel:0 1.5"]).unwrap();
        let json: Json = serde_json::from_str(&tree_to_json_string(&tree).unwrap()).unwrap();

        assert_eq!(json["tag"], "root");
        let children = json["children"].as_array().unwrap();
        assert_eq!(children[0]["tag"], "hasLevels");
        assert_eq!(children[0]["value"]["kind"], "bool");
        assert_eq!(children[0]["value"]["text"], "TRUE");

        let level = &children[1]["children"][0];
        assert_eq!(level["index"], "0");
        assert_eq!(level["value"]["kind"], "number");
        assert_eq!(level["value"]["text"], "1.5");
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let tree = Tree::decode(["bare"]).unwrap();
        let json: Json = serde_json::from_str(&tree_to_json_string(&tree).unwrap()).unwrap();
        let bare = &json["children"][0];
        assert!(bare.get("index").is_none());
        assert!(bare.get("value").is_none());
        assert!(bare.get("children").is_none());
    }
}
