//! Small constructors for building DOM trees by hand.
//!
//! Ids are left unset; [`Document::new`](crate::Document::new) and
//! [`Document::append_child`](crate::Document::append_child) assign them.

use crate::{Id, Node};

pub fn doc(children: Vec<Node>) -> Node {
    Node::Document {
        id: Id::UNSET,
        children,
    }
}

pub fn elem(name: &str, attributes: &[(&str, &str)], children: Vec<Node>) -> Node {
    Node::Element {
        id: Id::UNSET,
        name: name.to_ascii_lowercase(),
        attributes: attributes
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), Some((*v).to_string())))
            .collect(),
        style: Vec::new(),
        children,
    }
}

/// Element with a valueless (boolean) attribute, e.g. `<textarea readonly>`.
pub fn elem_with_flag(name: &str, flag: &str, attributes: &[(&str, &str)], children: Vec<Node>) -> Node {
    let mut node = elem(name, attributes, children);
    if let Node::Element { attributes, .. } = &mut node {
        attributes.push((flag.to_ascii_lowercase(), None));
    }
    node
}

pub fn text(text: &str) -> Node {
    Node::Text {
        id: Id::UNSET,
        text: text.to_string(),
    }
}
