use crate::{Id, Node};

pub fn attr<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    match node {
        Node::Element { attributes, .. } => attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref()),
        _ => None,
    }
}

pub fn has_attr(node: &Node, name: &str) -> bool {
    match node {
        Node::Element { attributes, .. } => {
            attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
        }
        _ => false,
    }
}

/// Set or overwrite an attribute. Returns `false` for non-elements.
pub fn set_attr(node: &mut Node, name: &str, value: Option<String>) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };
    if let Some(slot) = attributes
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
    {
        slot.1 = value;
    } else {
        attributes.push((name.to_ascii_lowercase(), value));
    }
    true
}

pub fn collect_text(nodes: &[Node], out: &mut String) {
    for n in nodes {
        match n {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } | Node::Document { children, .. } => {
                collect_text(children, out);
            }
            Node::Comment { .. } => {}
        }
    }
}

/// Collect concatenated text from <style> elements.
pub fn collect_style_texts(node: &Node, out: &mut String) {
    match node {
        Node::Element { name, children, .. } if name.eq_ignore_ascii_case("style") => {
            for c in children {
                if let Node::Text { text, .. } = c {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        Node::Element { children, .. } | Node::Document { children, .. } => {
            for c in children {
                collect_style_texts(c, out);
            }
        }
        _ => {}
    }
}

pub fn is_non_rendering_element_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("head")
        || name.eq_ignore_ascii_case("style")
        || name.eq_ignore_ascii_case("script")
        || name.eq_ignore_ascii_case("title")
        || name.eq_ignore_ascii_case("meta")
        || name.eq_ignore_ascii_case("link")
}

/// Assign fresh ids to every node still carrying [`Id::UNSET`].
/// `next` is the first id to hand out and is advanced past the last one used.
pub fn assign_node_ids(root: &mut Node, next: &mut u32) {
    // only assign if currently unset
    if root.id() == Id::UNSET {
        root.set_id(Id(*next));
        *next = next.wrapping_add(1);
    }
    if let Some(children) = root.children_mut() {
        for c in children {
            assign_node_ids(c, next);
        }
    }
}

/// Clear every id in the subtree so it can be re-adopted by a document.
pub fn clear_node_ids(root: &mut Node) {
    root.set_id(Id::UNSET);
    if let Some(children) = root.children_mut() {
        for c in children {
            clear_node_ids(c);
        }
    }
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    for c in node.children() {
        if let Some(found) = find_node_by_id(c, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    match node.children_mut() {
        Some(children) => children.iter_mut().find_map(|c| find_node_by_id_mut(c, id)),
        None => None,
    }
}

/// Ids from the root down to `id` (inclusive). Empty if `id` is not in the tree.
pub fn ancestor_path(root: &Node, id: Id) -> Vec<Id> {
    fn walk(node: &Node, id: Id, path: &mut Vec<Id>) -> bool {
        path.push(node.id());
        if node.id() == id {
            return true;
        }
        for c in node.children() {
            if walk(c, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }
    let mut path = Vec::new();
    walk(root, id, &mut path);
    path
}

/// Every id in the subtree rooted at `node`, in document order.
pub fn subtree_ids(node: &Node, out: &mut Vec<Id>) {
    out.push(node.id());
    for c in node.children() {
        subtree_ids(c, out);
    }
}

pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match node {
            Node::Document { children, .. } => {
                out.push(format!("{indent}#document"));
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Element { name, children, .. } => {
                let mut line = format!("{indent}<{name}");
                for key in ["id", "class", "data-promptdock-helper"] {
                    if let Some(v) = attr(node, key).filter(|v| !v.is_empty()) {
                        line.push_str(&format!(r#" {key}="{v}""#));
                    }
                }
                line.push('>');
                out.push(line);
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Text { text, .. } => {
                let t = text.replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    let show = if t.chars().count() > 40 {
                        format!("{}…", t.chars().take(40).collect::<String>())
                    } else {
                        t
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
            Node::Comment { .. } => {}
        }
    }
    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}
