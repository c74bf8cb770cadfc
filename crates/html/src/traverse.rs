use crate::Node;

/// Visit every element in document order together with its element ancestors
/// (outermost first).
pub fn for_each_element<'a>(root: &'a Node, mut f: impl FnMut(&'a Node, &[&'a Node])) {
    fn walk<'a>(
        node: &'a Node,
        ancestors: &mut Vec<&'a Node>,
        f: &mut dyn FnMut(&'a Node, &[&'a Node]),
    ) {
        let is_element = node.is_element();
        if is_element {
            f(node, ancestors);
            ancestors.push(node);
        }
        for c in node.children() {
            walk(c, ancestors, f);
        }
        if is_element {
            ancestors.pop();
        }
    }
    let mut ancestors = Vec::new();
    walk(root, &mut ancestors, &mut f);
}

/// Find the `<body>` element, if any.
pub fn find_body(root: &Node) -> Option<&Node> {
    if root
        .element_name()
        .is_some_and(|n| n.eq_ignore_ascii_case("body"))
    {
        return Some(root);
    }
    root.children().iter().find_map(find_body)
}
