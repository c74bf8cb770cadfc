//! Owned document with id allocation and mutation records.
//!
//! Every structural or attribute change goes through [`Document`] so that
//! observers can drain a faithful list of what changed since they last looked.

use crate::dom_utils::{
    assign_node_ids, clear_node_ids, find_node_by_id, find_node_by_id_mut, set_attr, subtree_ids,
};
use crate::traverse::find_body;
use crate::{Id, Node};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationKind {
    ChildList { added: Vec<Id>, removed: Vec<Id> },
    Attribute { name: String },
    CharacterData,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    /// The parent for child-list changes, the element itself otherwise.
    pub target: Id,
    pub kind: MutationKind,
}

#[derive(Debug)]
pub struct Document {
    root: Node,
    next_id: u32,
    records: Vec<MutationRecord>,
}

impl Document {
    /// Adopt a tree, assigning ids to every node that has none.
    pub fn new(mut root: Node) -> Self {
        // Pre-assigned ids are kept; fresh ones start past the largest of them.
        let mut all = Vec::new();
        subtree_ids(&root, &mut all);
        let mut next_id = all.iter().map(|id| id.0).max().unwrap_or(0) + 1;
        assign_node_ids(&mut root, &mut next_id);
        Self {
            root,
            next_id,
            records: Vec::new(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.root, id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.get(id).is_some()
    }

    pub fn body_id(&self) -> Option<Id> {
        find_body(&self.root).map(Node::id)
    }

    /// Append `node` (with fresh ids) as the last child of `parent`.
    pub fn append_child(&mut self, parent: Id, mut node: Node) -> Option<Id> {
        clear_node_ids(&mut node);
        assign_node_ids(&mut node, &mut self.next_id);
        let new_id = node.id();
        let mut added = Vec::new();
        subtree_ids(&node, &mut added);

        let target = find_node_by_id_mut(&mut self.root, parent)?;
        let children = target.children_mut()?;
        children.push(node);

        log::trace!(target: "html.mutation", "append {new_id:?} under {parent:?}");
        self.push_record(MutationRecord {
            target: parent,
            kind: MutationKind::ChildList {
                added: vec![new_id],
                removed: Vec::new(),
            },
        });
        Some(new_id)
    }

    /// Detach the node with `id` and return it. The document node cannot be removed.
    pub fn remove(&mut self, id: Id) -> Option<Node> {
        if id == self.root.id() {
            return None;
        }
        let parent = parent_of(&self.root, id)?;
        let parent_node = find_node_by_id_mut(&mut self.root, parent)?;
        let children = parent_node.children_mut()?;
        let idx = children.iter().position(|c| c.id() == id)?;
        let removed = children.remove(idx);

        log::trace!(target: "html.mutation", "remove {id:?} from {parent:?}");
        self.push_record(MutationRecord {
            target: parent,
            kind: MutationKind::ChildList {
                added: Vec::new(),
                removed: vec![id],
            },
        });
        Some(removed)
    }

    /// Replace all children of `parent`, the way client-side routers swap a view.
    pub fn replace_children(&mut self, parent: Id, mut nodes: Vec<Node>) -> Vec<Id> {
        for n in &mut nodes {
            clear_node_ids(n);
            assign_node_ids(n, &mut self.next_id);
        }
        let added: Vec<Id> = nodes.iter().map(Node::id).collect();
        let Some(children) = find_node_by_id_mut(&mut self.root, parent).and_then(Node::children_mut)
        else {
            return Vec::new();
        };
        let removed: Vec<Id> = children.iter().map(Node::id).collect();
        *children = nodes;

        self.push_record(MutationRecord {
            target: parent,
            kind: MutationKind::ChildList {
                added: added.clone(),
                removed,
            },
        });
        added
    }

    pub fn set_attribute(&mut self, id: Id, name: &str, value: Option<String>) -> bool {
        let Some(node) = find_node_by_id_mut(&mut self.root, id) else {
            return false;
        };
        if !set_attr(node, name, value) {
            return false;
        }
        self.push_record(MutationRecord {
            target: id,
            kind: MutationKind::Attribute {
                name: name.to_ascii_lowercase(),
            },
        });
        true
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: Id, text: &str) -> bool {
        let next_id = &mut self.next_id;
        let Some(children) = find_node_by_id_mut(&mut self.root, id).and_then(Node::children_mut)
        else {
            return false;
        };
        let mut node = Node::Text {
            id: Id::UNSET,
            text: text.to_string(),
        };
        assign_node_ids(&mut node, next_id);
        children.clear();
        children.push(node);
        self.push_record(MutationRecord {
            target: id,
            kind: MutationKind::CharacterData,
        });
        true
    }

    pub fn root_mut_untracked(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn pending_records(&self) -> usize {
        self.records.len()
    }

    fn push_record(&mut self, record: MutationRecord) {
        self.records.push(record);
    }
}

pub fn parent_of(root: &Node, id: Id) -> Option<Id> {
    for c in root.children() {
        if c.id() == id {
            return Some(root.id());
        }
        if let Some(p) = parent_of(c, id) {
            return Some(p);
        }
    }
    None
}
