use crate::selector::{AttrOp, AttrSelector, Combinator, ComplexSelector, Compound, SelectorList};
use html::dom_utils::attr;
use html::traverse::for_each_element;
use html::{Id, Node};
use memchr::{memchr, memchr2};

/// `querySelectorAll`: every element under `root` matching any selector in
/// `list`, in document order, without duplicates.
pub fn query_selector_all(root: &Node, list: &SelectorList) -> Vec<Id> {
    let mut out = Vec::new();
    for_each_element(root, |node, ancestors| {
        if list
            .selectors
            .iter()
            .any(|sel| matches_complex(node, ancestors, sel))
        {
            out.push(node.id());
        }
    });
    out
}

pub fn query_selector(root: &Node, list: &SelectorList) -> Option<Id> {
    // Cheap enough for page-sized trees; keeps one traversal implementation.
    query_selector_all(root, list).into_iter().next()
}

/// Does `node` (with element `ancestors`, outermost first) match `sel`?
pub fn matches_complex(node: &Node, ancestors: &[&Node], sel: &ComplexSelector) -> bool {
    let last = sel.compounds.len() - 1;
    if !matches_compound(node, &sel.compounds[last]) {
        return false;
    }
    match_left(ancestors, sel, last)
}

/// Match compounds `0..idx` against the ancestor chain, right to left, with
/// backtracking for descendant combinators.
fn match_left(ancestors: &[&Node], sel: &ComplexSelector, idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let compound = &sel.compounds[idx - 1];
    match sel.combinators[idx - 1] {
        Combinator::Child => {
            let Some((parent, rest)) = ancestors.split_last() else {
                return false;
            };
            matches_compound(parent, compound) && match_left(rest, sel, idx - 1)
        }
        Combinator::Descendant => {
            for i in (0..ancestors.len()).rev() {
                if matches_compound(ancestors[i], compound)
                    && match_left(&ancestors[..i], sel, idx - 1)
                {
                    return true;
                }
            }
            false
        }
    }
}

pub fn matches_compound(node: &Node, compound: &Compound) -> bool {
    let Node::Element { name, .. } = node else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(want) = &compound.id {
        if attr(node, "id") != Some(want.as_str()) {
            return false;
        }
    }
    if !compound.classes.is_empty() {
        let Some(classlist) = attr(node, "class") else {
            return false;
        };
        if !compound
            .classes
            .iter()
            .all(|want| classlist.split_whitespace().any(|c| c == want))
        {
            return false;
        }
    }
    compound.attrs.iter().all(|a| matches_attr(node, a))
}

fn matches_attr(node: &Node, sel: &AttrSelector) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };
    let Some((_, value)) = attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(&sel.name))
    else {
        return false;
    };
    let Some((op, want)) = &sel.op else {
        return true;
    };
    // A valueless attribute behaves like an empty string.
    let have = value.as_deref().unwrap_or("");
    let ci = sel.case_insensitive;
    match op {
        AttrOp::Equals => eq(have, want, ci),
        AttrOp::Includes => have.split_whitespace().any(|w| eq(w, want, ci)),
        AttrOp::Prefix => {
            !want.is_empty()
                && have.len() >= want.len()
                && have.is_char_boundary(want.len())
                && eq(&have[..want.len()], want, ci)
        }
        AttrOp::Suffix => {
            !want.is_empty()
                && have.len() >= want.len()
                && have.is_char_boundary(have.len() - want.len())
                && eq(&have[have.len() - want.len()..], want, ci)
        }
        AttrOp::Substring => {
            !want.is_empty()
                && if ci {
                    contains_ignore_ascii_case(have, want.as_bytes())
                } else {
                    have.contains(want.as_str())
                }
        }
    }
}

fn eq(a: &str, b: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

pub fn contains_ignore_ascii_case(haystack: &str, needle: &[u8]) -> bool {
    let hay = haystack.as_bytes();
    let n = needle.len();
    if n == 0 {
        return true;
    }
    let hay_len = hay.len();
    if hay_len < n {
        return false;
    }
    let first = needle[0];
    let (a, b) = if first.is_ascii_alphabetic() {
        (first.to_ascii_lowercase(), first.to_ascii_uppercase())
    } else {
        (first, first)
    };
    let mut i = 0;
    while i + n <= hay_len {
        let rel = if a == b {
            memchr(a, &hay[i..])
        } else {
            memchr2(a, b, &hay[i..])
        };
        let Some(rel) = rel else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay_len && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}
