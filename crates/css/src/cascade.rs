use crate::matching::matches_complex;
use crate::selector::Specificity;
use crate::syntax::{Stylesheet, parse_declarations};
use html::traverse::for_each_element;
use html::{Id, Node};
use std::cmp::Ordering::Equal;
use std::collections::HashMap;

struct Candidate {
    property: String,
    value: String,
    specificity: Specificity,
    order: u32,
}

// If the element has an inline style attribute, return its value
pub fn get_inline_style(attributes: &[(String, Option<String>)]) -> Option<&str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("style"))
        .and_then(|(_, v)| v.as_deref())
}

/// Resolve the winning declarations for every element (inline + matched rules)
/// and store them in each element's `style`.
pub fn attach_styles(dom: &mut Node, sheet: &Stylesheet) {
    let mut resolved: HashMap<Id, Vec<(String, String)>> = HashMap::new();

    for_each_element(dom, |node, ancestors| {
        let Node::Element { attributes, .. } = node else {
            return;
        };
        // collect candidates (inline + matched rules)
        let mut candidates: Vec<Candidate> = Vec::new();

        if let Some(inline) = get_inline_style(attributes) {
            let inline_spec = Specificity(u16::MAX, 0, 0);
            candidates.extend(parse_declarations(inline).into_iter().map(|d| Candidate {
                property: d.name,
                value: d.value,
                specificity: inline_spec,
                order: u32::MAX,
            }));
        }

        for (order, rule) in sheet.rules.iter().enumerate() {
            let matched = rule
                .selectors
                .selectors
                .iter()
                .filter(|sel| matches_complex(node, ancestors, sel))
                .map(|sel| sel.specificity())
                .max();
            if let Some(specificity) = matched {
                candidates.extend(rule.declarations.iter().map(|d| Candidate {
                    property: d.name.clone(),
                    value: d.value.clone(),
                    specificity,
                    order: order as u32,
                }));
            }
        }

        // resolve winners per property
        candidates.sort_by(|a, b| match a.property.cmp(&b.property) {
            Equal => match a.specificity.cmp(&b.specificity) {
                Equal => a.order.cmp(&b.order),
                other => other,
            },
            other => other,
        });

        let mut style = Vec::new();
        let mut i = 0;
        while i < candidates.len() {
            let mut j = i;
            while j + 1 < candidates.len() && candidates[j + 1].property == candidates[i].property {
                j += 1;
            }
            let winner = &candidates[j];
            style.push((winner.property.clone(), winner.value.clone()));
            i = j + 1;
        }
        resolved.insert(node.id(), style);
    });

    fn apply(node: &mut Node, resolved: &mut HashMap<Id, Vec<(String, String)>>) {
        if let Node::Element { id, style, .. } = node {
            *style = resolved.remove(id).unwrap_or_default();
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                apply(c, resolved);
            }
        }
    }
    apply(dom, &mut resolved);
}
