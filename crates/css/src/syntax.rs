use crate::selector::SelectorList;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Selector list and its declarations
#[derive(Clone, Debug)]
pub struct Rule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

// A full stylesheet: multiple rules
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

// input: "div, #id { display: none; } .class > textarea { width: 12px; }"
// Rules whose selector fails to parse are dropped, as browsers do.
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let mut rules = Vec::new();
    for block in input.split('}') {
        let Some((selector_str, declaration_str)) = block.split_once('{') else {
            continue;
        };
        let selectors = match SelectorList::parse(selector_str) {
            Ok(s) => s,
            Err(e) => {
                log::debug!(target: "css.syntax", "dropping rule {:?}: {e}", selector_str.trim());
                continue;
            }
        };
        let declarations = parse_declarations(declaration_str);
        if declarations.is_empty() {
            continue;
        }
        rules.push(Rule {
            selectors,
            declarations,
        });
    }
    Stylesheet { rules }
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().trim_end_matches("!important").trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}
