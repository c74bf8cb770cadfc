pub mod cascade;
pub mod computed;
pub mod matching;
pub mod selector;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{attach_styles, get_inline_style};
pub use computed::{ComputedStyle, build_style_map, compute_style};
pub use matching::{contains_ignore_ascii_case, matches_complex, query_selector, query_selector_all};
pub use selector::{SelectorError, SelectorList, Specificity, parse_selector_list};
pub use syntax::{Declaration, Rule, Stylesheet, parse_declarations, parse_stylesheet};
pub use values::{Display, Length, Overflow, Position, Visibility};

#[cfg(test)]
mod tests;
