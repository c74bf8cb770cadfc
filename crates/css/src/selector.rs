//! CSS selector parsing.
//!
//! Supported grammar (a practical subset of Selectors Level 4):
//! - type, `*`, `#id`, `.class`
//! - `[attr]`, `[attr=v]`, `[attr~=v]`, `[attr^=v]`, `[attr$=v]`, `[attr*=v]`,
//!   with quoted or bare values and an optional ` i` flag
//! - descendant (whitespace) and child (`>`) combinators
//! - comma separated lists

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    /// `None` means presence only (`[attr]`).
    pub op: Option<(AttrOp, String)>,
    pub case_insensitive: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    /// Lowercased tag name; `None` for `*` or an omitted type.
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// One complex selector, e.g. `form > div.editor [contenteditable]`.
///
/// `compounds[i]` and `compounds[i + 1]` are joined by `combinators[i]`;
/// the subject is the last compound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Specificity(pub u16, pub u16, pub u16); // (id, class/attr, type)

impl ComplexSelector {
    pub fn subject(&self) -> &Compound {
        // parse never produces an empty selector
        &self.compounds[self.compounds.len() - 1]
    }

    pub fn specificity(&self) -> Specificity {
        let mut s = Specificity::default();
        for c in &self.compounds {
            if c.id.is_some() {
                s.0 += 1;
            }
            s.1 += (c.classes.len() + c.attrs.len()) as u16;
            if c.tag.is_some() {
                s.2 += 1;
            }
        }
        s
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
    source: String,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        parse_selector_list(input)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { pos: usize, ch: char },
    UnterminatedAttribute { pos: usize },
    UnterminatedString { pos: usize },
    DanglingCombinator { pos: usize },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "empty selector"),
            SelectorError::UnexpectedChar { pos, ch } => {
                write!(f, "unexpected {ch:?} at byte {pos}")
            }
            SelectorError::UnterminatedAttribute { pos } => {
                write!(f, "unterminated attribute selector starting at byte {pos}")
            }
            SelectorError::UnterminatedString { pos } => {
                write!(f, "unterminated string starting at byte {pos}")
            }
            SelectorError::DanglingCombinator { pos } => {
                write!(f, "combinator without a following selector at byte {pos}")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let mut selectors = Vec::new();
    let mut start = 0;
    for end in split_points(input)? {
        selectors.push(parse_complex(input, start, end)?);
        start = end + 1;
    }
    selectors.push(parse_complex(input, start, input.len())?);
    Ok(SelectorList {
        selectors,
        source: input.trim().to_string(),
    })
}

/// Byte offsets of top-level commas (outside brackets and strings).
fn split_points(input: &str) -> Result<Vec<usize>, SelectorError> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<(u8, usize)> = None;
    for (i, &b) in bytes.iter().enumerate() {
        if let Some((q, _)) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some((b, i)),
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => out.push(i),
            _ => {}
        }
    }
    if let Some((_, pos)) = quote {
        return Err(SelectorError::UnterminatedString { pos });
    }
    Ok(out)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        (self.pos < self.end).then(|| self.src.as_bytes()[self.pos])
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80)
        {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn unexpected(&self) -> SelectorError {
        let ch = self.src[self.pos..].chars().next().unwrap_or('\0');
        SelectorError::UnexpectedChar { pos: self.pos, ch }
    }
}

fn parse_complex(src: &str, start: usize, end: usize) -> Result<ComplexSelector, SelectorError> {
    let mut cur = Cursor {
        src,
        pos: start,
        end,
    };
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();

    cur.skip_ws();
    if cur.peek().is_none() {
        return Err(SelectorError::Empty);
    }

    loop {
        let compound = parse_compound(&mut cur)?;
        compounds.push(compound);

        let had_ws = cur.skip_ws();
        match cur.peek() {
            None => break,
            Some(b'>') => {
                let pos = cur.pos;
                cur.pos += 1;
                cur.skip_ws();
                if cur.peek().is_none() {
                    return Err(SelectorError::DanglingCombinator { pos });
                }
                combinators.push(Combinator::Child);
            }
            Some(_) if had_ws => combinators.push(Combinator::Descendant),
            Some(_) => return Err(cur.unexpected()),
        }
    }

    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

fn parse_compound(cur: &mut Cursor<'_>) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut any = false;

    match cur.peek() {
        Some(b'*') => {
            cur.pos += 1;
            any = true;
        }
        Some(b) if b.is_ascii_alphabetic() => {
            compound.tag = Some(cur.ident().to_ascii_lowercase());
            any = true;
        }
        _ => {}
    }

    while let Some(b) = cur.peek() {
        match b {
            b'#' => {
                cur.pos += 1;
                let id = cur.ident();
                if id.is_empty() {
                    return Err(cur.unexpected());
                }
                compound.id = Some(id.to_string());
            }
            b'.' => {
                cur.pos += 1;
                let class = cur.ident();
                if class.is_empty() {
                    return Err(cur.unexpected());
                }
                compound.classes.push(class.to_string());
            }
            b'[' => {
                compound.attrs.push(parse_attr(cur)?);
            }
            _ => break,
        }
        any = true;
    }

    if !any {
        return Err(cur.unexpected());
    }
    Ok(compound)
}

fn parse_attr(cur: &mut Cursor<'_>) -> Result<AttrSelector, SelectorError> {
    let open = cur.pos;
    cur.pos += 1; // '['
    cur.skip_ws();
    let name = cur.ident().to_ascii_lowercase();
    if name.is_empty() {
        return Err(cur.unexpected());
    }
    cur.skip_ws();

    let op = match cur.peek() {
        Some(b']') => {
            cur.pos += 1;
            return Ok(AttrSelector {
                name,
                op: None,
                case_insensitive: false,
            });
        }
        Some(b'=') => {
            cur.pos += 1;
            AttrOp::Equals
        }
        Some(b @ (b'~' | b'^' | b'$' | b'*')) => {
            cur.pos += 1;
            if cur.peek() != Some(b'=') {
                return Err(cur.unexpected());
            }
            cur.pos += 1;
            match b {
                b'~' => AttrOp::Includes,
                b'^' => AttrOp::Prefix,
                b'$' => AttrOp::Suffix,
                _ => AttrOp::Substring,
            }
        }
        None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
        Some(_) => return Err(cur.unexpected()),
    };

    cur.skip_ws();
    let value = match cur.peek() {
        Some(q @ (b'"' | b'\'')) => {
            let quote_pos = cur.pos;
            let body_start = cur.pos + 1;
            let rel = cur.src[body_start..cur.end]
                .bytes()
                .position(|b| b == q)
                .ok_or(SelectorError::UnterminatedString { pos: quote_pos })?;
            cur.pos = body_start + rel + 1;
            cur.src[body_start..body_start + rel].to_string()
        }
        Some(_) => cur.ident().to_string(),
        None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
    };

    cur.skip_ws();
    let mut case_insensitive = false;
    if matches!(cur.peek(), Some(b'i' | b'I')) {
        cur.pos += 1;
        case_insensitive = true;
        cur.skip_ws();
    }
    match cur.peek() {
        Some(b']') => cur.pos += 1,
        None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
        Some(_) => return Err(cur.unexpected()),
    }

    Ok(AttrSelector {
        name,
        op: Some((op, value)),
        case_insensitive,
    })
}
