//! Minimal CSS selector engine for the in-memory DOM.
//!
//! Supported: type selectors, `*`, `.class`, `#id`, `[attr]`, `[attr=value]`,
//! compound selectors, the descendant combinator and selector lists.

use crate::error::{GridError, Result};

/// Read access to an element for selector matching.
pub trait SelectorTarget: Sized {
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn parent_element(&self) -> Option<Self>;

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector such as `td.cell[columnname]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches<T: SelectorTarget>(&self, el: &T) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, el.attribute(&a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// Compounds joined by descendant combinators, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
}

impl Complex {
    fn matches<T: SelectorTarget>(&self, el: &T) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }
        let mut current = el.parent_element();
        for compound in ancestors.iter().rev() {
            loop {
                let Some(node) = current else {
                    return false;
                };
                current = node.parent_element();
                if compound.matches(&node) {
                    break;
                }
            }
        }
        true
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self> {
        let mut selectors = Vec::new();
        for part in input.split(',') {
            let compounds = part
                .split_whitespace()
                .map(|token| parse_compound(token, input))
                .collect::<Result<Vec<_>>>()?;
            if compounds.is_empty() {
                return Err(GridError::Selector(input.to_string()));
            }
            selectors.push(Complex { compounds });
        }
        Ok(Self { selectors })
    }

    pub fn matches<T: SelectorTarget>(&self, el: &T) -> bool {
        self.selectors.iter().any(|s| s.matches(el))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], mut pos: usize) -> (String, usize) {
    let mut ident = String::new();
    while let Some(&c) = chars.get(pos) {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        pos += 1;
    }
    (ident, pos)
}

fn parse_compound(token: &str, whole: &str) -> Result<Compound> {
    let invalid = || GridError::Selector(whole.to_string());
    let chars: Vec<char> = token.chars().collect();
    let mut compound = Compound::default();
    let mut pos = 0;

    if chars.first() == Some(&'*') {
        pos = 1;
    } else {
        let (tag, next) = take_ident(&chars, 0);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
            pos = next;
        }
    }

    while let Some(&c) = chars.get(pos) {
        match c {
            '.' | '#' => {
                let (ident, next) = take_ident(&chars, pos + 1);
                if ident.is_empty() {
                    return Err(invalid());
                }
                if c == '.' {
                    compound.classes.push(ident);
                } else {
                    compound.id = Some(ident);
                }
                pos = next;
            }
            '[' => {
                let (name, next) = take_ident(&chars, pos + 1);
                if name.is_empty() {
                    return Err(invalid());
                }
                pos = next;
                let value = match chars.get(pos) {
                    Some(']') => None,
                    Some('=') => {
                        let close = chars
                            .iter()
                            .skip(pos)
                            .position(|&ch| ch == ']')
                            .map(|offset| pos + offset)
                            .ok_or_else(invalid)?;
                        let raw: String = chars
                            .get(pos + 1..close)
                            .ok_or_else(invalid)?
                            .iter()
                            .collect();
                        pos = close;
                        Some(raw.trim_matches(|q| q == '"' || q == '\'').to_string())
                    }
                    _ => return Err(invalid()),
                };
                compound.attrs.push(AttrMatch { name, value });
                pos += 1;
            }
            _ => return Err(invalid()),
        }
    }
    Ok(compound)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    /// Tiny element chain: each entry is (tag, attributes), parent first.
    #[derive(Clone, Copy)]
    struct Fake<'a> {
        chain: &'a [(&'a str, &'a [(&'a str, &'a str)])],
        depth: usize,
    }

    impl SelectorTarget for Fake<'_> {
        fn tag_name(&self) -> &str {
            self.chain[self.depth].0
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.chain[self.depth]
                .1
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
        }

        fn parent_element(&self) -> Option<Self> {
            self.depth.checked_sub(1).map(|depth| Fake {
                chain: self.chain,
                depth,
            })
        }
    }

    const CHAIN: &[(&str, &[(&str, &str)])] = &[
        ("div", &[("class", "grid-table-container")]),
        ("table", &[("class", "grid-table")]),
        ("tbody", &[]),
        ("tr", &[("key", "7")]),
        ("td", &[("class", "cell editable"), ("columnname", "price")]),
    ];

    fn cell() -> Fake<'static> {
        Fake {
            chain: CHAIN,
            depth: 4,
        }
    }

    #[test]
    fn test_compound_matching() {
        assert!(SelectorList::parse("td").unwrap().matches(&cell()));
        assert!(SelectorList::parse("TD.cell").unwrap().matches(&cell()));
        assert!(SelectorList::parse("td.cell.editable")
            .unwrap()
            .matches(&cell()));
        assert!(SelectorList::parse("[columnname=price]")
            .unwrap()
            .matches(&cell()));
        assert!(SelectorList::parse("td[columnname=\"price\"]")
            .unwrap()
            .matches(&cell()));
        assert!(!SelectorList::parse("td.missing").unwrap().matches(&cell()));
        assert!(!SelectorList::parse("[columnname=qty]")
            .unwrap()
            .matches(&cell()));
    }

    #[test]
    fn test_descendant_matching() {
        assert!(SelectorList::parse(".grid-table tr td")
            .unwrap()
            .matches(&cell()));
        assert!(SelectorList::parse("tr[key] td.cell")
            .unwrap()
            .matches(&cell()));
        assert!(!SelectorList::parse("tbody table td")
            .unwrap()
            .matches(&cell()));
    }

    #[test]
    fn test_selector_list() {
        assert!(SelectorList::parse("th, td.cell").unwrap().matches(&cell()));
    }

    #[test]
    fn test_unsupported_syntax_is_rejected() {
        for bad in ["tr > td", "td:hover", "td.", "[=x]", "", "a,,b", "[key"] {
            assert!(
                matches!(SelectorList::parse(bad), Err(GridError::Selector(_))),
                "{bad} should be rejected"
            );
        }
    }
}
