//! Selector Parsing
//!
//! The small CSS subset the board needs to address its markup:
//! `tag`, `#id`, `.class`, `:first-of-type`, `:last-of-type`,
//! and the descendant combinator (whitespace).

use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, BoardResult};

/// Structural pseudo-classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pseudo {
    FirstOfType,
    LastOfType,
}

/// One compound selector such as `button.alt:first-of-type`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub pseudo: Option<Pseudo>,
}

/// Compounds joined by descendant combinators, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> BoardResult<Self> {
        let compounds = source
            .split_whitespace()
            .map(|token| parse_compound(token).ok_or_else(|| invalid(source)))
            .collect::<BoardResult<Vec<_>>>()?;
        if compounds.is_empty() {
            return Err(invalid(source));
        }
        Ok(Self {
            source: source.trim().to_string(),
            compounds,
        })
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }
}

impl FromStr for Selector {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn invalid(source: &str) -> BoardError {
    BoardError::InvalidSelector(source.to_string())
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Split off the leading identifier; `None` when it is empty
fn take_ident(input: &str) -> Option<(&str, &str)> {
    let end = input.find(|c: char| !is_ident_char(c)).unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some(input.split_at(end))
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    if let Some((tag, tail)) = take_ident(rest) {
        compound.tag = Some(tag.to_ascii_lowercase());
        rest = tail;
    }

    while let Some(marker) = rest.chars().next() {
        let (ident, tail) = take_ident(&rest[marker.len_utf8()..])?;
        match marker {
            '#' if compound.id.is_none() => compound.id = Some(ident.to_string()),
            '.' => compound.classes.push(ident.to_string()),
            ':' if compound.pseudo.is_none() => {
                compound.pseudo = Some(match ident {
                    "first-of-type" => Pseudo::FirstOfType,
                    "last-of-type" => Pseudo::LastOfType,
                    _ => return None,
                });
            }
            _ => return None,
        }
        rest = tail;
    }

    Some(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_and_descendant() {
        let sel = Selector::parse("#active-projects ul").unwrap();
        assert_eq!(sel.compounds().len(), 2);
        assert_eq!(sel.compounds()[0].id.as_deref(), Some("active-projects"));
        assert_eq!(sel.compounds()[0].tag, None);
        assert_eq!(sel.compounds()[1].tag.as_deref(), Some("ul"));
    }

    #[test]
    fn test_parse_pseudo_and_classes() {
        let sel: Selector = "button.alt.wide:last-of-type".parse().unwrap();
        let compound = &sel.compounds()[0];
        assert_eq!(compound.tag.as_deref(), Some("button"));
        assert_eq!(compound.classes, vec!["alt".to_string(), "wide".to_string()]);
        assert_eq!(compound.pseudo, Some(Pseudo::LastOfType));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "   ", "#", "li:hover", "ul > li", "a##b", "p:first-of-type:last-of-type"] {
            assert!(
                matches!(Selector::parse(bad), Err(BoardError::InvalidSelector(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_keeps_source() {
        let sel = Selector::parse("  #finished-projects   li ").unwrap();
        assert_eq!(sel.to_string(), "#finished-projects   li");
    }
}
