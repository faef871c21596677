//! Typed STASH code parsing
//!
//! Candidate codes arrive as free text (`m01s02i205`); only codes matching
//! the fixed-width model/section/item pattern become requests. Parse
//! failure is an explicit `None`, the caller routes the row accordingly.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// The fixed-width code pattern: model, 2-digit section, 3-digit item
const CODE_PATTERN: &str = r"^m(\d{2})s(\d{2})i(\d{3})$";

fn code_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(CODE_PATTERN).expect("code pattern is valid"))
}

/// A parsed STASH code identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StashCode {
    pub model: u32,
    pub section: u32,
    pub item: u32,
}

impl StashCode {
    /// Parse a candidate code string; anything not matching the fixed-width
    /// pattern is `None`
    pub fn parse(code: &str) -> Option<Self> {
        let captures = code_regex().captures(code.trim())?;
        // the pattern guarantees each group is a short digit run
        let field = |index| captures.get(index).and_then(|m| m.as_str().parse().ok());
        Some(Self {
            model: field(1)?,
            section: field(2)?,
            item: field(3)?,
        })
    }

    /// Zero-padded section string, as carried on output records
    pub fn section_str(&self) -> String {
        format!("{:02}", self.section)
    }

    /// Zero-padded item string, as carried on output records
    pub fn item_str(&self) -> String {
        format!("{:03}", self.item)
    }
}

impl fmt::Display for StashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{:02}s{:02}i{:03}", self.model, self.section, self.item)
    }
}
