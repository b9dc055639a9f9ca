//! Open/close tag sets
//!
//! Tags are compared verbatim against whitespace-separated tokens of a line:
//! open tags in their uppercase spelling, close tags in their lowercase
//! spelling. Input text is never case-folded.

use std::collections::HashSet;

/// The tags a reader recognizes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    open: HashSet<String>,
    close: HashSet<String>,
}

impl TagSet {
    /// Build from explicit spellings, used exactly as given
    pub fn new<I, J, S, T>(open: I, close: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            open: open.into_iter().map(Into::into).collect(),
            close: close.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from record keywords: `crds` opens with `CRDS` and closes with `crds`
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = Self::default();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }
            tags.open.insert(keyword.to_uppercase());
            tags.close.insert(keyword.to_lowercase());
        }
        tags
    }

    /// No tags: the whole input is one record
    pub fn whole_input() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn is_open(&self, token: &str) -> bool {
        self.open.contains(token)
    }

    pub fn is_close(&self, token: &str) -> bool {
        self.close.contains(token)
    }

    /// Position of the first opening tag among the line's tokens
    pub(crate) fn open_position(&self, line: &str) -> Option<usize> {
        line.split_whitespace().position(|token| self.is_open(token))
    }

    /// Whether a closing tag occurs among the line's tokens after `skip` tokens
    pub(crate) fn closes_after(&self, line: &str, skip: usize) -> bool {
        line.split_whitespace()
            .skip(skip)
            .any(|token| self.is_close(token))
    }
}
