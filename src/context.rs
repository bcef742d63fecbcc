use crate::utils::eq_ignore_case;

/// How rules compare token text with names they know
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum Comparison {
    #[default]
    CaseSensitive,
    /// Unicode aware, compares lowercased characters
    IgnoreCase,
}

impl Comparison {
    #[must_use]
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            Self::CaseSensitive => a == b,
            Self::IgnoreCase => eq_ignore_case(a, b),
        }
    }
}

/// Delimiters and comparison mode shared by all tokens of a single [`crate::Engine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) comparison: Comparison,
}

impl Options {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }
}

/// Single delimited token as seen by rules
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    original: &'a str,
    options: &'a Options,
}

impl<'a> Context<'a> {
    pub fn new(original: &'a str, options: &'a Options) -> Self {
        Self { original, options }
    }

    /// Text between delimiters exactly as found in input
    #[inline]
    pub fn original_text(&self) -> &'a str {
        self.original
    }

    /// [`Self::original_text`] without leading and trailing whitespace
    #[inline]
    pub fn trimmed_text(&self) -> &'a str {
        self.original.trim()
    }

    /// Token text wrapped back into delimiters
    #[must_use]
    pub fn delimited_text(&self) -> String {
        let mut text = String::with_capacity(
            self.options.start.len() + self.original.len() + self.options.end.len(),
        );

        text.push_str(&self.options.start);
        text.push_str(self.original);
        text.push_str(&self.options.end);

        text
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    #[inline]
    pub fn comparison(&self) -> Comparison {
        self.options.comparison
    }
}
