use std::{borrow::Cow, error::Error, fmt};

use regex_automata::{
    meta::{BuildError, Regex},
    util::syntax,
};

use crate::{Comparison, Context, Rule};

#[derive(Debug)]
pub enum CreationError {
    BadRegex(BuildError),
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::BadRegex(err) => match err.syntax_error() {
                Some(syntax_err) => write!(f, "bad pattern: {syntax_err}"),
                None => write!(f, "bad pattern: {err}"),
            },
        }
    }
}

impl Error for CreationError {}

#[cfg(feature = "deserialize")]
#[derive(serde::Deserialize)]
struct PatternDef {
    pattern: String,
    #[serde(default)]
    replacement: String,
}

#[cfg(feature = "deserialize")]
impl TryFrom<PatternDef> for Pattern {
    type Error = CreationError;

    fn try_from(def: PatternDef) -> Result<Self, Self::Error> {
        Self::new(&def.pattern, &def.replacement)
    }
}

/// Replaces token matching regex entirely with expanded template
///
/// Template syntax: <https://docs.rs/regex-automata/latest/regex_automata/util/interpolate/index.html>.
/// Case sensitivity comes from context, regex flags like `(?i)` still work inside pattern.
#[derive(Clone)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(try_from = "PatternDef")
)]
pub struct Pattern {
    pattern: String,
    replacement: String,
    has_template: bool,
    case_sensitive: Regex,
    ignore_case: Regex,
}

// regexes print pages of internal state
#[allow(clippy::missing_fields_in_debug)]
impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("pattern", &self.pattern)
            .field("replacement", &self.replacement)
            .finish()
    }
}

impl Pattern {
    #[allow(clippy::result_large_err)]
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, CreationError> {
        // whole token must match
        let anchored = format!(r"\A(?:{pattern})\z");

        let build = |case_insensitive: bool| {
            Regex::builder()
                .syntax(syntax::Config::new().case_insensitive(case_insensitive))
                .build(&anchored)
                .map_err(CreationError::BadRegex)
        };

        Ok(Self {
            pattern: pattern.to_owned(),
            replacement: replacement.to_owned(),
            has_template: replacement.contains('$'),
            case_sensitive: build(false)?,
            ignore_case: build(true)?,
        })
    }

    #[allow(clippy::result_large_err)]
    pub fn new_boxed(pattern: &str, replacement: &str) -> Result<Box<Self>, CreationError> {
        Ok(Box::new(Self::new(pattern, replacement)?))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[inline]
    fn regex(&self, comparison: Comparison) -> &Regex {
        match comparison {
            Comparison::CaseSensitive => &self.case_sensitive,
            Comparison::IgnoreCase => &self.ignore_case,
        }
    }
}

#[cfg_attr(feature = "deserialize", typetag::deserialize)]
impl Rule for Pattern {
    fn can_process(&self, ctx: &Context) -> bool {
        self.regex(ctx.comparison()).is_match(ctx.trimmed_text())
    }

    fn process<'rule, 'ctx: 'rule>(&'rule self, ctx: &Context<'ctx>) -> Cow<'rule, str> {
        let regex = self.regex(ctx.comparison());
        let text = ctx.trimmed_text();

        let mut caps = regex.create_captures();
        regex.captures(text, &mut caps);

        if !caps.is_match() {
            log::debug!("{text:?} does not match {:?}", self.pattern);

            return Cow::Borrowed("");
        }

        if !self.has_template {
            return Cow::Borrowed(&self.replacement);
        }

        let mut dst = String::new();
        caps.interpolate_string_into(text, &self.replacement, &mut dst);

        Cow::Owned(dst)
    }
}
