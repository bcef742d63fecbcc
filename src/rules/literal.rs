use std::borrow::Cow;

use crate::{Context, Rule};

/// Replaces token equal to `matching` with static string
///
/// Token is trimmed before comparison, case sensitivity comes from context. Empty `matching`
/// never matches anything, empty `replacement` removes token from output.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct Literal {
    matching: String,
    #[cfg_attr(feature = "deserialize", serde(default))]
    replacement: String,
}

impl Literal {
    pub fn new(matching: &str, replacement: &str) -> Self {
        Self {
            matching: matching.to_owned(),
            replacement: replacement.to_owned(),
        }
    }

    pub fn new_boxed(matching: &str, replacement: &str) -> Box<Self> {
        Box::new(Self::new(matching, replacement))
    }

    /// Deletes matching token
    pub fn removing(matching: &str) -> Self {
        Self::new(matching, "")
    }

    pub fn matching(&self) -> &str {
        &self.matching
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

#[cfg_attr(feature = "deserialize", typetag::deserialize)]
impl Rule for Literal {
    fn can_process(&self, ctx: &Context) -> bool {
        !self.matching.is_empty() && ctx.comparison().equals(ctx.trimmed_text(), &self.matching)
    }

    fn process<'rule, 'ctx: 'rule>(&'rule self, _: &Context<'ctx>) -> Cow<'rule, str> {
        Cow::Borrowed(&self.replacement)
    }
}
