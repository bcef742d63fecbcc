use std::{borrow::Cow, slice};

use crate::{Context, Rule};

/// Ordered collection of rules. First rule able to process token wins
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(transparent)
)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rule to the end, it will be consulted after all existing ones
    pub fn push(&mut self, rule: Box<dyn Rule>) {
        log::debug!("adding rule {rule:?} at {}", self.rules.len());

        self.rules.push(rule);
    }

    /// Inserts rule at given position, shifting all rules after it
    ///
    /// # Panics
    ///
    /// Panics if `index > len`
    pub fn insert(&mut self, index: usize, rule: Box<dyn Rule>) {
        log::debug!("adding rule {rule:?} at {index}");

        self.rules.insert(index, rule);
    }

    /// Removes and returns rule at given position
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn remove(&mut self, index: usize) -> Box<dyn Rule> {
        self.rules.remove(index)
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Box<dyn Rule>> {
        self.rules.iter()
    }

    /// Returns first rule that can process context
    pub fn find(&self, ctx: &Context) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .find(|rule| rule.can_process(ctx))
    }

    /// Replacement from first rule that can process context. `None` if no rule matched
    pub fn apply<'rule, 'ctx: 'rule>(
        &'rule self,
        ctx: &Context<'ctx>,
    ) -> Option<Cow<'rule, str>> {
        let rule = self.find(ctx)?;

        log::trace!("{:?} matched by {rule:?}", ctx.original_text());

        Some(rule.process(ctx))
    }
}

impl Extend<Box<dyn Rule>> for RuleSet {
    fn extend<T: IntoIterator<Item = Box<dyn Rule>>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl FromIterator<Box<dyn Rule>> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Box<dyn Rule>>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Box<dyn Rule>>> for RuleSet {
    fn from(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Box<dyn Rule>;
    type IntoIter = slice::Iter<'a, Box<dyn Rule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
