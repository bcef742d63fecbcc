use std::{borrow::Cow, fmt::Debug};

use dyn_clone::{clone_trait_object, DynClone};

use crate::Context;

/// Decides whether delimited token can be replaced and produces replacement
///
/// [`Rule::process`] is only called right after [`Rule::can_process`] returned `true` for the
/// same context, but implementations should still produce something sensible when called alone.
/// Output of `process` is inserted as is, it is never scanned for delimiters again.
#[cfg_attr(feature = "deserialize", typetag::deserialize)]
pub trait Rule: DynClone + Debug + Send + Sync {
    /// Returns `true` if this rule knows what to put in place of token
    fn can_process(&self, ctx: &Context) -> bool;

    /// Returns replacement for token. Empty string deletes token from output
    fn process<'rule, 'ctx: 'rule>(&'rule self, ctx: &Context<'ctx>) -> Cow<'rule, str>;
}

clone_trait_object!(Rule);
