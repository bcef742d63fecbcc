//! Rules shipped with the crate
//!
//! * [`Literal`] replaces token equal to fixed text
//! * [`ObjectPath`] looks up dotted member path in bound value
//! * [`Pattern`] matches token against regex and expands capture groups
//! * [`Upper`] uppercases result of inner rule
//! * [`Lower`] lowercases result of inner rule

mod literal;
pub mod object_path;
pub mod pattern;

pub use literal::Literal;
pub use object_path::ObjectPath;
pub use pattern::Pattern;

use std::borrow::Cow;

use crate::{Context, Rule};

/// Uppercases result of inner rule
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(transparent)
)]
pub struct Upper(Box<dyn Rule>);

impl Upper {
    pub fn new(inner: Box<dyn Rule>) -> Self {
        Self(inner)
    }

    pub fn new_boxed(inner: Box<dyn Rule>) -> Box<Self> {
        Box::new(Self::new(inner))
    }
}

#[cfg_attr(feature = "deserialize", typetag::deserialize)]
impl Rule for Upper {
    fn can_process(&self, ctx: &Context) -> bool {
        self.0.can_process(ctx)
    }

    fn process<'rule, 'ctx: 'rule>(&'rule self, ctx: &Context<'ctx>) -> Cow<'rule, str> {
        self.0.process(ctx).to_uppercase().into()
    }
}

/// Lowercases result of inner rule
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(transparent)
)]
pub struct Lower(Box<dyn Rule>);

impl Lower {
    pub fn new(inner: Box<dyn Rule>) -> Self {
        Self(inner)
    }

    pub fn new_boxed(inner: Box<dyn Rule>) -> Box<Self> {
        Box::new(Self::new(inner))
    }
}

#[cfg_attr(feature = "deserialize", typetag::deserialize)]
impl Rule for Lower {
    fn can_process(&self, ctx: &Context) -> bool {
        self.0.can_process(ctx)
    }

    fn process<'rule, 'ctx: 'rule>(&'rule self, ctx: &Context<'ctx>) -> Cow<'rule, str> {
        self.0.process(ctx).to_lowercase().into()
    }
}
