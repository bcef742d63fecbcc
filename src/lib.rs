//! Delimited placeholder substitution driven by pluggable rules.
//!
//! # Table of contents
//! * [Description](#description)
//! * [Engine](#engine)
//! * [Rule trait](#rule-trait)
//! * [Implementing Rule trait](#implementing-rule-trait)
//! * [CLI tool](#cli-tool)
//! * [Feature flags](#feature-flags)
//!
//! # Description
//!
//! Expands text templates like `Hello <name>!` against arbitrary data. Text is split into
//! literal parts and delimited tokens, every token is offered to a list of rules and the first
//! rule that accepts it provides replacement. This is not a template language: there are no loops
//! or conditions and replacements are never expanded again.
//!
//! # Engine
//!
//! [`Engine`] owns delimiter pair, [`Comparison`] mode and a [`RuleSet`]. It is created once and
//! reused for any number of inputs:
//!
//! ```rust
//! use stencil::{rules::Literal, Engine};
//!
//! let mut engine = Engine::new("<", ">").unwrap();
//! engine.rules_mut().push(Literal::new_boxed("Name", "Bob"));
//!
//! assert_eq!(engine.process("Hello <Name>!"), "Hello Bob!");
//! // tokens nobody knows stay as they are
//! assert_eq!(engine.process("Hello <Stranger>!"), "Hello <Stranger>!");
//! // start delimiter without end leaves whole input untouched
//! assert_eq!(engine.process("Hello <Name"), "Hello <Name");
//! ```
//!
//! Delimiters can be longer than one character, start and end can be the same string.
//!
//! # Rule trait
//!
//! [`Rule`] decides whether it can replace token and produces replacement. Rules receive token
//! through [`Context`] which also carries engine options.
//!
//! Default rules are:
//!
//! * [`rules::Literal`] replaces token equal to fixed text
//! * [`rules::ObjectPath`] looks up dotted member path like `user.address.city` in bound value
//! * [`rules::Pattern`] matches token against regex, expands capture groups in replacement
//! * [`rules::Upper`] uppercases result of inner rule
//! * [`rules::Lower`] lowercases result of inner rule
//!
//! # Implementing Rule trait
//!
//! `Counter` replaces `count` token with number of characters in some text:
//!
//! ```rust
//! use std::borrow::Cow;
//!
//! use stencil::{Context, Engine, Rule};
//!
//! // Deserialize is only required with `deserialize` crate feature
//! #[derive(Clone, Debug, serde::Deserialize)]
//! pub struct Counter(String);
//!
//! // `typetag` is only required with `deserialize` crate feature
//! #[typetag::deserialize]
//! impl Rule for Counter {
//!     fn can_process(&self, ctx: &Context) -> bool {
//!         ctx.comparison().equals(ctx.trimmed_text(), "count")
//!     }
//!
//!     // 'rule is lifetime of rule itself, output can borrow from it
//!     fn process<'rule, 'ctx: 'rule>(&'rule self, _: &Context<'ctx>) -> Cow<'rule, str> {
//!         self.0.chars().count().to_string().into()
//!     }
//! }
//!
//! // engines are deserializable, custom rules are referred to by type name
//! let engine = ron::from_str::<Engine>(
//!     r#"
//! (
//!     start: "{",
//!     end: "}",
//!     comparison: IgnoreCase,
//!     rules: [
//!         {"Counter": ("hello")},
//!         {"Literal": (matching: "what", replacement: "letters")},
//!     ],
//! )
//! "#,
//! )
//! .expect("engine did not parse");
//!
//! assert_eq!(engine.process("{Count} { what }"), "5 letters");
//! ```
//!
//! # CLI tool
//!
//! You can run CLI tool by enabling `cli` feature: `cargo run --features=cli -- --help`.
//!
//! `echo 'Hi <user.name>' | cargo run --features=cli -- -c demos/email.ron -d demos/data/order.json`
//! fills template with data from json file.
//!
//! # Feature flags
//!
//! Name | Description | Default?
//! ---|---|---
//! `deserialize` | enables deserialization for [`Engine`] and [`Rule`] trait | yes
//! `cli` | required to run CLI tool | no

mod context;
mod engine;
mod rule;
mod rule_set;
mod utils;

#[cfg(feature = "deserialize")]
mod deserialize;

pub mod rules;
pub mod tokenizer;

pub use context::{Comparison, Context, Options};
pub use engine::Engine;
pub use rule::Rule;
pub use rule_set::RuleSet;
pub use tokenizer::{Token, TokenKind, Tokenizer};
