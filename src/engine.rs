use std::borrow::Cow;

use crate::{
    tokenizer::{CreationError, TokenKind, Tokenizer},
    Comparison, Context, Options, RuleSet,
};

/// Replaces delimited tokens in text using rules
///
/// Tokens no rule can process are left in place together with their delimiters. Replacements are
/// inserted as is and never scanned again.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(try_from = "crate::deserialize::EngineDef")
)]
pub struct Engine {
    tokenizer: Tokenizer,
    options: Options,
    rules: RuleSet,
}

impl Engine {
    /// Creates engine without rules using case sensitive comparison
    pub fn new(start: &str, end: &str) -> Result<Self, CreationError> {
        Self::with_comparison(start, end, Comparison::default())
    }

    pub fn with_comparison(
        start: &str,
        end: &str,
        comparison: Comparison,
    ) -> Result<Self, CreationError> {
        let tokenizer = Tokenizer::new(start, end)?;

        Ok(Self {
            options: Options {
                start: start.to_owned(),
                end: end.to_owned(),
                comparison,
            },
            tokenizer,
            rules: RuleSet::new(),
        })
    }

    /// Replaces rules with given ones
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    /// Produces text with all delimited tokens replaced by rules
    ///
    /// Blank input results in empty string. Input without delimited tokens is returned as is.
    pub fn process<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if input.trim().is_empty() {
            return Cow::Borrowed("");
        }

        let tokens = self.tokenizer.parse(input);

        if !tokens.iter().any(|t| t.is_delimited()) {
            return Cow::Borrowed(input);
        }

        let mut output = String::with_capacity(input.len());

        for token in tokens {
            if token.kind == TokenKind::Literal {
                output.push_str(token.text);
                continue;
            }

            let ctx = Context::new(token.text, &self.options);

            match self.rules.apply(&ctx) {
                Some(replacement) => output.push_str(&replacement),
                None => {
                    log::trace!("no rule for {:?} at {}", token.text, token.offset);

                    output.push_str(&self.options.start);
                    output.push_str(token.text);
                    output.push_str(&self.options.end);
                }
            }
        }

        Cow::Owned(output)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::{
        rules::{Literal, ObjectPath, Upper},
        Rule,
    };

    fn engine(rules: &[(&str, &str)]) -> Engine {
        Engine::new("<", ">").unwrap().with_rules(
            rules
                .iter()
                .map(|(m, r)| Literal::new_boxed(m, r) as Box<dyn Rule>)
                .collect(),
        )
    }

    #[test]
    fn empty_delimiters_rejected() {
        assert_eq!(
            Engine::new("", ">").unwrap_err(),
            CreationError::EmptyStartDelimiter
        );
        assert_eq!(
            Engine::with_comparison("<", "", Comparison::IgnoreCase).unwrap_err(),
            CreationError::EmptyEndDelimiter
        );
    }

    #[test]
    fn single_replacement() {
        assert_eq!(engine(&[("Name", "Bob")]).process("Hello <Name>!"), "Hello Bob!");
    }

    #[test]
    fn several_replacements() {
        let engine = engine(&[("first", "one"), ("second", "two")]);

        assert_eq!(
            engine.process("Begin <first> and <second> End"),
            "Begin one and two End"
        );
    }

    #[test]
    fn unknown_token_left_in_place() {
        let engine = engine(&[("first", "one")]);

        assert_eq!(engine.process("Begin <third> End"), "Begin <third> End");
        // whitespace is preserved in fallback
        assert_eq!(engine.process("a < third  > b"), "a < third  > b");
    }

    #[test]
    fn no_recursive_expansion() {
        let engine = engine(&[("first", "<second>"), ("second", "two")]);

        assert_eq!(engine.process("Begin <first> End"), "Begin <second> End");
    }

    #[test]
    fn trimmed_token_matches() {
        assert_eq!(engine(&[("Name", "Bob")]).process("Hi < Name >"), "Hi Bob");
    }

    #[test]
    fn first_rule_wins() {
        let engine = engine(&[("x", "first"), ("x", "second")]);

        assert_eq!(engine.process("<x>"), "first");
    }

    #[test]
    fn blank_input() {
        let engine = engine(&[("x", "y")]);

        assert_eq!(engine.process(""), "");
        assert_eq!(engine.process(" \t\n "), "");
    }

    #[test]
    fn unclosed_delimiter_keeps_input() {
        let engine = engine(&[("first", "one")]);

        assert_eq!(engine.process("Begin <first End"), "Begin <first End");
        // already closed token is not replaced either
        assert_eq!(engine.process("<first> <first"), "<first> <first");
    }

    #[test]
    fn borrowed_without_tokens() {
        let engine = engine(&[("x", "y")]);

        assert!(matches!(engine.process("plain text"), Cow::Borrowed("plain text")));
        assert!(matches!(engine.process("<x>"), Cow::Owned(_)));
    }

    #[test]
    fn removing_rule_deletes_token() {
        let mut engine = engine(&[]);
        engine.rules_mut().push(Box::new(Literal::removing("gone")));

        assert_eq!(engine.process("a<gone>b"), "ab");
    }

    #[test]
    fn comparison_passed_to_rules() {
        let mut engine = Engine::with_comparison("<", ">", Comparison::IgnoreCase).unwrap();
        engine.rules_mut().push(Literal::new_boxed("name", "Bob"));

        assert_eq!(engine.process("<NAME> <Name>"), "Bob Bob");
        assert_eq!(engine.options().comparison(), Comparison::IgnoreCase);
    }

    #[test]
    fn multichar_delimiters() {
        let mut engine = Engine::new("<!--", "-->").unwrap();
        engine.rules_mut().push(Upper::new_boxed(Literal::new_boxed("title", "hi")));

        assert_eq!(
            engine.process("<h1><!-- title --></h1><!--other-->"),
            "<h1>HI</h1><!--other-->"
        );
    }

    #[test]
    fn rules_changed_between_calls() {
        let mut engine = engine(&[]);

        assert_eq!(engine.process("<a>"), "<a>");

        engine.rules_mut().push(Literal::new_boxed("a", "1"));
        assert_eq!(engine.process("<a>"), "1");

        engine.rules_mut().insert(0, Literal::new_boxed("a", "2"));
        assert_eq!(engine.process("<a>"), "2");
    }

    #[test]
    fn literal_before_object_path() {
        #[derive(serde::Serialize)]
        struct User {
            name: &'static str,
            city: &'static str,
        }

        let mut engine = engine(&[("name", "override")]);
        engine.rules_mut().push(
            ObjectPath::new_boxed(&User {
                name: "Ann",
                city: "Riga",
            })
            .unwrap(),
        );

        assert_eq!(engine.process("<name> from <city>, <age>"), "override from Riga, <age>");
    }
}
