use std::{error::Error, fmt};

/// Classifies a span of scanned input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Text outside of delimiters, copied as is
    Literal,
    /// Text found between a start and an end delimiter, delimiters excluded
    Delimited,
}

/// Span of input produced by [`Tokenizer::parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` in original input
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn literal(text: &'a str, offset: usize) -> Self {
        Self {
            kind: TokenKind::Literal,
            text,
            offset,
        }
    }

    pub fn delimited(text: &'a str, offset: usize) -> Self {
        Self {
            kind: TokenKind::Delimited,
            text,
            offset,
        }
    }

    #[inline]
    pub fn is_delimited(&self) -> bool {
        self.kind == TokenKind::Delimited
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    EmptyStartDelimiter,
    EmptyEndDelimiter,
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::EmptyStartDelimiter => write!(f, "start delimiter must not be empty"),
            CreationError::EmptyEndDelimiter => write!(f, "end delimiter must not be empty"),
        }
    }
}

impl Error for CreationError {}

/// Splits text into literal and delimited tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    start: String,
    end: String,
}

impl Tokenizer {
    pub fn new(start: &str, end: &str) -> Result<Self, CreationError> {
        if start.is_empty() {
            return Err(CreationError::EmptyStartDelimiter);
        }
        if end.is_empty() {
            return Err(CreationError::EmptyEndDelimiter);
        }

        Ok(Self {
            start: start.to_owned(),
            end: end.to_owned(),
        })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Scans input from left to right. First start delimiter is paired with the first end
    /// delimiter after it, start delimiters found in between are part of delimited text.
    ///
    /// If any start delimiter is left without a closing end delimiter the whole input is returned
    /// as a single literal token and everything scanned before it is discarded.
    pub fn parse<'a>(&self, input: &'a str) -> Vec<Token<'a>> {
        if input.is_empty() {
            return Vec::new();
        }

        let Some(mut start_pos) = input.find(&self.start) else {
            return vec![Token::literal(input, 0)];
        };

        let mut tokens = Vec::new();
        let mut last_end = 0;

        loop {
            if start_pos > last_end {
                tokens.push(Token::literal(&input[last_end..start_pos], last_end));
            }

            let body_start = start_pos + self.start.len();

            let Some(body_len) = input[body_start..].find(&self.end) else {
                log::trace!("unclosed start delimiter at {start_pos}, input left as is");

                return vec![Token::literal(input, 0)];
            };

            let body_end = body_start + body_len;

            tokens.push(Token::delimited(&input[body_start..body_end], body_start));

            last_end = body_end + self.end.len();

            start_pos = match input[last_end..].find(&self.start) {
                Some(pos) => last_end + pos,
                None => break,
            };
        }

        if last_end < input.len() {
            tokens.push(Token::literal(&input[last_end..], last_end));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle() -> Tokenizer {
        Tokenizer::new("<", ">").unwrap()
    }

    // joins tokens back restoring delimiters
    fn reconstruct(tokenizer: &Tokenizer, tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| match t.kind {
                TokenKind::Literal => t.text.to_owned(),
                TokenKind::Delimited => {
                    format!("{}{}{}", tokenizer.start(), t.text, tokenizer.end())
                }
            })
            .collect()
    }

    #[test]
    fn empty_delimiters_rejected() {
        assert_eq!(
            Tokenizer::new("", ">").unwrap_err(),
            CreationError::EmptyStartDelimiter
        );
        assert_eq!(
            Tokenizer::new("<", "").unwrap_err(),
            CreationError::EmptyEndDelimiter
        );
    }

    #[test]
    fn empty_input() {
        assert!(angle().parse("").is_empty());
    }

    #[test]
    fn no_delimiters() {
        for input in ["hello", " ", "a > b", "end only>>"] {
            assert_eq!(angle().parse(input), vec![Token::literal(input, 0)]);
        }
    }

    #[test]
    fn single_placeholder() {
        assert_eq!(
            angle().parse("Hello <Name>!"),
            vec![
                Token::literal("Hello ", 0),
                Token::delimited("Name", 7),
                Token::literal("!", 12),
            ]
        );
    }

    #[test]
    fn first_end_wins() {
        assert_eq!(
            angle().parse("Begin <4 > 5> End"),
            vec![
                Token::literal("Begin ", 0),
                Token::delimited("4 ", 7),
                Token::literal(" 5> End", 10),
            ]
        );
    }

    #[test]
    fn nested_start_is_text() {
        assert_eq!(angle().parse("<a<b>"), vec![Token::delimited("a<b", 1)]);
    }

    #[test]
    fn unclosed_start_returns_whole_input() {
        let input = "Begin <first End";
        assert_eq!(angle().parse(input), vec![Token::literal(input, 0)]);

        // earlier tokens are discarded too
        let input = "<ok> then <broken";
        assert_eq!(angle().parse(input), vec![Token::literal(input, 0)]);
    }

    #[test]
    fn adjacent_placeholders() {
        assert_eq!(
            angle().parse("<a><b>"),
            vec![Token::delimited("a", 1), Token::delimited("b", 4)]
        );
    }

    #[test]
    fn empty_placeholder() {
        assert_eq!(
            angle().parse("x<>y"),
            vec![
                Token::literal("x", 0),
                Token::delimited("", 2),
                Token::literal("y", 3),
            ]
        );
    }

    #[test]
    fn multichar_delimiters() {
        let tokenizer = Tokenizer::new("<!--", "-->").unwrap();

        assert_eq!(
            tokenizer.parse("a<!-- b -->c<!--d-->"),
            vec![
                Token::literal("a", 0),
                Token::delimited(" b ", 5),
                Token::literal("c", 11),
                Token::delimited("d", 16),
            ]
        );
    }

    #[test]
    fn same_start_and_end() {
        let tokenizer = Tokenizer::new("%", "%").unwrap();

        assert_eq!(
            tokenizer.parse("%a% and %b%"),
            vec![
                Token::delimited("a", 1),
                Token::literal(" and ", 3),
                Token::delimited("b", 9),
            ]
        );
    }

    #[test]
    fn offsets_point_into_input() {
        let input = "ünï <cødé> and <ëmoji 🙂> tail";

        for token in angle().parse(input) {
            assert_eq!(&input[token.offset..token.offset + token.text.len()], token.text);
        }
    }

    #[test]
    fn reconstructs_input() {
        let tokenizer = angle();

        for input in [
            "Hello <Name>!",
            "<a><b>",
            "Begin <4 > 5> End",
            "no placeholders",
            "<lead> and <trail>",
            "x<>y<<z>",
        ] {
            let tokens = tokenizer.parse(input);
            assert_eq!(reconstruct(&tokenizer, &tokens), input);
        }
    }
}
