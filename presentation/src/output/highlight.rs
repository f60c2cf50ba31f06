//! Code highlighting for log views
//!
//! Splits one line of a code block into classified tokens. `json` and
//! `python` have their own rules; other languages come back as a single
//! plain token. Presenters map [`TokenKind`] to their own colours.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    /// Object key (a string followed by `:`).
    Key,
    Number,
    /// `true` / `false` / `null`, `True` / `False` / `None`
    Literal,
    Comment,
    Punct,
    Plain,
}

struct Rules {
    comment: Option<char>,
    quotes: &'static [char],
    keywords: &'static [&'static str],
    literals: &'static [&'static str],
    keys: bool,
}

const JSON: Rules = Rules {
    comment: None,
    quotes: &['"'],
    keywords: &[],
    literals: &["true", "false", "null"],
    keys: true,
};

const PYTHON: Rules = Rules {
    comment: Some('#'),
    quotes: &['"', '\''],
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield",
    ],
    literals: &["True", "False", "None"],
    keys: false,
};

/// Tokenize one line. The token texts concatenate back to `line`.
pub fn tokenize<'a>(language: &str, line: &'a str) -> Vec<(TokenKind, &'a str)> {
    match language {
        "json" => scan(line, &JSON),
        "python" | "py" => scan(line, &PYTHON),
        _ => vec![(TokenKind::Plain, line)],
    }
}

fn scan<'a>(line: &'a str, rules: &Rules) -> Vec<(TokenKind, &'a str)> {
    let mut tokens = Vec::new();
    let mut start = 0;

    while let Some(c) = line[start..].chars().next() {
        let tail = &line[start..];
        let (kind, len) = if Some(c) == rules.comment {
            (TokenKind::Comment, tail.len())
        } else if rules.quotes.contains(&c) {
            let len = string_len(tail, c);
            let is_key = rules.keys && tail[len..].trim_start().starts_with(':');
            (if is_key { TokenKind::Key } else { TokenKind::String }, len)
        } else if c.is_ascii_digit()
            || (c == '-' && tail[1..].starts_with(|d: char| d.is_ascii_digit()))
        {
            (TokenKind::Number, number_len(tail))
        } else if c.is_alphabetic() || c == '_' {
            let len = tail
                .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
                .unwrap_or(tail.len());
            let word = &tail[..len];
            let kind = if rules.keywords.contains(&word) {
                TokenKind::Keyword
            } else if rules.literals.contains(&word) {
                TokenKind::Literal
            } else {
                TokenKind::Plain
            };
            (kind, len)
        } else if c.is_whitespace() {
            let len = tail
                .find(|ch: char| !ch.is_whitespace())
                .unwrap_or(tail.len());
            (TokenKind::Plain, len)
        } else {
            (TokenKind::Punct, c.len_utf8())
        };

        tokens.push((kind, &tail[..len]));
        start += len;
    }

    tokens
}

/// Length of the string literal opening `tail`, through its closing quote.
/// An unterminated string runs to the end of the line.
fn string_len(tail: &str, quote: char) -> usize {
    let mut escaped = false;
    for (idx, ch) in tail.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return idx + ch.len_utf8();
        }
    }
    tail.len()
}

fn number_len(tail: &str) -> usize {
    tail.char_indices()
        .skip(1)
        .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '_'))
        .map(|(idx, _)| idx)
        .unwrap_or(tail.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of<'a>(tokens: &[(TokenKind, &'a str)], kind: TokenKind) -> Vec<&'a str> {
        tokens
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| *text)
            .collect()
    }

    #[test]
    fn test_json_line() {
        let line = r#"  "result": [1.5, -2, "a \"quoted\" value", true, null],"#;
        let tokens = tokenize("json", line);

        assert_eq!(tokens.iter().map(|(_, t)| *t).collect::<String>(), line);
        assert_eq!(kinds_of(&tokens, TokenKind::Key), vec![r#""result""#]);
        assert_eq!(kinds_of(&tokens, TokenKind::Number), vec!["1.5", "-2"]);
        assert_eq!(
            kinds_of(&tokens, TokenKind::String),
            vec![r#""a \"quoted\" value""#]
        );
        assert_eq!(kinds_of(&tokens, TokenKind::Literal), vec!["true", "null"]);
    }

    #[test]
    fn test_python_line() {
        let line = "def area(r): return 3.14 * r ** 2  # circle's area";
        let tokens = tokenize("python", line);

        assert_eq!(tokens.iter().map(|(_, t)| *t).collect::<String>(), line);
        assert_eq!(kinds_of(&tokens, TokenKind::Keyword), vec!["def", "return"]);
        assert_eq!(kinds_of(&tokens, TokenKind::Number), vec!["3.14", "2"]);
        assert_eq!(
            kinds_of(&tokens, TokenKind::Comment),
            vec!["# circle's area"]
        );
        assert!(kinds_of(&tokens, TokenKind::Plain).contains(&"area"));
    }

    #[test]
    fn test_python_strings_and_literals() {
        let tokens = tokenize("python", "x = 'it\\'s' if None else \"#no comment\"");
        assert_eq!(
            kinds_of(&tokens, TokenKind::String),
            vec!["'it\\'s'", "\"#no comment\""]
        );
        assert_eq!(kinds_of(&tokens, TokenKind::Literal), vec!["None"]);
        assert!(kinds_of(&tokens, TokenKind::Comment).is_empty());
    }

    #[test]
    fn test_unknown_language_is_plain() {
        assert_eq!(
            tokenize("cobol", "MOVE 1 TO X."),
            vec![(TokenKind::Plain, "MOVE 1 TO X.")]
        );
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("json", r#"{"open"#);
        assert_eq!(tokens, vec![(TokenKind::Punct, "{"), (TokenKind::String, r#""open"#)]);
    }
}
