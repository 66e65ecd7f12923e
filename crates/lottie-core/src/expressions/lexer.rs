//! Tokenizer for the small slice of expression syntax we accept.

use crate::error::{LottieError, LottieResult};

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Ident(String),
    Number(f64),
    Str(String),
    Dot,
    Comma,
    LParen,
    RParen,
    Semi,
    Assign,
}

pub fn tokenize(src: &str) -> LottieResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '/' => {
                chars.next();
                match chars.next() {
                    Some('/') => {
                        for c in chars.by_ref() {
                            if c == '\n' {
                                break;
                            }
                        }
                    }
                    Some('*') => {
                        let mut prev = '\0';
                        loop {
                            match chars.next() {
                                Some('/') if prev == '*' => break,
                                Some(c) => prev = c,
                                None => {
                                    return Err(LottieError::unsupported_expression(
                                        "unterminated block comment",
                                    ))
                                }
                            }
                        }
                    }
                    _ => {
                        return Err(LottieError::unsupported_expression(
                            "division is not supported",
                        ))
                    }
                }
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semi);
            }
            '=' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    return Err(LottieError::unsupported_expression(
                        "comparison is not supported",
                    ));
                }
                tokens.push(Token::Assign);
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some('n') => s.push('\n'),
                            Some('t') => s.push('\t'),
                            Some(other) => s.push(other),
                            None => {
                                return Err(LottieError::unsupported_expression(
                                    "unterminated string literal",
                                ))
                            }
                        },
                        Some(c) if c == quote => {
                            tokens.push(Token::Str(s));
                            break;
                        }
                        Some(c) => s.push(c),
                        None => {
                            return Err(LottieError::unsupported_expression(
                                "unterminated string literal",
                            ))
                        }
                    }
                }
            }
            c if c.is_ascii_digit() => {
                let mut num = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        num.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = num.parse::<f64>().map_err(|_| {
                    LottieError::unsupported_expression(format!("malformed number `{num}`"))
                })?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' || d == '$' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(LottieError::unsupported_expression(format!(
                    "unexpected character `{other}`"
                )))
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_bodymovin_wrapper() {
        let tokens = tokenize("var $bm_rt;\n$bm_rt = thisComp.layer(2);").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("var".into()),
                Token::Ident("$bm_rt".into()),
                Token::Semi,
                Token::Ident("$bm_rt".into()),
                Token::Assign,
                Token::Ident("thisComp".into()),
                Token::Dot,
                Token::Ident("layer".into()),
                Token::LParen,
                Token::Number(2.0),
                Token::RParen,
                Token::Semi,
            ]
        );
    }

    #[test]
    fn strings_and_escapes() {
        let tokens = tokenize(r#"'it\'s' "Fill 3""#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Str("it's".into()), Token::Str("Fill 3".into())]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = tokenize("// note\n/* block */ x").unwrap();
        assert_eq!(tokens, vec![Token::Ident("x".into())]);
    }

    #[test]
    fn rejects_operators() {
        assert!(tokenize("a + b").is_err());
        assert!(tokenize("a == b").is_err());
        assert!(tokenize("'open").is_err());
    }
}
