//! Recognizes `thisComp.layer(x).effect(y)(z)`, optionally wrapped in the
//! `var $bm_rt; $bm_rt = ...;` statements Bodymovin exports. Anything else is
//! rejected as unsupported; nothing is ever executed.

use super::lexer::{tokenize, Token};
use crate::error::{LottieError, LottieResult};

/// Argument to `thisComp.layer(...)`.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerSelector {
    /// Position among the effect-bearing layers.
    Index(f64),
    /// First effect-bearing layer with this `nm`.
    Name(String),
}

/// A parsed `layer(..).effect(..)(..)` chain.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectAccessor {
    pub layer: LayerSelector,
    pub effect: String,
    pub property: String,
}

/// Name Bodymovin assigns the expression result to.
const RESULT_VAR: &str = "$bm_rt";

pub fn parse(code: &str) -> LottieResult<EffectAccessor> {
    let tokens = tokenize(code)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> LottieResult<()> {
        match self.bump() {
            Some(token) if token == expected => Ok(()),
            other => Err(unexpected(&format!("{expected:?}"), other.as_ref())),
        }
    }

    fn expect_ident(&mut self, name: &str) -> LottieResult<()> {
        match self.bump() {
            Some(Token::Ident(ident)) if ident == name => Ok(()),
            other => Err(unexpected(name, other.as_ref())),
        }
    }

    fn expect_str(&mut self) -> LottieResult<String> {
        match self.bump() {
            Some(Token::Str(s)) => Ok(s),
            other => Err(unexpected("a string literal", other.as_ref())),
        }
    }

    fn skip_semis(&mut self) {
        while self.peek() == Some(&Token::Semi) {
            self.pos += 1;
        }
    }

    fn program(&mut self) -> LottieResult<EffectAccessor> {
        let mut result = None;
        self.skip_semis();
        while self.peek().is_some() {
            if let Some(accessor) = self.statement()? {
                result = Some(accessor);
            }
            self.skip_semis();
        }
        result.ok_or_else(|| {
            LottieError::unsupported_expression("no `thisComp.layer(..)` accessor found")
        })
    }

    fn statement(&mut self) -> LottieResult<Option<EffectAccessor>> {
        let is_var = matches!(self.peek(), Some(Token::Ident(kw)) if kw == "var");
        let is_assignment = matches!(
            (self.peek(), self.peek_at(1)),
            (Some(Token::Ident(_)), Some(Token::Assign))
        );

        if is_var {
            self.pos += 1;
            self.declarations()
        } else if is_assignment {
            self.assignment().map(Some)
        } else {
            self.chain().map(Some)
        }
    }

    // var a, $bm_rt = <chain>
    fn declarations(&mut self) -> LottieResult<Option<EffectAccessor>> {
        let mut result = None;
        loop {
            if self.peek_at(1) == Some(&Token::Assign) {
                result = Some(self.assignment()?);
            } else {
                match self.bump() {
                    Some(Token::Ident(_)) => {}
                    other => return Err(unexpected("a variable name", other.as_ref())),
                }
            }
            if self.peek() == Some(&Token::Comma) {
                self.pos += 1;
            } else {
                return Ok(result);
            }
        }
    }

    fn assignment(&mut self) -> LottieResult<EffectAccessor> {
        match self.bump() {
            Some(Token::Ident(name)) if name == RESULT_VAR => {}
            other => return Err(unexpected(RESULT_VAR, other.as_ref())),
        }
        self.expect(Token::Assign)?;
        self.chain()
    }

    fn chain(&mut self) -> LottieResult<EffectAccessor> {
        self.expect_ident("thisComp")?;
        self.expect(Token::Dot)?;
        self.expect_ident("layer")?;
        self.expect(Token::LParen)?;
        let layer = match self.bump() {
            Some(Token::Number(n)) => LayerSelector::Index(n),
            Some(Token::Str(s)) => LayerSelector::Name(s),
            other => {
                return Err(unexpected(
                    "a layer index or name",
                    other.as_ref(),
                ))
            }
        };
        self.expect(Token::RParen)?;
        self.expect(Token::Dot)?;
        self.expect_ident("effect")?;
        self.expect(Token::LParen)?;
        let effect = self.expect_str()?;
        self.expect(Token::RParen)?;
        self.expect(Token::LParen)?;
        let property = self.expect_str()?;
        self.expect(Token::RParen)?;

        Ok(EffectAccessor {
            layer,
            effect,
            property,
        })
    }
}

fn unexpected(expected: &str, found: Option<&Token>) -> LottieError {
    match found {
        Some(token) => {
            LottieError::unsupported_expression(format!("expected {expected}, found {token:?}"))
        }
        None => LottieError::unsupported_expression(format!(
            "expected {expected}, found end of input"
        )),
    }
}
