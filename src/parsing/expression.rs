//! Expressions inside pseudocode statements: conditions, values being
//! assigned, loop bounds, and call arguments.

use super::parser::ParsingError;
use crate::language::*;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token<'i> {
    Name(&'i str),
    Number(i64),
    Text(&'i str),
    Symbol(&'static str),
}

#[derive(Clone, Debug)]
struct Lexeme<'i> {
    token: Token<'i>,
    offset: usize,
}

const SYMBOLS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "<", ">", "!", "+", "-", "*", "/", "%", "(", ")", "[", "]", ",", ".",
];

fn tokenize(text: &str, base: usize) -> Result<Vec<Lexeme<'_>>, ParsingError> {
    let mut tokens = Vec::new();
    let mut i = 0;
    let bytes = text.as_bytes();

    while i < text.len() {
        let rest = &text[i..];
        let c = bytes[i] as char;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let offset = base + i;

        if c.is_ascii_digit() {
            let width = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let value = rest[..width]
                .parse::<i64>()
                .map_err(|_| ParsingError::InvalidExpression(offset))?;
            tokens.push(Lexeme {
                token: Token::Number(value),
                offset,
            });
            i += width;
        } else if c.is_ascii_alphabetic() || c == '_' {
            let width = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            tokens.push(Lexeme {
                token: Token::Name(&rest[..width]),
                offset,
            });
            i += width;
        } else if c == '"' || c == '\'' {
            let end = rest[1..]
                .find(c)
                .ok_or(ParsingError::Expected(offset, "closing quote"))?;
            tokens.push(Lexeme {
                token: Token::Text(&rest[1..end + 1]),
                offset,
            });
            i += end + 2;
        } else {
            let symbol = SYMBOLS
                .iter()
                .find(|symbol| rest.starts_with(**symbol))
                .ok_or(ParsingError::InvalidExpression(offset))?;
            tokens.push(Lexeme {
                token: Token::Symbol(*symbol),
                offset,
            });
            i += symbol.len();
        }
    }

    Ok(tokens)
}

/// Parse a complete expression. Nodes are given ids derived from `base`,
/// numbered in the order they are built.
pub(crate) fn parse_expression(text: &str, offset: usize, base: &str) -> Result<ProgramNode, ParsingError> {
    let tokens = tokenize(text, offset)?;
    if tokens.is_empty() {
        return Err(ParsingError::Expected(offset, "an expression"));
    }

    let mut input = Expressions {
        tokens,
        position: 0,
        end: offset + text.len(),
        base,
        count: 0,
    };

    let node = input.read_or()?;
    match input.peek() {
        None => Ok(node),
        Some(_) => Err(ParsingError::InvalidExpression(input.here())),
    }
}

struct Expressions<'i> {
    tokens: Vec<Lexeme<'i>>,
    position: usize,
    end: usize,
    base: &'i str,
    count: usize,
}

impl<'i> Expressions<'i> {
    fn peek(&self) -> Option<&Token<'i>> {
        self.tokens
            .get(self.position)
            .map(|lexeme| &lexeme.token)
    }

    fn here(&self) -> usize {
        self.tokens
            .get(self.position)
            .map(|lexeme| lexeme.offset)
            .unwrap_or(self.end)
    }

    fn bump(&mut self) -> Option<Token<'i>> {
        let token = self
            .tokens
            .get(self.position)
            .map(|lexeme| {
                lexeme
                    .token
                    .clone()
            });
        self.position += 1;
        token
    }

    fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self.peek(), Some(Token::Symbol(s)) if *s == symbol)
    }

    fn is_word(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Name(name)) if *name == word)
    }

    fn expect_symbol(&mut self, symbol: &'static str) -> Result<(), ParsingError> {
        if self.is_symbol(symbol) {
            self.position += 1;
            Ok(())
        } else {
            Err(ParsingError::Expected(self.here(), symbol))
        }
    }

    fn node(&mut self, form: Form, inputs: Vec<ProgramNode>) -> ProgramNode {
        let id = format!("{}.{}", self.base, self.count);
        self.count += 1;
        ProgramNode::new(id, form).with_inputs(inputs)
    }

    fn read_or(&mut self) -> Result<ProgramNode, ParsingError> {
        let mut left = self.read_and()?;
        while self.is_symbol("||") || self.is_word("or") {
            self.position += 1;
            let right = self.read_and()?;
            left = self.node(Form::Combine, vec![left, right]);
        }
        Ok(left)
    }

    fn read_and(&mut self) -> Result<ProgramNode, ParsingError> {
        let mut left = self.read_not()?;
        while self.is_symbol("&&") || self.is_word("and") {
            self.position += 1;
            let right = self.read_not()?;
            left = self.node(Form::Combine, vec![left, right]);
        }
        Ok(left)
    }

    fn read_not(&mut self) -> Result<ProgramNode, ParsingError> {
        if self.is_symbol("!") || self.is_word("not") {
            self.position += 1;
            let inner = self.read_not()?;
            return Ok(self.node(Form::Negate, vec![inner]));
        }
        self.read_compare()
    }

    fn read_compare(&mut self) -> Result<ProgramNode, ParsingError> {
        let left = self.read_additive()?;
        let comparison = ["==", "!=", "<=", ">=", "<", ">"]
            .iter()
            .any(|symbol| self.is_symbol(symbol));

        if comparison {
            self.position += 1;
            let right = self.read_additive()?;
            return Ok(self.node(Form::Compare { source: None }, vec![left, right]));
        }
        Ok(left)
    }

    fn read_additive(&mut self) -> Result<ProgramNode, ParsingError> {
        let mut left = self.read_multiplicative()?;
        while self.is_symbol("+") || self.is_symbol("-") {
            self.position += 1;
            let right = self.read_multiplicative()?;
            left = self.node(Form::Arithmetic, vec![left, right]);
        }
        Ok(left)
    }

    fn read_multiplicative(&mut self) -> Result<ProgramNode, ParsingError> {
        let mut left = self.read_unary()?;
        while self.is_symbol("*") || self.is_symbol("/") || self.is_symbol("%") {
            self.position += 1;
            let right = self.read_unary()?;
            left = self.node(Form::Arithmetic, vec![left, right]);
        }
        Ok(left)
    }

    fn read_unary(&mut self) -> Result<ProgramNode, ParsingError> {
        if self.is_symbol("-") {
            self.position += 1;
            if let Some(Token::Number(n)) = self.peek() {
                let n = *n;
                self.position += 1;
                return Ok(self.node(
                    Form::Literal {
                        value: Literal::Number(-n),
                    },
                    vec![],
                ));
            }
            let inner = self.read_unary()?;
            return Ok(self.node(Form::Arithmetic, vec![inner]));
        }
        self.read_postfix()
    }

    fn read_postfix(&mut self) -> Result<ProgramNode, ParsingError> {
        let mut current = self.read_primary()?;

        loop {
            if self.is_symbol("[") {
                self.position += 1;
                let index = self.read_or()?;
                self.expect_symbol("]")?;
                current = self.node(
                    Form::Call {
                        builtin: Builtin::Get,
                    },
                    vec![current, index],
                );
            } else if self.is_symbol(".") {
                self.position += 1;
                let at = self.here();
                let name = match self.bump() {
                    Some(Token::Name(name)) => name,
                    _ => return Err(ParsingError::Expected(at, "a method name")),
                };
                if !self.is_symbol("(") {
                    return Err(ParsingError::InvalidExpression(at));
                }
                let mut inputs = vec![current];
                inputs.extend(self.read_arguments()?);
                current = self.method(name, inputs);
            } else {
                break;
            }
        }

        Ok(current)
    }

    fn read_primary(&mut self) -> Result<ProgramNode, ParsingError> {
        let at = self.here();
        let token = match self.bump() {
            Some(token) => token,
            None => return Err(ParsingError::Expected(at, "a value")),
        };

        match token {
            Token::Number(n) => Ok(self.node(
                Form::Literal {
                    value: Literal::Number(n),
                },
                vec![],
            )),
            Token::Text(text) => Ok(self.node(
                Form::Literal {
                    value: Literal::Text(text.to_string()),
                },
                vec![],
            )),
            Token::Name("true" | "True") => Ok(self.node(
                Form::Literal {
                    value: Literal::Boolean(true),
                },
                vec![],
            )),
            Token::Name("false" | "False") => Ok(self.node(
                Form::Literal {
                    value: Literal::Boolean(false),
                },
                vec![],
            )),
            Token::Name("and" | "or" | "not") => Err(ParsingError::InvalidExpression(at)),
            Token::Name(name) => {
                if self.is_symbol("(") {
                    let arguments = self.read_arguments()?;
                    Ok(self.function(name, arguments))
                } else {
                    Ok(self.node(
                        Form::Variable {
                            variable: name.to_string(),
                        },
                        vec![],
                    ))
                }
            }
            Token::Symbol("(") => {
                let inner = self.read_or()?;
                self.expect_symbol(")")?;
                Ok(inner)
            }
            Token::Symbol("[") => {
                let mut elements = Vec::new();
                if !self.is_symbol("]") {
                    loop {
                        elements.push(self.read_or()?);
                        if self.is_symbol(",") {
                            self.position += 1;
                        } else {
                            break;
                        }
                    }
                }
                self.expect_symbol("]")?;
                Ok(self.node(
                    Form::Literal {
                        value: Literal::List,
                    },
                    elements,
                ))
            }
            Token::Symbol(_) => Err(ParsingError::InvalidExpression(at)),
        }
    }

    /// Parenthesized, comma separated arguments. The parser is on the
    /// opening parenthesis.
    fn read_arguments(&mut self) -> Result<Vec<ProgramNode>, ParsingError> {
        self.expect_symbol("(")?;

        let mut arguments = Vec::new();
        if self.is_symbol(")") {
            self.position += 1;
            return Ok(arguments);
        }

        loop {
            arguments.push(self.read_or()?);
            if self.is_symbol(",") {
                self.position += 1;
            } else {
                break;
            }
        }
        self.expect_symbol(")")?;

        Ok(arguments)
    }

    fn function(&mut self, name: &str, arguments: Vec<ProgramNode>) -> ProgramNode {
        if let Some(action) = Action::from_name(name) {
            self.node(Form::Action { action }, arguments)
        } else if let Some(builtin) = Builtin::from_function(name) {
            self.node(Form::Call { builtin }, arguments)
        } else {
            self.node(
                Form::ProcedureCall {
                    name: name.to_string(),
                },
                arguments,
            )
        }
    }

    /// A method call; the receiver is the first input.
    fn method(&mut self, name: &str, inputs: Vec<ProgramNode>) -> ProgramNode {
        match Builtin::from_method(name) {
            Some(builtin) => self.node(Form::Call { builtin }, inputs),
            None => self.node(
                Form::ProcedureCall {
                    name: name.to_string(),
                },
                inputs,
            ),
        }
    }
}
