//! Formula tokenizer.

use super::FormulaError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => format!("column {name}"),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

/// A token and the byte offset it starts at.
pub(crate) type Spanned = (Token, usize);

pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let single = match ch {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => None,
        };
        if let Some(token) = single {
            chars.next();
            tokens.push((token, pos));
            continue;
        }

        if ch == '`' {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == '`' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if !closed {
                return Err(FormulaError::UnterminatedQuote { position: pos });
            }
            if name.is_empty() {
                return Err(FormulaError::EmptyColumnName { position: pos });
            }
            tokens.push((Token::Ident(name), pos));
        } else if ch.is_ascii_digit() || ch == '.' {
            let mut text = String::new();
            while let Some(&(_, c)) = chars.peek() {
                let exponent_sign =
                    (c == '+' || c == '-') && text.ends_with(['e', 'E']);
                if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = text.parse::<f64>().map_err(|_| FormulaError::InvalidNumber {
                text: text.clone(),
                position: pos,
            })?;
            tokens.push((Token::Number(value), pos));
        } else if ch.is_alphabetic() || ch == '_' {
            let mut name = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((Token::Ident(name), pos));
        } else {
            return Err(FormulaError::UnexpectedChar { ch, position: pos });
        }
    }
    Ok(tokens)
}
