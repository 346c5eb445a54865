//! C# preprocessor pass run before parsing.
//!
//! Conditional sections are resolved the way the compiler does with the
//! given conditional compilation symbols: inactive lines and directive lines
//! are replaced by spaces, so the parser sees only active code while byte
//! offsets and line numbers still match the original text.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*#[ \t]*(?P<name>[A-Za-z]+)(?P<args>[^\r\n]*)").unwrap()
});

struct Section {
    /// Whether the enclosing section is active.
    parent_active: bool,
    /// Whether an earlier branch of this `#if` chain was taken.
    taken: bool,
    active: bool,
}

/// Blank directive lines and the lines of inactive conditional sections.
///
/// `#define` and `#undef` in active code update the symbol set for the rest
/// of the file. Unbalanced directives are tolerated: a stray `#endif` is
/// ignored and an unterminated `#if` runs to the end of the file.
pub fn active_source(code: &str, symbols: &[String]) -> String {
    let mut defined: BTreeSet<String> = symbols.iter().cloned().collect();
    let mut sections: Vec<Section> = Vec::new();
    let mut out = String::with_capacity(code.len());

    for line in code.split_inclusive('\n') {
        let active = sections.last().is_none_or(|s| s.active);

        let Some(caps) = DIRECTIVE_REGEX.captures(line) else {
            if active {
                out.push_str(line);
            } else {
                push_blank(&mut out, line);
            }
            continue;
        };

        let name = caps.name("name").map_or("", |m| m.as_str());
        let args = caps.name("args").map_or("", |m| strip_comment(m.as_str()));

        match name {
            "if" => {
                let taken = active && evaluate(args, &defined);
                sections.push(Section {
                    parent_active: active,
                    taken,
                    active: taken,
                });
            }
            "elif" => {
                if let Some(section) = sections.last_mut() {
                    section.active =
                        section.parent_active && !section.taken && evaluate(args, &defined);
                    section.taken |= section.active;
                }
            }
            "else" => {
                if let Some(section) = sections.last_mut() {
                    section.active = section.parent_active && !section.taken;
                    section.taken = true;
                }
            }
            "endif" => {
                sections.pop();
            }
            "define" if active => {
                defined.insert(args.to_string());
            }
            "undef" if active => {
                defined.remove(args);
            }
            _ => {}
        }

        push_blank(&mut out, line);
    }

    out
}

/// Replace every byte except line breaks with a space.
fn push_blank(out: &mut String, line: &str) {
    for b in line.bytes() {
        out.push(if b == b'\n' { '\n' } else { ' ' });
    }
}

fn strip_comment(args: &str) -> &str {
    args.split("//").next().unwrap_or_default().trim()
}

/// Evaluate a conditional expression such as `DEBUG && !NET48`.
///
/// Malformed expressions evaluate to `false`.
fn evaluate(expression: &str, defined: &BTreeSet<String>) -> bool {
    let tokens = tokenize(expression);
    let mut parser = ConditionParser {
        tokens: &tokens,
        pos: 0,
        defined,
    };
    match parser.or() {
        Some(value) if parser.pos == tokens.len() => value,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Symbol(String),
    Not,
    And,
    Or,
    Eq,
    NotEq,
    Open,
    Close,
}

fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '(' => Token::Open,
            ')' => Token::Close,
            '!' if chars.next_if(|(_, c)| *c == '=').is_some() => Token::NotEq,
            '!' => Token::Not,
            '=' if chars.next_if(|(_, c)| *c == '=').is_some() => Token::Eq,
            '&' if chars.next_if(|(_, c)| *c == '&').is_some() => Token::And,
            '|' if chars.next_if(|(_, c)| *c == '|').is_some() => Token::Or,
            c if c.is_alphanumeric() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some((i, c)) = chars.next_if(|(_, c)| c.is_alphanumeric() || *c == '_') {
                    end = i + c.len_utf8();
                }
                Token::Symbol(expression[start..end].to_string())
            }
            // Unknown character: make the expression malformed.
            _ => Token::Close,
        };
        tokens.push(token);
    }

    tokens
}

struct ConditionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    defined: &'a BTreeSet<String>,
}

impl ConditionParser<'_> {
    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.eat(&Token::Or) {
            value |= self.and()?;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.equality()?;
        while self.eat(&Token::And) {
            value &= self.equality()?;
        }
        Some(value)
    }

    fn equality(&mut self) -> Option<bool> {
        let mut value = self.unary()?;
        loop {
            if self.eat(&Token::Eq) {
                value = value == self.unary()?;
            } else if self.eat(&Token::NotEq) {
                value = value != self.unary()?;
            } else {
                return Some(value);
            }
        }
    }

    fn unary(&mut self) -> Option<bool> {
        if self.eat(&Token::Not) {
            return self.unary().map(|v| !v);
        }
        if self.eat(&Token::Open) {
            let value = self.or()?;
            return self.eat(&Token::Close).then_some(value);
        }
        match self.tokens.get(self.pos)? {
            Token::Symbol(name) => {
                self.pos += 1;
                Some(match name.as_str() {
                    "true" => true,
                    "false" => false,
                    _ => self.defined.contains(name),
                })
            }
            _ => None,
        }
    }
}
