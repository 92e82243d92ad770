//! Term syntax used by application resource and descriptor files
//!
//! Covers the data subset of the syntax: atoms, strings, characters,
//! integers (with `Base#Digits`), floats, tuples, lists, binaries, maps,
//! `%` comments, and `.`-terminated forms.

pub mod parser;

pub use parser::{parse_term, parse_terms};

use std::fmt;

/// A parsed term
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(String),
    Integer(i64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    Tuple(Vec<Term>),
    List(Vec<Term>),
    Map(Vec<(Term, Term)>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::String(value.into())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Term::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Value of `{key, Value}` in a property list
    pub fn property(&self, key: &str) -> Option<&Term> {
        self.as_list()?.iter().find_map(|item| match item.as_tuple() {
            Some([k, v]) if k.as_atom() == Some(key) => Some(v),
            _ => None,
        })
    }
}

const RESERVED: &[&str] = &[
    "after", "and", "andalso", "band", "begin", "bnot", "bor", "bsl", "bsr", "bxor", "case",
    "catch", "cond", "div", "else", "end", "fun", "if", "let", "maybe", "not", "of", "or",
    "orelse", "receive", "rem", "try", "when", "xor",
];

/// Whether an atom prints without quotes
pub fn is_bare_atom(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_lower = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_lower
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
        && !RESERVED.contains(&name)
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) if is_bare_atom(a) => f.write_str(a),
            Term::Atom(a) => {
                f.write_str("'")?;
                write_escaped(f, a, '\'')?;
                f.write_str("'")
            }
            Term::Integer(i) => write!(f, "{}", i),
            Term::Float(x) => write!(f, "{:?}", x),
            Term::String(s) => {
                f.write_str("\"")?;
                write_escaped(f, s, '"')?;
                f.write_str("\"")
            }
            Term::Binary(bytes) => {
                let printable = !bytes.is_empty()
                    && bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
                if printable {
                    f.write_str("<<\"")?;
                    write_escaped(f, &String::from_utf8_lossy(bytes), '"')?;
                    f.write_str("\">>")
                } else {
                    let parts: Vec<String> = bytes.iter().map(u8::to_string).collect();
                    write!(f, "<<{}>>", parts.join(","))
                }
            }
            Term::Tuple(items) => {
                f.write_str("{")?;
                write_seq(f, items)?;
                f.write_str("}")
            }
            Term::List(items) => {
                f.write_str("[")?;
                write_seq(f, items)?;
                f.write_str("]")
            }
            Term::Map(entries) => {
                f.write_str("#{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{} => {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}
