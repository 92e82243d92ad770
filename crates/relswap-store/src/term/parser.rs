//! Term reader

#![allow(clippy::result_large_err)]

use crate::errors::{term_parse, Result};
use crate::term::Term;

/// Parse every `.`-terminated form in `src`.
///
/// # Errors
///
/// `ArtifactRead` with the byte offset of the first syntax error.
pub fn parse_terms(src: &str) -> Result<Vec<Term>> {
    let mut parser = Parser { src, pos: 0 };
    let mut forms = Vec::new();
    loop {
        parser.skip_layout();
        if parser.peek().is_none() {
            return Ok(forms);
        }
        forms.push(parser.value()?);
        parser.skip_layout();
        parser.expect('.')?;
        match parser.peek() {
            None | Some('%') => {}
            Some(c) if c.is_whitespace() => {}
            Some(_) => return Err(term_parse(parser.pos, "expected whitespace after '.'")),
        }
    }
}

/// Parse a source holding exactly one form.
///
/// # Errors
///
/// `ArtifactRead` on a syntax error or when there is not exactly one form.
pub fn parse_term(src: &str) -> Result<Term> {
    let mut forms = parse_terms(src)?;
    if forms.len() != 1 {
        return Err(term_parse(0, &format!("expected one form, found {}", forms.len())));
    }
    Ok(forms.remove(0))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, want: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(term_parse(
                self.pos - c.len_utf8(),
                &format!("expected '{}', found '{}'", want, c),
            )),
            None => Err(term_parse(self.pos, &format!("expected '{}', found end of input", want))),
        }
    }

    fn skip_layout(&mut self) {
        while let Some(c) = self.peek() {
            if c == '%' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn value(&mut self) -> Result<Term> {
        self.skip_layout();
        let start = self.pos;
        match self.peek() {
            Some('{') => {
                self.bump();
                Ok(Term::Tuple(self.sequence('}')?))
            }
            Some('[') => {
                self.bump();
                Ok(Term::List(self.sequence(']')?))
            }
            Some('"') => Ok(Term::String(self.strings()?)),
            Some('\'') => {
                self.bump();
                Ok(Term::Atom(self.quoted('\'')?))
            }
            Some('$') => {
                self.bump();
                let c = self.char_literal()?;
                Ok(Term::Integer(c as i64))
            }
            Some('<') if self.peek_second() == Some('<') => self.binary(),
            Some('#') if self.peek_second() == Some('{') => self.map(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_lowercase() => Ok(Term::Atom(self.bare_atom())),
            Some(c) => Err(term_parse(start, &format!("unexpected '{}'", c))),
            None => Err(term_parse(start, "unexpected end of input")),
        }
    }

    fn sequence(&mut self, close: char) -> Result<Vec<Term>> {
        let mut items = Vec::new();
        self.skip_layout();
        if self.peek() == Some(close) {
            self.bump();
            return Ok(items);
        }
        loop {
            items.push(self.value()?);
            self.skip_layout();
            match self.bump() {
                Some(',') => {}
                Some(c) if c == close => return Ok(items),
                _ => {
                    return Err(term_parse(
                        self.pos,
                        &format!("expected ',' or '{}'", close),
                    ))
                }
            }
        }
    }

    fn bare_atom(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '@' {
                self.bump();
            } else {
                break;
            }
        }
        self.src[start..self.pos].to_string()
    }

    /// Adjacent string literals concatenate.
    fn strings(&mut self) -> Result<String> {
        let mut out = String::new();
        while self.peek() == Some('"') {
            self.bump();
            out.push_str(&self.quoted('"')?);
            self.skip_layout();
        }
        Ok(out)
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        let start = self.pos;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(term_parse(start, "unterminated quoted text")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn char_literal(&mut self) -> Result<char> {
        match self.bump() {
            Some('\\') => self.escape(),
            Some(c) => Ok(c),
            None => Err(term_parse(self.pos, "unterminated character literal")),
        }
    }

    fn escape(&mut self) -> Result<char> {
        let at = self.pos;
        let c = self
            .bump()
            .ok_or_else(|| term_parse(at, "unterminated escape"))?;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            's' => ' ',
            'e' => '\u{1b}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            'd' => '\u{7f}',
            'x' => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) && self.pos - start < 2 {
                    self.bump();
                }
                let code = u32::from_str_radix(&self.src[start..self.pos], 16)
                    .map_err(|_| term_parse(at, "bad hex escape"))?;
                char::from_u32(code).ok_or_else(|| term_parse(at, "bad hex escape"))?
            }
            '0'..='7' => {
                let start = self.pos - 1;
                while self.peek().is_some_and(|c| ('0'..='7').contains(&c)) && self.pos - start < 3
                {
                    self.bump();
                }
                let code = u32::from_str_radix(&self.src[start..self.pos], 8)
                    .map_err(|_| term_parse(at, "bad octal escape"))?;
                char::from_u32(code).ok_or_else(|| term_parse(at, "bad octal escape"))?
            }
            other => other,
        };
        Ok(decoded)
    }

    fn digits(&mut self, radix: u32) -> &str {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_digit(radix)) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn number(&mut self) -> Result<Term> {
        let start = self.pos;
        let negative = self.peek() == Some('-');
        if negative {
            self.bump();
        }
        if self.digits(10).is_empty() {
            return Err(term_parse(start, "expected digits"));
        }

        if self.peek() == Some('#') {
            let base: u32 = self.src[start..self.pos]
                .trim_start_matches('-')
                .parse()
                .map_err(|_| term_parse(start, "bad base"))?;
            if !(2..=36).contains(&base) {
                return Err(term_parse(start, "base must be between 2 and 36"));
            }
            self.bump();
            let digits = self.digits(base).to_string();
            let magnitude = i64::from_str_radix(&digits, base)
                .map_err(|_| term_parse(start, "bad based integer"))?;
            return Ok(Term::Integer(if negative { -magnitude } else { magnitude }));
        }

        let is_float = self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit());
        if !is_float {
            return self.src[start..self.pos]
                .parse()
                .map(Term::Integer)
                .map_err(|_| term_parse(start, "integer out of range"));
        }

        self.bump();
        self.digits(10);
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            if self.digits(10).is_empty() {
                return Err(term_parse(start, "bad float exponent"));
            }
        }
        self.src[start..self.pos]
            .parse()
            .map(Term::Float)
            .map_err(|_| term_parse(start, "bad float"))
    }

    fn binary(&mut self) -> Result<Term> {
        let start = self.pos;
        self.bump();
        self.bump();
        let mut bytes = Vec::new();
        self.skip_layout();
        if self.src[self.pos..].starts_with(">>") {
            self.pos += 2;
            return Ok(Term::Binary(bytes));
        }
        loop {
            self.skip_layout();
            match self.value()? {
                Term::String(s) => bytes.extend_from_slice(s.as_bytes()),
                Term::Integer(i) => bytes.push(
                    u8::try_from(i).map_err(|_| term_parse(start, "binary segment out of range"))?,
                ),
                _ => return Err(term_parse(start, "unsupported binary segment")),
            }
            self.skip_layout();
            if self.src[self.pos..].starts_with(">>") {
                self.pos += 2;
                return Ok(Term::Binary(bytes));
            }
            self.expect(',')?;
        }
    }

    fn map(&mut self) -> Result<Term> {
        self.bump();
        self.bump();
        let mut entries = Vec::new();
        self.skip_layout();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(Term::Map(entries));
        }
        loop {
            let key = self.value()?;
            self.skip_layout();
            if !self.src[self.pos..].starts_with("=>") {
                return Err(term_parse(self.pos, "expected '=>'"));
            }
            self.pos += 2;
            let value = self.value()?;
            entries.push((key, value));
            self.skip_layout();
            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(Term::Map(entries)),
                _ => return Err(term_parse(self.pos, "expected ',' or '}'")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relswap_core::errors::ExErrorKind;

    #[test]
    fn test_application_resource() {
        let src = r#"
            %% generated
            {application, my_app,
             [{description, "An app"},
              {vsn, "0.0.2"},
              {modules, [a, b, 'C.d']},
              {registered, []},
              {env, [{port, 8080}, {ratio, 0.5}]}]}.
        "#;

        let term = parse_term(src).unwrap();
        let items = term.as_tuple().unwrap();
        assert_eq!(items[0].as_atom(), Some("application"));
        assert_eq!(items[1].as_atom(), Some("my_app"));
        assert_eq!(items[2].property("vsn").and_then(Term::as_str), Some("0.0.2"));
    }

    #[test]
    fn test_numbers() {
        let terms = parse_terms("42. -7. 16#ff. 2#101. 1.5e3. $a. $\\n.").unwrap();
        assert_eq!(
            terms,
            vec![
                Term::Integer(42),
                Term::Integer(-7),
                Term::Integer(255),
                Term::Integer(5),
                Term::Float(1500.0),
                Term::Integer(97),
                Term::Integer(10),
            ]
        );
    }

    #[test]
    fn test_binary_and_map() {
        let term = parse_term(r#"#{name => <<"ab">>, raw => <<1,2>>, empty => <<>>}."#).unwrap();
        assert_eq!(
            term,
            Term::Map(vec![
                (Term::atom("name"), Term::Binary(b"ab".to_vec())),
                (Term::atom("raw"), Term::Binary(vec![1, 2])),
                (Term::atom("empty"), Term::Binary(vec![])),
            ])
        );
    }

    #[test]
    fn test_display_reparses() {
        let src = r#"{'Elixir.Mod', "q\"s", [x, {y, 1}], #{k => 2.5}}."#;
        let term = parse_term(src).unwrap();
        let printed = format!("{}.", term);
        assert_eq!(parse_term(&printed).unwrap(), term);
    }

    #[test]
    fn test_adjacent_strings_concatenate() {
        assert_eq!(parse_term(r#""ab" "cd"."#).unwrap(), Term::string("abcd"));
    }

    #[test]
    fn test_missing_dot() {
        let err = parse_terms("{a, b}").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ArtifactRead);
        assert!(err.message().contains("expected '.'"));
    }

    #[test]
    fn test_unterminated_tuple() {
        assert!(parse_terms("{a, b.").is_err());
    }

    #[test]
    fn test_two_forms_rejected_by_parse_term() {
        assert!(parse_term("a. b.").is_err());
    }
}
