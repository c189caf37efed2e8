use std::str::SplitAsciiWhitespace;

/// Whitespace-delimited token cursor over P3 text.
///
/// Values are handed out as raw strings so each decoding stage can report a
/// missing or malformed token with its own error kind.
pub struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokens { inner: text.split_ascii_whitespace() }
    }

    /// Next raw token, if any.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    /// Next token parsed as an integer.
    ///
    /// `Err` carries what was found instead: the token itself, or
    /// `"end of input"` when the text ran out.
    pub fn next_int(&mut self) -> Result<i32, String> {
        match self.inner.next() {
            Some(token) => token.parse::<i32>().map_err(|_| token.to_owned()),
            None => Err("end of input".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_ascii_whitespace() {
        let mut t = Tokens::new("P3\n2\t3\r\n  255 ");
        assert_eq!(t.next_token(), Some("P3"));
        assert_eq!(t.next_int(), Ok(2));
        assert_eq!(t.next_int(), Ok(3));
        assert_eq!(t.next_int(), Ok(255));
        assert_eq!(t.next_int(), Err("end of input".to_owned()));
    }

    #[test]
    fn malformed_integer_reports_the_token() {
        let mut t = Tokens::new("12x -4 99999999999");
        assert_eq!(t.next_int(), Err("12x".to_owned()));
        assert_eq!(t.next_int(), Ok(-4));
        assert_eq!(t.next_int(), Err("99999999999".to_owned()));
    }
}
