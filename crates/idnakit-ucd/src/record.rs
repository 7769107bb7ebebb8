//! Line records of UCD property files

use std::iter::Enumerate;
use std::str::Lines;

use idnakit_core::{CodePointRange, IdnaError, IdnaResult, MAX_CODE_POINT};
use smallvec::SmallVec;

/// Values following the code point key
pub type Fields<'a> = SmallVec<[&'a str; 4]>;

/// One non-comment line: `key ; field ; field # comment`
#[derive(Clone, Debug)]
pub struct Record<'a> {
    pub line_number: usize,
    pub line: &'a str,
    pub range: CodePointRange,
    pub fields: Fields<'a>,
}

impl<'a> Record<'a> {
    pub fn field(&self, idx: usize) -> Option<&'a str> {
        self.fields.get(idx).copied()
    }

    /// Field `idx`, or an `InvalidFileFormat` naming this line.
    pub fn require(&self, source: &str, idx: usize) -> IdnaResult<&'a str> {
        match self.field(idx) {
            Some(f) if !f.is_empty() => Ok(f),
            _ => Err(invalid_line(source, self.line_number, self.line)),
        }
    }
}

pub fn invalid_line(source: &str, line_number: usize, line: &str) -> IdnaError {
    IdnaError::InvalidFileFormat {
        source_name: source.to_string(),
        line_number,
        line: line.to_string(),
    }
}

/// Parse a bare hex code point such as `1F600`.
pub fn parse_hex(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let cp = u32::from_str_radix(s, 16).ok()?;
    (cp <= MAX_CODE_POINT).then_some(cp)
}

/// Parse `XXXX` or `XXXX..YYYY`.
pub fn parse_key(key: &str) -> Option<CodePointRange> {
    match key.split_once("..") {
        Some((first, last)) => Some(CodePointRange::new(
            parse_hex(first.trim())?,
            parse_hex(last.trim())?,
        )),
        None => parse_hex(key.trim()).map(CodePointRange::point),
    }
}

/// Iterator over the records of one file.
pub struct Records<'a> {
    source: &'a str,
    lines: Enumerate<Lines<'a>>,
}

pub fn records<'a>(source: &'a str, text: &'a str) -> Records<'a> {
    Records {
        source,
        lines: text.lines().enumerate(),
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = IdnaResult<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, line) in self.lines.by_ref() {
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            }
            .trim();
            if content.is_empty() {
                continue;
            }

            let mut parts = content.split(';').map(str::trim);
            let key = parts.next().unwrap_or_default();
            let Some(range) = parse_key(key) else {
                return Some(Err(invalid_line(self.source, idx + 1, line)));
            };
            return Some(Ok(Record {
                line_number: idx + 1,
                line,
                range,
                fields: parts.collect(),
            }));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("0041"), Some(CodePointRange::point(0x41)));
        assert_eq!(parse_key("0030..0039"), Some(CodePointRange::new(0x30, 0x39)));
        assert_eq!(parse_key("10FFFF"), Some(CodePointRange::point(0x10FFFF)));
        assert_eq!(parse_key("110000"), None);
        assert_eq!(parse_key("+41"), None);
        assert_eq!(parse_key("0041.."), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_records_skip_comments() {
        let text = "# Scripts\n\n0041..005A    ; Latin # L&  [26]\n00B7          ; Common\n";
        let recs: Vec<_> = records("Scripts.txt", text).collect::<IdnaResult<_>>().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].range, CodePointRange::new(0x41, 0x5A));
        assert_eq!(recs[0].field(0), Some("Latin"));
        assert_eq!(recs[0].line_number, 3);
        assert_eq!(recs[1].require("Scripts.txt", 0).unwrap(), "Common");
        assert!(recs[1].require("Scripts.txt", 1).is_err());
    }

    #[test]
    fn test_records_report_bad_line() {
        let text = "0041 ; Latin\nZZZZ ; Latin\n";
        let err = records("Scripts.txt", text).nth(1).unwrap().unwrap_err();
        match err {
            IdnaError::InvalidFileFormat { source_name, line_number, line } => {
                assert_eq!(source_name, "Scripts.txt");
                assert_eq!(line_number, 2);
                assert_eq!(line, "ZZZZ ; Latin");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
