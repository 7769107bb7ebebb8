//! UnicodeData.txt
//!
//! Fields used: 0 code point, 1 name, 2 general category, 3 canonical
//! combining class, 4 bidi class, 5 decomposition. A `<..., First>` line
//! followed by a `<..., Last>` line assigns the Last line's properties to
//! the whole range.

use std::sync::Arc;

use idnakit_core::{CodePointRange, GeneralCategory, IdnaError, IdnaResult};
use smallvec::SmallVec;

use crate::composition::{DecompositionTable, Mapping};
use crate::map::{Interner, PropertyMap, PropertyMapBuilder};
use crate::record::{invalid_line, parse_hex};

pub const UNICODE_DATA: &str = "UnicodeData.txt";

/// Tables read from UnicodeData.txt
#[derive(Debug, Default)]
pub struct UnicodeDataTables {
    /// Every listed code point, in file order
    pub assigned: Vec<CodePointRange>,
    pub general_category: PropertyMap<GeneralCategory>,
    pub canonical_class: PropertyMap<u8>,
    pub bidi_class: PropertyMap<Arc<str>>,
    pub decompositions: DecompositionTable,
}

pub fn parse_unicode_data(text: &str, interner: &mut Interner) -> IdnaResult<UnicodeDataTables> {
    let mut assigned = Vec::new();
    let mut general_category = PropertyMapBuilder::new();
    let mut canonical_class = PropertyMapBuilder::new();
    let mut bidi_class = PropertyMapBuilder::new();
    let mut decompositions = DecompositionTable::new();

    let mut range_start: Option<u32> = None;
    let mut last_line = (0, "");

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        last_line = (line_number, line);
        let invalid = || invalid_line(UNICODE_DATA, line_number, line);

        let fields: SmallVec<[&str; 16]> = trimmed.split(';').map(str::trim).collect();
        if fields.len() < 6 {
            return Err(invalid());
        }
        let cp = parse_hex(fields[0]).ok_or_else(invalid)?;

        let name = fields[1];
        let range = if name.ends_with(", First>") {
            if range_start.replace(cp).is_some() {
                return Err(invalid());
            }
            continue;
        } else if name.ends_with(", Last>") {
            let first = range_start.take().ok_or_else(invalid)?;
            CodePointRange::new(first, cp)
        } else {
            CodePointRange::point(cp)
        };

        let gc = GeneralCategory::from_abbr(fields[2]).ok_or_else(invalid)?;
        let ccc = parse_canonical_class(cp, fields[3]).map_err(|e| e.unwrap_or_else(invalid))?;

        assigned.push(range);
        general_category.insert(range, gc);
        canonical_class.insert(range, ccc);
        if !fields[4].is_empty() {
            bidi_class.insert(range, interner.intern(fields[4]));
        }
        if !fields[5].is_empty() {
            let (mapping, compatibility) =
                parse_decomposition(cp, fields[5]).map_err(|e| e.unwrap_or_else(invalid))?;
            decompositions.insert(cp, &mapping, compatibility);
        }
    }

    if range_start.is_some() {
        return Err(invalid_line(UNICODE_DATA, last_line.0, last_line.1));
    }

    Ok(UnicodeDataTables {
        assigned,
        general_category: general_category.build(),
        canonical_class: canonical_class.build(),
        bidi_class: bidi_class.build(),
        decompositions,
    })
}

/// `Err(None)` means a plain format error on the current line.
fn parse_canonical_class(cp: u32, field: &str) -> Result<u8, Option<IdnaError>> {
    let Ok(value) = field.parse::<u32>() else {
        return Err(None);
    };
    u8::try_from(value).map_err(|_| {
        Some(IdnaError::BadCanonicalClass {
            code_point: cp,
            value: field.to_string(),
        })
    })
}

/// Returns the mapping and whether it is a compatibility decomposition.
fn parse_decomposition(cp: u32, field: &str) -> Result<(Mapping, bool), Option<IdnaError>> {
    let (body, compatibility) = match field.strip_prefix('<') {
        Some(tagged) => match tagged.find('>') {
            Some(end) => (&tagged[end + 1..], true),
            None => return Err(Some(IdnaError::BadCompatibilityTag { code_point: cp })),
        },
        None => (field, false),
    };

    let mut mapping = Mapping::new();
    for token in body.split_whitespace() {
        match parse_hex(token) {
            Some(cp) => mapping.push(cp),
            None => return Err(None),
        }
    }

    let valid_len = if compatibility {
        !mapping.is_empty()
    } else {
        (1..=2).contains(&mapping.len())
    };
    if !valid_len {
        return Err(Some(IdnaError::BadDecomposition { code_point: cp }));
    }
    Ok((mapping, compatibility))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
00A0;NO-BREAK SPACE;Zs;0;CS;<noBreak> 0020;;;;N;NON-BREAKING SPACE;;;;
00C5;LATIN CAPITAL LETTER A WITH RING ABOVE;Lu;0;L;0041 030A;;;;N;LATIN CAPITAL LETTER A RING;;;00E5;
030A;COMBINING RING ABOVE;Mn;230;NSM;;;;;N;NON-SPACING RING ABOVE;;;;
4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;
9FFF;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;
";

    #[test]
    fn test_parse_sample() {
        let mut interner = Interner::new();
        let t = parse_unicode_data(SAMPLE, &mut interner).unwrap();

        assert_eq!(t.assigned.len(), 5);
        assert_eq!(t.assigned[4], CodePointRange::new(0x4E00, 0x9FFF));
        assert_eq!(t.general_category.get(0x5000), Some(&GeneralCategory::OtherLetter));
        assert_eq!(t.general_category.get(0x030A), Some(&GeneralCategory::NonspacingMark));
        assert_eq!(t.canonical_class.get(0x030A), Some(&230));
        assert_eq!(t.canonical_class.get(0x0041), Some(&0));
        assert_eq!(t.canonical_class.get(0x0042), None);
        assert_eq!(t.bidi_class.get(0x00A0).map(|b| &**b), Some("CS"));
        assert_eq!(t.decompositions.canonical(0x00C5), Some(&[0x0041, 0x030A][..]));
        assert!(t.decompositions.is_compatibility(0x00A0));
    }

    #[test]
    fn test_canonical_class_out_of_range() {
        let err = parse_unicode_data("0300;GRAVE;Mn;256;NSM;;;;;N;;;;;\n", &mut Interner::new())
            .unwrap_err();
        assert!(matches!(err, IdnaError::BadCanonicalClass { code_point: 0x300, .. }));

        let err = parse_unicode_data("0300;GRAVE;Mn;x;NSM;;;;;N;;;;;\n", &mut Interner::new())
            .unwrap_err();
        assert!(matches!(err, IdnaError::InvalidFileFormat { line_number: 1, .. }));
    }

    #[test]
    fn test_bad_decompositions() {
        let err = parse_unicode_data("00A0;NBSP;Zs;0;CS;<noBreak 0020;;;;N;;;;;\n", &mut Interner::new())
            .unwrap_err();
        assert!(matches!(err, IdnaError::BadCompatibilityTag { code_point: 0xA0 }));

        let err = parse_unicode_data("01C4;DZ;Lu;0;L;0044 005A 030C;;;;N;;;;;\n", &mut Interner::new())
            .unwrap_err();
        assert!(matches!(err, IdnaError::BadDecomposition { code_point: 0x1C4 }));
    }

    #[test]
    fn test_unterminated_range() {
        let err = parse_unicode_data("4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;\n", &mut Interner::new())
            .unwrap_err();
        assert!(matches!(err, IdnaError::InvalidFileFormat { .. }));

        let err = parse_unicode_data("9FFF;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;\n", &mut Interner::new())
            .unwrap_err();
        assert!(matches!(err, IdnaError::InvalidFileFormat { line_number: 1, .. }));
    }

    #[test]
    fn test_nested_range_start() {
        let text = "\
4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;
AC00;<Hangul Syllable, First>;Lo;0;L;;;;;N;;;;;
D7A3;<Hangul Syllable, Last>;Lo;0;L;;;;;N;;;;;
";
        let err = parse_unicode_data(text, &mut Interner::new()).unwrap_err();
        match err {
            IdnaError::InvalidFileFormat { line_number, line, .. } => {
                assert_eq!(line_number, 2);
                assert!(line.starts_with("AC00;"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
