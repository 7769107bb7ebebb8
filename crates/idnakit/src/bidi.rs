//! RFC 5893 Bidi rule
//!
//! A domain is a Bidi domain when any of its labels holds an R, AL or AN
//! code point. Every label of such a domain must then pass [`check_bidi`].

use idnakit_core::{IdnaError, IdnaResult};

const RTL_CLASSES: [&str; 10] = ["R", "AL", "AN", "EN", "ES", "CS", "ET", "ON", "BN", "NSM"];
const LTR_CLASSES: [&str; 8] = ["L", "EN", "ES", "CS", "ET", "ON", "BN", "NSM"];
const RTL_ENDINGS: [&str; 4] = ["R", "AL", "EN", "AN"];
const LTR_ENDINGS: [&str; 2] = ["L", "EN"];

/// True if some code point is right-to-left (R, AL or AN).
pub fn has_rtl<'a>(cps: &[u32], bidi_class: impl Fn(u32) -> &'a str) -> bool {
    cps.iter()
        .any(|&cp| matches!(bidi_class(cp), "R" | "AL" | "AN"))
}

/// Apply conditions 1 to 6 to one label of a Bidi domain.
///
/// The label direction comes from its first code point: L makes it LTR,
/// R or AL makes it RTL, anything else breaks condition 1.
pub fn check_bidi<'a>(cps: &[u32], bidi_class: impl Fn(u32) -> &'a str) -> IdnaResult<()> {
    let violation = |rule, code_point| IdnaError::BidiRuleViolation { rule, code_point };
    let Some(&first) = cps.first() else {
        return Err(IdnaError::EmptyLabel);
    };
    let rtl = match bidi_class(first) {
        "L" => false,
        "R" | "AL" => true,
        _ => return Err(violation(1, first)),
    };
    let (allowed, endings, class_rule, ending_rule): (&[&str], &[&str], u8, u8) = if rtl {
        (&RTL_CLASSES, &RTL_ENDINGS, 2, 3)
    } else {
        (&LTR_CLASSES, &LTR_ENDINGS, 5, 6)
    };

    let (mut arabic_digit, mut european_digit) = (false, false);
    for &cp in cps {
        let class = bidi_class(cp);
        if !allowed.iter().any(|c| *c == class) {
            return Err(violation(class_rule, cp));
        }
        if rtl {
            arabic_digit |= class == "AN";
            european_digit |= class == "EN";
            if arabic_digit && european_digit {
                return Err(violation(4, cp));
            }
        }
    }

    // trailing NSM does not count as the label's end
    let end = cps
        .iter()
        .rev()
        .copied()
        .find(|&cp| bidi_class(cp) != "NSM")
        .unwrap_or(first);
    let end_class = bidi_class(end);
    if endings.iter().any(|c| *c == end_class) {
        Ok(())
    } else {
        Err(violation(ending_rule, end))
    }
}
