//! Generic pattern translation tests

use crate::app::views::pattern::{compile_generic, generic_to_regex};

#[test]
fn double_asterisk_matches_everything() {
    assert_eq!(generic_to_regex("**", false), ".*$");
    assert_eq!(generic_to_regex("", false), ".*$");
}

#[test]
fn percent_matches_exactly_one_name_character() {
    let regex = compile_generic("SYS%", false).expect("compile");
    assert!(regex.is_match("SYS1"));
    assert!(regex.is_match("SYSA"));
    assert!(!regex.is_match("SYS"));
    assert!(!regex.is_match("SYS12"));
}

#[test]
fn asterisk_stays_within_a_qualifier() {
    let regex = compile_generic("SYS1.*", false).expect("compile");
    assert!(regex.is_match("SYS1.PARMLIB"));
    assert!(!regex.is_match("SYS1.PARMLIB.BACKUP"), "dots are qualifier boundaries");
}

#[test]
fn trailing_double_asterisk_crosses_qualifiers() {
    let regex = compile_generic("SYS1.**", false).expect("compile");
    assert!(regex.is_match("SYS1.PARMLIB"));
    assert!(regex.is_match("SYS1.PARMLIB.BACKUP"));
    assert!(!regex.is_match("SYS2.PARMLIB"));
}

#[test]
fn literal_dots_do_not_match_arbitrary_characters() {
    let regex = compile_generic("A.B", false).expect("compile");
    assert!(regex.is_match("A.B"));
    assert!(!regex.is_match("AXB"));
}

#[test]
fn match_is_anchored_at_both_ends() {
    let regex = compile_generic("PROD.*", false).expect("compile");
    assert!(!regex.is_match("XPROD.DATA"));
}
