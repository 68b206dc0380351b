//! RACF generic pattern translation
//!
//! Profile selections use RACF wildcards: `%` matches one name character,
//! `*` matches any run of name characters within a qualifier, and `**`
//! matches any remainder (including across qualifiers). Translation keeps
//! the original matcher's quirks: qualifier dots are literal, and the name
//! character class is the RACF set (word characters plus `@ # $`).

use regex::Regex;

use crate::{Error, Result};

// placeholders keep already-translated text out of later replacements
const DOT: &str = "\u{1}";
const STAR: &str = "\u{2}";
const LENIENT: &str = "\u{3}";

/// Translate a generic pattern into an anchored regex source string.
///
/// With `lenient` set, literal wildcard characters are also allowed to
/// match a `*` (used when the selection itself may contain wildcards);
/// without it the pattern matches plain dataset/resource names only.
pub fn generic_to_regex(selection: &str, lenient: bool) -> String {
    if selection.is_empty() || selection == "**" {
        return ".*$".to_string();
    }
    let translated = selection
        .replace("*.**", &format!("{DOT}{STAR}"))
        .replace(".**", &format!("\\{DOT}{DOT}{STAR}"))
        .replace('*', &format!("[\\w@#${LENIENT}]{STAR}"))
        .replace('%', "[\\w@#$]")
        .replace('.', "\\.")
        .replace(DOT, ".")
        .replace(STAR, "*")
        .replace(LENIENT, if lenient { "%&*" } else { "" });
    format!("{translated}$")
}

/// Compile a generic pattern into an anchored [`Regex`].
pub fn compile_generic(selection: &str, lenient: bool) -> Result<Regex> {
    let source = format!("^{}", generic_to_regex(selection, lenient));
    Regex::new(&source).map_err(|e| Error::pattern(selection, e.to_string()))
}
