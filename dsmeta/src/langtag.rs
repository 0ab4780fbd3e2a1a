//! Language tag recognition.
//!
//! The validator only needs a yes/no answer per code, so the capability is a
//! small trait. [`Bcp47`] is the default implementation: a well-formedness check
//! against the RFC 5646 grammar. It does not consult the IANA subtag registry.

use std::sync::LazyLock;

use regex::Regex;

/// Reference quoted in language tag errors.
pub const BCP47_REFERENCE_URL: &str = "https://www.rfc-editor.org/info/bcp47";

/// Decides whether a string is an acceptable language code.
pub trait LanguageTagChecker: Send + Sync {
    /// Whether `code` is a valid language tag.
    fn is_valid_language_tag(&self, code: &str) -> bool;

    /// Where users can look up valid tags.
    fn reference(&self) -> &str {
        BCP47_REFERENCE_URL
    }
}

/// RFC 5646 `langtag` production, case-insensitive.
static LANGTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"(?i)^",
        r"(?:[a-z]{2,3}(?:-[a-z]{3}){0,3}|[a-z]{4}|[a-z]{5,8})", // language, optional extlangs
        r"(?:-[a-z]{4})?",                                      // script
        r"(?:-(?:[a-z]{2}|[0-9]{3}))?",                         // region
        r"(?:-(?:[a-z0-9]{5,8}|[0-9][a-z0-9]{3}))*",            // variants
        r"(?:-[0-9a-wy-z](?:-[a-z0-9]{2,8})+)*",                // extensions
        r"(?:-x(?:-[a-z0-9]{1,8})+)?",                          // private use
        r"$",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid language tag regex: {err}"),
    }
});

/// RFC 5646 `privateuse` production used as a whole tag.
static PRIVATE_USE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?i)^x(?:-[a-z0-9]{1,8})+$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid private use regex: {err}"),
    }
});

/// Irregular grandfathered tags, which do not match the `langtag` production.
const IRREGULAR_TAGS: &[&str] = &[
    "en-gb-oed",
    "i-ami",
    "i-bnn",
    "i-default",
    "i-enochian",
    "i-hak",
    "i-klingon",
    "i-lux",
    "i-mingo",
    "i-navajo",
    "i-pwn",
    "i-tao",
    "i-tay",
    "i-tsu",
    "sgn-be-fr",
    "sgn-be-nl",
    "sgn-ch-de",
];

/// Well-formedness checker for BCP 47 language tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcp47;

impl LanguageTagChecker for Bcp47 {
    fn is_valid_language_tag(&self, code: &str) -> bool {
        if code.is_empty() {
            return false;
        }
        LANGTAG_PATTERN.is_match(code)
            || PRIVATE_USE_PATTERN.is_match(code)
            || IRREGULAR_TAGS
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(code))
    }
}
