//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Codes are stable: a code is never reused for a
//! different condition.

/// The session or grammar was unusable; the caller must stop stepping.
pub const INTERNAL: &str = "OPT0001";

/// A token introduced by a marker did not resolve to any enabled option.
pub const BAD_OPTION: &str = "OPT1001";

/// An abbreviated long option matched more than one enabled option.
pub const AMBIGUOUS_OPTION: &str = "OPT1002";

/// A required parameter was missing because the argument vector ran out.
pub const MISSING_PARAM: &str = "OPT1101";

/// A required parameter could not be supplied by any enabled mechanism.
pub const NO_PARAM: &str = "OPT1102";

/// A parameter was attached to an option that takes none.
pub const HAD_PARAM: &str = "OPT1103";

/// More than one bundled short option claimed the following argument.
pub const MULTIPLE_MIXED: &str = "OPT1104";

/// Every known code, in ascending order.
pub const ALL: &[&str] = &[
    INTERNAL,
    BAD_OPTION,
    AMBIGUOUS_OPTION,
    MISSING_PARAM,
    NO_PARAM,
    HAD_PARAM,
    MULTIPLE_MIXED,
];

pub(crate) fn explain(id: &str) -> Option<&'static str> {
    match id {
        INTERNAL => Some(
            "The tokenizer was driven with an unusable session or grammar (for example an empty \
             parameter delimiter). Processing cannot continue safely; report and abort.",
        ),
        BAD_OPTION => Some(
            "The argument starts with an option marker but names no enabled option. For short \
             options only the offending character is reported; the rest of the bundle is still \
             processed on the next step.",
        ),
        AMBIGUOUS_OPTION => Some(
            "Long option abbreviations are enabled and the typed prefix matches several options. \
             The first matching option in table order was chosen and fully processed, so callers \
             may accept it if table order expresses their preference.",
        ),
        MISSING_PARAM => Some(
            "The option requires a parameter, but the argument vector ended before one could be \
             taken from the following argument.",
        ),
        NO_PARAM => Some(
            "The long option requires a parameter, none was attached with the delimiter, and \
             separate-argument parameters are disabled.",
        ),
        HAD_PARAM => Some(
            "A parameter was attached with the delimiter to a long option that does not take \
             one. The option itself was recognised.",
        ),
        MULTIPLE_MIXED => Some(
            "With mixed short parameters enabled, at most one option in a bundle may take its \
             parameter from the following argument; a second one asked for it as well.",
        ),
        _ => None,
    }
}
