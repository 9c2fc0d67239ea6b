use serde::Serialize;

use crate::config::Marker;
use crate::options::OptionSpec;

/// Result of processing the chosen option's parameter.
///
/// Reported directly as the [`Status`] of a step, or inside
/// [`Status::Ambiguous`] when the option was picked from several matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamCheck {
    /// The parameter (if any) was found where the grammar allows it.
    Ok,
    /// A parameter was required but the argument vector ran out.
    MissingParam,
    /// A parameter was required but no enabled mechanism could supply it.
    NoParam,
    /// An inline parameter was given to an option that takes none.
    HadParam,
}

/// Classification of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    /// An option or a positional argument was found.
    Ok,
    /// The argument vector is exhausted.
    End,
    /// A marker-introduced token did not resolve to an enabled option.
    BadOption,
    /// A required parameter was missing because the input ran out.
    MissingParam,
    /// A required parameter was unreachable under the current grammar.
    NoParam,
    /// A parameter was supplied to an option that takes none.
    HadParam,
    /// A second bundled short option tried to take the following argument.
    MultipleMixed,
    /// An abbreviation matched several options; the first in table order
    /// was chosen and processed.
    Ambiguous {
        /// Parameter result for the chosen option.
        check: ParamCheck,
        /// How many further options the abbreviation matched.
        others: usize,
    },
    /// The session cannot continue; stop stepping.
    Fatal,
}

/// The four classification bands a [`Status`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Stop stepping.
    Fatal,
    /// Something was wrong with this token; stepping may continue.
    Error,
    /// An option or positional argument.
    Ok,
    /// Input exhausted.
    Termination,
}

impl Status {
    /// The band this status belongs to.
    pub fn band(self) -> Band {
        match self {
            Status::Fatal => Band::Fatal,
            Status::BadOption
            | Status::MissingParam
            | Status::NoParam
            | Status::HadParam
            | Status::MultipleMixed
            | Status::Ambiguous { .. } => Band::Error,
            Status::Ok => Band::Ok,
            Status::End => Band::Termination,
        }
    }

    /// Fatal or non-fatal error.
    pub fn is_error(self) -> bool {
        matches!(self.band(), Band::Fatal | Band::Error)
    }

    /// Whether the caller must abandon the session.
    pub fn is_fatal(self) -> bool {
        self.band() == Band::Fatal
    }

    /// Whether this is an error the caller may step past.
    pub fn is_nonfatal(self) -> bool {
        self.band() == Band::Error
    }

    /// An option or positional argument was found.
    pub fn is_ok(self) -> bool {
        self.band() == Band::Ok
    }

    /// The argument vector is exhausted.
    pub fn is_termination(self) -> bool {
        self.band() == Band::Termination
    }

    /// The parameter result, looking through an ambiguous match.
    pub fn param_check(self) -> Option<ParamCheck> {
        match self {
            Status::Ok => Some(ParamCheck::Ok),
            Status::MissingParam => Some(ParamCheck::MissingParam),
            Status::NoParam => Some(ParamCheck::NoParam),
            Status::HadParam => Some(ParamCheck::HadParam),
            Status::Ambiguous { check, .. } => Some(check),
            _ => None,
        }
    }
}

impl From<ParamCheck> for Status {
    fn from(check: ParamCheck) -> Self {
        match check {
            ParamCheck::Ok => Status::Ok,
            ParamCheck::MissingParam => Status::MissingParam,
            ParamCheck::NoParam => Status::NoParam,
            ParamCheck::HadParam => Status::HadParam,
        }
    }
}

/// What one step produced.
///
/// Borrowed text points into the argument vector; the option reference
/// points into the option table.
#[derive(Debug, Serialize)]
pub struct Outcome<'a, 't, T> {
    /// Classification.
    pub status: Status,
    /// The resolved option. `None` for positional arguments, termination,
    /// and tokens that did not resolve.
    pub option: Option<&'t OptionSpec<T>>,
    /// The option's parameter, the positional argument itself, or the
    /// unresolved text for [`Status::BadOption`].
    pub param: Option<&'a str>,
    /// Marker that introduced the option. `None` for positional arguments
    /// and termination.
    pub marker: Option<Marker>,
    /// Index of the argument the outcome was produced from.
    pub index: Option<usize>,
    /// Long option name as typed, without the marker or an inline
    /// parameter. `None` for short options and positional arguments.
    pub name: Option<&'a str>,
}

// Manual impls: derives would require `T: Clone`/`T: PartialEq` even though
// only a reference to `T` is held.
impl<T> Clone for Outcome<'_, '_, T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            option: self.option,
            param: self.param,
            marker: self.marker.clone(),
            index: self.index,
            name: self.name,
        }
    }
}

impl<T> PartialEq for Outcome<'_, '_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && match (self.option, other.option) {
                (Some(a), Some(b)) => std::ptr::eq(a, b),
                (None, None) => true,
                _ => false,
            }
            && self.param == other.param
            && self.marker == other.marker
            && self.index == other.index
            && self.name == other.name
    }
}

impl<'a, 't, T> Outcome<'a, 't, T> {
    pub(crate) fn new(status: Status) -> Self {
        Self {
            status,
            option: None,
            param: None,
            marker: None,
            index: None,
            name: None,
        }
    }

    pub(crate) fn end() -> Self {
        Self::new(Status::End)
    }

    pub(crate) fn positional(arg: &'a str, index: usize) -> Self {
        Self {
            param: Some(arg),
            index: Some(index),
            ..Self::new(Status::Ok)
        }
    }

    /// A positional argument: ok, with no option and no marker.
    pub fn is_positional(&self) -> bool {
        self.status == Status::Ok && self.option.is_none()
    }

    /// An option occurrence was resolved (whatever the status).
    pub fn is_option(&self) -> bool {
        self.option.is_some()
    }
}
