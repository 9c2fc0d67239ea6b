use serde::{Deserialize, Serialize};

/// Whether an option takes a parameter.
///
/// Optional parameters are not supported: an option either always takes a
/// parameter or never does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    /// The option never takes a parameter.
    #[default]
    None,
    /// The option always takes a parameter.
    Required,
}

/// One row of an option table.
///
/// A row with neither a short nor a long form is a disabled placeholder:
/// it is kept in the table (so indices stay stable) but never matched.
/// `payload` belongs to the caller and is never inspected by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct OptionSpec<T = ()> {
    /// Single-character form, used after a short-family marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Parameter requirement.
    #[serde(default)]
    pub param: Param,
    /// Word form, used after a long-family marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Opaque caller data.
    #[serde(default)]
    pub payload: T,
}

impl OptionSpec {
    /// Create an option with the given forms and parameter requirement.
    ///
    /// Use [`OptionSpec::with_payload`] to attach caller data.
    pub fn new(short: Option<char>, long: Option<&str>, param: Param) -> Self {
        Self {
            short,
            param,
            long: long.map(str::to_string),
            payload: (),
        }
    }

    /// A short-only option without a parameter.
    pub fn short(short: char) -> Self {
        Self::new(Some(short), None, Param::None)
    }

    /// A long-only option without a parameter.
    pub fn long(long: &str) -> Self {
        Self::new(None, Some(long), Param::None)
    }

    /// A placeholder row that is skipped during resolution.
    pub fn disabled() -> Self {
        Self::new(None, None, Param::None)
    }
}

impl<T> OptionSpec<T> {
    /// Add or replace the short form.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Add or replace the long form.
    pub fn with_long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Mark the option as requiring a parameter.
    pub fn with_param(mut self) -> Self {
        self.param = Param::Required;
        self
    }

    /// Replace the caller payload, changing its type if needed.
    pub fn with_payload<U>(self, payload: U) -> OptionSpec<U> {
        OptionSpec {
            short: self.short,
            param: self.param,
            long: self.long,
            payload,
        }
    }

    /// Whether the row takes part in resolution at all.
    pub fn is_enabled(&self) -> bool {
        self.short.is_some() || self.long.is_some()
    }

    /// Whether the option requires a parameter.
    pub fn requires_param(&self) -> bool {
        self.param == Param::Required
    }
}
