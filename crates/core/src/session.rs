use crate::config::GrammarConfig;
use crate::cursor::Cursor;
use crate::engine::step;
use crate::options::OptionSpec;
use crate::outcome::Outcome;

/// A parse session: grammar, option table and cursor in one place.
///
/// `grammar` and `options` are public so they can be changed between calls
/// to [`Session::next`]; changes apply from the next call on. Removing an
/// option in the middle of a short-option run whose character is about to
/// be scanned gives unspecified (but memory-safe) results.
///
/// ```
/// use stepopt_core::{OptionSpec, Session};
///
/// let options = vec![
///     OptionSpec::short('v').with_long("verbose"),
///     OptionSpec::short('f').with_long("file").with_param(),
/// ];
/// let args = ["-vf", "out.txt", "input"];
/// let mut session = Session::new(options, &args);
///
/// let v = session.next();
/// assert_eq!(v.option.and_then(|o| o.short), Some('v'));
/// let f = session.next();
/// assert_eq!(f.param, Some("out.txt"));
/// assert!(session.next().is_positional());
/// assert!(session.next().status.is_termination());
/// ```
#[derive(Debug, Clone)]
pub struct Session<'a, S, T = ()> {
    /// Grammar used by every step.
    pub grammar: GrammarConfig,
    /// Option table, in resolution order.
    pub options: Vec<OptionSpec<T>>,
    cursor: Cursor<'a, S>,
}

impl<'a, S: AsRef<str>, T> Session<'a, S, T> {
    /// Start a session over `args` with the default grammar.
    pub fn new(options: Vec<OptionSpec<T>>, args: &'a [S]) -> Self {
        Self {
            grammar: GrammarConfig::default(),
            options,
            cursor: Cursor::new(args),
        }
    }

    /// Replace the grammar (builder pattern).
    pub fn with_grammar(mut self, grammar: GrammarConfig) -> Self {
        self.grammar = grammar;
        self
    }

    /// Perform one step.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Outcome<'a, '_, T> {
        step(&mut self.cursor, &self.grammar, &self.options)
    }

    /// The current parsing position.
    pub fn cursor(&self) -> &Cursor<'a, S> {
        &self.cursor
    }

    /// Start over on a new argument vector, keeping grammar and options.
    pub fn restart(&mut self, args: &'a [S]) {
        self.cursor = Cursor::new(args);
    }
}
