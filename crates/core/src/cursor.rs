use crate::config::Marker;

/// Where processing resumes on the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// At the start of the next unconsumed argument.
    AtArgumentStart {
        /// The next argument was already handed out as a bundled short
        /// option's parameter and is skipped without being classified.
        skip_next: bool,
    },
    /// Inside a run of bundled short options.
    InShortRun {
        /// Byte offset of the next unconsumed option character.
        offset: usize,
        /// Marker that started the run; reported with every option in it.
        marker: Marker,
        /// An option in this run already claimed the following argument
        /// as its parameter.
        value_claimed: bool,
    },
    /// The separator was seen; every remaining argument is positional.
    PastSeparator,
}

impl Default for Position {
    fn default() -> Self {
        Position::AtArgumentStart { skip_next: false }
    }
}

/// Mutable parsing position over a borrowed argument vector.
///
/// One cursor per parse session. The argument vector should not include the
/// program name.
#[derive(Debug, Clone)]
pub struct Cursor<'a, S> {
    args: &'a [S],
    next: usize,
    position: Position,
}

impl<'a, S: AsRef<str>> Cursor<'a, S> {
    /// Start a session at the first argument.
    pub fn new(args: &'a [S]) -> Self {
        Self {
            args,
            next: 0,
            position: Position::default(),
        }
    }

    /// The arguments not yet fully consumed, starting with the current one.
    pub fn remaining(&self) -> &'a [S] {
        &self.args[self.next..]
    }

    /// Index of the current argument in the original vector.
    pub fn index(&self) -> usize {
        self.next
    }

    /// The whole argument vector this cursor walks.
    pub fn args(&self) -> &'a [S] {
        self.args
    }

    /// Where processing resumes on the next step.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Whether every argument has been consumed.
    pub fn is_finished(&self) -> bool {
        self.next >= self.args.len()
    }

    pub(crate) fn current(&self) -> Option<&'a str> {
        self.args.get(self.next).map(AsRef::as_ref)
    }

    pub(crate) fn peek_following(&self) -> Option<&'a str> {
        self.args.get(self.next + 1).map(AsRef::as_ref)
    }

    pub(crate) fn advance(&mut self) {
        self.next += 1;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Consume the rest of the current argument and return to argument
    /// start, carrying over a skip claimed by the finished run.
    pub(crate) fn finish_argument(&mut self) {
        let skip_next = matches!(
            self.position,
            Position::InShortRun {
                value_claimed: true,
                ..
            }
        );
        self.advance();
        self.position = Position::AtArgumentStart { skip_next };
    }
}
