// Post-match guards standing in for lookaround, which meta::Regex lacks

/// Context check applied to a raw regex match before it is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Accept the match regardless of neighbours
    Free,
    /// Reject matches glued to surrounding identifier text
    ///
    /// The preceding character must not be a word character, `@`, `.` or
    /// `-` (e.g. the domain half of an email). The following character must
    /// not be a word character or `@` (e.g. the local part of an email, or a
    /// handle that runs past its length limit).
    Standalone,
}

impl Boundary {
    /// Check the span `[start, end)` of `text` against this guard
    pub fn accepts(self, text: &str, start: usize, end: usize) -> bool {
        match self {
            Boundary::Free => true,
            Boundary::Standalone => {
                let before = text.get(..start).and_then(|s| s.chars().next_back());
                let after = text.get(end..).and_then(|s| s.chars().next());

                !before.is_some_and(attaches_before) && !after.is_some_and(attaches_after)
            }
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn attaches_before(ch: char) -> bool {
    is_word_char(ch) || matches!(ch, '@' | '.' | '-')
}

fn attaches_after(ch: char) -> bool {
    is_word_char(ch) || ch == '@'
}
