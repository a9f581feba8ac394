//! Submitted-command history with shell-style browsing

/// Append-only list of submitted commands.
///
/// `browse_index` is `None` when the user is not browsing; otherwise it points
/// at the entry currently shown in the buffer. Browsing never mutates entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRing {
    entries: Vec<String>,
    browse_index: Option<usize>,
}

impl HistoryRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn browse_index(&self) -> Option<usize> {
        self.browse_index
    }

    /// Record a submitted command and stop browsing
    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.push(command.into());
        self.browse_index = None;
    }

    pub fn reset_browse(&mut self) {
        self.browse_index = None;
    }

    /// Step to the next older entry.
    ///
    /// Returns the entry to show, or `None` when there is nothing older
    /// (empty history, or already at the oldest entry).
    pub fn up(&mut self) -> Option<&str> {
        let next = match self.browse_index {
            None if self.entries.is_empty() => return None,
            None => self.entries.len() - 1,
            Some(0) => return None,
            Some(i) => i - 1,
        };
        self.browse_index = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step to the next newer entry.
    ///
    /// `None` means no change (not browsing). `Some("")` means browsing ended
    /// past the newest entry and the buffer should be cleared.
    pub fn down(&mut self) -> Option<&str> {
        let current = self.browse_index?;
        if current + 1 >= self.entries.len() {
            self.browse_index = None;
            return Some("");
        }
        self.browse_index = Some(current + 1);
        self.entries.get(current + 1).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(cmds: &[&str]) -> HistoryRing {
        let mut h = HistoryRing::new();
        for c in cmds {
            h.push(*c);
        }
        h
    }

    #[test]
    fn test_up_walks_most_recent_first() {
        let mut h = ring(&["a", "b", "c"]);
        assert_eq!(h.up(), Some("c"));
        assert_eq!(h.up(), Some("b"));
        assert_eq!(h.up(), Some("a"));
        assert_eq!(h.browse_index(), Some(0));
    }

    #[test]
    fn test_up_at_oldest_is_noop() {
        let mut h = ring(&["a"]);
        assert_eq!(h.up(), Some("a"));
        assert_eq!(h.up(), None);
        assert_eq!(h.browse_index(), Some(0));
    }

    #[test]
    fn test_up_on_empty_history() {
        let mut h = HistoryRing::new();
        assert_eq!(h.up(), None);
        assert_eq!(h.browse_index(), None);
    }

    #[test]
    fn test_down_past_newest_clears() {
        let mut h = ring(&["a", "b"]);
        h.up();
        h.up();
        assert_eq!(h.down(), Some("b"));
        assert_eq!(h.down(), Some(""));
        assert_eq!(h.browse_index(), None);
    }

    #[test]
    fn test_down_when_not_browsing_is_noop() {
        let mut h = ring(&["a"]);
        assert_eq!(h.down(), None);
    }

    #[test]
    fn test_push_resets_browsing() {
        let mut h = ring(&["a", "b"]);
        h.up();
        h.push("c");
        assert_eq!(h.browse_index(), None);
        assert_eq!(h.entries(), &["a", "b", "c"]);
    }
}
