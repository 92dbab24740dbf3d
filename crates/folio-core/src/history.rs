#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryCursor {
    /// No recall in progress.
    #[default]
    AtEnd,
    At(usize),
}

/// Submitted command strings with an up/down recall cursor.
#[derive(Debug, Clone, Default)]
pub struct InputHistory {
    log: Vec<String>,
    cursor: HistoryCursor,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text`. Callers exclude control commands.
    pub fn record(&mut self, text: impl Into<String>) {
        self.log.push(text.into());
        self.cursor = HistoryCursor::AtEnd;
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = HistoryCursor::AtEnd;
    }

    pub fn recall_previous(&mut self) -> Option<String> {
        if self.log.is_empty() {
            return None;
        }
        let idx = match self.cursor {
            HistoryCursor::AtEnd => self.log.len() - 1,
            HistoryCursor::At(idx) => idx.saturating_sub(1),
        };
        self.cursor = HistoryCursor::At(idx);
        Some(self.log[idx].clone())
    }

    /// Walks toward the newest entry. Stepping past it returns `""` and parks
    /// the cursor at the end.
    pub fn recall_next(&mut self) -> Option<String> {
        let HistoryCursor::At(idx) = self.cursor else {
            return None;
        };
        let next = idx + 1;
        if next >= self.log.len() {
            self.cursor = HistoryCursor::AtEnd;
            Some(String::new())
        } else {
            self.cursor = HistoryCursor::At(next);
            Some(self.log[next].clone())
        }
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn history(items: &[&str]) -> InputHistory {
        let mut history = InputHistory::new();
        for item in items {
            history.record(*item);
        }
        history
    }

    #[test]
    fn recall_walks_back_and_forth() {
        let mut history = history(&["about", "skills"]);
        assert_eq!(history.recall_previous().as_deref(), Some("skills"));
        assert_eq!(history.recall_previous().as_deref(), Some("about"));
        assert_eq!(history.recall_next().as_deref(), Some("skills"));
        assert_eq!(history.recall_next().as_deref(), Some(""));
        assert_eq!(history.cursor(), HistoryCursor::AtEnd);
    }

    #[test]
    fn previous_is_floored_at_oldest_entry() {
        let mut history = history(&["a", "b"]);
        for _ in 0..5 {
            history.recall_previous();
        }
        assert_eq!(history.cursor(), HistoryCursor::At(0));
        assert_eq!(history.recall_previous().as_deref(), Some("a"));
    }

    #[test]
    fn next_at_end_is_a_noop() {
        let mut history = history(&["a"]);
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.cursor(), HistoryCursor::AtEnd);
    }

    #[test]
    fn empty_log_ignores_recall() {
        let mut history = InputHistory::new();
        assert_eq!(history.recall_previous(), None);
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.cursor(), HistoryCursor::AtEnd);
    }

    #[test]
    fn cursor_stays_in_bounds_for_any_walk() {
        let mut history = history(&["one", "two", "three"]);
        let walk = [true, true, false, true, true, true, false, false, false, false, true];
        for up in walk {
            if up {
                history.recall_previous();
            } else {
                history.recall_next();
            }
            match history.cursor() {
                HistoryCursor::AtEnd => {}
                HistoryCursor::At(idx) => assert!(idx < history.len()),
            }
        }
        assert_eq!(history.entries(), ["one", "two", "three"]);
    }

    #[test]
    fn record_resets_cursor() {
        let mut history = history(&["a", "b"]);
        history.recall_previous();
        history.record("c");
        assert_eq!(history.cursor(), HistoryCursor::AtEnd);
        assert_eq!(history.recall_previous().as_deref(), Some("c"));
    }
}
