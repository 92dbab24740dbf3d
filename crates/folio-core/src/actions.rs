#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    InputChar(char),
    InputPaste(String),
    InputBackspace,
    Submit,
    HistoryPrevious,
    HistoryNext,
}

/// Timer deliveries. Each carries the id it was scheduled with so stale
/// deliveries are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeAction {
    RevealTick { reveal_id: u64 },
    GuiRedirectDue { timer_id: u64 },
    MatrixExpired { timer_id: u64 },
}
