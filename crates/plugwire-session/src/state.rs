use std::fmt;

/// Lifecycle of a [`crate::Session`].
///
/// ```text
/// Idle → Connecting → Sending → AwaitingResponse → Completed ─┐
///                                                  TimedOut  ─┤
///                                                  Errored   ─┼→ Closed
///                                                  Cancelled ─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Sending,
    AwaitingResponse,
    Completed,
    TimedOut,
    Errored,
    Cancelled,
    Closed,
}

impl SessionState {
    /// Outcome states; reaching one releases the connection.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::TimedOut | Self::Errored | Self::Cancelled
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Sending => "sending",
            Self::AwaitingResponse => "awaiting_response",
            Self::Completed => "completed",
            Self::TimedOut => "timed_out",
            Self::Errored => "errored",
            Self::Cancelled => "cancelled",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
