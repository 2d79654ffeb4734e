//! Stream stage lifecycle states

/// Lifecycle of a reader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageState {
    /// Idle until downstream asks for the next value
    #[default]
    AwaitingDemand,
    /// Suspended on upstream for one more chunk
    AwaitingInput,
    /// Tokenizing buffered input to satisfy a pending demand
    Emitting,
    /// The document ended cleanly
    Completed,
    /// A fatal error was reported; upstream has been dropped
    Failed,
    /// Downstream cancelled; upstream has been dropped
    Cancelled,
}

impl StageState {
    /// Whether every further pull ends the sequence
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for StageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AwaitingDemand => "awaiting-demand",
            Self::AwaitingInput => "awaiting-input",
            Self::Emitting => "emitting",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}
