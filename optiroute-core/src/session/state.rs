use std::fmt;

/// Lifecycle state of a [`Session`](super::Session).
///
/// `AwaitingGeocode` and `Solving` mark a mutation in flight; while either
/// holds, every other mutating call is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SessionState {
    /// No points have been added.
    #[default]
    Idle,
    /// A point is being geocoded and appended.
    AwaitingGeocode,
    /// Points are available and the session can be solved.
    Ready,
    /// The solver is running.
    Solving,
    /// A tour has been solved for the current points.
    Done,
}

impl SessionState {
    /// Whether a mutating operation is in flight.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::AwaitingGeocode | Self::Solving)
    }

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingGeocode => "awaiting-geocode",
            Self::Ready => "ready",
            Self::Solving => "solving",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session operations, as named in
/// [`SessionError::InvalidOperation`](super::SessionError::InvalidOperation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Appending a point by address or coordinate.
    AddPoint,
    /// Solving the current points.
    Solve,
    /// Clearing the session.
    Reset,
    /// Reading the solved tour or its duration.
    Query,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AddPoint => "add point",
            Self::Solve => "solve",
            Self::Reset => "reset",
            Self::Query => "query result",
        })
    }
}
