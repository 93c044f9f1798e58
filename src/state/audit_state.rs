/// Audit state definitions for tracking a page through its audit
///
/// Every page starts `Pending` and always ends `Done`, whether or not its own
/// fetch succeeded.
use std::fmt;

/// Represents the current state of a page in the audit process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditState {
    // ===== Active States =====
    /// Page is waiting for a worker
    Pending,

    /// Page is being fetched
    Fetching,

    /// Page body arrived
    Fetched,

    /// Page fetch ended in 404, auth failure or network error
    FetchFailed,

    /// Main content is being located
    Scoping,

    /// Links and text are being checked
    Checking,

    // ===== Terminal State =====
    /// All issues for the page have been collected
    Done,
}

impl AuditState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: AuditState) -> bool {
        use AuditState::*;
        matches!(
            (self, next),
            (Pending, Fetching)
                | (Fetching, Fetched)
                | (Fetching, FetchFailed)
                | (FetchFailed, Done)
                | (Fetched, Scoping)
                | (Scoping, Checking)
                | (Checking, Done)
        )
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Fetched => "fetched",
            Self::FetchFailed => "fetch_failed",
            Self::Scoping => "scoping",
            Self::Checking => "checking",
            Self::Done => "done",
        }
    }

    /// Returns all possible audit states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Fetching,
            Self::Fetched,
            Self::FetchFailed,
            Self::Scoping,
            Self::Checking,
            Self::Done,
        ]
    }
}

impl fmt::Display for AuditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_done_is_terminal() {
        for state in AuditState::all_states() {
            assert_eq!(state.is_terminal(), state == AuditState::Done);
        }
    }

    #[test]
    fn test_success_path() {
        let path = [
            AuditState::Pending,
            AuditState::Fetching,
            AuditState::Fetched,
            AuditState::Scoping,
            AuditState::Checking,
            AuditState::Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_failure_path() {
        assert!(AuditState::Fetching.can_transition_to(AuditState::FetchFailed));
        assert!(AuditState::FetchFailed.can_transition_to(AuditState::Done));
        // no checks after a failed fetch
        assert!(!AuditState::FetchFailed.can_transition_to(AuditState::Scoping));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!AuditState::Pending.can_transition_to(AuditState::Done));
        assert!(!AuditState::Done.can_transition_to(AuditState::Pending));
        assert!(!AuditState::Fetched.can_transition_to(AuditState::Checking));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AuditState::FetchFailed), "fetch_failed");
        assert_eq!(format!("{}", AuditState::Done), "done");
    }
}
