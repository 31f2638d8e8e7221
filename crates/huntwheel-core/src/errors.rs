/// Recoverable errors raised by the core. None are fatal; callers are
/// expected to surface them as user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelError {
    /// The active weapon pool cannot satisfy the roster under the current
    /// duplicate policy. Carries the minimum pool size required.
    PoolInsufficient { required: usize },
    /// No distinct weapon exists to reroll into under no-duplicate policy.
    NoAlternativeWeapon,
    /// An assignment run is already in progress.
    AssignmentBusy,
}

impl std::fmt::Display for WheelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PoolInsufficient { required } => {
                write!(f, "active weapon pool too small, need at least {required}")
            },
            Self::NoAlternativeWeapon => write!(f, "no alternative weapon available to reroll"),
            Self::AssignmentBusy => write!(f, "an assignment run is already in progress"),
        }
    }
}

impl std::error::Error for WheelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_required_pool_size() {
        let e = WheelError::PoolInsufficient { required: 3 };
        assert!(e.to_string().contains('3'));
    }
}
