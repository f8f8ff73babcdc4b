//! Capability states for surrounding-application features
//!
//! Some areas of the application (login history, alerts, user management)
//! ship disabled. Instead of returning empty collections and letting callers
//! confuse "no data" with "feature off", their accessors return an explicit
//! [`FeatureState`].

/// Availability of a feature and its data when available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureState<T> {
    /// The feature is live and produced a value
    Available(T),
    /// The feature is not implemented in this build
    NotImplemented,
}

impl<T> FeatureState<T> {
    /// Check whether the feature produced a value
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// The value, discarding the availability distinction
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::NotImplemented => None,
        }
    }

    /// Map the contained value, preserving the state
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FeatureState<U> {
        match self {
            Self::Available(value) => FeatureState::Available(f(value)),
            Self::NotImplemented => FeatureState::NotImplemented,
        }
    }
}

/// Security alerts for the agency account. Not yet implemented.
pub fn alerts() -> FeatureState<Vec<String>> {
    FeatureState::NotImplemented
}

/// User management (roles, account activation). Not yet implemented.
pub fn user_management() -> FeatureState<Vec<String>> {
    FeatureState::NotImplemented
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_state() {
        let state = FeatureState::Available(vec![1, 2, 3]);
        assert!(state.is_available());
        assert_eq!(state.into_option(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_not_implemented_is_distinct_from_empty() {
        let empty: FeatureState<Vec<i32>> = FeatureState::Available(vec![]);
        let off: FeatureState<Vec<i32>> = FeatureState::NotImplemented;

        assert!(empty.is_available());
        assert!(!off.is_available());
        assert_ne!(empty, off);
    }

    #[test]
    fn test_map_preserves_state() {
        let state = FeatureState::Available(2).map(|n| n * 10);
        assert_eq!(state, FeatureState::Available(20));

        let off: FeatureState<i32> = FeatureState::NotImplemented;
        assert_eq!(off.map(|n| n * 10), FeatureState::NotImplemented);
    }

    #[test]
    fn test_stub_features_report_not_implemented() {
        assert!(!alerts().is_available());
        assert!(!user_management().is_available());
    }
}
