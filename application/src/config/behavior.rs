use std::time::Duration;

/// Application behavior configuration.
///
/// Controls runtime behavior shared by every use case, such as the time
/// limit applied to each generation call.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a generation response before timing out.
    pub timeout: Option<Duration>,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None` or zero, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timeout_seconds() {
        assert_eq!(
            BehaviorConfig::from_timeout_seconds(Some(30)).timeout,
            Some(Duration::from_secs(30))
        );
        assert!(BehaviorConfig::from_timeout_seconds(Some(0)).timeout.is_none());
        assert!(BehaviorConfig::from_timeout_seconds(None).timeout.is_none());
    }
}
