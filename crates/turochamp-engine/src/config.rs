//! Search configuration.

/// Default iterative-deepening cap.
pub const DEFAULT_MAX_DEPTH: u8 = 4;

/// Default ply cap for the capture-only extension.
pub const DEFAULT_QUIESCENCE_DEPTH: u8 = 16;

/// Tunable limits for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration the driver will start.
    pub max_depth: u8,
    /// Maximum number of capture plies searched below a leaf. When reached,
    /// the node returns its stand-pat score clamped to the window.
    pub quiescence_depth: u8,
}

impl SearchConfig {
    /// Configuration with a different depth cap.
    pub fn with_max_depth(self, max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
            ..self
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_is_four() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.quiescence_depth, DEFAULT_QUIESCENCE_DEPTH);
    }

    #[test]
    fn max_depth_never_zero() {
        let config = SearchConfig::default().with_max_depth(0);
        assert_eq!(config.max_depth, 1);
    }
}
