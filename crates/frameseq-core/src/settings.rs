/// Missing frames tolerated between two ranges before the range summary
/// stops listing further ranges.
pub const DEFAULT_MAX_GAP: u64 = 1000;

/// Knobs shared by every discovery entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Query the file source for each member's size and keep a running total.
    pub estimate_size: bool,
    pub max_gap: u64,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            estimate_size: false,
            max_gap: DEFAULT_MAX_GAP,
        }
    }
}
