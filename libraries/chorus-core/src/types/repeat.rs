//! Repeat mode

use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Advance to the next mode in the UI toggle cycle: Off -> All -> One -> Off.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_returns_to_off_after_three_toggles() {
        let mode = RepeatMode::Off;
        assert_eq!(mode.cycle(), RepeatMode::All);
        assert_eq!(mode.cycle().cycle(), RepeatMode::One);
        assert_eq!(mode.cycle().cycle().cycle(), RepeatMode::Off);
    }
}
