// Live-tweakable knobs. The window mutates them from key presses, the
// simulation only ever reads them through `&Settings`.

pub const DEFAULT_THRESHOLD: f32 = 0.5;
pub const THRESHOLD_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    debugging: bool,
    threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { debugging: false, threshold: DEFAULT_THRESHOLD }
    }
}

impl Settings {
    pub fn new(debugging: bool, threshold: f32) -> Self {
        let mut s = Self { debugging, threshold: DEFAULT_THRESHOLD };
        s.set_threshold(threshold);
        s
    }

    /// Show the obstacle mask instead of the gray feed. Display only.
    pub fn debugging(&self) -> bool {
        self.debugging
    }

    /// Cutoff in 0..=1, as a fraction of 255.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn toggle_debugging(&mut self) {
        self.debugging = !self.debugging;
    }

    pub fn set_threshold(&mut self, value: f32) {
        self.threshold = if value.is_nan() { DEFAULT_THRESHOLD } else { value.clamp(0.0, 1.0) };
    }

    pub fn nudge_threshold(&mut self, delta: f32) {
        self.set_threshold(self.threshold + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_clamped() {
        let mut s = Settings::new(false, 3.0);
        assert_eq!(s.threshold(), 1.0);
        s.nudge_threshold(-2.0);
        assert_eq!(s.threshold(), 0.0);
        s.set_threshold(f32::NAN);
        assert_eq!(s.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn debug_toggles() {
        let mut s = Settings::default();
        assert!(!s.debugging());
        s.toggle_debugging();
        assert!(s.debugging());
    }
}
