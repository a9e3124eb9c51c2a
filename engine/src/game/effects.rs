use super::types::EffectKind;

const INACTIVE: i32 = -1;

/// Remaining tick duration per effect kind. A duration of zero or more means
/// the effect is active; `-1` is the "no entry" sentinel. Countdown lets
/// durations drift below the sentinel, which still reads as inactive.
#[derive(Clone, Debug)]
pub struct EffectsRegistry {
    durations: [i32; EffectKind::COUNT],
}

impl Default for EffectsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectsRegistry {
    pub fn new() -> Self {
        Self {
            durations: [INACTIVE; EffectKind::COUNT],
        }
    }

    pub fn clear(&mut self) {
        self.durations = [INACTIVE; EffectKind::COUNT];
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.duration(kind) >= 0
    }

    pub fn duration(&self, kind: EffectKind) -> i32 {
        self.durations[kind.index()]
    }

    pub fn set_duration(&mut self, kind: EffectKind, ticks: i32) {
        self.durations[kind.index()] = ticks;
    }

    /// Extend the effect to `ticks` remaining, never shortening an already
    /// longer run.
    pub fn apply(&mut self, kind: EffectKind, ticks: i32) {
        if ticks > self.duration(kind) {
            self.set_duration(kind, ticks);
        }
    }

    /// Decrement every active effect by one tick.
    pub fn count_down(&mut self) {
        for duration in &mut self.durations {
            if *duration >= 0 {
                *duration -= 1;
            }
        }
    }
}
