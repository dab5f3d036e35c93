/// Server-imposed per-session draw cooldown. The client never decides the
/// cooldown length; it only obeys `StatePlayer` messages. A single stored
/// deadline replaces any live timer: re-arming overwrites it, so two
/// countdowns can never be pending at once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawLock {
    unlocks_at_ms: Option<f64>,
}

impl DrawLock {
    pub fn new() -> DrawLock {
        DrawLock::default()
    }

    /// Re-arms the cooldown, canceling any pending one. Zero seconds unlocks
    /// immediately.
    pub fn arm(&mut self, now_ms: f64, seconds: u8) {
        self.unlocks_at_ms = if seconds == 0 {
            None
        } else {
            Some(now_ms + f64::from(seconds) * 1000.0)
        };
    }

    pub fn can_draw(&self, now_ms: f64) -> bool {
        match self.unlocks_at_ms {
            Some(deadline) => now_ms >= deadline,
            None => true,
        }
    }
}
