use std::time::Duration;

/// Pause after load before the first fade-in element appears.
pub const LOAD_DELAY: Duration = Duration::from_millis(100);
pub const STAGGER: Duration = Duration::from_millis(100);
/// Share of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// The viewport's bottom edge is pulled up by this much when testing visibility.
pub const ROOT_MARGIN_BOTTOM: f64 = 50.0;

/// When each of `count` fade-in elements becomes visible, measured from page load.
pub fn fade_in_schedule(count: usize) -> Vec<Duration> {
    (0..count)
        .map(|index| LOAD_DELAY + STAGGER * u32::try_from(index).unwrap_or(u32::MAX))
        .collect()
}

/// Fraction of an element inside the viewport. `top` is relative to the
/// viewport's top edge.
pub fn visible_ratio(top: f64, height: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let bottom_edge = viewport_height - ROOT_MARGIN_BOTTOM;
    let visible = (top + height).min(bottom_edge) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

/// A card that slides in the first time it scrolls into view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollReveal {
    revealed: bool,
}

impl ScrollReveal {
    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    /// Records a visibility update. Returns true only for the update that
    /// reveals the element; once revealed it stays revealed.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.revealed || ratio < REVEAL_THRESHOLD {
            return false;
        }
        self.revealed = true;
        true
    }
}
