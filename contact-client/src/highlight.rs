use tokio::sync::mpsc;

use std::time::Duration;

pub const HIGHLIGHTS: [&str; 4] = [
    "Backend architecture & REST APIs",
    "Versioning & workflows",
    "Clean data models",
    "Scalable Laravel apps",
];

/// Delay before the first highlight fades in, after the page animations.
pub const INITIAL_DELAY: Duration = Duration::from_millis(1000);
pub const ROTATE_INTERVAL: Duration = Duration::from_millis(3500);
/// Half of the CSS fade transition.
pub const FADE_DELAY: Duration = Duration::from_millis(250);

/// The hero section's rotating highlight text.
#[derive(Debug, Clone)]
pub struct RotatingHighlight {
    entries: Vec<String>,
    next: usize,
    text: String,
    active: bool,
}

/// What the highlight element should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightFrame {
    pub text: String,
    pub active: bool,
}

impl Default for RotatingHighlight {
    fn default() -> Self {
        Self {
            entries: HIGHLIGHTS.iter().map(ToString::to_string).collect(),
            next: 1,
            text: HIGHLIGHTS[0].to_string(),
            active: false,
        }
    }
}

impl RotatingHighlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when `entries` is empty.
    pub fn with_entries(entries: Vec<String>) -> Option<Self> {
        let text = entries.first()?.clone();
        Some(Self {
            next: 1 % entries.len(),
            entries,
            text,
            active: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Index of the entry the next rotation will show.
    pub const fn next_index(&self) -> usize {
        self.next
    }

    pub fn frame(&self) -> HighlightFrame {
        HighlightFrame {
            text: self.text.clone(),
            active: self.active,
        }
    }

    pub const fn activate(&mut self) {
        self.active = true;
    }

    pub const fn fade_out(&mut self) {
        self.active = false;
    }

    /// Shows the next entry, wrapping to the first after the last.
    pub fn rotate(&mut self) -> &str {
        self.text.clone_from(&self.entries[self.next]);
        self.active = true;
        self.next = (self.next + 1) % self.entries.len();
        &self.text
    }

    /// Drives the highlight on its timers, publishing every visible change.
    /// Stops once the receiver is dropped.
    pub async fn run(mut self, frames: mpsc::Sender<HighlightFrame>) {
        if frames.send(self.frame()).await.is_err() {
            return;
        }

        tokio::time::sleep(INITIAL_DELAY).await;
        self.activate();
        if frames.send(self.frame()).await.is_err() {
            return;
        }

        let start = tokio::time::Instant::now() + ROTATE_INTERVAL - INITIAL_DELAY;
        let mut interval = tokio::time::interval_at(start, ROTATE_INTERVAL);
        loop {
            interval.tick().await;

            self.fade_out();
            if frames.send(self.frame()).await.is_err() {
                return;
            }

            tokio::time::sleep(FADE_DELAY).await;
            self.rotate();
            if frames.send(self.frame()).await.is_err() {
                return;
            }
        }
    }
}
