/// Sections count as current this far before their top edge.
pub const SCROLL_SPY_OFFSET: f64 = 100.0;
/// Height of the fixed header that anchor targets must clear.
pub const HEADER_OFFSET: f64 = 80.0;

/// A page section with an `id`, measured in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// The section the viewport is currently in. When ranges overlap the later
/// section wins.
pub fn active_section(sections: &[Section], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| {
            let top = section.top - SCROLL_SPY_OFFSET;
            scroll_y >= top && scroll_y < top + section.height
        })
        .next_back()
        .map(|section| section.id.as_str())
}

pub fn is_link_active(href: &str, active: Option<&str>) -> bool {
    active.is_some_and(|id| href.strip_prefix('#') == Some(id))
}

/// Scroll position for an in-page anchor, or `None` when nothing matches.
pub fn scroll_target(sections: &[Section], href: &str) -> Option<f64> {
    let id = href.strip_prefix('#')?;
    sections
        .iter()
        .find(|section| section.id == id)
        .map(|section| section.top - HEADER_OFFSET)
}

/// The collapsible navigation panel on small screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Following any link in the menu closes it.
    pub const fn follow_link(&mut self) {
        self.open = false;
    }
}
