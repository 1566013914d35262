//! Page-link window for a paged result set.
//!
//! Pure view-model computation: which links to show around the current page,
//! where to put ellipses, and which controls are disabled.

use crate::config::PAGE_WINDOW_RADIUS;

/// One control in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Previous { target: u32, enabled: bool },
    Page { number: u32, active: bool },
    Ellipsis,
    Next { target: u32, enabled: bool },
}

impl PageLink {
    /// Page a click on this control navigates to, if it is clickable.
    pub fn target(&self) -> Option<u32> {
        match *self {
            PageLink::Previous { target, enabled } | PageLink::Next { target, enabled } => {
                enabled.then_some(target)
            }
            PageLink::Page { number, .. } => Some(number),
            PageLink::Ellipsis => None,
        }
    }
}

/// The computed pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
    pub links: Vec<PageLink>,
}

impl Pagination {
    /// Lay out the bar for `current` of `total` pages.
    ///
    /// No controls are produced for a single page. `current` is clamped into
    /// `[1, total]`.
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);
        if total <= 1 {
            return Self {
                current,
                total,
                links: Vec::new(),
            };
        }

        let (start, end) = window(current, total);
        let mut links = vec![PageLink::Previous {
            target: current.saturating_sub(1).max(1),
            enabled: current > 1,
        }];

        if start > 1 {
            links.push(PageLink::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                links.push(PageLink::Ellipsis);
            }
        }

        links.extend((start..=end).map(|n| PageLink::Page {
            number: n,
            active: n == current,
        }));

        if end < total {
            if end < total - 1 {
                links.push(PageLink::Ellipsis);
            }
            links.push(PageLink::Page {
                number: total,
                active: false,
            });
        }

        links.push(PageLink::Next {
            target: current.saturating_add(1).min(total),
            enabled: current < total,
        });

        Self {
            current,
            total,
            links,
        }
    }

    /// Page numbers shown, in order, without the controls.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.links
            .iter()
            .filter_map(|l| match l {
                PageLink::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }

    pub fn previous_enabled(&self) -> bool {
        self.links
            .iter()
            .any(|l| matches!(l, PageLink::Previous { enabled: true, .. }))
    }

    pub fn next_enabled(&self) -> bool {
        self.links
            .iter()
            .any(|l| matches!(l, PageLink::Next { enabled: true, .. }))
    }
}

/// Inclusive range of page numbers around `current`, clamped to `[1, total]`.
pub fn window(current: u32, total: u32) -> (u32, u32) {
    let start = current.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
    let end = current.saturating_add(PAGE_WINDOW_RADIUS).min(total);
    (start, end)
}
