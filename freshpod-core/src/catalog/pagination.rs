//! Page-number window and pager affordances

use serde::Serialize;

/// Maximum number of page buttons shown at once
pub const MAX_PAGE_WINDOW: usize = 5;

/// Compute the contiguous page numbers to display
///
/// Policy:
/// - `total_pages <= 5`: every page
/// - `current_page <= 3`: pages 1 through 5
/// - `current_page >= total_pages - 2`: the last five pages
/// - otherwise: two pages either side of the current one
///
/// `current_page` is clamped into `[1, total_pages]` first, so the result
/// always contains the (clamped) current page. Returns an empty window when
/// there are no pages.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);

    let (start, end) = if total_pages <= MAX_PAGE_WINDOW {
        (1, total_pages)
    } else if current <= 3 {
        (1, MAX_PAGE_WINDOW)
    } else if current >= total_pages - 2 {
        (total_pages - 4, total_pages)
    } else {
        (current - 2, current + 2)
    };

    (start..=end).collect()
}

/// Everything a pager needs to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageControls {
    /// Current page, clamped into range
    pub current: usize,

    /// Total number of pages (always > 1)
    pub total: usize,

    /// Page buttons to show
    pub window: Vec<usize>,

    /// Show a "page 1" button followed by an ellipsis
    pub jump_to_first: bool,

    /// Show an ellipsis followed by a last-page button
    pub jump_to_last: bool,

    /// Target of the "previous" button, `None` when disabled
    pub previous: Option<usize>,

    /// Target of the "next" button, `None` when disabled
    pub next: Option<usize>,
}

impl PageControls {
    /// Build pager state, or `None` when pagination should be suppressed
    ///
    /// Zero or one page means no controls at all.
    pub fn new(total_pages: usize, current_page: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }

        let current = current_page.clamp(1, total_pages);
        let window = page_window(total_pages, current);

        let jump_to_first = window.first().is_some_and(|&first| first > 1);
        let jump_to_last = window.last().is_some_and(|&last| last < total_pages);

        Some(Self {
            current,
            total: total_pages,
            window,
            jump_to_first,
            jump_to_last,
            previous: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
        })
    }

    /// Whether `page` is the highlighted page
    pub fn is_current(&self, page: usize) -> bool {
        page == self.current
    }

    /// Compact textual rendering, e.g. `‹ 1 … 4 5 [6] 7 8 … 12 ›`
    pub fn render_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(if self.previous.is_some() { "‹" } else { " " }.to_string());
        if self.jump_to_first {
            parts.push("1".to_string());
            parts.push("…".to_string());
        }
        for &page in &self.window {
            if self.is_current(page) {
                parts.push(format!("[{page}]"));
            } else {
                parts.push(page.to_string());
            }
        }
        if self.jump_to_last {
            parts.push("…".to_string());
            parts.push(self.total.to_string());
        }
        parts.push(if self.next.is_some() { "›" } else { " " }.to_string());

        parts.join(" ").trim().to_string()
    }
}

#[cfg(test)]
mod pagination_tests {
    use super::*;

    #[test]
    fn test_window_small_total_shows_everything() {
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(3, 2), vec![1, 2, 3]);
        assert_eq!(page_window(5, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(page_window(12, 1), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(12, 3), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(page_window(12, 10), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(12, 12), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(page_window(12, 6), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(6, 4), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_window_clamps_out_of_range_current() {
        assert_eq!(page_window(0, 1), Vec::<usize>::new());
        assert_eq!(page_window(12, 0), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(12, 40), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(3, 9), vec![1, 2, 3]);
    }

    #[test]
    fn test_controls_suppressed_for_single_page() {
        assert!(PageControls::new(0, 1).is_none());
        assert!(PageControls::new(1, 1).is_none());
    }

    #[test]
    fn test_controls_jump_affordances() {
        let controls = PageControls::new(12, 6).unwrap();
        assert!(controls.jump_to_first);
        assert!(controls.jump_to_last);
        assert_eq!(controls.previous, Some(5));
        assert_eq!(controls.next, Some(7));

        let controls = PageControls::new(12, 2).unwrap();
        assert!(!controls.jump_to_first);
        assert!(controls.jump_to_last);

        let controls = PageControls::new(12, 11).unwrap();
        assert!(controls.jump_to_first);
        assert!(!controls.jump_to_last);

        let controls = PageControls::new(4, 4).unwrap();
        assert!(!controls.jump_to_first);
        assert!(!controls.jump_to_last);
        assert_eq!(controls.next, None);
    }

    #[test]
    fn test_controls_render_text() {
        let controls = PageControls::new(12, 6).unwrap();
        assert_eq!(controls.render_text(), "‹ 1 … 4 5 [6] 7 8 … 12 ›");

        let controls = PageControls::new(3, 1).unwrap();
        assert_eq!(controls.render_text(), "[1] 2 3 ›");
    }
}
