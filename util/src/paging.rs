//! Page-number strip for paginated lists.

/// One slot in the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Gap,
}

const MAX_VISIBLE_PAGES: u32 = 5;

/// Builds the strip for `current` of `total` pages.
///
/// Up to five pages are listed outright. Beyond that the strip always keeps
/// the first and last page, a window around `current`, and a gap marker
/// wherever pages are skipped.
pub fn page_slots(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(1).max(2);
    let mut end = (current + 1).min(total - 1);

    if current <= 2 {
        end = 4;
    }
    if current >= total - 1 {
        start = total - 3;
    }

    let mut slots = vec![PageSlot::Page(1)];
    if start > 2 {
        slots.push(PageSlot::Gap);
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total - 1 {
        slots.push(PageSlot::Gap);
    }
    slots.push(PageSlot::Page(total));
    slots
}

/// Renders a strip as `1 … 4 [5] 6 … 10`.
pub fn render(slots: &[PageSlot], current: u32) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(n) if *n == current => format!("[{n}]"),
            PageSlot::Page(n) => n.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
