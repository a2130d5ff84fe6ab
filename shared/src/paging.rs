use strum_macros::{AsRefStr, Display, EnumString};

/// Rows per server page on the history view.
pub const HISTORY_PAGE_SIZE: u32 = 20;
/// Size of the single fetch the incremental view reveals from.
pub const HISTORY_BATCH_LIMIT: u32 = 100;
/// Rows revealed per "Load more".
pub const REVEAL_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryPaging {
    /// Page index and page size sent to the backend, prev/next controls.
    #[default]
    Server,
    /// One larger fetch, revealed a step at a time.
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerPager {
    current: u32,
    total: u32,
}

impl Default for ServerPager {
    fn default() -> Self {
        Self { current: 1, total: 1 }
    }
}

impl ServerPager {
    /// Builds a pager from the backend's `current_page`/`pages`, both of
    /// which may be absent.
    pub fn new(current: Option<u32>, total: Option<u32>) -> Self {
        let total = total.unwrap_or(1).max(1);
        let current = current.unwrap_or(1).clamp(1, total);
        Self { current, total }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }
}

/// Client-side "load more" over an already fetched list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncrementalReveal {
    step: usize,
    visible: usize,
}

impl Default for IncrementalReveal {
    fn default() -> Self {
        Self::new(REVEAL_STEP)
    }
}

impl IncrementalReveal {
    pub fn new(step: usize) -> Self {
        let step = step.max(1);
        Self { step, visible: step }
    }

    pub fn visible_count(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count(items.len())]
    }

    pub fn load_more(&mut self, total: usize) {
        if !self.is_exhausted(total) {
            self.visible += self.step;
        }
    }

    pub fn is_exhausted(&self, total: usize) -> bool {
        self.visible >= total
    }

    /// Back to the first step, used whenever the filtered list changes.
    pub fn reset(&mut self) {
        self.visible = self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DetectionFilter, KindFilter};
    use crate::models::{Detection, DetectionId, FileKind, Verdict};

    #[test]
    fn server_pager_bounds() {
        let first = ServerPager::new(Some(1), Some(3));
        assert!(!first.has_previous());
        assert_eq!(first.next(), Some(2));
        assert_eq!(first.label(), "Page 1 of 3");

        let last = ServerPager::new(Some(3), Some(3));
        assert_eq!(last.previous(), Some(2));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn server_pager_tolerates_missing_or_bad_values() {
        let empty = ServerPager::new(None, Some(0));
        assert_eq!((empty.current(), empty.total()), (1, 1));
        assert!(!empty.has_next() && !empty.has_previous());

        let past_end = ServerPager::new(Some(9), Some(2));
        assert_eq!(past_end.current(), 2);
    }

    #[test]
    fn reveal_steps_until_exhausted() {
        let items: Vec<u32> = (0..25).collect();
        let mut reveal = IncrementalReveal::new(10);
        assert_eq!(reveal.visible(&items).len(), 10);

        reveal.load_more(items.len());
        assert_eq!(reveal.visible(&items).len(), 20);
        reveal.load_more(items.len());
        assert_eq!(reveal.visible(&items).len(), 25);
        assert!(reveal.is_exhausted(items.len()));

        reveal.load_more(items.len());
        assert_eq!(reveal.visible(&items).len(), 25);

        reveal.reset();
        assert_eq!(reveal.visible(&items).len(), 10);
    }

    #[test]
    fn zero_step_still_progresses() {
        let mut reveal = IncrementalReveal::new(0);
        reveal.load_more(5);
        assert_eq!(reveal.visible_count(5), 2);
    }

    #[test]
    fn fully_revealed_shows_every_filtered_item() {
        let items: Vec<Detection> = (0..37)
            .map(|i| Detection {
                id: DetectionId(i),
                user_id: None,
                file_name: format!("file-{i}"),
                file_type: if i % 3 == 0 { FileKind::Video } else { FileKind::Image },
                prediction: Verdict::Real,
                confidence: 50.0,
                processing_time: None,
                created_at: None,
                metadata: None,
                user_name: None,
                user_email: None,
            })
            .collect();
        let filter = DetectionFilter {
            kind: KindFilter::Image,
            ..DetectionFilter::default()
        };
        let filtered = filter.apply(&items);

        let mut reveal = IncrementalReveal::new(REVEAL_STEP);
        while !reveal.is_exhausted(filtered.len()) {
            reveal.load_more(filtered.len());
        }
        assert_eq!(reveal.visible(&filtered), filtered.as_slice());
    }

    #[test]
    fn paging_mode_parses() {
        assert_eq!("reveal".parse::<HistoryPaging>(), Ok(HistoryPaging::Reveal));
        assert_eq!(HistoryPaging::default(), HistoryPaging::Server);
    }
}
