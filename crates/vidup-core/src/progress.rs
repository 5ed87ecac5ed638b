//! Upload progress arithmetic.

/// Bytes handed to the transport so far, out of the file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub loaded: u64,
    pub total: u64,
}

impl TransferProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        Self { loaded, total }
    }

    pub fn percent(&self) -> Option<u8> {
        percent_complete(self.loaded, self.total)
    }
}

/// `loaded * 100 / total` with integer division, clamped to 100.
/// Returns `None` for an empty transfer since no ratio exists.
pub fn percent_complete(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (u128::from(loaded) * 100) / u128::from(total);
    Some(pct.min(100) as u8)
}

/// Turns raw transfer events into the percentages shown to the user.
///
/// Emitted values never decrease and repeats are suppressed, so a renderer
/// only sees genuine changes.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the percentage to display, or `None` when nothing changed.
    pub fn observe(&mut self, progress: TransferProgress) -> Option<u8> {
        let pct = progress.percent()?;
        match self.last {
            Some(last) if pct <= last => None,
            _ => {
                self.last = Some(pct);
                Some(pct)
            }
        }
    }

    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_integer_division() {
        assert_eq!(percent_complete(0, 1000), Some(0));
        assert_eq!(percent_complete(1, 3), Some(33));
        assert_eq!(percent_complete(2, 3), Some(66));
        assert_eq!(percent_complete(999, 1000), Some(99));
        assert_eq!(percent_complete(1000, 1000), Some(100));
    }

    #[test]
    fn percent_handles_edges() {
        assert_eq!(percent_complete(0, 0), None);
        assert_eq!(percent_complete(2000, 1000), Some(100));
        assert_eq!(percent_complete(u64::MAX, u64::MAX), Some(100));
    }

    #[test]
    fn tracker_is_monotonic_and_deduplicates() {
        let mut tracker = ProgressTracker::new();
        let total = 400;
        let seen: Vec<u8> = [0, 4, 4, 100, 80, 200, 200, 399, 400]
            .into_iter()
            .filter_map(|loaded| tracker.observe(TransferProgress::new(loaded, total)))
            .collect();

        assert_eq!(seen, vec![0, 1, 25, 50, 99, 100]);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(tracker.last(), Some(100));
    }

    #[test]
    fn tracker_ignores_empty_transfers() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.observe(TransferProgress::new(0, 0)), None);
        assert_eq!(tracker.last(), None);
    }
}
