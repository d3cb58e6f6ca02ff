//! Two-segment percentage split for attendance and leave meters.

/// Two adjacent segments of one bar, e.g. leave days used vs remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBar {
    first: u64,
    second: u64,
}

impl SplitBar {
    pub fn new(first: u64, second: u64) -> Self {
        Self { first, second }
    }

    pub fn total(&self) -> u64 {
        self.first.saturating_add(self.second)
    }

    /// Rounded half-up share of the first segment; 0 for an empty bar.
    pub fn first_percent(&self) -> u8 {
        let total = self.total() as u128;
        if total == 0 {
            return 0;
        }
        let scaled = self.first as u128 * 200 + total;
        // round_half_up(first * 100 / total) == floor((200 * first + total) / (2 * total))
        (scaled / (2 * total)).min(100) as u8
    }

    /// Remainder so the two segments always sum to 100.
    pub fn second_percent(&self) -> u8 {
        if self.total() == 0 {
            return 0;
        }
        100 - self.first_percent()
    }
}
