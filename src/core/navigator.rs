//! Year navigation — which of previous / next (and first / last) are
//! available for the current position in the ordered year list.

/// Navigation decision for one position in the year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation<'a> {
    years: &'a [i32],
    /// Index of the current year; `None` when it is not in the list.
    index: Option<usize>,
}

impl<'a> Navigation<'a> {
    pub fn new(years: &'a [i32], current: i32) -> Self {
        Self {
            years,
            index: years.iter().position(|&y| y == current),
        }
    }

    /// Navigation with nothing selected — every action is disabled.
    pub fn disabled() -> Self {
        Self {
            years: &[],
            index: None,
        }
    }

    pub fn current(&self) -> Option<i32> {
        self.index.map(|i| self.years[i])
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.years.len())
    }

    /// The year "Previous" would request, if enabled.
    pub fn previous(&self) -> Option<i32> {
        let i = self.index?;
        self.has_previous().then(|| self.years[i - 1])
    }

    /// The year "Next" would request, if enabled.
    pub fn next(&self) -> Option<i32> {
        let i = self.index?;
        self.has_next().then(|| self.years[i + 1])
    }

    /// Jump to the earliest year; disabled when already there.
    pub fn first(&self) -> Option<i32> {
        self.has_previous().then(|| self.years[0])
    }

    /// Jump to the latest year; disabled when already there.
    pub fn last(&self) -> Option<i32> {
        self.has_next().then(|| self.years[self.years.len() - 1])
    }
}
