//! Selection store — owns the loaded dataset and the active year.
//!
//! Before the dataset arrives the store is *loading* and no year is
//! selected.  Once loaded, the active year is always a member of the
//! dataset's year set (or `None` when the dataset is empty).

use super::dataset::{Dataset, YearRecord};

#[derive(Debug, Default)]
pub struct DataStore {
    dataset: Option<Dataset>,
    current_year: Option<i32>,
}

impl DataStore {
    pub fn loading() -> Self {
        Self::default()
    }

    /// Install the dataset and select its first year.
    pub fn load(&mut self, dataset: Dataset) {
        if dataset.is_empty() {
            tracing::warn!("dataset is empty, nothing to chart");
        }
        self.current_year = dataset.first_year();
        tracing::info!(
            years = dataset.len(),
            first = ?self.current_year,
            "dataset loaded"
        );
        self.dataset = Some(dataset);
    }

    pub fn is_loading(&self) -> bool {
        self.dataset.is_none()
    }

    /// Ordered list of available years (empty while loading).
    pub fn years(&self) -> Vec<i32> {
        self.dataset.as_ref().map(Dataset::years).unwrap_or_default()
    }

    pub fn current_year(&self) -> Option<i32> {
        self.current_year
    }

    /// The record for the active year.
    pub fn active_record(&self) -> Option<&YearRecord> {
        let year = self.current_year?;
        self.dataset.as_ref()?.get(year)
    }

    /// Switch to `year` if the dataset has it.  Unknown years (and requests
    /// made while loading) are ignored.  Returns whether the year changed.
    pub fn request_year(&mut self, year: i32) -> bool {
        let Some(dataset) = self.dataset.as_ref() else {
            tracing::debug!(year, "year request ignored: still loading");
            return false;
        };
        if !dataset.contains(year) {
            tracing::debug!(year, "year request ignored: not in dataset");
            return false;
        }
        if self.current_year == Some(year) {
            return false;
        }
        self.current_year = Some(year);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::tests::{country, year};

    fn store() -> DataStore {
        let mut s = DataStore::loading();
        s.load(Dataset::from_records(vec![
            year(2000, vec![country("a", "A", 10)]),
            year(2010, vec![country("b", "B", 20)]),
            year(2020, vec![country("c", "C", 30)]),
        ]));
        s
    }

    #[test]
    fn starts_loading_with_no_selection() {
        let s = DataStore::loading();
        assert!(s.is_loading());
        assert_eq!(s.current_year(), None);
        assert!(s.active_record().is_none());
        assert!(s.years().is_empty());
    }

    #[test]
    fn load_selects_the_first_year() {
        let s = store();
        assert!(!s.is_loading());
        assert_eq!(s.current_year(), Some(2000));
        assert_eq!(s.years(), vec![2000, 2010, 2020]);
        assert_eq!(s.active_record().unwrap().countries[0].name, "A");
    }

    #[test]
    fn valid_request_switches_the_active_record() {
        let mut s = store();
        assert!(s.request_year(2020));
        assert_eq!(s.current_year(), Some(2020));
        assert_eq!(s.active_record().unwrap().year, 2020);
    }

    #[test]
    fn unknown_year_leaves_selection_unchanged() {
        let mut s = store();
        s.request_year(2010);
        for bogus in [1999, 2005, 2021, i32::MIN, i32::MAX] {
            assert!(!s.request_year(bogus));
            assert_eq!(s.current_year(), Some(2010));
        }
    }

    #[test]
    fn requests_while_loading_are_ignored() {
        let mut s = DataStore::loading();
        assert!(!s.request_year(2000));
        assert_eq!(s.current_year(), None);
    }

    #[test]
    fn empty_dataset_has_no_selection() {
        let mut s = DataStore::loading();
        s.load(Dataset::default());
        assert!(!s.is_loading());
        assert_eq!(s.current_year(), None);
        assert!(s.active_record().is_none());
        assert!(!s.request_year(2000));
    }

    #[test]
    fn reselecting_the_current_year_is_not_a_change() {
        let mut s = store();
        assert!(!s.request_year(2000));
    }
}
