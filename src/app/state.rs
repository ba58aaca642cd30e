//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    dataset::Dataset,
    navigator::Navigation,
    ranking::{self, RankedBar},
    store::DataStore,
};
use crate::ui::{
    animation::{BarTween, SlideDirection, SlideTransition},
    chart_widget::ChartRow,
    palette,
};

/// Per-tick damping of the year-change slide.
const SLIDE_SPEED: f64 = 0.25;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Chart,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// Loaded dataset and the selected year.
    pub store: DataStore,
    /// Years in the dataset, cached at load time for navigation.
    pub years: Vec<i32>,
    /// Maximum number of countries in the chart.
    pub display_count: usize,
    /// Ranked bars for the active year, recomputed on every data change.
    pub bars: Vec<RankedBar>,
    /// Bar-length transition.
    pub tween: BarTween,
    /// Year-change slide.
    pub slide: SlideTransition,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// `true` when the status message reports a failure.
    pub status_is_error: bool,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User-configurable keybindings and chart settings.
    pub config: AppConfig,
    /// Full terminal area as of the last draw (for mouse hit-testing).
    pub terminal_area: Rect,
    /// Monotonic frame counter (drives the loading spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: DataStore::loading(),
            years: Vec::new(),
            display_count: config.display_count,
            bars: Vec::new(),
            tween: BarTween::new(config.animation()),
            slide: SlideTransition::new(SLIDE_SPEED),
            should_quit: false,
            status_message: None,
            status_is_error: false,
            active_view: ActiveView::default(),
            config,
            terminal_area: Rect::default(),
            tick: 0,
        }
    }

    /// Install a freshly loaded dataset and show its first year.
    pub fn apply_dataset(&mut self, dataset: Dataset, now: Instant) {
        self.store.load(dataset);
        self.years = self.store.years();
        self.refresh_chart(now);
    }

    /// Record a failed load: the chart stays empty and navigation disabled.
    pub fn apply_load_error(&mut self, message: String, now: Instant) {
        self.apply_dataset(Dataset::default(), now);
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    /// Navigation decision for the current year.
    pub fn navigation(&self) -> Navigation<'_> {
        match self.store.current_year() {
            Some(year) => Navigation::new(&self.years, year),
            None => Navigation::disabled(),
        }
    }

    /// Switch to `year`, sliding the chart in the direction of travel.
    /// Unknown years are ignored.  Returns whether the year changed.
    pub fn change_year(&mut self, year: i32, now: Instant) -> bool {
        let previous = self.store.current_year();
        if !self.store.request_year(year) {
            return false;
        }
        if let Some(direction) = previous.and_then(|p| SlideDirection::between(p, year)) {
            self.slide.start(direction, self.slide_distance());
        }
        tracing::debug!(?previous, year, "year changed");
        self.refresh_chart(now);
        true
    }

    /// Flip between the two configured display counts.
    pub fn toggle_display_count(&mut self, now: Instant) {
        self.display_count = self.config.other_count(self.display_count);
        self.status_message = None;
        self.status_is_error = false;
        self.refresh_chart(now);
    }

    /// Recompute the ranked bars for the active year and retarget the tween.
    pub fn refresh_chart(&mut self, now: Instant) {
        self.bars = match self.store.active_record() {
            Some(record) => ranking::rank(
                &record.countries,
                self.display_count,
                self.config.max_fraction(),
            ),
            None => Vec::new(),
        };
        let keys = tween_keys(&self.bars);
        self.tween.retarget(
            keys.into_iter()
                .zip(self.bars.iter().map(|bar| bar.fraction)),
            now,
        );
    }

    /// Rows to draw this frame, with animated bar lengths.
    pub fn chart_rows(&self, now: Instant) -> Vec<ChartRow> {
        self.bars
            .iter()
            .zip(tween_keys(&self.bars))
            .map(|(bar, key)| ChartRow {
                name: bar.country.name.clone(),
                population: bar.country.population,
                fraction: self.tween.value(&key, now),
                color: palette::country_color(&bar.country.name),
            })
            .collect()
    }

    /// Advance frame-based animations.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.slide.tick();
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.slide.is_animating() || self.tween.is_animating(now)
    }

    fn slide_distance(&self) -> u16 {
        (self.terminal_area.width / 4).max(8)
    }
}

/// Animation key per bar: the country name, suffixed with `#n` for the n-th
/// repeat of a name within the year.  Names stay stable across years where
/// record ids do not.
fn tween_keys(bars: &[RankedBar]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    bars.iter()
        .map(|bar| {
            let name = bar.country.name.as_str();
            let n = seen.entry(name).or_insert(0);
            let key = if *n == 0 {
                name.to_string()
            } else {
                format!("{name}#{n}")
            };
            *n += 1;
            key
        })
        .collect()
}
