//! User configuration — keybindings, chart settings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/popchart/config.toml` (default `~/.config/popchart/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PreviousYear,
    NextYear,
    FirstYear,
    LastYear,
    ToggleCount,
    ToggleHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::PreviousYear,
        Action::NextYear,
        Action::FirstYear,
        Action::LastYear,
        Action::ToggleCount,
        Action::ToggleHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::PreviousYear => "Previous Year",
            Action::NextYear => "Next Year",
            Action::FirstYear => "First Year",
            Action::LastYear => "Last Year",
            Action::ToggleCount => "Toggle Country Count",
            Action::ToggleHelp => "Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::PreviousYear => "previous_year",
            Action::NextYear => "next_year",
            Action::FirstYear => "first_year",
            Action::LastYear => "last_year",
            Action::ToggleCount => "toggle_count",
            Action::ToggleHelp => "toggle_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.  SHIFT is ignored for character keys since the
    /// character itself already carries the case (`?` arrives as Shift+?).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = MODIFIER_MASK;
        if matches!(self.code, KeyCode::Char(_)) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"←"`, `"q"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Serialise to config-file format (e.g. `"Left"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Left"`, `"q"`, `"Home"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let n: u8 = lower[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case (`N` and `n` differ).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Accepted range for both display counts.
const COUNT_RANGE: (usize, usize) = (1, 50);
/// Accepted range for the frame interval.
const TICK_MS_RANGE: (u64, u64) = (10, 1000);

/// Application configuration — keybindings and chart settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Number of countries shown initially.
    pub display_count: usize,
    /// Number of countries shown after toggling.
    pub alt_display_count: usize,
    /// Duration of the bar length transition.
    pub animation_ms: u64,
    /// Width of the top bar, as a percentage of the bar column.
    pub max_bar_pct: u8,
    /// Event-loop tick (frame) interval.
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            display_count: 10,
            alt_display_count: 15,
            animation_ms: 1000,
            max_bar_pct: 90,
            tick_ms: 33,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PreviousYear, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextYear, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(FirstYear, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(LastYear, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(ToggleCount, vec![KeyBind::new(Char('c'), n), KeyBind::new(Char(' '), n)]);
        m.insert(ToggleHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for &action in Action::ALL {
            let Some(binds) = self.bindings.get(&action) else {
                continue;
            };
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"← / h"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join(" / ")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self, shown: usize) -> String {
        let other = self.other_count(shown);
        format!(
            "{}/{}: year | {}: show {} countries | {}: help | {}: quit",
            self.short_binding(Action::PreviousYear),
            self.short_binding(Action::NextYear),
            self.short_binding(Action::ToggleCount),
            other,
            self.short_binding(Action::ToggleHelp),
            self.short_binding(Action::Quit),
        )
    }

    /// Start with `count` countries shown.  When it equals the alternate
    /// count the two are swapped so the toggle still has somewhere to go.
    pub fn override_display_count(&mut self, count: usize) {
        let count = count.clamp(COUNT_RANGE.0, COUNT_RANGE.1);
        if count == self.alt_display_count {
            self.alt_display_count = self.display_count;
        }
        self.display_count = count;
    }

    pub fn override_tick_ms(&mut self, tick_ms: u64) {
        self.tick_ms = tick_ms.clamp(TICK_MS_RANGE.0, TICK_MS_RANGE.1);
    }

    /// The count the toggle switches to from `shown`.
    pub fn other_count(&self, shown: usize) -> usize {
        if shown == self.display_count {
            self.alt_display_count
        } else {
            self.display_count
        }
    }

    pub fn max_fraction(&self) -> f64 {
        f64::from(self.max_bar_pct) / 100.0
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Chart settings.  Out-of-range values are clamped.
            match key {
                "display_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.display_count = v.clamp(COUNT_RANGE.0, COUNT_RANGE.1);
                    }
                    continue;
                }
                "alt_display_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.alt_display_count = v.clamp(COUNT_RANGE.0, COUNT_RANGE.1);
                    }
                    continue;
                }
                "animation_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.animation_ms = v.min(10_000);
                    }
                    continue;
                }
                "max_bar_pct" => {
                    if let Ok(v) = value.parse::<u8>() {
                        config.max_bar_pct = v.clamp(10, 100);
                    }
                    continue;
                }
                "tick_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.override_tick_ms(v);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "unknown config key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# popchart configuration".to_string(),
            String::new(),
            "# Chart settings".to_string(),
            format!("display_count = {}", self.display_count),
            format!("alt_display_count = {}", self.alt_display_count),
            format!("animation_ms = {}", self.animation_ms),
            format!("max_bar_pct = {}", self.max_bar_pct),
            format!("tick_ms = {}", self.tick_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/popchart/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("popchart").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let config = AppConfig::default();
        for &action in Action::ALL {
            assert_ne!(config.display_bindings(action), "unbound", "{action:?}");
        }
    }

    #[test]
    fn arrows_navigate_years() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Left)), Some(Action::PreviousYear));
        assert_eq!(config.match_key(key(KeyCode::Right)), Some(Action::NextYear));
        assert_eq!(config.match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn shifted_characters_match_their_binding() {
        let config = AppConfig::default();
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(question), Some(Action::ToggleHelp));
        let big_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(big_g), Some(Action::LastYear));
    }

    #[test]
    fn modifiers_must_match() {
        let config = AppConfig::default();
        let ctrl_left = KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(config.match_key(ctrl_left), None);
    }

    #[test]
    fn parse_key_strings() {
        assert_eq!(
            KeyBind::parse("Ctrl+n"),
            Some(KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeyBind::parse("PgUp"), Some(KeyBind::new(KeyCode::PageUp, KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("G"), Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("banana"), None);
    }

    #[test]
    fn settings_are_parsed_and_clamped() {
        let config = AppConfig::parse_config(
            "display_count = 5\nalt_display_count = 500\nmax_bar_pct = 3\nanimation_ms = nope\n",
        );
        assert_eq!(config.display_count, 5);
        assert_eq!(config.alt_display_count, 50);
        assert_eq!(config.max_bar_pct, 10);
        assert_eq!(config.animation_ms, 1000);
    }

    #[test]
    fn bindings_override_defaults() {
        let config = AppConfig::parse_config("next_year = n, Ctrl+Right\n# comment\n[section]\n");
        assert_eq!(config.match_key(key(KeyCode::Char('n'))), Some(Action::NextYear));
        assert_eq!(config.match_key(key(KeyCode::Right)), None);
        let ctrl_right = KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(config.match_key(ctrl_right), Some(Action::NextYear));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("popchart").join("config.toml");

        let mut config = AppConfig::default();
        config.display_count = 7;
        config.animation_ms = 250;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)]);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.display_count, 7);
        assert_eq!(loaded.animation_ms, 250);
        assert_eq!(loaded.display_bindings(Action::Quit), "Ctrl+x");
        assert_eq!(loaded.display_bindings(Action::PreviousYear), "← / h");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.display_count, 10);
        assert_eq!(config.alt_display_count, 15);
        assert_eq!(config.max_fraction(), 0.9);
    }

    #[test]
    fn toggle_alternates_between_counts() {
        let config = AppConfig::default();
        assert_eq!(config.other_count(10), 15);
        assert_eq!(config.other_count(15), 10);
        assert!(config.status_bar_hint(10).contains("show 15 countries"));
    }

    #[test]
    fn count_override_matching_the_alternate_swaps_them() {
        let mut config = AppConfig::default();
        config.override_display_count(15);
        assert_eq!(config.display_count, 15);
        assert_eq!(config.alt_display_count, 10);
        assert_eq!(config.other_count(15), 10);
        assert!(config.status_bar_hint(15).contains("show 10 countries"));
    }

    #[test]
    fn count_override_is_clamped() {
        let mut config = AppConfig::default();
        config.override_display_count(0);
        assert_eq!(config.display_count, 1);
        config.override_display_count(999);
        assert_eq!(config.display_count, 50);
        assert_eq!(config.alt_display_count, 15);
    }

    #[test]
    fn tick_override_uses_the_config_file_range() {
        let mut config = AppConfig::default();
        config.override_tick_ms(1);
        assert_eq!(config.tick_ms, 10);
        config.override_tick_ms(5_000);
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(AppConfig::parse_config("tick_ms = 1\n").tick_ms, 10);
    }
}
