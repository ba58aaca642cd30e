//! Input handling — maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::nav_widget::NavButtons;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Chart => handle_chart_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
    }
}

// ── Chart view (configurable bindings) ──────────────────────────

fn handle_chart_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    perform(state, action, Instant::now());
}

/// Apply a user action.  Navigation actions that the navigator reports as
/// disabled perform no request.
fn perform(state: &mut AppState, action: Action, now: Instant) {
    match action {
        Action::Quit => state.should_quit = true,
        Action::ToggleHelp => state.active_view = ActiveView::Help,
        Action::ToggleCount => state.toggle_display_count(now),
        Action::PreviousYear | Action::NextYear | Action::FirstYear | Action::LastYear => {
            let nav = state.navigation();
            let target = match action {
                Action::PreviousYear => nav.previous(),
                Action::NextYear => nav.next(),
                Action::FirstYear => nav.first(),
                _ => nav.last(),
            };
            match target {
                Some(year) => {
                    state.change_year(year, now);
                }
                None => tracing::trace!(?action, "navigation disabled"),
            }
        }
    }
}

// ── Help popup (hardcoded keys) ─────────────────────────────────

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Chart;
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view == ActiveView::Help {
        if let MouseEventKind::Down(_) = mouse.kind {
            state.active_view = ActiveView::Chart;
        }
        return;
    }

    let now = Instant::now();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = AppLayout::from_area(state.terminal_area);
            let buttons = NavButtons::layout(layout.nav_area);
            if point_in_rect(buttons.previous, mouse.column, mouse.row) {
                perform(state, Action::PreviousYear, now);
            } else if point_in_rect(buttons.next, mouse.column, mouse.row) {
                perform(state, Action::NextYear, now);
            }
        }
        MouseEventKind::ScrollUp => perform(state, Action::PreviousYear, now),
        MouseEventKind::ScrollDown => perform(state, Action::NextYear, now),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::loaded_state;
    use crate::app::state::AppState;
    use crate::config::AppConfig;

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn arrows_step_through_years() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Right);
        assert_eq!(state.store.current_year(), Some(2010));
        press(&mut state, KeyCode::Right);
        assert_eq!(state.store.current_year(), Some(2020));
        // Next is disabled on the last year.
        press(&mut state, KeyCode::Right);
        assert_eq!(state.store.current_year(), Some(2020));
        press(&mut state, KeyCode::Left);
        assert_eq!(state.store.current_year(), Some(2010));
    }

    #[test]
    fn previous_is_disabled_on_the_first_year() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Left);
        assert_eq!(state.store.current_year(), Some(2000));
        assert!(!state.slide.is_animating());
    }

    #[test]
    fn home_and_end_jump() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::End);
        assert_eq!(state.store.current_year(), Some(2020));
        press(&mut state, KeyCode::Home);
        assert_eq!(state.store.current_year(), Some(2000));
    }

    #[test]
    fn navigation_is_ignored_while_loading() {
        let mut state = AppState::new(AppConfig::default());
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::End);
        assert_eq!(state.store.current_year(), None);
    }

    #[test]
    fn toggle_count_and_quit() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Char('c'));
        assert_eq!(state.display_count, 15);
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_help() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_view, ActiveView::Help);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn help_swallows_navigation_keys() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Char('?'));
        press(&mut state, KeyCode::Right);
        assert_eq!(state.store.current_year(), Some(2000));
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_view, ActiveView::Chart);
    }

    #[test]
    fn clicking_the_buttons_navigates() {
        let mut state = loaded_state();
        let layout = AppLayout::from_area(state.terminal_area);
        let buttons = NavButtons::layout(layout.nav_area);

        click(&mut state, buttons.next.x + 1, buttons.next.y);
        assert_eq!(state.store.current_year(), Some(2010));
        click(&mut state, buttons.previous.x, buttons.previous.y);
        assert_eq!(state.store.current_year(), Some(2000));
        // Clicking the year label does nothing.
        click(&mut state, buttons.year.x, buttons.year.y);
        assert_eq!(state.store.current_year(), Some(2000));
        // Clicking the disabled previous button does nothing.
        click(&mut state, buttons.previous.x, buttons.previous.y);
        assert_eq!(state.store.current_year(), Some(2000));
    }
}
