use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use demtrack_core::{Categoria, PageState};
use demtrack_tui::config::{ThemeConfig, TuiConfig};
use demtrack_tui::keys::{map_key, Action};
use demtrack_tui::nav::View;
use demtrack_tui::state::CollectionState;
use demtrack_tui::theme::{status_badge_fg, ClaroTheme};
use demtrack_tui::widgets::TableBody;
use proptest::prelude::*;
use ratatui::style::Color;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:3333".to_string(),
        proprietario_id: Some(1),
        request_timeout_ms: 5_000,
        refresh_interval_ms: 30_000,
        page_size: 25,
        persistence_path: "tmp/demtrack-tui.json".into(),
        theme: ThemeConfig {
            name: "claro".to_string(),
        },
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

#[test]
fn config_requires_base_url() {
    let mut config = base_config();
    config.api_base_url = "   ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_requires_known_theme() {
    let mut config = base_config();
    config.theme.name = "unknown".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_bounds_page_size() {
    let mut config = base_config();
    config.page_size = 0;
    assert!(config.validate().is_err());
    config.page_size = 100;
    assert!(config.validate().is_ok());
}

#[test]
fn quit_keys_map_to_quit() {
    assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Action::Quit));
    let ctrl_c = KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    };
    assert_eq!(map_key(ctrl_c), Some(Action::Quit));
}

#[test]
fn digits_jump_to_views() {
    assert_eq!(map_key(key(KeyCode::Char('1'))), Some(Action::SwitchView(0)));
    assert_eq!(map_key(key(KeyCode::Char('0'))), Some(Action::SwitchView(9)));
}

#[test]
fn table_body_precedence() {
    assert_eq!(TableBody::classify(true, 0), TableBody::Loading);
    assert_eq!(TableBody::classify(true, 3), TableBody::Loading);
    assert_eq!(TableBody::classify(false, 0), TableBody::Empty);
    assert_eq!(TableBody::classify(false, 3), TableBody::Rows);
}

#[test]
fn badge_foreground_is_black_or_white() {
    let _ = ClaroTheme::claro();
    assert_eq!(status_badge_fg("#FFFFFF"), Color::Rgb(0, 0, 0));
    assert_eq!(status_badge_fg("#000000"), Color::Rgb(255, 255, 255));
}

proptest! {
    /// The keymap is total: any key event maps to Some(action) or None
    /// without panicking.
    #[test]
    fn prop_map_key_never_panics(c in any::<char>()) {
        let _ = map_key(key(KeyCode::Char(c)));
    }

    /// View navigation cycles: next applied len times is identity.
    #[test]
    fn prop_view_next_cycles(start in 0usize..12) {
        let view = View::all()[start];
        let mut current = view;
        for _ in 0..View::all().len() {
            current = current.next();
        }
        prop_assert_eq!(current, view);
    }

    /// previous() is the inverse of next().
    #[test]
    fn prop_view_prev_inverts_next(start in 0usize..12) {
        let view = View::all()[start];
        prop_assert_eq!(view.next().previous(), view);
        prop_assert_eq!(view.previous().next(), view);
    }

    /// Row numbering stays continuous for any page/size/index.
    #[test]
    fn prop_row_numbers_continuous(
        current_page in 1u32..1_000,
        page_size in 1u32..200,
        index in 0usize..200,
    ) {
        let mut page = PageState::new(page_size);
        page.current_page = current_page;
        let expected = (current_page as u64 - 1) * page_size as u64 + index as u64 + 1;
        prop_assert_eq!(page.row_number(index), expected);
    }

    /// After any sequence of moves, the selection is either absent or
    /// points at a record that exists.
    #[test]
    fn prop_selection_always_valid(
        ids in prop::collection::hash_set(1i64..500, 0..12),
        moves in prop::collection::vec(any::<bool>(), 0..30),
    ) {
        let items: Vec<Categoria> = ids
            .iter()
            .map(|id| Categoria::new(*id, format!("c{}", id)))
            .collect();
        let mut state: CollectionState<Categoria> = CollectionState::new(25);
        state.items = items;
        let moved = !moves.is_empty();

        for forward in moves {
            if forward {
                state.select_next();
            } else {
                state.select_previous();
            }
        }

        if let Some(selected) = state.selected {
            prop_assert!(state.items.iter().any(|c| c.id == selected));
        } else {
            prop_assert!(state.items.is_empty() || !moved);
        }
    }

    /// Badge foreground never yields anything but pure black or white.
    #[test]
    fn prop_badge_fg_is_binary(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let cor = format!("#{:02X}{:02X}{:02X}", r, g, b);
        let fg = status_badge_fg(&cor);
        prop_assert!(fg == Color::Rgb(0, 0, 0) || fg == Color::Rgb(255, 255, 255));
    }
}
