//! Tests for suggestion list navigation

use super::*;
use proptest::prelude::*;

fn suggestions(count: usize) -> Vec<Suggestion> {
    (0..count)
        .map(|i| Suggestion::new(format!("{} Downing Street, London, SW1A", i + 1), i as i64))
        .collect()
}

fn open_navigator(count: usize) -> Navigator {
    let mut navigator = Navigator::new();
    navigator.set_suggestions(suggestions(count));
    navigator.drain_events();
    navigator
}

fn highlighted_rows(navigator: &Navigator) -> Vec<usize> {
    navigator
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_highlighted())
        .map(|(i, _)| i)
        .collect()
}

// =========================================================================
// Visibility
// =========================================================================

#[test]
fn test_new_navigator_is_closed() {
    let navigator = Navigator::new();
    assert!(!navigator.is_open());
    assert!(navigator.highlight().is_none());
    assert!(navigator.rows().is_empty());
}

#[test]
fn test_set_suggestions_opens() {
    let mut navigator = Navigator::new();
    navigator.set_suggestions(suggestions(3));
    assert!(navigator.is_open());
    assert!(navigator.highlight().is_none());
    assert_eq!(navigator.rows().len(), 3);
    assert_eq!(navigator.drain_events(), vec![NavigatorEvent::Opened]);
}

#[test]
fn test_set_empty_suggestions_closes() {
    let mut navigator = open_navigator(3);
    navigator.set_suggestions(Vec::new());
    assert!(!navigator.is_open());
    assert_eq!(
        navigator.drain_events(),
        vec![NavigatorEvent::Closed(CloseReason::Empty)]
    );
}

#[test]
fn test_set_empty_suggestions_when_closed_is_silent() {
    let mut navigator = Navigator::new();
    navigator.set_suggestions(Vec::new());
    assert!(!navigator.is_open());
    assert!(navigator.drain_events().is_empty());
}

#[test]
fn test_replacing_suggestions_while_open_does_not_reopen() {
    let mut navigator = open_navigator(3);
    navigator.next();
    navigator.set_suggestions(suggestions(5));
    assert!(navigator.highlight().is_none());
    assert!(highlighted_rows(&navigator).is_empty());
    assert!(navigator.drain_events().is_empty());
}

#[test]
fn test_close_is_idempotent() {
    let mut navigator = open_navigator(3);
    navigator.close(CloseReason::Explicit);
    navigator.close(CloseReason::Explicit);
    assert_eq!(
        navigator.drain_events(),
        vec![NavigatorEvent::Closed(CloseReason::Explicit)]
    );
}

#[test]
fn test_open_is_idempotent() {
    let mut navigator = open_navigator(3);
    navigator.close(CloseReason::Explicit);
    navigator.drain_events();
    navigator.open();
    navigator.open();
    assert_eq!(navigator.drain_events(), vec![NavigatorEvent::Opened]);
}

// =========================================================================
// Highlight movement
// =========================================================================

#[test]
fn test_next_from_none_highlights_first() {
    let mut navigator = open_navigator(3);
    navigator.next();
    assert_eq!(navigator.highlight(), Some(0));
    assert_eq!(highlighted_rows(&navigator), vec![0]);
}

#[test]
fn test_next_wraps_from_last() {
    let mut navigator = open_navigator(3);
    navigator.goto(2);
    navigator.next();
    assert_eq!(navigator.highlight(), Some(0));
}

#[test]
fn test_previous_from_none_highlights_last() {
    let mut navigator = open_navigator(3);
    navigator.previous();
    assert_eq!(navigator.highlight(), Some(2));
}

#[test]
fn test_previous_wraps_from_first() {
    let mut navigator = open_navigator(3);
    navigator.goto(0);
    navigator.previous();
    assert_eq!(navigator.highlight(), Some(2));
}

#[test]
fn test_navigation_ignored_when_closed() {
    let mut navigator = open_navigator(3);
    navigator.close(CloseReason::Explicit);
    navigator.next();
    navigator.previous();
    assert!(navigator.highlight().is_none());
}

#[test]
fn test_goto_moves_single_highlight_flag() {
    let mut navigator = open_navigator(5);
    navigator.goto(1);
    navigator.goto(3);
    assert_eq!(highlighted_rows(&navigator), vec![3]);
}

#[test]
fn test_goto_out_of_range_is_ignored() {
    let mut navigator = open_navigator(3);
    navigator.goto(1);
    navigator.goto(3);
    assert_eq!(navigator.highlight(), Some(1));
}

#[test]
fn test_goto_scrolls_into_view() {
    let mut navigator = open_navigator(10);
    navigator.viewport_mut().set_client_height(3);
    navigator.goto(6);
    assert_eq!(navigator.viewport().scroll_top(), 4);
    navigator.goto(0);
    assert_eq!(navigator.viewport().scroll_top(), 0);
}

#[test]
fn test_shrinking_window_keeps_highlight_visible() {
    let mut navigator = open_navigator(10);
    navigator.viewport_mut().set_client_height(8);
    navigator.goto(5);
    assert_eq!(navigator.viewport().scroll_top(), 0);

    navigator.set_visible_height(3);
    assert_eq!(navigator.viewport().scroll_top(), 3);
    assert!(navigator.viewport().visible_rows(10).contains(&5));
}

#[test]
fn test_set_visible_height_without_highlight_keeps_scroll() {
    let mut navigator = open_navigator(10);
    navigator.set_visible_height(3);
    assert_eq!(navigator.viewport().scroll_top(), 0);
    assert_eq!(navigator.viewport().client_height(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // `len` calls to next() from no highlight end back on the first row
    #[test]
    fn prop_next_full_cycle(len in 1usize..30) {
        let mut navigator = open_navigator(len);
        navigator.next();
        for _ in 0..len {
            navigator.next();
        }
        prop_assert_eq!(navigator.highlight(), Some(0));
    }

    // `len` calls to previous() from no highlight end back on the last row
    #[test]
    fn prop_previous_full_cycle(len in 1usize..30) {
        let mut navigator = open_navigator(len);
        navigator.previous();
        for _ in 0..len {
            navigator.previous();
        }
        prop_assert_eq!(navigator.highlight(), Some(len - 1));
    }

    // The highlight never leaves the list and at most one row is flagged
    #[test]
    fn prop_highlight_stays_in_bounds(
        len in 0usize..12,
        moves in prop::collection::vec(0u8..4, 0..40),
    ) {
        let mut navigator = Navigator::new();
        navigator.set_suggestions(suggestions(len));
        for step in moves {
            match step {
                0 => navigator.next(),
                1 => navigator.previous(),
                2 => navigator.goto(len / 2),
                _ => navigator.set_suggestions(suggestions(len)),
            }
            prop_assert!(navigator.highlight().is_none_or(|i| i < navigator.rows().len()));
            prop_assert!(highlighted_rows(&navigator).len() <= 1);
        }
    }
}

// =========================================================================
// Selection
// =========================================================================

#[test]
fn test_select_without_highlight_is_noop() {
    let mut navigator = open_navigator(3);
    navigator.select(None);
    assert!(navigator.is_open());
    assert!(navigator.drain_events().is_empty());
}

#[test]
fn test_select_emits_suggestion_and_closes() {
    let mut navigator = open_navigator(3);
    navigator.goto(1);
    navigator.select(None);
    assert!(!navigator.is_open());
    assert_eq!(
        navigator.drain_events(),
        vec![
            NavigatorEvent::Selected(suggestions(3)[1].clone()),
            NavigatorEvent::Closed(CloseReason::Select),
        ]
    );
}

#[test]
fn test_select_clicked_row_overrides_highlight() {
    let mut navigator = open_navigator(3);
    navigator.goto(0);
    navigator.select(Some(2));
    assert_eq!(
        navigator.drain_events()[0],
        NavigatorEvent::Selected(suggestions(3)[2].clone())
    );
}

// =========================================================================
// Keyboard and pointer policy
// =========================================================================

#[test]
fn test_keyboard_scenario_down_down_up_enter() {
    let mut navigator = open_navigator(10);

    assert_eq!(
        navigator.handle_key(Key::Down),
        KeyAction::Handled { prevent_default: true }
    );
    assert_eq!(navigator.highlight(), Some(0));
    navigator.handle_key(Key::Down);
    assert_eq!(navigator.highlight(), Some(1));
    navigator.handle_key(Key::Up);
    assert_eq!(navigator.highlight(), Some(0));

    assert_eq!(
        navigator.handle_key(Key::Enter),
        KeyAction::Handled { prevent_default: true }
    );
    assert!(!navigator.is_open());
    assert_eq!(
        navigator.drain_events(),
        vec![
            NavigatorEvent::Selected(suggestions(10)[0].clone()),
            NavigatorEvent::Closed(CloseReason::Select),
        ]
    );
}

#[test]
fn test_enter_without_highlight_keeps_default() {
    let mut navigator = open_navigator(3);
    assert_eq!(navigator.handle_key(Key::Enter), KeyAction::Ignored);
    assert!(navigator.is_open());
}

#[test]
fn test_keys_ignored_when_closed() {
    let mut navigator = Navigator::new();
    for key in [Key::Enter, Key::Backspace, Key::Escape, Key::Up, Key::Down] {
        assert_eq!(navigator.handle_key(key), KeyAction::Ignored);
    }
}

#[test]
fn test_backspace_forwards_input() {
    let mut navigator = open_navigator(3);
    assert_eq!(navigator.handle_key(Key::Backspace), KeyAction::ForwardInput);
    assert!(navigator.is_open());
}

#[test]
fn test_escape_closes() {
    let mut navigator = open_navigator(3);
    navigator.handle_key(Key::Escape);
    assert!(!navigator.is_open());
    assert_eq!(
        navigator.drain_events(),
        vec![NavigatorEvent::Closed(CloseReason::Escape)]
    );
}

#[test]
fn test_other_keys_ignored() {
    let mut navigator = open_navigator(3);
    assert_eq!(navigator.handle_key(Key::Other), KeyAction::Ignored);
}

#[test]
fn test_primary_click_on_row_selects() {
    let mut navigator = open_navigator(3);
    assert!(navigator.handle_mouse_down(MouseButton::Primary, MouseTarget::Row(1)));
    assert_eq!(
        navigator.drain_events()[0],
        NavigatorEvent::Selected(suggestions(3)[1].clone())
    );
}

#[test]
fn test_click_on_row_ignored_when_closed() {
    for reason in [CloseReason::Escape, CloseReason::Blur, CloseReason::Select] {
        let mut navigator = open_navigator(2);
        navigator.close(reason);
        navigator.drain_events();

        assert!(!navigator.handle_mouse_down(MouseButton::Primary, MouseTarget::Row(1)));
        assert_eq!(navigator.highlight(), None);
        assert!(navigator.drain_events().is_empty());
    }
}

#[test]
fn test_click_on_list_container_ignored() {
    let mut navigator = open_navigator(3);
    assert!(!navigator.handle_mouse_down(MouseButton::Primary, MouseTarget::List));
    assert!(navigator.is_open());
    assert!(navigator.drain_events().is_empty());
}

#[test]
fn test_non_primary_click_ignored() {
    let mut navigator = open_navigator(3);
    assert!(!navigator.handle_mouse_down(MouseButton::Secondary, MouseTarget::Row(1)));
    assert!(!navigator.handle_mouse_down(MouseButton::Middle, MouseTarget::Row(1)));
    assert!(navigator.drain_events().is_empty());
}

// =========================================================================
// Message overlay
// =========================================================================

#[test]
fn test_message_replaces_rows_and_opens() {
    let mut navigator = Navigator::new();
    navigator.set_message(Some("Unable to retrieve address suggestions"));
    assert!(navigator.is_open());
    assert_eq!(
        navigator.message(),
        Some("Unable to retrieve address suggestions")
    );
    assert_eq!(navigator.rows().len(), 1);
    assert_eq!(navigator.drain_events(), vec![NavigatorEvent::Opened]);
}

#[test]
fn test_message_resets_highlight_and_blocks_navigation() {
    let mut navigator = open_navigator(3);
    navigator.goto(1);
    navigator.set_message(Some("error"));
    assert!(navigator.highlight().is_none());
    navigator.next();
    assert!(navigator.highlight().is_none());
    navigator.select(Some(0));
    assert!(navigator.drain_events().is_empty());
}

#[test]
fn test_clearing_message_restores_suggestions() {
    let mut navigator = open_navigator(3);
    navigator.set_message(Some("error"));
    navigator.set_message(None);
    assert!(navigator.message().is_none());
    assert_eq!(navigator.rows().len(), 3);
    assert_eq!(navigator.rows()[0].text(), "1 Downing Street, London, SW1A");
}

#[test]
fn test_empty_message_restores_and_closes_without_suggestions() {
    let mut navigator = Navigator::new();
    navigator.set_message(Some("error"));
    navigator.set_message(Some(""));
    assert!(!navigator.is_open());
    assert_eq!(
        navigator.drain_events(),
        vec![
            NavigatorEvent::Opened,
            NavigatorEvent::Closed(CloseReason::Empty)
        ]
    );
}
