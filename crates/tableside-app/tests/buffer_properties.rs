//! Property tests for input buffer editing.

use proptest::prelude::*;
use tableside_app::{App, AppEvent, KeyInput};

#[derive(Debug, Clone)]
enum EditKey {
    Char(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

fn edit_key() -> impl Strategy<Value = EditKey> {
    prop_oneof![
        4 => any::<char>().prop_map(EditKey::Char),
        1 => Just(EditKey::Newline),
        2 => Just(EditKey::Backspace),
        1 => Just(EditKey::Delete),
        2 => Just(EditKey::Left),
        2 => Just(EditKey::Right),
        1 => Just(EditKey::Home),
        1 => Just(EditKey::End),
    ]
}

fn apply(app: &mut App, key: &EditKey) {
    let input = match key {
        EditKey::Char(c) => KeyInput::Char(*c),
        EditKey::Newline => KeyInput::Enter { shift: true },
        EditKey::Backspace => KeyInput::Backspace,
        EditKey::Delete => KeyInput::Delete,
        EditKey::Left => KeyInput::Left,
        EditKey::Right => KeyInput::Right,
        EditKey::Home => KeyInput::Home,
        EditKey::End => KeyInput::End,
    };
    let _ = app.handle(AppEvent::Key(input));
}

proptest! {
    /// Arbitrary edit sequences keep the cursor inside the buffer and on a
    /// character boundary, including for multi-byte input.
    #[test]
    fn cursor_stays_on_char_boundary(keys in prop::collection::vec(edit_key(), 0..64)) {
        let mut app = App::new();
        for key in &keys {
            apply(&mut app, key);
            prop_assert!(app.cursor() <= app.input_buffer().len());
            prop_assert!(app.input_buffer().is_char_boundary(app.cursor()));
        }
    }

    /// Typing then backspacing the same number of times restores the
    /// previous buffer contents.
    #[test]
    fn backspace_undoes_typing(prefix in "[a-z]{0,8}", typed in prop::collection::vec(any::<char>(), 1..16)) {
        let mut app = App::new();
        for c in prefix.chars() {
            apply(&mut app, &EditKey::Char(c));
        }
        let before = app.input_buffer().to_string();

        for c in &typed {
            apply(&mut app, &EditKey::Char(*c));
        }
        for _ in &typed {
            apply(&mut app, &EditKey::Backspace);
        }

        prop_assert_eq!(app.input_buffer(), before);
    }
}
