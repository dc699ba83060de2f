use crate::session::messages::Msg;
use cosmic::iced::keyboard::{Key, Modifiers, key::Named};

/// Map a key press to a session message.
///
/// Escape always maps to [`Msg::cancel`]; the handler decides whether that
/// aborts a drag or drops the selection.
pub fn handle_key_event(key: Key, modifiers: Modifiers) -> Option<Msg> {
    match key {
        // File shortcuts
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("s") && modifiers.command() => {
            Some(Msg::save())
        }
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("o") && modifiers.command() => {
            Some(Msg::open())
        }
        // Clipboard and selection
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("a") && modifiers.command() => {
            Some(Msg::select_all())
        }
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("c") && modifiers.command() => {
            Some(Msg::copy())
        }
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("x") && modifiers.command() => {
            Some(Msg::cut())
        }
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("v") && modifiers.command() => {
            Some(Msg::paste())
        }
        Key::Named(Named::Delete) | Key::Named(Named::Backspace) => Some(Msg::delete_selected()),
        Key::Named(Named::Escape) => Some(Msg::cancel()),
        // View shortcuts (no modifiers, so they don't shadow the above)
        Key::Character(c) if c.as_str() == "f" && !modifiers.command() => Some(Msg::fit()),
        Key::Character(c) if (c.as_str() == "+" || c.as_str() == "=") && !modifiers.command() => {
            Some(Msg::zoom_in())
        }
        Key::Character(c) if c.as_str() == "-" && !modifiers.command() => Some(Msg::zoom_out()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::messages::{EditMsg, FileMsg, ViewMsg};

    fn key(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn test_control_shortcuts() {
        let ctrl = Modifiers::COMMAND;
        assert!(matches!(
            handle_key_event(key("s"), ctrl),
            Some(Msg::File(FileMsg::Save))
        ));
        assert!(matches!(
            handle_key_event(key("o"), ctrl),
            Some(Msg::File(FileMsg::Open))
        ));
        assert!(matches!(
            handle_key_event(key("v"), ctrl),
            Some(Msg::Edit(EditMsg::Paste))
        ));
        assert!(handle_key_event(key("s"), Modifiers::empty()).is_none());
    }

    #[test]
    fn test_command_modifier_drives_file_shortcuts() {
        // Cmd on macOS, Ctrl elsewhere
        assert!(matches!(
            handle_key_event(key("S"), Modifiers::COMMAND | Modifiers::SHIFT),
            Some(Msg::File(FileMsg::Save))
        ));
        assert!(matches!(
            handle_key_event(key("x"), Modifiers::COMMAND),
            Some(Msg::Edit(EditMsg::Cut))
        ));
        assert!(handle_key_event(key("f"), Modifiers::COMMAND).is_none());
    }

    #[test]
    fn test_plain_keys() {
        let none = Modifiers::empty();
        assert!(matches!(
            handle_key_event(Key::Named(Named::Escape), none),
            Some(Msg::Edit(EditMsg::Cancel))
        ));
        assert!(matches!(
            handle_key_event(Key::Named(Named::Delete), none),
            Some(Msg::Edit(EditMsg::DeleteSelected))
        ));
        assert!(matches!(
            handle_key_event(key("f"), none),
            Some(Msg::View(ViewMsg::Fit))
        ));
        assert!(matches!(
            handle_key_event(key("-"), none),
            Some(Msg::View(ViewMsg::ZoomOut))
        ));
        assert!(handle_key_event(key("q"), none).is_none());
    }
}
