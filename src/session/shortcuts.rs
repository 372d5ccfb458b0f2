use crate::config::Tool;
use crate::session::messages::{Key, Modifiers, Named};

/// Editor command a key press resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    SelectTool(Tool),
    DeleteSelection,
    /// Clear the selection and dismiss the text prompt
    Escape,
}

/// Letter and digit alias for each tool
pub fn aliases(tool: Tool) -> (char, char) {
    match tool {
        Tool::Select => ('v', '1'),
        Tool::Rectangle => ('r', '2'),
        Tool::Ellipse => ('o', '3'),
        Tool::Arrow => ('a', '4'),
        Tool::Line => ('l', '5'),
        Tool::Freehand => ('p', '6'),
        Tool::Highlighter => ('h', '7'),
        Tool::Text => ('t', '8'),
        Tool::Redact => ('d', '9'),
        Tool::Eraser => ('e', '0'),
    }
}

/// Tool bound to a character, if any
pub fn tool_for_char(c: char) -> Option<Tool> {
    let c = c.to_ascii_lowercase();
    Tool::ALL.into_iter().find(|&tool| {
        let (letter, digit) = aliases(tool);
        c == letter || c == digit
    })
}

/// Map a key press to an editor command
///
/// `captured` is true while the text prompt is open or the host reports
/// focus in one of its own text fields; only Escape gets through then.
pub fn handle_key_event(key: Key, modifiers: Modifiers, captured: bool) -> Option<KeyAction> {
    match key {
        Key::Named(Named::Escape) => Some(KeyAction::Escape),
        _ if captured => None,
        Key::Named(Named::Delete | Named::Backspace) => Some(KeyAction::DeleteSelection),
        Key::Character(_) if modifiers.command() => None,
        Key::Character(c) => tool_for_char(c).map(KeyAction::SelectTool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_two_distinct_aliases() {
        let mut seen = Vec::new();
        for tool in Tool::ALL {
            let (letter, digit) = aliases(tool);
            assert_eq!(tool_for_char(letter), Some(tool));
            assert_eq!(tool_for_char(digit), Some(tool));
            seen.push(letter);
            seen.push(digit);
        }
        let count = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn test_shortcut_keys() {
        let none = Modifiers::NONE;
        assert_eq!(
            handle_key_event(Key::Character('v'), none, false),
            Some(KeyAction::SelectTool(Tool::Select))
        );
        assert_eq!(
            handle_key_event(Key::Character('R'), none, false),
            Some(KeyAction::SelectTool(Tool::Rectangle))
        );
        assert_eq!(
            handle_key_event(Key::Character('0'), none, false),
            Some(KeyAction::SelectTool(Tool::Eraser))
        );
        assert_eq!(handle_key_event(Key::Character('z'), none, false), None);
    }

    #[test]
    fn test_captured_input_only_passes_escape() {
        let none = Modifiers::NONE;
        assert_eq!(handle_key_event(Key::Character('r'), none, true), None);
        assert_eq!(
            handle_key_event(Key::Named(Named::Backspace), none, true),
            None
        );
        assert_eq!(
            handle_key_event(Key::Named(Named::Escape), none, true),
            Some(KeyAction::Escape)
        );
    }

    #[test]
    fn test_command_modifiers_skip_tool_shortcuts() {
        let ctrl = Modifiers {
            control: true,
            ..Modifiers::NONE
        };
        assert_eq!(handle_key_event(Key::Character('v'), ctrl, false), None);
        assert_eq!(
            handle_key_event(Key::Named(Named::Delete), ctrl, false),
            Some(KeyAction::DeleteSelection)
        );
    }
}
