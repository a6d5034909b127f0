use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The full input string after applying the key
    Input(String),
    NewSentence,
    Restart,
    ToggleAutoAdvance,
    ToggleSound,
    Quit,
    Ignore,
}

/// Map a key press to a command. `current` is the input typed so far;
/// editing keys produce the whole next input, never a delta.
pub fn command_for(key: &KeyEvent, current: &str) -> Command {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Right => Command::NewSentence,
        KeyCode::Char('n') if ctrl => Command::NewSentence,
        KeyCode::Left => Command::Restart,
        KeyCode::Char('r') if ctrl => Command::Restart,
        KeyCode::Char('a') if ctrl => Command::ToggleAutoAdvance,
        KeyCode::Char('s') if ctrl => Command::ToggleSound,
        KeyCode::Char('w') if ctrl => edited(current, delete_word(current)),
        KeyCode::Backspace if ctrl => edited(current, delete_word(current)),
        KeyCode::Backspace => edited(current, delete_char(current)),
        // many terminals send ctrl+h for backspace
        KeyCode::Char('h') if ctrl => edited(current, delete_char(current)),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => Command::Ignore,
        KeyCode::Char(c) => {
            let mut next = String::with_capacity(current.len() + c.len_utf8());
            next.push_str(current);
            next.push(c);
            Command::Input(next)
        }
        _ => Command::Ignore,
    }
}

fn edited(current: &str, next: String) -> Command {
    if next == current {
        Command::Ignore
    } else {
        Command::Input(next)
    }
}

fn delete_char(current: &str) -> String {
    let mut next = current.to_string();
    next.pop();
    next
}

/// Drop trailing whitespace, then the word before it
fn delete_word(current: &str) -> String {
    let trimmed = current.trim_end();
    let cut = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    trimmed[..cut].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_char_appends() {
        assert_eq!(
            command_for(&key(KeyCode::Char('o')), "Hell"),
            Command::Input("Hello".into())
        );
    }

    #[test]
    fn test_shifted_char_appends() {
        let shifted = KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(command_for(&shifted, ""), Command::Input("H".into()));
    }

    #[test]
    fn test_backspace_pops_one_char() {
        assert_eq!(
            command_for(&key(KeyCode::Backspace), "café"),
            Command::Input("caf".into())
        );
        assert_eq!(
            command_for(&ctrl('h'), "ab"),
            Command::Input("a".into())
        );
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        assert_eq!(command_for(&key(KeyCode::Backspace), ""), Command::Ignore);
    }

    #[test]
    fn test_delete_word() {
        assert_eq!(
            command_for(&ctrl('w'), "The quick brown"),
            Command::Input("The quick ".into())
        );
        assert_eq!(
            command_for(&ctrl('w'), "The quick "),
            Command::Input("The ".into())
        );
        assert_eq!(command_for(&ctrl('w'), "single"), Command::Input("".into()));
        assert_eq!(command_for(&ctrl('w'), ""), Command::Ignore);

        let ctrl_backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::CONTROL);
        assert_eq!(
            command_for(&ctrl_backspace, "Hello world"),
            Command::Input("Hello ".into())
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(command_for(&key(KeyCode::Esc), ""), Command::Quit);
        assert_eq!(command_for(&ctrl('c'), "abc"), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Right), ""), Command::NewSentence);
        assert_eq!(command_for(&ctrl('n'), ""), Command::NewSentence);
        assert_eq!(command_for(&key(KeyCode::Left), ""), Command::Restart);
        assert_eq!(command_for(&ctrl('r'), ""), Command::Restart);
        assert_eq!(command_for(&ctrl('a'), ""), Command::ToggleAutoAdvance);
        assert_eq!(command_for(&ctrl('s'), ""), Command::ToggleSound);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        assert_eq!(command_for(&ctrl('x'), "ab"), Command::Ignore);
        assert_eq!(command_for(&key(KeyCode::Enter), "ab"), Command::Ignore);
        assert_eq!(command_for(&key(KeyCode::F(1)), "ab"), Command::Ignore);

        let alt = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(command_for(&alt, "ab"), Command::Ignore);
    }
}
