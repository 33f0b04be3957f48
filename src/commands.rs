use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which layer currently receives keys. Topmost wins: notice, help, logs, list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    List,
    Logs,
    Help,
    Notice,
}

/// Identifiers for everything a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Up,
    Down,
    Top,
    Bottom,
    ViewLogs,
    Start,
    Stop,
    Restart,
    Refresh,
    Help,
    Quit,
    CloseLogs,
    ToggleFollow,
    CloseHelp,
    Dismiss,
}

/// Keybinding hint for the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub key: &'static str,
    pub desc: &'static str,
}

/// Maps (scope, key) to a command, looked up when the key arrives.
/// Hints are kept in registration order for the status bar.
pub struct CommandRegistry {
    lookup: HashMap<(Scope, KeyCode), Command>,
    hints: HashMap<Scope, Vec<KeyBinding>>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            lookup: HashMap::new(),
            hints: HashMap::new(),
        }
    }

    /// Default keymap. Start/stop/restart are only bound when the backend
    /// supports them.
    pub fn new(actions_enabled: bool) -> Self {
        let mut reg = Self::empty();

        reg.bind(Scope::List, &[KeyCode::Up, KeyCode::Char('k')], Command::Up);
        reg.bind(Scope::List, &[KeyCode::Down, KeyCode::Char('j')], Command::Down);
        reg.bind(Scope::List, &[KeyCode::Char('g')], Command::Top);
        reg.bind(Scope::List, &[KeyCode::Char('G')], Command::Bottom);
        reg.hint(Scope::List, "↑↓", "nav");
        reg.bind(Scope::List, &[KeyCode::Enter, KeyCode::Char('l')], Command::ViewLogs);
        reg.hint(Scope::List, "l", "logs");
        if actions_enabled {
            reg.bind(Scope::List, &[KeyCode::Char('s')], Command::Start);
            reg.hint(Scope::List, "s", "start");
            reg.bind(Scope::List, &[KeyCode::Char('x')], Command::Stop);
            reg.hint(Scope::List, "x", "stop");
            reg.bind(Scope::List, &[KeyCode::Char('R')], Command::Restart);
            reg.hint(Scope::List, "R", "restart");
        }
        reg.bind(Scope::List, &[KeyCode::Char('r')], Command::Refresh);
        reg.hint(Scope::List, "r", "refresh");
        reg.bind(Scope::List, &[KeyCode::Char('?')], Command::Help);
        reg.hint(Scope::List, "?", "help");
        reg.bind(Scope::List, &[KeyCode::Char('q')], Command::Quit);
        reg.hint(Scope::List, "q", "quit");

        reg.bind(Scope::Logs, &[KeyCode::Up, KeyCode::Char('k')], Command::Up);
        reg.bind(Scope::Logs, &[KeyCode::Down, KeyCode::Char('j')], Command::Down);
        reg.hint(Scope::Logs, "↑↓", "scroll");
        reg.bind(Scope::Logs, &[KeyCode::Char('g')], Command::Top);
        reg.bind(Scope::Logs, &[KeyCode::Char('G')], Command::Bottom);
        reg.hint(Scope::Logs, "g/G", "top/end");
        reg.bind(Scope::Logs, &[KeyCode::Char('f')], Command::ToggleFollow);
        reg.hint(Scope::Logs, "f", "follow");
        reg.bind(Scope::Logs, &[KeyCode::Esc, KeyCode::Char('q')], Command::CloseLogs);
        reg.hint(Scope::Logs, "Esc", "close");

        reg.bind(
            Scope::Help,
            &[KeyCode::Esc, KeyCode::Char('?'), KeyCode::Char('q')],
            Command::CloseHelp,
        );
        reg.hint(Scope::Help, "Esc", "close");

        reg.bind(Scope::Notice, &[KeyCode::Esc, KeyCode::Enter], Command::Dismiss);
        reg.hint(Scope::Notice, "Enter", "ok");

        reg
    }

    pub fn bind(&mut self, scope: Scope, keys: &[KeyCode], command: Command) {
        for key in keys {
            self.lookup.insert((scope, *key), command);
        }
    }

    pub fn hint(&mut self, scope: Scope, key: &'static str, desc: &'static str) {
        self.hints.entry(scope).or_default().push(KeyBinding { key, desc });
    }

    /// Resolve a key press. Ctrl-C quits from anywhere except a notice,
    /// which has to be acknowledged first.
    pub fn resolve(&self, scope: Scope, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return if scope == Scope::Notice { None } else { Some(Command::Quit) };
        }
        self.lookup.get(&(scope, key.code)).copied()
    }

    pub fn hints(&self, scope: Scope) -> &[KeyBinding] {
        self.hints.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_escape_is_scoped() {
        let reg = CommandRegistry::new(true);
        assert_eq!(reg.resolve(Scope::List, key(KeyCode::Esc)), None);
        assert_eq!(reg.resolve(Scope::Logs, key(KeyCode::Esc)), Some(Command::CloseLogs));
        assert_eq!(reg.resolve(Scope::Notice, key(KeyCode::Esc)), Some(Command::Dismiss));
    }

    #[test]
    fn test_actions_only_bound_when_enabled() {
        let reg = CommandRegistry::new(false);
        assert_eq!(reg.resolve(Scope::List, key(KeyCode::Char('s'))), None);
        assert!(!reg.hints(Scope::List).iter().any(|b| b.desc == "start"));

        let reg = CommandRegistry::new(true);
        assert_eq!(reg.resolve(Scope::List, key(KeyCode::Char('R'))), Some(Command::Restart));
    }

    #[test]
    fn test_list_keys_inactive_under_modal() {
        let reg = CommandRegistry::new(true);
        assert_eq!(reg.resolve(Scope::Logs, key(KeyCode::Char('s'))), None);
        assert_eq!(reg.resolve(Scope::Notice, key(KeyCode::Char('l'))), None);
    }

    #[test]
    fn test_ctrl_c() {
        let reg = CommandRegistry::new(true);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(reg.resolve(Scope::Logs, ctrl_c), Some(Command::Quit));
        assert_eq!(reg.resolve(Scope::Notice, ctrl_c), None);
    }

    #[test]
    fn test_custom_binding() {
        let mut reg = CommandRegistry::empty();
        reg.bind(Scope::List, &[KeyCode::F(5)], Command::Refresh);
        assert_eq!(reg.resolve(Scope::List, key(KeyCode::F(5))), Some(Command::Refresh));
        assert!(reg.hints(Scope::List).is_empty());
    }
}
