//! Hidden keyboard gesture for pinning the next winner
//!
//! Ctrl+Alt+N opens capture. While capturing, printable keys build a query,
//! Backspace edits it, Enter commits and Escape cancels. Nothing is shown.

/// What the host should do with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Not ours; let the browser handle it
    Ignored,
    /// Capture just started
    Activated,
    /// Key consumed while capturing
    Captured,
    /// Capture abandoned
    Cancelled,
    /// Capture finished; pin the first entry matching this query
    Committed(String),
}

impl KeyAction {
    /// Whether the host should suppress the browser's default handling
    pub fn swallows_key(&self) -> bool {
        matches!(
            self,
            KeyAction::Activated | KeyAction::Captured | KeyAction::Committed(_)
        )
    }
}

/// Key-sequence capture state
#[derive(Debug, Clone, Default)]
pub struct PinCapture {
    active: bool,
    buffer: String,
}

impl PinCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed one `keydown` (`key` as in `KeyboardEvent.key`)
    pub fn handle_key(&mut self, key: &str, ctrl: bool, alt: bool) -> KeyAction {
        if !self.active {
            if ctrl && alt && key.eq_ignore_ascii_case("n") {
                self.active = true;
                self.buffer.clear();
                return KeyAction::Activated;
            }
            return KeyAction::Ignored;
        }

        match key {
            "Escape" => {
                self.reset();
                KeyAction::Cancelled
            }
            "Enter" => {
                let query = self.buffer.trim().to_string();
                self.reset();
                if query.is_empty() {
                    KeyAction::Captured
                } else {
                    KeyAction::Committed(query)
                }
            }
            "Backspace" => {
                self.buffer.pop();
                KeyAction::Captured
            }
            _ => {
                if key.chars().count() == 1 {
                    self.buffer.push_str(key);
                }
                KeyAction::Captured
            }
        }
    }

    fn reset(&mut self) {
        self.active = false;
        self.buffer.clear();
    }
}
