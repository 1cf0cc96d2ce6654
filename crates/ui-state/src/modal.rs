//! Open/close state for modal dialogs.

/// Keys a modal reacts to. Anything else arrives as [`Key::Other`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other(String),
}

impl Key {
    /// Maps a DOM-style key name (`"Escape"`, `"Enter"`, ...) to a [`Key`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    open: bool,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Closes the modal on Escape. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        if self.open && *key == Key::Escape {
            self.open = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_closes_an_open_modal() {
        let mut modal = ModalState::new();
        modal.open();
        assert!(modal.handle_key(&Key::from_name("Escape")));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut modal = ModalState::new();
        modal.open();
        assert!(!modal.handle_key(&Key::from_name("a")));
        assert!(!modal.handle_key(&Key::Enter));
        assert!(modal.is_open());
    }

    #[test]
    fn test_escape_on_closed_modal_is_not_consumed() {
        let mut modal = ModalState::new();
        assert!(!modal.handle_key(&Key::Escape));
        modal.toggle();
        modal.toggle();
        assert!(!modal.is_open());
    }
}
