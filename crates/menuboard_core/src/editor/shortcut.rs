//! Keyboard shortcuts for history navigation.

/// History action requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    Undo,
    Redo,
}

/// One key press with modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    /// Parses chords written as `ctrl+shift+z`, `cmd+y`, `Meta+Z`.
    ///
    /// Returns `None` for an empty key or an unknown modifier.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chord = Self::default();
        let mut parts: Vec<&str> = text.split('+').map(str::trim).collect();
        let key = parts.pop().filter(|key| !key.is_empty())?;
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "cmd" | "meta" | "super" => chord.meta = true,
                "shift" => chord.shift = true,
                _ => return None,
            }
        }
        chord.key = key.to_string();
        Some(chord)
    }
}

/// Maps a chord to a history command.
///
/// `Ctrl/Cmd+Z` undoes, `Ctrl/Cmd+Shift+Z` and `Ctrl/Cmd+Y` redo. Chords are
/// ignored while focus is inside an editable text field.
pub fn history_command(chord: &KeyChord, target_is_editable: bool) -> Option<HistoryCommand> {
    if target_is_editable || !(chord.ctrl || chord.meta) {
        return None;
    }
    match chord.key.to_ascii_lowercase().as_str() {
        "z" if chord.shift => Some(HistoryCommand::Redo),
        "z" => Some(HistoryCommand::Undo),
        "y" => Some(HistoryCommand::Redo),
        _ => None,
    }
}
