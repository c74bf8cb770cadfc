use crate::id::InputId;
use crate::text::{filter_single_line, normalize_newlines};
use std::collections::HashMap;

/// How a control sanitizes line breaks in its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineMode {
    /// `<input>`: line breaks are removed.
    #[default]
    SingleLine,
    /// `<textarea>`: CRLF/CR become LF.
    MultiLine,
}

impl LineMode {
    pub fn sanitize(self, s: &str) -> String {
        match self {
            LineMode::SingleLine => filter_single_line(s).into_owned(),
            LineMode::MultiLine => normalize_newlines(s).into_owned(),
        }
    }
}

#[derive(Clone, Debug)]
struct Control {
    value: String,
    mode: LineMode,
}

/// Current values of the page's text controls.
///
/// ```
/// use input_core::{InputId, InputValueStore, LineMode};
///
/// let mut store = InputValueStore::new();
/// let id = InputId::from_raw(1);
///
/// store.ensure_initial(id, "Hello", LineMode::SingleLine);
/// store.set(id, "Hello\nWorld");
///
/// assert_eq!(store.get(id), Some("HelloWorld"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InputValueStore {
    controls: HashMap<InputId, Control>,
}

impl InputValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: InputId) -> Option<&str> {
        self.controls.get(&id).map(|c| c.value.as_str())
    }

    pub fn mode(&self, id: InputId) -> Option<LineMode> {
        self.controls.get(&id).map(|c| c.mode)
    }

    /// Register a control with its markup value. Known controls keep the value
    /// they have, since markup no longer reflects it after a script write.
    pub fn ensure_initial(&mut self, id: InputId, initial: &str, mode: LineMode) {
        self.controls.entry(id).or_insert_with(|| Control {
            value: mode.sanitize(initial),
            mode,
        });
    }

    /// Forget every control for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(InputId) -> bool) {
        self.controls.retain(|id, _| keep(*id));
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Overwrite the value. Unknown ids are created as single-line controls.
    /// Returns whether the stored value changed.
    pub fn set(&mut self, id: InputId, value: &str) -> bool {
        let control = self.controls.entry(id).or_insert_with(|| Control {
            value: String::new(),
            mode: LineMode::default(),
        });
        let value = control.mode.sanitize(value);
        if control.value == value {
            return false;
        }
        control.value = value;
        true
    }
}
