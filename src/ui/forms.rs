use crossterm::event::KeyCode;

use crate::models::CatalogEntry;

use super::input::TextInput;

/// Fields of the entry form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EntryField {
    #[default]
    Name,
    Description,
    Path,
}

impl EntryField {
    pub const ALL: [EntryField; 3] = [EntryField::Name, EntryField::Description, EntryField::Path];

    pub fn label(self) -> &'static str {
        match self {
            EntryField::Name => "Name",
            EntryField::Description => "Description",
            EntryField::Path => "Path",
        }
    }

    fn index(self) -> usize {
        match self {
            EntryField::Name => 0,
            EntryField::Description => 1,
            EntryField::Path => 2,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            EntryField::Name => Some(EntryField::Description),
            EntryField::Description => Some(EntryField::Path),
            EntryField::Path => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            EntryField::Name => None,
            EntryField::Description => Some(EntryField::Name),
            EntryField::Path => Some(EntryField::Description),
        }
    }
}

/// Three-field form shared by the add and edit screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    inputs: [TextInput; 3],
    active: EntryField,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            inputs: EntryField::ALL.map(|field| TextInput::new(field.label())),
            active: EntryField::Name,
        }
    }
}

impl EntryForm {
    /// Pre-fill the form from an existing entry when editing.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            inputs: [
                TextInput::with_value(EntryField::Name.label(), &entry.name),
                TextInput::with_value(EntryField::Description.label(), &entry.description),
                TextInput::with_value(EntryField::Path.label(), &entry.path),
            ],
            active: EntryField::Name,
        }
    }

    pub fn active(&self) -> EntryField {
        self.active
    }

    pub fn input(&self, field: EntryField) -> &TextInput {
        &self.inputs[field.index()]
    }

    /// Move focus forward. Stays put on the last field.
    pub fn focus_next(&mut self) {
        if let Some(next) = self.active.next() {
            self.active = next;
        }
    }

    /// Move focus backward. Stays put on the first field.
    pub fn focus_previous(&mut self) {
        if let Some(previous) = self.active.previous() {
            self.active = previous;
        }
    }

    /// Route a key to the focused input, or move focus for tab/arrows.
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            other => {
                self.inputs[self.active.index()].handle_key(other);
            }
        }
    }

    /// Field values exactly as typed, or `None` if any of them is empty.
    pub fn values(&self) -> Option<(String, String, String)> {
        if self.inputs.iter().any(TextInput::is_empty) {
            return None;
        }
        let [name, description, path] = &self.inputs;
        Some((
            name.value().to_string(),
            description.value().to_string(),
            path.value().to_string(),
        ))
    }
}
