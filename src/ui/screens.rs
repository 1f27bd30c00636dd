use crate::models::CatalogEntry;

use super::forms::EntryForm;
use super::input::TextInput;

/// Placeholder shown in the empty search field.
pub(crate) const SEARCH_PLACEHOLDER: &str = "Enter search term";
/// Rows skipped by PageUp/PageDown in lists.
const PAGE_SIZE: isize = 10;

/// Actions offered once a catalog entry has been picked from the list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Delete,
    Edit,
    CopyPath,
    Back,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Delete,
        ActionKind::Edit,
        ActionKind::CopyPath,
        ActionKind::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Delete => "Delete",
            ActionKind::Edit => "Edit",
            ActionKind::CopyPath => "Copy path to clipboard",
            ActionKind::Back => "Back to menu",
        }
    }
}

/// A row of the selectable list: either a stored entry or an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Catalog(CatalogEntry),
    Action(ActionKind),
}

/// Items plus the highlighted row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListView {
    pub items: Vec<ListItem>,
    pub selected: usize,
}

impl ListView {
    pub fn of_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            items: entries.into_iter().map(ListItem::Catalog).collect(),
            selected: 0,
        }
    }

    pub fn of_actions() -> Self {
        Self {
            items: ActionKind::ALL.into_iter().map(ListItem::Action).collect(),
            selected: 0,
        }
    }

    pub fn current(&self) -> Option<&ListItem> {
        self.items.get(self.selected)
    }

    /// Whether this list is the action menu of a picked entry.
    pub fn is_action_menu(&self) -> bool {
        matches!(self.items.first(), Some(ListItem::Action(_)))
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn page(&mut self, down: bool) {
        self.move_selection(if down { PAGE_SIZE } else { -PAGE_SIZE });
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }
}

/// The destructive action awaiting a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    All,
    Entry(CatalogEntry),
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        match self {
            PendingDelete::All => "Are you sure you want to delete ALL the CLIs?".to_string(),
            PendingDelete::Entry(entry) => {
                format!("Are you sure you want to delete the CLI '{}'?", entry.name)
            }
        }
    }
}

/// The screen currently shown, with the data only that screen needs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Menu,
    List(ListView),
    Add(EntryForm),
    Edit {
        entry: CatalogEntry,
        form: EntryForm,
    },
    Confirm(PendingDelete),
    Search(TextInput),
}

/// Discriminant of [`Screen`], handy for assertions and logging.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Menu,
    List,
    Add,
    Edit,
    Confirm,
    Search,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu => ScreenKind::Menu,
            Screen::List(_) => ScreenKind::List,
            Screen::Add(_) => ScreenKind::Add,
            Screen::Edit { .. } => ScreenKind::Edit,
            Screen::Confirm(_) => ScreenKind::Confirm,
            Screen::Search(_) => ScreenKind::Search,
        }
    }

    pub(crate) fn search() -> Self {
        Screen::Search(TextInput::new(SEARCH_PLACEHOLDER))
    }
}

/// Severity of the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Outcome of the most recent action, shown under the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Everything the renderer needs. Owned by the state machine and replaced
/// wholesale by each transition.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScreenState {
    pub screen: Screen,
    /// Entry targeted by the action menu and the edit/delete/copy flows.
    pub selected_entry: Option<CatalogEntry>,
    pub status: Option<StatusMessage>,
    /// Number of stored entries as of the last refresh; `None` if the count
    /// could not be read. Drives the purge option on the menu.
    pub entry_count: Option<usize>,
}

impl ScreenState {
    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn purge_available(&self) -> bool {
        self.entry_count.is_some_and(|count| count > 0)
    }

    pub fn error(&self) -> Option<&str> {
        self.status_of(StatusKind::Error)
    }

    pub fn success(&self) -> Option<&str> {
        self.status_of(StatusKind::Success)
    }

    fn status_of(&self, kind: StatusKind) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| status.kind == kind)
            .map(|status| status.text.as_str())
    }

    /// Move to `screen`, dropping any previous status message.
    pub(crate) fn go(self, screen: Screen) -> Self {
        Self {
            screen,
            status: None,
            ..self
        }
    }

    /// Back to the menu with every transient piece of state discarded.
    pub(crate) fn reset(self) -> Self {
        Self {
            entry_count: self.entry_count,
            ..Self::default()
        }
    }

    pub(crate) fn with_error(mut self, text: impl Into<String>) -> Self {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
        self
    }

    pub(crate) fn with_success(mut self, text: impl Into<String>) -> Self {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Success,
        });
        self
    }
}
