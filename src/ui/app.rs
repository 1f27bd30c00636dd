use std::mem;

use crossterm::event::KeyCode;
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::db::CatalogStore;
use crate::models::CatalogEntry;

use super::forms::EntryForm;
use super::helpers::surface_error;
use super::input::TextInput;
use super::screens::{ActionKind, ListItem, ListView, PendingDelete, Screen, ScreenState};
use super::view;

/// Whether the event loop should keep running after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Compute the state that follows `state` when `code` is pressed. Store and
/// clipboard calls happen inline; their failures end up in the status line.
pub fn update(
    state: ScreenState,
    code: KeyCode,
    store: &dyn CatalogStore,
    clipboard: &mut dyn Clipboard,
) -> (ScreenState, Flow) {
    let mut state = state;
    let from = state.kind();
    let screen = mem::take(&mut state.screen);

    let (next, flow) = match screen {
        Screen::Menu => handle_menu(state, code, store),
        Screen::List(list) => (handle_list(state, list, code, clipboard), Flow::Continue),
        Screen::Add(form) => (handle_add(state, form, code, store), Flow::Continue),
        Screen::Edit { entry, form } => (
            handle_edit(state, entry, form, code, store),
            Flow::Continue,
        ),
        Screen::Confirm(pending) => (handle_confirm(state, pending, code, store), Flow::Continue),
        Screen::Search(input) => (handle_search(state, input, code, store), Flow::Continue),
    };

    if next.kind() != from {
        debug!(from = ?from, to = ?next.kind(), "screen transition");
    }
    (next, flow)
}

fn handle_menu(state: ScreenState, code: KeyCode, store: &dyn CatalogStore) -> (ScreenState, Flow) {
    let next = match code {
        KeyCode::Char('q') => return (state, Flow::Quit),
        KeyCode::Char('v') => show_entries(state, "", store),
        KeyCode::Char('s') => state.go(Screen::search()),
        KeyCode::Char('a') => state.go(Screen::Add(EntryForm::default())),
        KeyCode::Char('p') => match store.count() {
            Ok(count) if count > 0 => state.go(Screen::Confirm(PendingDelete::All)),
            Ok(_) => state,
            Err(err) => {
                warn!(error = %err, "count failed");
                state.with_error(format!("Failed to count CLIs: {}", surface_error(&err)))
            }
        },
        _ => state,
    };
    (next, Flow::Continue)
}

/// Run a search and show the result list. On failure the caller's screen
/// stays in place, so `state.screen` must already be restored.
fn show_entries(state: ScreenState, pattern: &str, store: &dyn CatalogStore) -> ScreenState {
    match store.search(pattern) {
        Ok(entries) => {
            debug!(pattern, found = entries.len(), "search finished");
            let empty = entries.is_empty();
            let next = ScreenState {
                selected_entry: None,
                ..state.go(Screen::List(ListView::of_entries(entries)))
            };
            if empty {
                next.with_error("No CLIs found")
            } else {
                next
            }
        }
        Err(err) => {
            warn!(error = %err, pattern, "search failed");
            state.with_error(format!("Failed to fetch CLIs: {}", surface_error(&err)))
        }
    }
}

fn handle_list(
    mut state: ScreenState,
    mut list: ListView,
    code: KeyCode,
    clipboard: &mut dyn Clipboard,
) -> ScreenState {
    match code {
        KeyCode::Esc => return state.reset(),
        KeyCode::Up | KeyCode::Char('k') => list.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => list.move_selection(1),
        KeyCode::Home | KeyCode::Char('g') => list.select_first(),
        KeyCode::End | KeyCode::Char('G') => list.select_last(),
        KeyCode::PageUp => list.page(false),
        KeyCode::PageDown => list.page(true),
        KeyCode::Enter => match list.current().cloned() {
            Some(ListItem::Catalog(entry)) => {
                state.selected_entry = Some(entry);
                return state.go(Screen::List(ListView::of_actions()));
            }
            Some(ListItem::Action(action)) => return run_action(state, list, action, clipboard),
            None => {}
        },
        _ => {}
    }
    state.screen = Screen::List(list);
    state
}

fn run_action(
    mut state: ScreenState,
    list: ListView,
    action: ActionKind,
    clipboard: &mut dyn Clipboard,
) -> ScreenState {
    match (action, state.selected_entry.clone()) {
        (ActionKind::Back, _) => state.reset(),
        (_, None) => state.reset().with_error("No CLI selected"),
        (ActionKind::Delete, Some(entry)) => state.go(Screen::Confirm(PendingDelete::Entry(entry))),
        (ActionKind::Edit, Some(entry)) => {
            let form = EntryForm::from_entry(&entry);
            state.go(Screen::Edit { entry, form })
        }
        (ActionKind::CopyPath, Some(entry)) => match clipboard.set_text(&entry.path) {
            Ok(()) => {
                info!(id = entry.id, "copied path to clipboard");
                state.reset().with_success(format!(
                    "Path for CLI '{}' copied to clipboard",
                    entry.name
                ))
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                state.screen = Screen::List(list);
                state.with_error(format!(
                    "Failed to copy path to clipboard: {}",
                    surface_error(&err)
                ))
            }
        },
    }
}

fn handle_add(
    mut state: ScreenState,
    mut form: EntryForm,
    code: KeyCode,
    store: &dyn CatalogStore,
) -> ScreenState {
    match code {
        KeyCode::Esc => state.reset(),
        KeyCode::Enter => {
            let Some((name, description, path)) = form.values() else {
                state.screen = Screen::Add(form);
                return state.with_error("All fields must be filled");
            };
            match store.create(&CatalogEntry::draft(name, description, path)) {
                Ok(created) => {
                    info!(id = created.id, name = %created, "created entry");
                    state
                        .reset()
                        .with_success(format!("CLI '{}' saved successfully", created.name))
                }
                Err(err) => {
                    warn!(error = %err, "create failed");
                    state.screen = Screen::Add(form);
                    state.with_error(format!("Failed to save CLI: {}", surface_error(&err)))
                }
            }
        }
        other => {
            form.handle_key(other);
            state.screen = Screen::Add(form);
            state
        }
    }
}

fn handle_edit(
    mut state: ScreenState,
    entry: CatalogEntry,
    mut form: EntryForm,
    code: KeyCode,
    store: &dyn CatalogStore,
) -> ScreenState {
    match code {
        KeyCode::Esc => state.reset(),
        KeyCode::Enter => {
            let Some((name, description, path)) = form.values() else {
                state.screen = Screen::Edit { entry, form };
                return state.with_error("All fields must be filled");
            };
            let updated = CatalogEntry {
                id: entry.id,
                name,
                description,
                path,
            };
            match store.update(&updated) {
                Ok(()) => {
                    info!(id = updated.id, name = %updated, "updated entry");
                    state
                        .reset()
                        .with_success(format!("CLI '{}' updated successfully", updated.name))
                }
                Err(err) => {
                    warn!(error = %err, id = entry.id, "update failed");
                    state.screen = Screen::Edit { entry, form };
                    state.with_error(format!("Failed to update CLI: {}", surface_error(&err)))
                }
            }
        }
        other => {
            form.handle_key(other);
            state.screen = Screen::Edit { entry, form };
            state
        }
    }
}

fn handle_confirm(
    mut state: ScreenState,
    pending: PendingDelete,
    code: KeyCode,
    store: &dyn CatalogStore,
) -> ScreenState {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => match pending {
            PendingDelete::All => match store.delete_all() {
                Ok(()) => {
                    info!("deleted all entries");
                    state.reset().with_success("All CLIs deleted successfully")
                }
                Err(err) => {
                    warn!(error = %err, "delete all failed");
                    state.reset().with_error(format!(
                        "Failed to delete all records: {}",
                        surface_error(&err)
                    ))
                }
            },
            PendingDelete::Entry(entry) => match store.delete_one(entry.id) {
                Ok(()) => {
                    info!(id = entry.id, name = %entry, "deleted entry");
                    state
                        .reset()
                        .with_success(format!("CLI '{}' deleted successfully", entry.name))
                }
                Err(err) => {
                    warn!(error = %err, id = entry.id, "delete failed");
                    state
                        .reset()
                        .with_error(format!("Failed to delete CLI: {}", surface_error(&err)))
                }
            },
        },
        KeyCode::Char('n') | KeyCode::Char('N') => state.reset(),
        _ => {
            state.screen = Screen::Confirm(pending);
            state
        }
    }
}

fn handle_search(
    mut state: ScreenState,
    mut input: TextInput,
    code: KeyCode,
    store: &dyn CatalogStore,
) -> ScreenState {
    match code {
        KeyCode::Esc => state.reset(),
        KeyCode::Enter => {
            let pattern = input.value().to_string();
            state.screen = Screen::Search(input);
            show_entries(state, &pattern, store)
        }
        other => {
            input.handle_key(other);
            state.screen = Screen::Search(input);
            state
        }
    }
}

/// The running application: the current state plus the collaborators the
/// transitions talk to.
pub struct App<S, C> {
    store: S,
    clipboard: C,
    state: ScreenState,
}

impl<S: CatalogStore, C: Clipboard> App<S, C> {
    pub fn new(store: S, clipboard: C) -> Self {
        let mut app = Self {
            store,
            clipboard,
            state: ScreenState::default(),
        };
        app.refresh_count();
        app
    }

    /// Feed one key press through the state machine. Returns `true` once the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let state = mem::take(&mut self.state);
        let (next, flow) = update(state, code, &self.store, &mut self.clipboard);
        self.state = next;
        self.refresh_count();
        flow == Flow::Quit
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        view::draw(frame, &self.state);
    }

    fn refresh_count(&mut self) {
        self.state.entry_count = match self.store.count() {
            Ok(count) => Some(count),
            Err(err) => {
                warn!(error = %err, "could not refresh entry count");
                None
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::error::{ClipboardError, StoreError};
    use crate::ui::forms::EntryField;
    use crate::ui::screens::{ScreenKind, StatusKind};

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
        broken: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError::Unavailable(
                    arboard::Error::ClipboardNotSupported,
                ));
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    /// Wraps a real store and fails the operations switched on.
    #[derive(Default)]
    struct FlakyStore {
        inner: Option<SqliteStore>,
        fail_writes: bool,
        fail_reads: bool,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                inner: Some(SqliteStore::in_memory().unwrap()),
                ..Self::default()
            }
        }

        fn inner(&self) -> &SqliteStore {
            self.inner.as_ref().unwrap()
        }

        fn broken() -> StoreError {
            StoreError::Query {
                action: "failed to run query",
                source: rusqlite::Error::InvalidQuery,
            }
        }

        fn write<T>(
            &self,
            op: impl FnOnce(&SqliteStore) -> Result<T, StoreError>,
        ) -> Result<T, StoreError> {
            if self.fail_writes {
                Err(Self::broken())
            } else {
                op(self.inner())
            }
        }

        fn read<T>(
            &self,
            op: impl FnOnce(&SqliteStore) -> Result<T, StoreError>,
        ) -> Result<T, StoreError> {
            if self.fail_reads {
                Err(Self::broken())
            } else {
                op(self.inner())
            }
        }
    }

    impl CatalogStore for FlakyStore {
        fn create(&self, entry: &CatalogEntry) -> Result<CatalogEntry, StoreError> {
            self.write(|s| s.create(entry))
        }
        fn update(&self, entry: &CatalogEntry) -> Result<(), StoreError> {
            self.write(|s| s.update(entry))
        }
        fn delete_one(&self, id: i64) -> Result<(), StoreError> {
            self.write(|s| s.delete_one(id))
        }
        fn delete_all(&self) -> Result<(), StoreError> {
            self.write(|s| s.delete_all())
        }
        fn count(&self) -> Result<usize, StoreError> {
            self.read(|s| s.count())
        }
        fn search(&self, pattern: &str) -> Result<Vec<CatalogEntry>, StoreError> {
            self.read(|s| s.search(pattern))
        }
    }

    fn app() -> App<FlakyStore, RecordingClipboard> {
        App::new(FlakyStore::new(), RecordingClipboard::default())
    }

    fn press(app: &mut App<FlakyStore, RecordingClipboard>, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key);
        }
    }

    fn type_text(app: &mut App<FlakyStore, RecordingClipboard>, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn seed(app: &App<FlakyStore, RecordingClipboard>, name: &str) -> CatalogEntry {
        let path = format!("/usr/bin/{name}");
        let draft = CatalogEntry::draft(name, format!("{name} tool"), path);
        app.store().inner().create(&draft).unwrap()
    }

    fn fill_form(
        app: &mut App<FlakyStore, RecordingClipboard>,
        name: &str,
        desc: &str,
        path: &str,
    ) {
        type_text(app, name);
        app.handle_key(KeyCode::Tab);
        type_text(app, desc);
        app.handle_key(KeyCode::Tab);
        type_text(app, path);
    }

    fn form(app: &App<FlakyStore, RecordingClipboard>) -> &EntryForm {
        match &app.state().screen {
            Screen::Add(form) | Screen::Edit { form, .. } => form,
            other => panic!("expected a form, got {other:?}"),
        }
    }

    #[test]
    fn menu_keys_open_each_screen() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.state().kind(), ScreenKind::Search);
        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.state().kind(), ScreenKind::Add);
        assert_eq!(form(&app).active(), EntryField::Name);
        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn quit_only_from_menu() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(form(&app).input(EntryField::Name).value(), "q");
    }

    #[test]
    fn purge_needs_entries() {
        let mut app = app();
        assert!(!app.state().purge_available());
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);

        seed(&app, "fd");
        app.handle_key(KeyCode::Char('z'));
        assert!(app.state().purge_available());
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.state().screen, Screen::Confirm(PendingDelete::All));
    }

    #[test]
    fn purge_reports_count_failure() {
        let mut app = app();
        seed(&app, "fd");
        app.store.fail_reads = true;
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert!(app.state().error().unwrap().starts_with("Failed to count CLIs"));
    }

    #[test]
    fn add_persists_and_returns_to_menu() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, "ls-color", "colorized ls", "/usr/bin/lsc");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(
            app.state().success(),
            Some("CLI 'ls-color' saved successfully")
        );
        assert_eq!(app.state().entry_count, Some(1));
        let stored = app.store().inner().search("").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].path, "/usr/bin/lsc");
    }

    #[test]
    fn add_with_empty_fields_is_rejected() {
        let cases = [
            ("", "d", "p"),
            ("n", "", "p"),
            ("n", "d", ""),
            ("", "", "p"),
            ("", "d", ""),
            ("n", "", ""),
            ("", "", ""),
        ];
        for (name, desc, path) in cases {
            let mut app = app();
            app.handle_key(KeyCode::Char('a'));
            fill_form(&mut app, name, desc, path);
            app.handle_key(KeyCode::Enter);

            assert_eq!(app.state().kind(), ScreenKind::Add);
            assert_eq!(app.state().error(), Some("All fields must be filled"));
            assert_eq!(form(&app).input(EntryField::Path).value(), path);
            assert_eq!(app.store().inner().count().unwrap(), 0);
        }
    }

    #[test]
    fn add_keeps_surrounding_whitespace() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, " ", " fuzzy ", "/opt/my tool ");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.state().kind(), ScreenKind::Menu);
        let stored = app.store().inner().search("").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, " ");
        assert_eq!(stored[0].description, " fuzzy ");
        assert_eq!(stored[0].path, "/opt/my tool ");
    }

    #[test]
    fn add_store_failure_keeps_the_form() {
        let mut app = app();
        app.store.fail_writes = true;
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, "jq", "json", "/usr/bin/jq");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.state().kind(), ScreenKind::Add);
        assert!(app.state().error().unwrap().starts_with("Failed to save CLI"));
        assert_eq!(form(&app).input(EntryField::Name).value(), "jq");
    }

    #[test]
    fn view_all_lists_entries_by_name() {
        let mut app = app();
        seed(&app, "zoxide");
        seed(&app, "bat");
        app.handle_key(KeyCode::Char('v'));

        let Screen::List(list) = &app.state().screen else {
            panic!("expected list");
        };
        let names: Vec<_> = list
            .items
            .iter()
            .map(|item| match item {
                ListItem::Catalog(entry) => entry.name.as_str(),
                ListItem::Action(_) => "",
            })
            .collect();
        assert_eq!(names, ["bat", "zoxide"]);
        assert_eq!(app.state().status, None);
    }

    #[test]
    fn empty_list_shows_no_clis_found() {
        let mut app = app();
        app.handle_key(KeyCode::Char('v'));
        assert_eq!(app.state().kind(), ScreenKind::List);
        assert_eq!(app.state().error(), Some("No CLIs found"));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.state().kind(), ScreenKind::List);
    }

    #[test]
    fn failed_listing_stays_on_menu() {
        let mut app = app();
        app.store.fail_reads = true;
        app.handle_key(KeyCode::Char('v'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert!(app.state().error().unwrap().starts_with("Failed to fetch CLIs"));
        assert!(!app.state().purge_available());
    }

    #[test]
    fn search_filters_and_failures_stay_on_search() {
        let mut app = app();
        seed(&app, "ripgrep");
        seed(&app, "bat");
        app.handle_key(KeyCode::Char('s'));
        type_text(&mut app, "grep");
        app.handle_key(KeyCode::Enter);
        let Screen::List(list) = &app.state().screen else {
            panic!("expected list");
        };
        assert_eq!(list.items.len(), 1);

        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('s'));
        type_text(&mut app, "nope");
        app.store.fail_reads = true;
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.state().kind(), ScreenKind::Search);
        assert!(app.state().error().is_some());
        let Screen::Search(input) = &app.state().screen else {
            panic!("expected search");
        };
        assert_eq!(input.value(), "nope");
    }

    #[test]
    fn entering_an_entry_opens_its_actions() {
        let mut app = app();
        let entry = seed(&app, "fd");
        press(&mut app, &[KeyCode::Char('v'), KeyCode::Enter]);
        assert_eq!(app.state().selected_entry, Some(entry));
        let Screen::List(list) = &app.state().screen else {
            panic!("expected action list");
        };
        assert!(list.is_action_menu());
    }

    #[test]
    fn delete_action_confirms_then_deletes() {
        let mut app = app();
        let entry = seed(&app, "fd");
        seed(&app, "bat");
        press(
            &mut app,
            &[KeyCode::Char('v'), KeyCode::Down, KeyCode::Enter, KeyCode::Enter],
        );
        assert_eq!(
            app.state().screen,
            Screen::Confirm(PendingDelete::Entry(entry.clone()))
        );
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.state().kind(), ScreenKind::Confirm);
        app.handle_key(KeyCode::Char('y'));

        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(app.state().success(), Some("CLI 'fd' deleted successfully"));
        let remaining = app.store().inner().search("").unwrap();
        assert!(remaining.iter().all(|e| e.id != entry.id));
    }

    #[test]
    fn declining_a_delete_keeps_the_entry() {
        let mut app = app();
        seed(&app, "fd");
        press(
            &mut app,
            &[KeyCode::Char('v'), KeyCode::Enter, KeyCode::Enter, KeyCode::Char('n')],
        );
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(app.state().status, None);
        assert_eq!(app.store().inner().count().unwrap(), 1);
    }

    #[test]
    fn delete_failure_still_returns_to_menu() {
        let mut app = app();
        seed(&app, "fd");
        press(&mut app, &[KeyCode::Char('v'), KeyCode::Enter, KeyCode::Enter]);
        app.store.fail_writes = true;
        app.handle_key(KeyCode::Char('y'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert!(app.state().error().unwrap().starts_with("Failed to delete CLI"));
    }

    #[test]
    fn purge_deletes_everything() {
        let mut app = app();
        seed(&app, "fd");
        seed(&app, "bat");
        app.handle_key(KeyCode::Char('p'));
        app.handle_key(KeyCode::Char('y'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(app.state().success(), Some("All CLIs deleted successfully"));
        assert_eq!(app.state().entry_count, Some(0));
        assert!(!app.state().purge_available());
    }

    #[test]
    fn purge_failure_returns_to_menu() {
        let mut app = app();
        seed(&app, "fd");
        app.handle_key(KeyCode::Char('p'));
        app.store.fail_writes = true;
        app.handle_key(KeyCode::Char('y'));
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        let error = app.state().error().unwrap();
        assert!(error.starts_with("Failed to delete all records"));
        assert_eq!(app.store().inner().count().unwrap(), 1);
        assert!(app.state().purge_available());
    }

    #[test]
    fn edit_rewrites_entry_and_keeps_id() {
        let mut app = app();
        let entry = seed(&app, "lsc");
        press(
            &mut app,
            &[
                KeyCode::Char('v'),
                KeyCode::Enter,
                KeyCode::Down,
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.state().kind(), ScreenKind::Edit);
        assert_eq!(form(&app).input(EntryField::Name).value(), "lsc");

        press(&mut app, &[KeyCode::Tab, KeyCode::Tab]);
        for _ in 0.."/usr/bin/lsc".len() {
            app.handle_key(KeyCode::Backspace);
        }
        type_text(&mut app, "/usr/local/bin/lsc");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(app.state().success(), Some("CLI 'lsc' updated successfully"));
        let stored = app.store().inner().search("lsc").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, entry.id);
        assert_eq!(stored[0].path, "/usr/local/bin/lsc");
    }

    #[test]
    fn edit_of_vanished_entry_reports_not_found() {
        let mut app = app();
        let entry = seed(&app, "lsc");
        press(
            &mut app,
            &[KeyCode::Char('v'), KeyCode::Enter, KeyCode::Down, KeyCode::Enter],
        );
        app.store().inner().delete_one(entry.id).unwrap();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.state().kind(), ScreenKind::Edit);
        assert_eq!(
            app.state().error(),
            Some(format!("Failed to update CLI: no CLI with id {}", entry.id).as_str())
        );
    }

    #[test]
    fn edit_with_empty_field_is_rejected() {
        let mut app = app();
        seed(&app, "lsc");
        press(
            &mut app,
            &[KeyCode::Char('v'), KeyCode::Enter, KeyCode::Down, KeyCode::Enter],
        );
        for _ in 0.."lsc".len() {
            app.handle_key(KeyCode::Backspace);
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.state().kind(), ScreenKind::Edit);
        assert_eq!(app.state().error(), Some("All fields must be filled"));
        assert_eq!(app.store().inner().search("").unwrap()[0].name, "lsc");
    }

    #[test]
    fn copy_path_writes_clipboard() {
        let mut app = app();
        seed(&app, "fd");
        press(
            &mut app,
            &[
                KeyCode::Char('v'),
                KeyCode::Enter,
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.clipboard().copied, ["/usr/bin/fd"]);
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(
            app.state().success(),
            Some("Path for CLI 'fd' copied to clipboard")
        );
    }

    #[test]
    fn copy_failure_stays_on_actions() {
        let mut app = app();
        app.clipboard.broken = true;
        let entry = seed(&app, "fd");
        press(
            &mut app,
            &[
                KeyCode::Char('v'),
                KeyCode::Enter,
                KeyCode::End,
                KeyCode::Up,
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.state().kind(), ScreenKind::List);
        assert_eq!(app.state().selected_entry, Some(entry));
        let status = app.state().status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("Failed to copy path to clipboard"));
    }

    #[test]
    fn action_without_selection_returns_to_menu() {
        let state = ScreenState {
            screen: Screen::List(ListView::of_actions()),
            ..ScreenState::default()
        };
        let store = SqliteStore::in_memory().unwrap();
        let mut clipboard = RecordingClipboard::default();
        let (next, flow) = update(state, KeyCode::Enter, &store, &mut clipboard);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(next.kind(), ScreenKind::Menu);
        assert_eq!(next.error(), Some("No CLI selected"));
        assert!(clipboard.copied.is_empty());
    }

    #[test]
    fn back_and_escape_discard_the_selection() {
        let mut app = app();
        seed(&app, "fd");
        press(&mut app, &[KeyCode::Char('v'), KeyCode::Enter, KeyCode::End, KeyCode::Enter]);
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(app.state().selected_entry, None);

        press(&mut app, &[KeyCode::Char('v'), KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(app.state().kind(), ScreenKind::Menu);
        assert_eq!(app.state().selected_entry, None);
    }

    #[test]
    fn messages_clear_on_the_next_transition() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, "jq", "json", "/usr/bin/jq");
        app.handle_key(KeyCode::Enter);
        assert!(app.state().success().is_some());
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.state().status, None);
    }
}
