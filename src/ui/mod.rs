//! Terminal front-end: the screen state machine, its renderer, and the
//! crossterm event loop that drives them.

mod app;
mod forms;
mod helpers;
mod input;
mod screens;
mod terminal;
pub mod view;

pub use app::{update, App, Flow};
pub use forms::{EntryField, EntryForm};
pub use input::TextInput;
pub use screens::{
    ActionKind, ListItem, ListView, PendingDelete, Screen, ScreenKind, ScreenState, StatusKind,
    StatusMessage,
};
pub use terminal::run_app;
