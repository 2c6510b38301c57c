//! UI state: session, navigation and form models.

pub mod creation_form;
pub mod dice_log;
pub mod session_state;

pub use creation_form::CreationForm;
pub use dice_log::{DiceLog, DiceLogEntry, DICE_LOG_CAPACITY};
pub use session_state::{
    resolve_screen, use_app, use_session, view_for, AppHandle, Screen, SessionState, View,
};
