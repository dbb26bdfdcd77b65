use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::record::Record;
use crate::domain::entities::session::Session;
use crate::domain::entities::table::{ColumnVisibility, SortState};

/// Page-level state for the roster view. Lives while the window is open.
pub struct AppState {
    pub records: Signal<Vec<Record>>,
    pub keys: Signal<Vec<String>>,
    pub source_name: Signal<Option<String>>,
    pub sort: Signal<SortState>,
    pub visibility: Signal<ColumnVisibility>,
    pub page: Signal<usize>,
    pub session: Signal<Session>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub status_is_error: Signal<bool>,
    /// Bumped on every import so the pager restarts at page 1.
    pub imports: Signal<u64>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            records: use_signal(Vec::<Record>::new),
            keys: use_signal(Vec::<String>::new),
            source_name: use_signal(|| None::<String>),
            sort: use_signal(SortState::new),
            visibility: use_signal(ColumnVisibility::new),
            page: use_signal(|| 1_usize),
            session: use_signal(move || session),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            status_is_error: use_signal(|| false),
            imports: use_signal(|| 0_u64),
        }
    }
}
