use std::rc::Rc;
use std::sync::Arc;

use chrono::Utc;
use dioxus::prelude::*;
use rfd::FileDialog;

use crate::config::AppConfig;
use crate::domain::entities::record::Record;
use crate::domain::entities::session::Session;
use crate::domain::entities::table::{Pagination as PageRequest, SortState};
use crate::infra::sqlite::repo::SqliteStore;
use crate::ui::components::column_visibility::{ColumnOption, ColumnVisibilityDropdown};
use crate::ui::components::data_table::DataTable;
use crate::ui::components::pagination::Pagination;
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{banner_style, root_container_style};
use crate::usecase::ports::storage::KeyValueStore;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::session_service::{session_status, SessionService, SessionStatus};
use crate::usecase::table::records::{record_exporter, record_keys, record_table};
use crate::usecase::table::render::{normalize_visibility, sort_rows, visible_columns};

struct Services {
    session: SessionService,
    import: ImportService,
    export: ExportService,
}

fn build_services(config: &AppConfig) -> (Rc<Services>, Session, Option<String>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(config.db_path()));
    let session_service = SessionService::new(store.clone());

    let (session, warning) = match store.init().and_then(|_| session_service.load()) {
        Ok(session) => (session, None),
        Err(err) => {
            tracing::error!(%err, "failed to load session");
            (Session::default(), Some(format!("Failed to read saved session: {err}")))
        }
    };

    let services = Services {
        session: session_service,
        import: ImportService::new(),
        export: ExportService::new(config.export_dir.clone()),
    };
    (Rc::new(services), session, warning)
}

/// Rows in the current sort order, for export.
fn sorted_records(records: &[Record], keys: &[String], sort: &SortState) -> Vec<Record> {
    match record_table(keys) {
        Ok(table) => sort_rows(records, table.columns(), sort)
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect(),
        Err(_) => records.to_vec(),
    }
}

#[component]
pub fn App() -> Element {
    let config = match use_hook(|| AppConfig::from_env().map_err(|err| format!("{err:#}"))) {
        Ok(config) => config,
        Err(err) => {
            return rsx! {
                div {
                    p { "Failed to load configuration: {err}" }
                }
            };
        }
    };

    let (services, initial_session, session_warning) = use_hook(|| build_services(&config));

    let AppState {
        mut records,
        mut keys,
        mut source_name,
        mut sort,
        mut visibility,
        mut page,
        mut session,
        mut busy,
        mut status,
        mut status_is_error,
        mut imports,
    } = AppState::new(initial_session);

    use_hook(move || {
        if let Some(warning) = session_warning {
            status.set(warning);
            status_is_error.set(true);
        }
    });

    let current_keys = keys();
    let table = match record_table(&current_keys) {
        Ok(table) => table,
        Err(err) => {
            return rsx! {
                div {
                    p { "Cannot build table: {err}" }
                }
            };
        }
    };

    let current_visibility = visibility();
    let current_sort = sort();
    let grid = table.render_page(
        &records.read(),
        &current_sort,
        &current_visibility,
        PageRequest::new(page(), config.page_size),
    );
    let page_info = grid.page;
    let total_pages = page_info.map(|info| info.total_pages).unwrap_or(1);
    let total_rows = page_info.map(|info| info.total_rows).unwrap_or(0);

    let column_options: Vec<ColumnOption> = table
        .columns()
        .iter()
        .map(|column| ColumnOption {
            key: column.key.clone(),
            label: column.header.label(),
        })
        .collect();

    let session_banner = match session_status(&session(), Utc::now()) {
        SessionStatus::Active(user) => (
            format!(
                "Signed in as {}",
                user.map(|profile| profile.display_name())
                    .unwrap_or_else(|| "admin".to_string())
            ),
            false,
        ),
        SessionStatus::Expired => ("Session expired. Please sign in again.".to_string(), true),
        SessionStatus::SignedOut => ("Not signed in".to_string(), false),
    };
    let (session_text, session_is_error) = session_banner;

    let services_for_import = services.clone();
    let services_for_export = services.clone();
    let services_for_sign_out = services.clone();

    rsx! {
        div {
            style: "{root_container_style()}",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                span { style: "{banner_style(session_is_error)}", "{session_text}" }
                button {
                    disabled: busy() || session().token.is_none(),
                    onclick: move |_| {
                        match services_for_sign_out.session.sign_out() {
                            Ok(()) => {
                                session.set(Session::default());
                                status.set("Signed out".to_string());
                                status_is_error.set(false);
                            }
                            Err(err) => {
                                status.set(format!("Sign out failed: {err}"));
                                status_is_error.set(true);
                            }
                        }
                    },
                    "Sign out"
                }

                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }

                        let Some(file_path) = FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file() else {
                            status.set("Import cancelled".to_string());
                            status_is_error.set(false);
                            return;
                        };

                        busy.set(true);
                        match services_for_import.import.import_json(&file_path) {
                            Ok(loaded) => {
                                let loaded_keys = record_keys(&loaded);
                                let count = loaded.len();
                                if let Ok(next_table) = record_table(&loaded_keys) {
                                    visibility.set(normalize_visibility(
                                        next_table.columns(),
                                        &visibility(),
                                    ));
                                }
                                keys.set(loaded_keys);
                                records.set(loaded);
                                sort.set(SortState::new());
                                page.set(1);
                                imports += 1;
                                source_name.set(
                                    file_path
                                        .file_stem()
                                        .and_then(|stem| stem.to_str())
                                        .map(|stem| stem.to_string()),
                                );
                                status.set(format!("Imported {count} rows"));
                                status_is_error.set(false);
                            }
                            Err(err) => {
                                tracing::warn!(error = %format!("{err:#}"), "import failed");
                                status.set(format!("Import failed: {err:#}"));
                                status_is_error.set(true);
                            }
                        }
                        busy.set(false);
                    },
                    "Import JSON"
                }

                ColumnVisibilityDropdown {
                    label: "Show",
                    columns: column_options,
                    visibility: current_visibility.clone(),
                    on_toggle: move |(key, visible): (String, bool)| {
                        visibility.write().insert(key, visible);
                    }
                }

                button {
                    disabled: busy() || records.read().is_empty(),
                    onclick: move |_| {
                        let filename = source_name().unwrap_or_else(|| "export".to_string());
                        let Some(path) = FileDialog::new()
                            .set_directory(services_for_export.export.export_dir())
                            .set_file_name(format!("{filename}.csv"))
                            .add_filter("CSV", &["csv"])
                            .save_file() else {
                            status.set("Export cancelled".to_string());
                            status_is_error.set(false);
                            return;
                        };

                        busy.set(true);
                        let current_keys = keys();
                        let visible_keys: Vec<String> = match record_table(&current_keys) {
                            Ok(table) => visible_columns(table.columns(), &visibility())
                                .into_iter()
                                .map(|column| column.key.clone())
                                .collect(),
                            Err(_) => current_keys.clone(),
                        };
                        let rows = sorted_records(&records.read(), &current_keys, &sort());
                        let exporter = record_exporter(&visible_keys);
                        match services_for_export.export.export_to_path(&rows, &exporter, &path) {
                            Ok(()) => {
                                status.set(format!("Exported {} rows to {}", rows.len(), path.display()));
                                status_is_error.set(false);
                            }
                            Err(err) => {
                                status.set(format!("Export failed: {err:#}"));
                                status_is_error.set(true);
                            }
                        }
                        busy.set(false);
                    },
                    "Export CSV"
                }

                span { style: "{banner_style(status_is_error())}", "{status}" }
                span { "{total_rows} rows" }
            }

            DataTable {
                grid: grid,
                sort: current_sort.clone(),
                on_sort_change: move |next: SortState| {
                    sort.set(next);
                },
            }

            Pagination {
                key: "{imports}",
                total_pages: total_pages,
                on_page_change: move |next: usize| {
                    page.set(next);
                },
            }
        }
    }
}
