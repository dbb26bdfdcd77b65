use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Utc};

use crate::config::{parse_page_size, DEFAULT_PAGE_SIZE};
use crate::domain::entities::export::{CsvColumn, MissingField};
use crate::domain::entities::session::{UserProfile, AUTH_TOKEN_KEY, USER_KEY};
use crate::domain::entities::table::{
    CellValue, ColumnDef, ColumnVisibility, GridBody, Pagination, SortDirection, SortKey,
    SortState,
};
use crate::infra::export::csv::csv_file_path;
use crate::infra::import::json::{load_records, parse_records};
use crate::infra::sqlite::repo::SqliteStore;
use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::ui::styles::{table_container_style, table_header_cell_style};
use crate::usecase::auth::token::make_token;
use crate::usecase::export::csv_export::CsvExporter;
use crate::usecase::ports::storage::KeyValueStore;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::session_service::{session_status, SessionService, SessionStatus};
use crate::usecase::table::records::{record_exporter, record_keys, record_table};
use crate::usecase::table::render::TableSpec;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("tahfidz-{prefix}-{nanos}"))
}

#[derive(Debug, Clone)]
struct Student {
    id: u32,
    name: &'static str,
    juz: i64,
    note: Option<&'static str>,
}

fn student(id: u32, name: &'static str, juz: i64) -> Student {
    Student {
        id,
        name,
        juz,
        note: None,
    }
}

fn student_table() -> TableSpec<Student> {
    TableSpec::new(vec![
        ColumnDef::new("name", "Name", |row: &Student| CellValue::from(row.name)),
        ColumnDef::new("juz", "Juz", |row: &Student| CellValue::from(row.juz)),
        ColumnDef::new("note", "Note", |row: &Student| CellValue::from(row.note)),
    ])
    .expect("column keys should be unique")
}

fn hidden(key: &str) -> ColumnVisibility {
    let mut visibility = ColumnVisibility::new();
    visibility.insert(key.to_string(), false);
    visibility
}

fn body_rows(body: &GridBody) -> Vec<Vec<String>> {
    match body {
        GridBody::Rows(rows) => rows.iter().map(|row| row.cells.clone()).collect(),
        GridBody::Empty { .. } => Vec::new(),
    }
}

#[test]
fn empty_rows_render_single_placeholder_spanning_visible_columns() {
    let table = student_table();

    let grid = table.render(&[], &SortState::new(), &ColumnVisibility::new());

    assert_eq!(grid.headers.len(), 3);
    assert_eq!(
        grid.body,
        GridBody::Empty {
            message: "No data".to_string(),
            colspan: 3
        }
    );
}

#[test]
fn empty_columns_render_headerless_message() {
    let table: TableSpec<Student> = TableSpec::new(Vec::new()).expect("empty columns are legal");

    let grid = table.render(&[student(1, "Ali", 2)], &SortState::new(), &ColumnVisibility::new());

    assert!(grid.headers.is_empty());
    assert_eq!(
        grid.body,
        GridBody::Empty {
            message: "No data".to_string(),
            colspan: 1
        }
    );
}

#[test]
fn hiding_a_column_removes_header_cells_and_colspan() {
    let table = student_table();
    let rows = vec![student(1, "Ali", 2), student(2, "Budi", 5)];

    let grid = table.render(&rows, &SortState::new(), &hidden("juz"));

    let labels: Vec<String> = grid.headers.iter().map(|h| h.label.clone()).collect();
    assert_eq!(labels, vec!["Name".to_string(), "Note".to_string()]);
    for cells in body_rows(&grid.body) {
        assert_eq!(cells.len(), 2);
    }
    assert_eq!(body_rows(&grid.body)[0], vec!["Ali".to_string(), String::new()]);

    let empty = table.render(&[], &SortState::new(), &hidden("juz"));
    assert_eq!(
        empty.body,
        GridBody::Empty {
            message: "No data".to_string(),
            colspan: 2
        }
    );
}

#[test]
fn render_sorts_without_touching_inputs() {
    let table = student_table();
    let rows = vec![student(1, "Citra", 1), student(2, "Ali", 1), student(3, "Budi", 30)];
    let sort = vec![SortKey::desc("juz")];

    let grid = table.render(&rows, &sort, &ColumnVisibility::new());

    let names: Vec<String> = body_rows(&grid.body).into_iter().map(|c| c[0].clone()).collect();
    assert_eq!(names, vec!["Budi", "Citra", "Ali"]);
    assert_eq!(rows[0].name, "Citra");
    assert_eq!(sort, vec![SortKey::desc("juz")]);
    assert_eq!(grid.headers[1].sort, Some((SortDirection::Desc, 1)));
}

#[test]
fn row_keys_are_positional_unless_id_given() {
    let rows = vec![student(10, "Ali", 1), student(20, "Budi", 2)];

    let positional = student_table().render(&rows, &SortState::new(), &ColumnVisibility::new());
    let keyed = student_table()
        .with_row_key(|row: &Student| Some(format!("student-{}", row.id)))
        .render(&rows, &vec![SortKey::desc("juz")], &ColumnVisibility::new());

    match (positional.body, keyed.body) {
        (GridBody::Rows(positional), GridBody::Rows(keyed)) => {
            assert_eq!(positional[0].key, "row-0");
            assert_eq!(positional[1].key, "row-1");
            assert_eq!(keyed[0].key, "student-20");
            assert_eq!(keyed[1].key, "student-10");
        }
        other => panic!("expected row bodies: {other:?}"),
    }
}

#[test]
fn header_render_function_and_custom_cell_are_used() {
    let table = TableSpec::new(vec![ColumnDef::new("juz", "Juz", |row: &Student| {
        CellValue::from(row.juz)
    })
    .with_header_render(|| "Juz (30)".to_string())
    .with_cell(|value, row: &Student| format!("{value} / 30 ({})", row.name))
    .unsortable()])
    .expect("single column");

    let grid = table.render(&[student(1, "Ali", 3)], &SortState::new(), &ColumnVisibility::new());

    assert_eq!(grid.headers[0].label, "Juz (30)");
    assert!(!grid.headers[0].sortable);
    assert_eq!(body_rows(&grid.body), vec![vec!["3 / 30 (Ali)".to_string()]]);
}

#[test]
fn render_page_slices_sorted_rows_and_clamps() {
    let table = student_table();
    let rows: Vec<Student> = (0..7)
        .map(|idx| student(idx, "S", i64::from(7 - idx)))
        .collect();
    let sort = vec![SortKey::asc("juz")];

    let second = table.render_page(&rows, &sort, &ColumnVisibility::new(), Pagination::new(2, 3));
    let juz: Vec<String> = body_rows(&second.body).into_iter().map(|c| c[1].clone()).collect();
    assert_eq!(juz, vec!["4", "5", "6"]);
    let info = second.page.expect("paged render carries page info");
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.total_rows, 7);

    let beyond = table.render_page(&rows, &sort, &ColumnVisibility::new(), Pagination::new(9, 3));
    assert_eq!(beyond.page.map(|p| p.page), Some(3));
    assert_eq!(body_rows(&beyond.body).len(), 1);

    let zero = table.render_page(&rows, &sort, &ColumnVisibility::new(), Pagination::new(0, 3));
    assert_eq!(zero.page.map(|p| p.page), Some(1));
}

#[test]
fn csv_cell_round_trips_through_standard_reader() {
    let original = "He said \"hi\", ok";
    let exporter = CsvExporter::new(vec![CsvColumn::new("note", "Note", |row: &Student| {
        row.note.map(CellValue::from)
    })]);
    let mut row = student(1, "Ali", 1);
    row.note = Some(original);

    let text = exporter.to_csv_string(&[row]).expect("export should succeed");
    assert!(text.contains("\"He said \"\"hi\"\", ok\""));

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().expect("should read headers").clone();
    assert_eq!(headers.get(0), Some("Note"));
    let record = reader
        .records()
        .next()
        .expect("one record expected")
        .expect("record should parse");
    assert_eq!(record.get(0), Some(original));
}

#[test]
fn record_export_uses_empty_cell_for_missing_keys() {
    let records = parse_records(r#"[{"name":"Ali","juz":2},{"name":"Budi"}]"#)
        .expect("fixture should parse");
    let keys = record_keys(&records);

    let text = record_exporter(&keys)
        .to_csv_string(&records)
        .expect("export should succeed");

    assert_eq!(text, "\"Name\",\"Juz\"\n\"Ali\",\"2\"\n\"Budi\",\"\"\n");

    let strict = record_exporter(&keys).with_missing(MissingField::Reject);
    assert!(strict.to_csv_string(&records).is_err());
}

#[test]
fn export_service_writes_named_csv_file() {
    let temp_dir = unique_test_dir("export");
    let service = ExportService::new(temp_dir.clone());
    let records = parse_records(r#"{"data":[{"id":1,"name":"Aisyah","hadir":true}]}"#)
        .expect("envelope should parse");
    let keys = record_keys(&records);

    let path = service
        .export_to_csv(&records, &record_exporter(&keys), "attendance")
        .expect("export should succeed");

    assert_eq!(path, temp_dir.join("attendance.csv"));
    let written = fs::read_to_string(&path).expect("should read exported csv");
    assert_eq!(written, "\"Id\",\"Name\",\"Hadir\"\n\"1\",\"Aisyah\",\"true\"\n");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_file_path_does_not_double_extension() {
    let dir = PathBuf::from("/tmp/out");
    assert_eq!(csv_file_path(&dir, "report"), dir.join("report.csv"));
    assert_eq!(csv_file_path(&dir, "report.CSV"), dir.join("report.CSV"));
    assert_eq!(csv_file_path(&dir, "  "), dir.join("export.csv"));
}

#[test]
fn load_records_reads_array_files_and_rejects_scalars() {
    let temp_dir = unique_test_dir("import");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let good = temp_dir.join("students.json");
    let bad = temp_dir.join("bad.json");
    fs::write(&good, r#"[{"id":"s1","name":"Ali"},{"id":"s2","name":"Budi"}]"#)
        .expect("should write json fixture");
    fs::write(&bad, "[1, 2]").expect("should write json fixture");

    let records = load_records(&good).expect("array should load");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id(), Some("s2".to_string()));
    assert!(load_records(&bad).is_err());
    assert!(parse_records(r#"{"items":[]}"#).is_err());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn record_table_keys_rows_by_id_field() {
    let records = parse_records(r#"[{"id":7,"name":"Ali","aktif":false},{"name":"Budi"}]"#)
        .expect("fixture should parse");
    let keys = record_keys(&records);
    let table = record_table(&keys).expect("record keys are unique");

    let grid = table.render(&records, &SortState::new(), &ColumnVisibility::new());

    match grid.body {
        GridBody::Rows(rows) => {
            assert_eq!(rows[0].key, "7");
            assert_eq!(rows[1].key, "row-1");
            assert_eq!(rows[0].cells, vec!["7", "Ali", "✗"]);
            assert_eq!(rows[1].cells, vec!["", "Budi", ""]);
        }
        other => panic!("expected rows: {other:?}"),
    }
}

#[test]
fn init_db_creates_local_storage_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("storage.sqlite");

    init_db(&db_path).expect("init_db should succeed");

    let conn = open_connection(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'local_storage'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "local_storage table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_store_sets_overwrites_and_removes() {
    let temp_dir = unique_test_dir("store");
    let store = SqliteStore::new(temp_dir.join("storage.sqlite"));
    store.init().expect("init should succeed");

    assert_eq!(store.get("auth_token").expect("get should succeed"), None);
    store.set("auth_token", "first").expect("set should succeed");
    store.set("auth_token", "second").expect("overwrite should succeed");
    assert_eq!(
        store.get("auth_token").expect("get should succeed"),
        Some("second".to_string())
    );
    store.remove("auth_token").expect("remove should succeed");
    assert_eq!(store.get("auth_token").expect("get should succeed"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn session_service_loads_once_and_classifies_expiry() {
    let temp_dir = unique_test_dir("session");
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(temp_dir.join("s.sqlite")));
    store.init().expect("init should succeed");
    let service = SessionService::new(store.clone());
    let now = Utc::now();

    assert_eq!(session_status(&service.load().expect("load"), now), SessionStatus::SignedOut);

    let profile = UserProfile {
        name: Some("Ustadzah Fatimah".to_string()),
        role: Some("mentor".to_string()),
        ..UserProfile::default()
    };
    let valid = make_token(&format!(r#"{{"exp":{}}}"#, (now + Duration::hours(1)).timestamp()));
    service.save(&valid, &profile).expect("save should succeed");

    let session = service.load().expect("load should succeed");
    assert_eq!(session.user.as_ref().and_then(|u| u.name.clone()), profile.name);
    assert!(session.is_authenticated(now));

    let expired = make_token(&format!(r#"{{"exp":{}}}"#, (now - Duration::hours(1)).timestamp()));
    store.set(AUTH_TOKEN_KEY, &expired).expect("set should succeed");
    let session = service.load().expect("load should succeed");
    assert_eq!(session_status(&session, now), SessionStatus::Expired);

    store.set(AUTH_TOKEN_KEY, "garbage").expect("set should succeed");
    assert_eq!(
        session_status(&service.load().expect("load"), now),
        SessionStatus::Expired
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn malformed_user_blob_is_ignored_and_sign_out_clears_keys() {
    let temp_dir = unique_test_dir("session-bad-user");
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(temp_dir.join("s.sqlite")));
    store.init().expect("init should succeed");
    store.set(AUTH_TOKEN_KEY, "token").expect("set should succeed");
    store.set(USER_KEY, "{not json").expect("set should succeed");
    let service = SessionService::new(store.clone());

    let session = service.load().expect("load should succeed");
    assert_eq!(session.token.as_deref(), Some("token"));
    assert_eq!(session.user, None);

    service.sign_out().expect("sign out should succeed");
    assert_eq!(store.get(AUTH_TOKEN_KEY).expect("get"), None);
    assert_eq!(store.get(USER_KEY).expect("get"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn page_size_parsing_defaults_and_validates() {
    assert_eq!(parse_page_size(None).expect("default"), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_page_size(Some(" 25 ")).expect("explicit"), 25);
    assert!(parse_page_size(Some("0")).is_err());
    assert!(parse_page_size(Some("ten")).is_err());
}

#[test]
fn sticky_header_styles_include_positioning() {
    let style = table_header_cell_style(true);

    assert!(style.contains("position: sticky"));
    assert!(style.contains("top: 0"));
    assert!(style.contains("cursor: pointer"));
    assert!(table_header_cell_style(false).contains("cursor: default"));
}

#[test]
fn table_container_style_allows_scroll() {
    let style = table_container_style();

    assert!(style.contains("overflow: auto"));
    assert!(style.contains("flex: 1"));
}
