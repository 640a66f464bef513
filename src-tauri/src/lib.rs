use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State};

#[derive(Serialize, Clone)]
struct CliFileData {
    path: String,
    name: String,
    content: String,
}

struct CliState(Mutex<Option<CliFileData>>);

/// At most one path is watched per window; rebinding replaces the watcher.
#[derive(Default)]
struct WatchState(Mutex<Option<RecommendedWatcher>>);

#[derive(Serialize, Clone)]
struct FileEventPayload {
    kind: String,
    paths: Vec<String>,
}

fn event_kind_label(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Create(_) => "create",
        EventKind::Modify(_) => "modify",
        EventKind::Remove(_) => "remove",
        EventKind::Access(_) => "access",
        EventKind::Any | EventKind::Other => "other",
    }
}

/// First non-flag argument that names a readable file, resolved the way the
/// desktop shells pass "open with" paths.
fn cli_file_from_args<I: Iterator<Item = String>>(args: I) -> Option<CliFileData> {
    for arg in args.skip(1) {
        if arg.starts_with('-') {
            continue;
        }
        let path = PathBuf::from(&arg);
        if !path.exists() {
            return None;
        }
        let abs = fs::canonicalize(&path).unwrap_or(path);
        let name = abs
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return match fs::read_to_string(&abs) {
            Ok(content) => Some(CliFileData {
                path: abs.to_string_lossy().into_owned(),
                name,
                content,
            }),
            Err(err) => {
                tracing::warn!(%err, path = %abs.display(), "could not read cli file");
                None
            }
        };
    }
    None
}

#[tauri::command]
fn get_cli_file(state: State<CliState>) -> Option<CliFileData> {
    state.0.lock().unwrap().take()
}

#[tauri::command]
async fn open_file_dialog() -> Option<String> {
    rfd::AsyncFileDialog::new()
        .add_filter("Markdown", &["md", "markdown", "txt"])
        .pick_file()
        .await
        .map(|file| file.path().to_string_lossy().into_owned())
}

#[tauri::command]
async fn save_file_dialog(
    default_name: String,
    filter_name: String,
    extensions: Vec<String>,
) -> Option<String> {
    let extensions: Vec<&str> = extensions.iter().map(String::as_str).collect();
    rfd::AsyncFileDialog::new()
        .add_filter(&filter_name, &extensions)
        .set_file_name(&default_name)
        .save_file()
        .await
        .map(|file| file.path().to_string_lossy().into_owned())
}

#[tauri::command]
fn read_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| e.to_string())
}

#[tauri::command]
fn write_file(path: &str, content: &str) -> Result<(), String> {
    fs::write(path, content).map_err(|e| e.to_string())
}

#[tauri::command]
fn watch_file(app: AppHandle, state: State<WatchState>, path: String) -> Result<(), String> {
    let emitter = app.clone();
    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                let payload = FileEventPayload {
                    kind: event_kind_label(&event.kind).to_owned(),
                    paths: event
                        .paths
                        .iter()
                        .map(|p| p.to_string_lossy().into_owned())
                        .collect(),
                };
                if let Err(err) = emitter.emit("file-watch", payload) {
                    tracing::warn!(%err, "file watch event not delivered");
                }
            }
            Err(err) => tracing::warn!(%err, "file watcher error"),
        },
        notify::Config::default(),
    )
    .map_err(|e| e.to_string())?;
    watcher
        .watch(Path::new(&path), RecursiveMode::NonRecursive)
        .map_err(|e| e.to_string())?;
    tracing::debug!(path, "file watch started");
    *state.0.lock().unwrap() = Some(watcher);
    Ok(())
}

#[tauri::command]
fn unwatch_file(state: State<WatchState>) {
    if state.0.lock().unwrap().take().is_some() {
        tracing::debug!("file watch stopped");
    }
}

#[tauri::command]
fn set_title(app: AppHandle, title: String) -> Result<(), String> {
    app.get_webview_window("main")
        .ok_or_else(|| "no main window".to_string())?
        .set_title(&title)
        .map_err(|e| e.to_string())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt::init();
    let cli_file = cli_file_from_args(std::env::args());

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(CliState(Mutex::new(cli_file)))
        .manage(WatchState::default())
        .invoke_handler(tauri::generate_handler![
            get_cli_file,
            open_file_dialog,
            save_file_dialog,
            read_file,
            write_file,
            watch_file,
            unwatch_file,
            set_title
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn labels_cover_every_event_family() {
        assert_eq!(
            event_kind_label(&EventKind::Modify(notify::event::ModifyKind::Any)),
            "modify"
        );
        assert_eq!(
            event_kind_label(&EventKind::Create(notify::event::CreateKind::Any)),
            "create"
        );
        assert_eq!(
            event_kind_label(&EventKind::Access(notify::event::AccessKind::Any)),
            "access"
        );
        assert_eq!(
            event_kind_label(&EventKind::Remove(notify::event::RemoveKind::Any)),
            "remove"
        );
        assert_eq!(event_kind_label(&EventKind::Any), "other");
    }

    #[test]
    fn cli_pickup_reads_the_first_plain_argument() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "# hello").unwrap();

        let found =
            cli_file_from_args(args(&["penmark", "--flag", path.to_str().unwrap()])).unwrap();
        assert_eq!(found.name, "notes.md");
        assert_eq!(found.content, "# hello\n");
    }

    #[test]
    fn cli_pickup_ignores_missing_files_and_bare_flags() {
        assert!(cli_file_from_args(args(&["penmark"])).is_none());
        assert!(cli_file_from_args(args(&["penmark", "--debug"])).is_none());
        assert!(cli_file_from_args(args(&["penmark", "/no/such/file.md"])).is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        let path = path.to_str().unwrap();

        write_file(path, "# Title\n").unwrap();
        assert_eq!(read_file(path).unwrap(), "# Title\n");
    }

    #[test]
    fn read_failure_is_reported_as_a_message() {
        let err = read_file("/no/such/penmark-file.md").unwrap_err();
        assert!(!err.is_empty());
    }
}
