//! The document session: one owned object holding the engine handle, the file
//! binding, the saved snapshot, and the dirty flag. Every content mutation and
//! every file operation goes through here.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::FileSystemFileHandle;

use crate::bridge;
use crate::engine::{ActiveStates, EditorCommand, EditorHandle};
use crate::platform::Capability;
use crate::shell::{self, CliFile, WatchEvent};
use crate::webfs;

const DIRTY_DEBOUNCE_MS: u32 = 300;
const STATUS_MS: u32 = 3000;
const DEFAULT_NAME: &str = "document.md";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

/// Where a Save will write. Exactly one form is active at a time.
#[derive(Default)]
pub enum FileTarget {
    #[default]
    Unbound,
    NativePath(String),
    BrowserHandle(FileSystemFileHandle),
}

impl FileTarget {
    fn kind(&self) -> TargetKind {
        match self {
            Self::Unbound => TargetKind::Unbound,
            Self::NativePath(_) => TargetKind::NativePath,
            Self::BrowserHandle(_) => TargetKind::BrowserHandle,
        }
    }

    fn native_path(&self) -> Option<&str> {
        match self {
            Self::NativePath(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Unbound,
    NativePath,
    BrowserHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveRoute {
    WriteNativePath,
    NativeSaveDialog,
    WriteBrowserHandle,
    BrowserSavePicker,
    Download,
}

/// Picks the save path for the current capability/binding combination, in the
/// priority order the lifecycle contract fixes.
fn save_route(capability: Capability, target: TargetKind) -> SaveRoute {
    if capability.native_shell {
        if target == TargetKind::NativePath {
            SaveRoute::WriteNativePath
        } else {
            SaveRoute::NativeSaveDialog
        }
    } else if capability.browser_fs {
        if target == TargetKind::BrowserHandle {
            SaveRoute::WriteBrowserHandle
        } else {
            SaveRoute::BrowserSavePicker
        }
    } else {
        SaveRoute::Download
    }
}

/// Watcher event kinds that mean the file content may have changed. Access
/// events fire on plain reads and are deliberately ignored.
fn is_relevant_change(kind: &str) -> bool {
    matches!(kind, "modify" | "create")
}

/// Trailing-newline differences are conversion noise, not edits.
fn content_differs(live: &str, snapshot: &str) -> bool {
    live.trim_end() != snapshot.trim_end()
}

pub fn file_name_of(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_owned()
}

pub fn html_export_name(name: &str) -> String {
    let base = if name.is_empty() {
        "document"
    } else {
        name.strip_suffix(".md")
            .or_else(|| name.strip_suffix(".markdown"))
            .unwrap_or(name)
    };
    format!("{base}.html")
}

/// Standalone export template with inlined default styles.
pub fn export_document(title: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; color: #1a1a1a; }}
    table {{ border-collapse: collapse; width: 100%; }} td, th {{ border: 1px solid #d1d5db; padding: 0.5rem; }}
    th {{ background: #f9fafb; }} code {{ background: #f3f4f6; padding: 0.125rem 0.375rem; border-radius: 0.25rem; }}
    pre {{ background: #1e1e1e; color: #d4d4d4; padding: 1rem; border-radius: 0.5rem; overflow-x: auto; }}
    blockquote {{ border-left: 3px solid #d1d5db; padding-left: 1rem; color: #4b5563; font-style: italic; }}
    a {{ color: #2563eb; }}
  </style>
</head>
<body>
{body_html}
</body>
</html>
"#
    )
}

struct WatchSubscription {
    path: String,
    unlisten: js_sys::Function,
    _handler: Closure<dyn FnMut(JsValue)>,
}

#[derive(Default)]
struct SessionInner {
    engine: Option<Rc<EditorHandle>>,
    target: FileTarget,
    snapshot: String,
    pending: Option<CliFile>,
    dirty_timer: Option<Timeout>,
    status_timer: Option<Timeout>,
    watch: Option<WatchSubscription>,
    watch_epoch: u64,
    reconciling: bool,
}

enum SaveOutcome {
    Saved { bound_name: Option<String> },
    Cancelled,
    Failed(String),
}

#[derive(Clone, Copy)]
pub struct DocumentSession {
    capability: Capability,
    inner: StoredValue<SessionInner, LocalStorage>,
    pub dirty: RwSignal<bool>,
    pub file_name: RwSignal<String>,
    pub status: RwSignal<Option<StatusMessage>>,
    pub active: RwSignal<ActiveStates>,
}

impl DocumentSession {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            inner: StoredValue::new_local(SessionInner::default()),
            dirty: RwSignal::new(false),
            file_name: RwSignal::new(String::new()),
            status: RwSignal::new(None),
            active: RwSignal::new(ActiveStates::default()),
        }
    }

    fn engine(&self) -> Option<Rc<EditorHandle>> {
        self.inner.with_value(|inner| inner.engine.clone())
    }

    /// Mounts the engine into its container and flushes any document that
    /// arrived (from the command line) before the surface existed.
    pub fn attach_engine(&self, container: &web_sys::Element) {
        if self.inner.with_value(|inner| inner.engine.is_some()) {
            return;
        }
        let session = *self;
        let engine = EditorHandle::mount(container, "Start writing…", move |html, changed| {
            session.refresh_active();
            if changed {
                session.schedule_dirty_check(html);
            }
        });
        self.inner
            .update_value(|inner| inner.engine = Some(Rc::new(engine)));
        let mut pending = None;
        self.inner.update_value(|inner| pending = inner.pending.take());
        if let Some(file) = pending {
            self.load_markdown(&file.content);
            self.rebind_watch();
        }
    }

    pub fn show_status(&self, text: impl Into<String>, severity: Severity, duration_ms: u32) {
        self.status.set(Some(StatusMessage {
            text: text.into(),
            severity,
        }));
        let timer = (duration_ms > 0).then(|| {
            let status = self.status;
            Timeout::new(duration_ms, move || status.set(None))
        });
        self.inner.update_value(|inner| inner.status_timer = timer);
    }

    pub fn clear_status(&self) {
        self.status.set(None);
        self.inner.update_value(|inner| inner.status_timer = None);
    }

    fn confirm_discard(&self) -> bool {
        if !self.dirty.get_untracked() {
            return true;
        }
        window()
            .confirm_with_message("You have unsaved changes. Continue anyway?")
            .unwrap_or(false)
    }

    fn refresh_active(&self) {
        if let Some(engine) = self.engine() {
            self.active.set(engine.active_states());
        }
    }

    fn schedule_dirty_check(&self, html: String) {
        let session = *self;
        let timer = Timeout::new(DIRTY_DEBOUNCE_MS, move || {
            let markdown = bridge::rich_text_to_markdown(&html);
            let differs = session
                .inner
                .with_value(|inner| content_differs(&markdown, &inner.snapshot));
            session.dirty.set(differs);
        });
        // Dropping the previous timer cancels it, so only the last edit in a
        // quiet window triggers a conversion pass.
        self.inner.update_value(|inner| inner.dirty_timer = Some(timer));
    }

    pub fn markdown_content(&self) -> String {
        self.engine()
            .map(|engine| bridge::rich_text_to_markdown(&engine.html()))
            .unwrap_or_default()
    }

    /// The single content-replacement entry point. Resets the snapshot and
    /// clears the dirty flag.
    fn load_markdown(&self, markdown: &str) {
        let html = bridge::markdown_to_rich_text(markdown);
        self.inner.update_value(|inner| {
            inner.snapshot = markdown.to_owned();
            inner.dirty_timer = None;
        });
        if let Some(engine) = self.engine() {
            engine.replace_content(&html);
        }
        self.dirty.set(false);
        self.refresh_active();
    }

    pub fn exec(&self, command: EditorCommand) {
        if let Some(engine) = self.engine() {
            engine.dispatch(&command);
        }
        self.refresh_active();
    }

    /// Link editing: null prompt response is a no-op, empty removes the link.
    pub fn edit_link(&self) {
        let previous = self.engine().and_then(|engine| engine.link_href());
        let response = window()
            .prompt_with_message_and_default("URL:", previous.as_deref().unwrap_or("https://"))
            .unwrap_or(None);
        match response {
            None => {}
            Some(url) if url.is_empty() => self.exec(EditorCommand::UnsetLink),
            Some(url) => self.exec(EditorCommand::SetLink(url)),
        }
    }

    fn suggested_name(&self) -> String {
        let name = self.file_name.get_untracked();
        if name.is_empty() {
            DEFAULT_NAME.to_owned()
        } else {
            name
        }
    }

    pub fn adopt_cli_file(&self, file: CliFile) {
        self.file_name.set(file.name.clone());
        self.inner
            .update_value(|inner| inner.target = FileTarget::NativePath(file.path.clone()));
        if self.inner.with_value(|inner| inner.engine.is_some()) {
            self.load_markdown(&file.content);
            self.rebind_watch();
        } else {
            self.inner.update_value(|inner| inner.pending = Some(file));
        }
    }

    pub fn new_file(&self) {
        if !self.confirm_discard() {
            return;
        }
        if let Some(engine) = self.engine() {
            engine.clear();
        }
        self.inner.update_value(|inner| {
            inner.snapshot = String::new();
            inner.target = FileTarget::Unbound;
            inner.dirty_timer = None;
        });
        self.dirty.set(false);
        self.file_name.set(String::new());
        self.rebind_watch();
        self.refresh_active();
    }

    pub async fn open_file(&self) {
        if !self.confirm_discard() {
            return;
        }
        if self.capability.native_shell {
            match shell::open_file_dialog().await {
                Ok(Some(path)) => {
                    self.show_status("Opening…", Severity::Info, 0);
                    match shell::read_text_file(&path).await {
                        Ok(content) => {
                            let name = file_name_of(&path);
                            self.inner
                                .update_value(|inner| inner.target = FileTarget::NativePath(path));
                            self.file_name.set(name.clone());
                            self.load_markdown(&content);
                            self.rebind_watch();
                            self.show_status(format!("Opened {name}"), Severity::Success, STATUS_MS);
                        }
                        Err(err) => {
                            tracing::warn!(%err, "open failed");
                            self.show_status("Could not open file", Severity::Error, STATUS_MS);
                        }
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%err, "open dialog failed");
                    self.show_status("Could not open file", Severity::Error, STATUS_MS);
                }
            }
            return;
        }

        let opened = if self.capability.browser_fs {
            webfs::open_with_picker().await
        } else {
            webfs::open_with_input().await
        };
        match opened {
            Ok(Some(file)) => {
                self.inner.update_value(|inner| {
                    inner.target = match file.handle {
                        Some(handle) => FileTarget::BrowserHandle(handle),
                        None => FileTarget::Unbound,
                    }
                });
                self.file_name.set(file.name.clone());
                self.load_markdown(&file.content);
                self.show_status(format!("Opened {}", file.name), Severity::Success, STATUS_MS);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "open failed");
                self.show_status("Could not open file", Severity::Error, STATUS_MS);
            }
        }
    }

    async fn run_save_route(&self, route: SaveRoute, content: &str) -> SaveOutcome {
        match route {
            SaveRoute::WriteNativePath => {
                let Some(path) = self
                    .inner
                    .with_value(|inner| inner.target.native_path().map(str::to_owned))
                else {
                    return SaveOutcome::Failed("no bound path".into());
                };
                match shell::write_text_file(&path, content).await {
                    Ok(()) => SaveOutcome::Saved { bound_name: None },
                    Err(err) => SaveOutcome::Failed(err.to_string()),
                }
            }
            SaveRoute::NativeSaveDialog => {
                match shell::save_file_dialog(&self.suggested_name(), "Markdown", &["md"]).await {
                    Ok(Some(path)) => match shell::write_text_file(&path, content).await {
                        Ok(()) => {
                            let name = file_name_of(&path);
                            self.inner
                                .update_value(|inner| inner.target = FileTarget::NativePath(path));
                            SaveOutcome::Saved {
                                bound_name: Some(name),
                            }
                        }
                        Err(err) => SaveOutcome::Failed(err.to_string()),
                    },
                    Ok(None) => SaveOutcome::Cancelled,
                    Err(err) => SaveOutcome::Failed(err.to_string()),
                }
            }
            SaveRoute::WriteBrowserHandle => {
                let handle = self.inner.with_value(|inner| match &inner.target {
                    FileTarget::BrowserHandle(handle) => Some(handle.clone()),
                    _ => None,
                });
                let Some(handle) = handle else {
                    return SaveOutcome::Failed("no bound handle".into());
                };
                match webfs::write_to_handle(&handle, content).await {
                    Ok(()) => SaveOutcome::Saved { bound_name: None },
                    Err(err) => SaveOutcome::Failed(err.to_string()),
                }
            }
            SaveRoute::BrowserSavePicker => {
                match webfs::save_file_picker(
                    &self.suggested_name(),
                    "Markdown",
                    "text/markdown",
                    &[".md"],
                )
                .await
                {
                    Ok(Some(handle)) => match webfs::write_to_handle(&handle, content).await {
                        Ok(()) => {
                            let name = handle.name();
                            self.inner.update_value(|inner| {
                                inner.target = FileTarget::BrowserHandle(handle)
                            });
                            SaveOutcome::Saved {
                                bound_name: Some(name),
                            }
                        }
                        Err(err) => SaveOutcome::Failed(err.to_string()),
                    },
                    Ok(None) => SaveOutcome::Cancelled,
                    Err(err) => SaveOutcome::Failed(err.to_string()),
                }
            }
            SaveRoute::Download => {
                match webfs::download(content, &self.suggested_name(), "text/markdown") {
                    Ok(()) => SaveOutcome::Saved { bound_name: None },
                    Err(err) => SaveOutcome::Failed(err.to_string()),
                }
            }
        }
    }

    /// Save transaction: the dirty flag is cleared tentatively, committed on
    /// success, and rolled back on failure or cancellation so a failed save
    /// never presents as saved.
    pub async fn save_file(&self) {
        let content = self.markdown_content();
        let prior_dirty = self.dirty.get_untracked();
        self.dirty.set(false);
        self.show_status("Saving…", Severity::Info, 0);

        let route = save_route(self.capability, self.inner.with_value(|inner| inner.target.kind()));
        match self.run_save_route(route, &content).await {
            SaveOutcome::Saved { bound_name } => {
                self.inner.update_value(|inner| inner.snapshot = content);
                let message = match &bound_name {
                    Some(name) => format!("Saved {name}"),
                    None if route == SaveRoute::Download => "Downloaded".to_owned(),
                    None => "Saved".to_owned(),
                };
                if let Some(name) = bound_name {
                    self.file_name.set(name);
                }
                self.show_status(message, Severity::Success, STATUS_MS);
                if route == SaveRoute::NativeSaveDialog {
                    self.rebind_watch();
                }
            }
            SaveOutcome::Cancelled => {
                self.dirty.set(prior_dirty);
                self.clear_status();
            }
            SaveOutcome::Failed(err) => {
                tracing::warn!(%err, "save failed");
                self.dirty.set(prior_dirty);
                self.show_status("Could not save file", Severity::Error, STATUS_MS);
            }
        }
    }

    /// Always prompts for a destination; never reuses the current binding.
    pub async fn save_as_file(&self) {
        let content = self.markdown_content();
        let route = if self.capability.native_shell {
            SaveRoute::NativeSaveDialog
        } else if self.capability.browser_fs {
            SaveRoute::BrowserSavePicker
        } else {
            SaveRoute::Download
        };
        match self.run_save_route(route, &content).await {
            SaveOutcome::Saved { bound_name } => {
                self.inner.update_value(|inner| inner.snapshot = content);
                self.dirty.set(false);
                let message = match &bound_name {
                    Some(name) => format!("Saved {name}"),
                    None => "Downloaded".to_owned(),
                };
                if let Some(name) = bound_name {
                    self.file_name.set(name);
                }
                self.show_status(message, Severity::Success, STATUS_MS);
                if route == SaveRoute::NativeSaveDialog {
                    self.rebind_watch();
                }
            }
            SaveOutcome::Cancelled => {}
            SaveOutcome::Failed(err) => {
                tracing::warn!(%err, "save as failed");
                self.show_status("Could not save file", Severity::Error, STATUS_MS);
            }
        }
    }

    /// Export never touches document state, the snapshot, or the dirty flag.
    pub async fn export_html(&self) {
        let Some(engine) = self.engine() else { return };
        let name = html_export_name(&self.file_name.get_untracked());
        let title = {
            let current = self.file_name.get_untracked();
            if current.is_empty() {
                "Document".to_owned()
            } else {
                current
            }
        };
        let html = export_document(&title, &engine.html());

        if self.capability.native_shell {
            match shell::save_file_dialog(&name, "HTML", &["html"]).await {
                Ok(Some(path)) => match shell::write_text_file(&path, &html).await {
                    Ok(()) => self.show_status("Exported HTML", Severity::Success, STATUS_MS),
                    Err(err) => {
                        tracing::warn!(%err, "html export failed");
                        self.show_status("Could not export HTML", Severity::Error, STATUS_MS);
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%err, "html export dialog failed");
                    self.show_status("Could not export HTML", Severity::Error, STATUS_MS);
                }
            }
        } else if self.capability.browser_fs {
            match webfs::save_file_picker(&name, "HTML", "text/html", &[".html"]).await {
                Ok(Some(handle)) => match webfs::write_to_handle(&handle, &html).await {
                    Ok(()) => self.show_status("Exported HTML", Severity::Success, STATUS_MS),
                    Err(err) => {
                        tracing::warn!(%err, "html export failed");
                        self.show_status("Could not export HTML", Severity::Error, STATUS_MS);
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(%err, "html export failed");
                    self.show_status("Could not export HTML", Severity::Error, STATUS_MS);
                }
            }
        } else {
            match webfs::download(&html, &name, "text/html") {
                Ok(()) => self.show_status("Exported HTML", Severity::Success, STATUS_MS),
                Err(err) => {
                    tracing::warn!(%err, "html export failed");
                    self.show_status("Could not export HTML", Severity::Error, STATUS_MS);
                }
            }
        }
    }

    /// (Re)subscribes the external-change watcher to the current binding.
    /// Called from every operation that can change the bound path, which keeps
    /// the set of rebind sites enumerable.
    pub fn rebind_watch(&self) {
        if !self.capability.native_shell {
            return;
        }
        let mut previous = None;
        let mut epoch = 0;
        self.inner.update_value(|inner| {
            previous = inner.watch.take();
            inner.watch_epoch += 1;
            epoch = inner.watch_epoch;
        });
        if let Some(subscription) = previous {
            let _ = subscription.unlisten.call0(&JsValue::NULL);
        }
        let path = self
            .inner
            .with_value(|inner| inner.target.native_path().map(str::to_owned));
        let session = *self;
        spawn_local(async move {
            let Some(path) = path else {
                if let Err(err) = shell::unwatch_file().await {
                    tracing::debug!(%err, "unwatch failed");
                }
                return;
            };
            if let Err(err) = shell::watch_file(&path).await {
                tracing::warn!(%err, path, "file watch setup failed");
                return;
            }
            let handler = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
                if let Some(event) = shell::parse_watch_event(&value) {
                    session.on_watch_event(event);
                }
            });
            match shell::listen_file_events(&handler).await {
                Ok(unlisten) => {
                    let current = session.inner.with_value(|inner| inner.watch_epoch);
                    if current == epoch {
                        tracing::debug!(path, "watching for external changes");
                        session.inner.update_value(|inner| {
                            inner.watch = Some(WatchSubscription {
                                path,
                                unlisten,
                                _handler: handler,
                            })
                        });
                    } else {
                        // A newer rebind won the race; drop this subscription.
                        let _ = unlisten.call0(&JsValue::NULL);
                    }
                }
                Err(err) => tracing::warn!(%err, "file watch subscription failed"),
            }
        });
    }

    fn on_watch_event(&self, event: WatchEvent) {
        if self.inner.with_value(|inner| inner.reconciling) {
            // At most one reconciliation at a time; extra events are dropped.
            return;
        }
        if !is_relevant_change(&event.kind) {
            return;
        }
        let Some(path) = self
            .inner
            .with_value(|inner| inner.watch.as_ref().map(|watch| watch.path.clone()))
        else {
            return;
        };
        self.inner.update_value(|inner| inner.reconciling = true);
        let session = *self;
        spawn_local(async move {
            session.reconcile(&path).await;
            session.inner.update_value(|inner| inner.reconciling = false);
        });
    }

    /// Re-reads an externally modified file and merges it into the live
    /// document. External content is authoritative and clean.
    async fn reconcile(&self, path: &str) {
        let content = match shell::read_text_file(path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(%err, path, "reload after external change failed");
                return;
            }
        };
        if self.inner.with_value(|inner| inner.snapshot == content) {
            // Our own write coming back; nothing to do.
            return;
        }
        tracing::debug!(path, "external change detected, reloading");
        let selection = self.engine().and_then(|engine| engine.selection());
        self.inner.update_value(|inner| {
            inner.snapshot = content.clone();
            inner.dirty_timer = None;
        });
        if let Some(engine) = self.engine() {
            if !engine.destroyed() {
                engine.replace_content(&bridge::markdown_to_rich_text(&content));
                if let Some(range) = selection {
                    engine.restore_selection(range);
                }
            }
        }
        self.dirty.set(false);
        self.refresh_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIVE: Capability = Capability {
        native_shell: true,
        browser_fs: false,
    };
    const BROWSER: Capability = Capability {
        native_shell: false,
        browser_fs: true,
    };
    const BARE: Capability = Capability {
        native_shell: false,
        browser_fs: false,
    };

    #[test]
    fn save_routes_cover_every_capability_binding_pair() {
        assert_eq!(
            save_route(NATIVE, TargetKind::NativePath),
            SaveRoute::WriteNativePath
        );
        assert_eq!(
            save_route(NATIVE, TargetKind::Unbound),
            SaveRoute::NativeSaveDialog
        );
        assert_eq!(
            save_route(BROWSER, TargetKind::BrowserHandle),
            SaveRoute::WriteBrowserHandle
        );
        assert_eq!(
            save_route(BROWSER, TargetKind::Unbound),
            SaveRoute::BrowserSavePicker
        );
        assert_eq!(save_route(BARE, TargetKind::Unbound), SaveRoute::Download);
        // No handle survives in download mode, so every save prompts again.
        assert_eq!(save_route(BARE, TargetKind::NativePath), SaveRoute::Download);
    }

    #[test]
    fn only_content_changes_trigger_reconciliation() {
        assert!(is_relevant_change("modify"));
        assert!(is_relevant_change("create"));
        assert!(!is_relevant_change("access"));
        assert!(!is_relevant_change("remove"));
        assert!(!is_relevant_change("other"));
    }

    #[test]
    fn dirty_comparison_ignores_trailing_newlines() {
        assert!(!content_differs("# A\n", "# A"));
        assert!(content_differs("# A", "# B"));
    }

    #[test]
    fn display_name_handles_both_separators() {
        assert_eq!(file_name_of("/tmp/notes/today.md"), "today.md");
        assert_eq!(file_name_of("C:\\notes\\today.md"), "today.md");
        assert_eq!(file_name_of("today.md"), "today.md");
    }

    #[test]
    fn export_name_strips_markdown_extensions() {
        assert_eq!(html_export_name("Notes.md"), "Notes.html");
        assert_eq!(html_export_name("notes.markdown"), "notes.html");
        assert_eq!(html_export_name("readme.txt"), "readme.txt.html");
        assert_eq!(html_export_name(""), "document.html");
    }

    #[test]
    fn export_template_is_self_contained() {
        let html = export_document("Notes.md", "<h1>Title</h1>");
        assert!(html.contains("<title>Notes.md</title>"));
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
    }
}
