use gloo_storage::Storage as _;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::editor::EditorSurface;
use crate::platform::Capability;
use crate::session::{DocumentSession, Severity};
use crate::shell;
use crate::toolbar::Toolbar;

const ZOOM_KEY: &str = "penmark.zoom";

fn load_zoom() -> u32 {
    gloo_storage::LocalStorage::get::<u32>(ZOOM_KEY)
        .map(|value| value.clamp(50, 200))
        .unwrap_or(100)
}

#[component]
pub fn App(capability: Capability) -> impl IntoView {
    let session = DocumentSession::new(capability);
    let zoom = RwSignal::new(load_zoom());

    Effect::new(move |_| {
        let value = zoom.get();
        if let Err(err) = gloo_storage::LocalStorage::set(ZOOM_KEY, value) {
            tracing::debug!(%err, "zoom level not persisted");
        }
    });

    // File handed over on the command line, if any.
    if capability.native_shell {
        spawn_local(async move {
            match shell::cli_file().await {
                Ok(Some(file)) => session.adopt_cli_file(file),
                Ok(None) => {}
                Err(err) => tracing::debug!(%err, "cli file check failed"),
            }
        });
    }

    // Window title mirrors the file name and the dirty marker.
    Effect::new(move |_| {
        let name = session.file_name.get();
        let name = if name.is_empty() {
            "Untitled".to_owned()
        } else {
            name
        };
        let marker = if session.dirty.get() { " *" } else { "" };
        let title = format!("{name}{marker} - Penmark");
        document().set_title(&title);
        if capability.native_shell {
            spawn_local(async move {
                if let Err(err) = shell::set_window_title(&title).await {
                    tracing::debug!(%err, "window title update failed");
                }
            });
        }
    });

    // File chords take priority over the webview defaults; everything else
    // belongs to the engine.
    let keyboard = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
        move |event: web_sys::KeyboardEvent| {
            if !(event.ctrl_key() || event.meta_key()) {
                return;
            }
            match event.key().to_lowercase().as_str() {
                "n" => {
                    event.prevent_default();
                    session.new_file();
                }
                "o" => {
                    event.prevent_default();
                    spawn_local(async move { session.open_file().await });
                }
                "s" if event.shift_key() => {
                    event.prevent_default();
                    spawn_local(async move { session.save_as_file().await });
                }
                "s" => {
                    event.prevent_default();
                    spawn_local(async move { session.save_file().await });
                }
                "k" => {
                    event.prevent_default();
                    session.edit_link();
                }
                _ => {}
            }
        },
    );
    let _ = window().add_event_listener_with_callback("keydown", keyboard.as_ref().unchecked_ref());
    keyboard.forget();

    let dirty = session.dirty;
    let unload = Closure::<dyn FnMut(web_sys::BeforeUnloadEvent)>::new(
        move |event: web_sys::BeforeUnloadEvent| {
            if dirty.get_untracked() {
                event.prevent_default();
                event.set_return_value("");
            }
        },
    );
    let _ =
        window().add_event_listener_with_callback("beforeunload", unload.as_ref().unchecked_ref());
    unload.forget();

    view! {
        <div class="app">
            <Toolbar session zoom/>
            <EditorSurface session zoom/>
            {move || {
                session
                    .status
                    .get()
                    .map(|message| {
                        let class = match message.severity {
                            Severity::Info => "status status-info",
                            Severity::Success => "status status-success",
                            Severity::Error => "status status-error",
                        };
                        view! { <div class=class>{message.text}</div> }
                    })
            }}
        </div>
    }
}
