use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::engine;
use crate::session::DocumentSession;

/// Hosts the rich-text engine and applies the zoom transform. The engine glue
/// is an async module, so mounting waits for its ready announcement when the
/// global is not installed yet.
#[component]
pub fn EditorSurface(session: DocumentSession, zoom: RwSignal<u32>) -> impl IntoView {
    let container = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        let Some(element) = container.get() else {
            return;
        };
        let element: web_sys::Element = element.into();
        if engine::engine_ready() {
            session.attach_engine(&element);
        } else {
            let mount = Closure::<dyn FnMut()>::new(move || session.attach_engine(&element));
            let _ = window()
                .add_event_listener_with_callback("richtextkit-ready", mount.as_ref().unchecked_ref());
            mount.forget();
        }
    });

    view! {
        <div class="editor-scroll">
            <div
                class="editor-page"
                style=move || {
                    let scale = zoom.get() as f64 / 100.0;
                    format!(
                        "transform: scale({scale}); transform-origin: top center; width: {}%;",
                        100.0 / scale
                    )
                }
            >
                <div class="editor-host" node_ref=container></div>
            </div>
        </div>
    }
}
