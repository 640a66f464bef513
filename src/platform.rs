use js_sys::Reflect;
use leptos::prelude::window;
use wasm_bindgen::JsValue;

/// Which file-access mechanisms this run of the app can use. Resolved once
/// before the UI mounts and passed by value to everything that branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capability {
    /// The Tauri shell bridge is reachable.
    pub native_shell: bool,
    /// The browser exposes `showOpenFilePicker`/`showSaveFilePicker`.
    pub browser_fs: bool,
}

impl Capability {
    pub fn detect() -> Self {
        let win = JsValue::from(window());
        let capability = Self {
            native_shell: has_native_shell(&win),
            browser_fs: has_function(&win, "showOpenFilePicker"),
        };
        tracing::debug!(?capability, "platform capabilities resolved");
        capability
    }
}

fn has_native_shell(win: &JsValue) -> bool {
    if !Reflect::has(win, &JsValue::from_str("__TAURI_INTERNALS__")).unwrap_or(false) {
        return false;
    }
    // With `withGlobalTauri` the invoke entry point lives on the window; if it
    // is missing the shell bindings failed to load and we downgrade.
    Reflect::get(win, &JsValue::from_str("__TAURI__"))
        .and_then(|tauri| Reflect::get(&tauri, &JsValue::from_str("core")))
        .and_then(|core| Reflect::get(&core, &JsValue::from_str("invoke")))
        .map(|invoke| invoke.is_function())
        .unwrap_or(false)
}

fn has_function(win: &JsValue, name: &str) -> bool {
    Reflect::get(win, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}
