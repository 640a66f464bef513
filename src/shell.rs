//! Typed wrappers around the Tauri shell bridge. Everything here assumes the
//! capability probe already confirmed the shell is present.

use js_sys::{Function, Reflect};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen, catch)]
    async fn tauri_listen(event: &str, handler: &JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("shell call failed: {0}")]
    Invoke(String),
    #[error("unexpected shell payload: {0}")]
    Payload(String),
}

fn invoke_error(value: JsValue) -> ShellError {
    ShellError::Invoke(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn encode<T: Serialize>(args: &T) -> Result<JsValue, ShellError> {
    serde_wasm_bindgen::to_value(args).map_err(|err| ShellError::Payload(err.to_string()))
}

fn decode<T: for<'de> Deserialize<'de>>(value: JsValue) -> Result<T, ShellError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| ShellError::Payload(err.to_string()))
}

#[derive(Serialize)]
struct PathArgs<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct WriteFileArgs<'a> {
    path: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveDialogArgs<'a> {
    default_name: &'a str,
    filter_name: &'a str,
    extensions: &'a [&'a str],
}

#[derive(Serialize)]
struct TitleArgs<'a> {
    title: &'a str,
}

/// File handed over on the command line, picked up once at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct CliFile {
    pub path: String,
    pub name: String,
    pub content: String,
}

/// Payload of a `file-watch` event emitted by the shell watcher.
#[derive(Clone, Debug, Deserialize)]
pub struct WatchEvent {
    pub kind: String,
    pub paths: Vec<String>,
}

pub async fn open_file_dialog() -> Result<Option<String>, ShellError> {
    let value = invoke("open_file_dialog", JsValue::NULL)
        .await
        .map_err(invoke_error)?;
    decode(value)
}

pub async fn save_file_dialog(
    default_name: &str,
    filter_name: &str,
    extensions: &[&str],
) -> Result<Option<String>, ShellError> {
    let args = encode(&SaveDialogArgs {
        default_name,
        filter_name,
        extensions,
    })?;
    let value = invoke("save_file_dialog", args).await.map_err(invoke_error)?;
    decode(value)
}

pub async fn read_text_file(path: &str) -> Result<String, ShellError> {
    let value = invoke("read_file", encode(&PathArgs { path })?)
        .await
        .map_err(invoke_error)?;
    decode(value)
}

pub async fn write_text_file(path: &str, content: &str) -> Result<(), ShellError> {
    invoke("write_file", encode(&WriteFileArgs { path, content })?)
        .await
        .map_err(invoke_error)?;
    Ok(())
}

pub async fn watch_file(path: &str) -> Result<(), ShellError> {
    invoke("watch_file", encode(&PathArgs { path })?)
        .await
        .map_err(invoke_error)?;
    Ok(())
}

pub async fn unwatch_file() -> Result<(), ShellError> {
    invoke("unwatch_file", JsValue::NULL)
        .await
        .map_err(invoke_error)?;
    Ok(())
}

pub async fn set_window_title(title: &str) -> Result<(), ShellError> {
    invoke("set_title", encode(&TitleArgs { title })?)
        .await
        .map_err(invoke_error)?;
    Ok(())
}

pub async fn cli_file() -> Result<Option<CliFile>, ShellError> {
    let value = invoke("get_cli_file", JsValue::NULL)
        .await
        .map_err(invoke_error)?;
    decode(value)
}

/// Subscribes to shell watcher events; returns the unlisten function.
pub async fn listen_file_events(
    handler: &Closure<dyn FnMut(JsValue)>,
) -> Result<Function, ShellError> {
    let unlisten = tauri_listen("file-watch", handler.as_ref().unchecked_ref())
        .await
        .map_err(invoke_error)?;
    unlisten
        .dyn_into::<Function>()
        .map_err(|value| ShellError::Payload(format!("unlisten is not callable: {value:?}")))
}

/// Tauri wraps payloads in an envelope; pull the part the watcher cares about.
pub fn parse_watch_event(value: &JsValue) -> Option<WatchEvent> {
    let payload = Reflect::get(value, &JsValue::from_str("payload")).ok()?;
    decode(payload).ok()
}
