//! Browser-side file access: the native file-system-access pickers when the
//! browser has them, an invisible file input as the floor, and plain download
//! as the no-capability save path.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::{document, window};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, File, FileSystemFileHandle, FileSystemWritableFileStream,
    HtmlAnchorElement, HtmlInputElement, Url,
};

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("browser file API unavailable: {0}")]
    Unavailable(String),
    #[error("browser file operation failed: {0}")]
    Js(String),
}

fn js_error(value: JsValue) -> FsError {
    FsError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Result of an open operation: the content is already read, the handle is
/// only present when the picker API produced one we can save back through.
pub struct OpenedFile {
    pub name: String,
    pub content: String,
    pub handle: Option<FileSystemFileHandle>,
}

fn json_options(value: &serde_json::Value) -> Result<JsValue, FsError> {
    // Plain objects, not JS Maps, or the picker rejects the options bag.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| FsError::Js(err.to_string()))
}

fn picker(name: &str) -> Result<Function, FsError> {
    let win = JsValue::from(window());
    Reflect::get(&win, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| FsError::Unavailable(name.to_owned()))
}

async fn read_file(file: &File) -> Result<String, FsError> {
    let text = JsFuture::from(file.text()).await.map_err(js_error)?;
    Ok(text.as_string().unwrap_or_default())
}

/// Opens via `showOpenFilePicker`. Cancellation resolves to `Ok(None)`.
pub async fn open_with_picker() -> Result<Option<OpenedFile>, FsError> {
    let options = json_options(&serde_json::json!({
        "multiple": false,
        "types": [{
            "description": "Markdown",
            "accept": { "text/markdown": [".md", ".markdown", ".txt"] },
        }],
    }))?;
    let promise: Promise = picker("showOpenFilePicker")?
        .call1(&window().into(), &options)
        .map_err(js_error)?
        .unchecked_into();
    let handles = match JsFuture::from(promise).await {
        Ok(handles) => handles,
        Err(_) => return Ok(None),
    };
    let handle: FileSystemFileHandle = Array::from(&handles).get(0).unchecked_into();
    let file: File = JsFuture::from(handle.get_file())
        .await
        .map_err(js_error)?
        .unchecked_into();
    Ok(Some(OpenedFile {
        name: file.name(),
        content: read_file(&file).await?,
        handle: Some(handle),
    }))
}

/// Floor for browsers without the picker API: an invisible file input.
pub async fn open_with_input() -> Result<Option<OpenedFile>, FsError> {
    let input: HtmlInputElement = document()
        .create_element("input")
        .map_err(js_error)?
        .unchecked_into();
    input.set_type("file");
    input.set_accept(".md,.markdown,.txt");

    let (sender, receiver) = futures::channel::oneshot::channel::<Option<File>>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let picked = {
        let sender = Rc::clone(&sender);
        let input = input.clone();
        Closure::<dyn FnMut()>::new(move || {
            let file = input.files().and_then(|files| files.get(0));
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(file);
            }
        })
    };
    let cancelled = Closure::<dyn FnMut()>::new(move || {
        if let Some(sender) = sender.borrow_mut().take() {
            let _ = sender.send(None);
        }
    });
    input
        .add_event_listener_with_callback("change", picked.as_ref().unchecked_ref())
        .map_err(js_error)?;
    input
        .add_event_listener_with_callback("cancel", cancelled.as_ref().unchecked_ref())
        .map_err(js_error)?;
    input.click();

    let file = receiver.await.unwrap_or(None);
    let Some(file) = file else { return Ok(None) };
    Ok(Some(OpenedFile {
        name: file.name(),
        content: read_file(&file).await?,
        handle: None,
    }))
}

/// Prompts for a save destination via `showSaveFilePicker`. Cancellation
/// resolves to `Ok(None)`.
pub async fn save_file_picker(
    suggested_name: &str,
    description: &str,
    mime: &str,
    extensions: &[&str],
) -> Result<Option<FileSystemFileHandle>, FsError> {
    let options = json_options(&serde_json::json!({
        "suggestedName": suggested_name,
        "types": [{
            "description": description,
            "accept": { mime: extensions },
        }],
    }))?;
    let promise: Promise = picker("showSaveFilePicker")?
        .call1(&window().into(), &options)
        .map_err(js_error)?
        .unchecked_into();
    match JsFuture::from(promise).await {
        Ok(handle) => Ok(Some(handle.unchecked_into())),
        Err(_) => Ok(None),
    }
}

pub async fn write_to_handle(handle: &FileSystemFileHandle, content: &str) -> Result<(), FsError> {
    let writable: FileSystemWritableFileStream = JsFuture::from(handle.create_writable())
        .await
        .map_err(js_error)?
        .unchecked_into();
    JsFuture::from(writable.write_with_str(content).map_err(js_error)?)
        .await
        .map_err(js_error)?;
    JsFuture::from(writable.close()).await.map_err(js_error)?;
    Ok(())
}

/// Last-resort save: hand the content to the browser as a download.
pub fn download(content: &str, file_name: &str, mime: &str) -> Result<(), FsError> {
    let bag = BlobPropertyBag::new();
    bag.set_type(mime);
    let parts = Array::of1(&JsValue::from_str(content));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &bag).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;
    let anchor: HtmlAnchorElement = document()
        .create_element("a")
        .map_err(js_error)?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url).map_err(js_error)?;
    Ok(())
}
