//! Bindings to the bundled rich-text engine (`public/richtextkit.js`). The
//! engine owns selection, undo history, schema, and DOM rendering; this side
//! only issues commands by name and moves HTML in and out.

use js_sys::{Object, Reflect};
use leptos::prelude::window;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Instance handle produced by `RichTextKit.mount`.
    pub type RichTextEditor;

    #[wasm_bindgen(js_namespace = ["window", "RichTextKit"], js_name = mount)]
    fn kit_mount(container: &web_sys::Element, options: &JsValue) -> RichTextEditor;

    #[wasm_bindgen(method)]
    fn exec(this: &RichTextEditor, command: &str, args: &JsValue) -> bool;

    #[wasm_bindgen(method, js_name = getHTML)]
    fn get_html(this: &RichTextEditor) -> String;

    #[wasm_bindgen(method, js_name = setContent)]
    fn set_content(this: &RichTextEditor, html: &str);

    #[wasm_bindgen(method, js_name = clearContent)]
    fn clear_content(this: &RichTextEditor);

    #[wasm_bindgen(method, js_name = isActive)]
    fn is_active(this: &RichTextEditor, name: &str, args: &JsValue) -> bool;

    #[wasm_bindgen(method, js_name = getMarkAttribute)]
    fn get_mark_attribute(this: &RichTextEditor, mark: &str, key: &str) -> Option<String>;

    #[wasm_bindgen(method, js_name = getSelection)]
    fn get_selection(this: &RichTextEditor) -> JsValue;

    #[wasm_bindgen(method, js_name = setSelection)]
    fn set_selection(this: &RichTextEditor, from: u32, to: u32) -> bool;

    #[wasm_bindgen(method, js_name = canUndo)]
    fn can_undo(this: &RichTextEditor) -> bool;

    #[wasm_bindgen(method, js_name = canRedo)]
    fn can_redo(this: &RichTextEditor) -> bool;

    #[wasm_bindgen(method, js_name = isDestroyed)]
    fn is_destroyed(this: &RichTextEditor) -> bool;
}

/// True once the glue script has installed its global.
pub fn engine_ready() -> bool {
    Reflect::get(&window().into(), &JsValue::from_str("RichTextKit"))
        .map(|value| value.is_object())
        .unwrap_or(false)
}

/// Commands the UI can issue, mapped onto the engine's command names.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorCommand {
    ToggleBold,
    ToggleItalic,
    ToggleStrike,
    ToggleCode,
    SetParagraph,
    ToggleHeading(u8),
    ToggleBulletList,
    ToggleOrderedList,
    ToggleBlockquote,
    ToggleTaskList,
    SetLink(String),
    UnsetLink,
    InsertTable,
    AddColumnAfter,
    AddRowAfter,
    DeleteColumn,
    DeleteRow,
    DeleteTable,
    SetHorizontalRule,
    Undo,
    Redo,
}

impl EditorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleBold => "toggleBold",
            Self::ToggleItalic => "toggleItalic",
            Self::ToggleStrike => "toggleStrike",
            Self::ToggleCode => "toggleCode",
            Self::SetParagraph => "setParagraph",
            Self::ToggleHeading(_) => "toggleHeading",
            Self::ToggleBulletList => "toggleBulletList",
            Self::ToggleOrderedList => "toggleOrderedList",
            Self::ToggleBlockquote => "toggleBlockquote",
            Self::ToggleTaskList => "toggleTaskList",
            Self::SetLink(_) => "setLink",
            Self::UnsetLink => "unsetLink",
            Self::InsertTable => "insertTable",
            Self::AddColumnAfter => "addColumnAfter",
            Self::AddRowAfter => "addRowAfter",
            Self::DeleteColumn => "deleteColumn",
            Self::DeleteRow => "deleteRow",
            Self::DeleteTable => "deleteTable",
            Self::SetHorizontalRule => "setHorizontalRule",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    pub fn args(&self) -> serde_json::Value {
        match self {
            Self::ToggleHeading(level) => serde_json::json!({ "level": level }),
            Self::SetLink(href) => serde_json::json!({ "href": href }),
            Self::InsertTable => {
                serde_json::json!({ "rows": 3, "cols": 3, "withHeaderRow": true })
            }
            _ => serde_json::Value::Null,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionRange {
    pub from: u32,
    pub to: u32,
}

/// Snapshot of the engine state the toolbar renders from. Mirrored into a
/// signal on every engine update so the view never touches the engine itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveStates {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
    pub bullet_list: bool,
    pub ordered_list: bool,
    pub blockquote: bool,
    pub task_list: bool,
    pub link: bool,
    pub table: bool,
    /// 0 = paragraph, 1..=6 = heading level.
    pub heading: u8,
    pub can_undo: bool,
    pub can_redo: bool,
}

pub struct EditorHandle {
    editor: RichTextEditor,
    _on_update: Closure<dyn FnMut(String, bool)>,
}

fn to_js(args: &serde_json::Value) -> JsValue {
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

impl EditorHandle {
    /// Mounts the engine into the container. The callback fires with the
    /// current HTML and whether the content (as opposed to the selection)
    /// changed.
    pub fn mount(
        container: &web_sys::Element,
        placeholder: &str,
        on_update: impl FnMut(String, bool) + 'static,
    ) -> Self {
        let on_update = Closure::new(on_update);
        let options = Object::new();
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("placeholder"),
            &JsValue::from_str(placeholder),
        );
        let _ = Reflect::set(&options, &JsValue::from_str("onUpdate"), on_update.as_ref());
        let editor = kit_mount(container, &options);
        Self {
            editor,
            _on_update: on_update,
        }
    }

    pub fn dispatch(&self, command: &EditorCommand) -> bool {
        if self.editor.is_destroyed() {
            return false;
        }
        self.editor.exec(command.name(), &to_js(&command.args()))
    }

    pub fn html(&self) -> String {
        self.editor.get_html()
    }

    pub fn replace_content(&self, html: &str) {
        self.editor.set_content(html);
    }

    pub fn clear(&self) {
        self.editor.clear_content();
    }

    pub fn destroyed(&self) -> bool {
        self.editor.is_destroyed()
    }

    pub fn link_href(&self) -> Option<String> {
        self.editor.get_mark_attribute("link", "href")
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        serde_wasm_bindgen::from_value(self.editor.get_selection()).ok()
    }

    /// Best effort; the engine may reject a stale range after a reload.
    pub fn restore_selection(&self, range: SelectionRange) {
        let _ = self.editor.set_selection(range.from, range.to);
    }

    pub fn active_states(&self) -> ActiveStates {
        let active = |name: &str| self.editor.is_active(name, &JsValue::NULL);
        let heading = (1..=6u8)
            .find(|level| {
                self.editor
                    .is_active("heading", &to_js(&serde_json::json!({ "level": level })))
            })
            .unwrap_or(0);
        ActiveStates {
            bold: active("bold"),
            italic: active("italic"),
            strike: active("strike"),
            code: active("code"),
            bullet_list: active("bulletList"),
            ordered_list: active("orderedList"),
            blockquote: active("blockquote"),
            task_list: active("taskList"),
            link: active("link"),
            table: active("table"),
            heading,
            can_undo: self.editor.can_undo(),
            can_redo: self.editor.can_redo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_engine_names() {
        assert_eq!(EditorCommand::ToggleBold.name(), "toggleBold");
        assert_eq!(EditorCommand::ToggleTaskList.name(), "toggleTaskList");
        assert_eq!(EditorCommand::SetHorizontalRule.name(), "setHorizontalRule");
        assert_eq!(EditorCommand::Undo.name(), "undo");
    }

    #[test]
    fn heading_and_link_commands_carry_arguments() {
        assert_eq!(
            EditorCommand::ToggleHeading(3).args(),
            serde_json::json!({ "level": 3 })
        );
        assert_eq!(
            EditorCommand::SetLink("https://example.com".into()).args(),
            serde_json::json!({ "href": "https://example.com" })
        );
        assert_eq!(EditorCommand::ToggleBold.args(), serde_json::Value::Null);
    }

    #[test]
    fn table_insertion_defaults_to_three_by_three() {
        assert_eq!(
            EditorCommand::InsertTable.args(),
            serde_json::json!({ "rows": 3, "cols": 3, "withHeaderRow": true })
        );
    }
}
