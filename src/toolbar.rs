use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::engine::EditorCommand;
use crate::session::DocumentSession;

const ZOOM_LEVELS: [u32; 7] = [50, 75, 100, 125, 150, 175, 200];

#[component]
pub fn Toolbar(session: DocumentSession, zoom: RwSignal<u32>) -> impl IntoView {
    let active = session.active;

    view! {
        <div class="toolbar">
            <button title="New (Ctrl+N)" on:click=move |_| session.new_file()>"New"</button>
            <button
                title="Open (Ctrl+O)"
                on:click=move |_| spawn_local(async move { session.open_file().await })
            >
                "Open"
            </button>
            <button
                title="Save (Ctrl+S)"
                on:click=move |_| spawn_local(async move { session.save_file().await })
            >
                "Save"
            </button>
            <button
                title="Save As (Ctrl+Shift+S)"
                on:click=move |_| spawn_local(async move { session.save_as_file().await })
            >
                "Save As"
            </button>
            <button
                title="Export HTML"
                on:click=move |_| spawn_local(async move { session.export_html().await })
            >
                "Export"
            </button>

            <div class="toolbar-separator"></div>

            <select
                class="toolbar-select"
                title="Block style"
                prop:value=move || active.get().heading.to_string()
                on:change=move |ev| {
                    match event_target_value(&ev).parse::<u8>().unwrap_or(0) {
                        0 => session.exec(EditorCommand::SetParagraph),
                        level => session.exec(EditorCommand::ToggleHeading(level)),
                    }
                }
            >
                <option value="0">"Paragraph"</option>
                {(1..=6u8)
                    .map(|level| {
                        view! {
                            <option value=level.to_string()>{format!("Heading {level}")}</option>
                        }
                    })
                    .collect_view()}
            </select>

            <div class="toolbar-separator"></div>

            <button
                title="Bold (Ctrl+B)"
                class:active=move || active.get().bold
                on:click=move |_| session.exec(EditorCommand::ToggleBold)
            >
                "B"
            </button>
            <button
                title="Italic (Ctrl+I)"
                class:active=move || active.get().italic
                on:click=move |_| session.exec(EditorCommand::ToggleItalic)
            >
                "I"
            </button>
            <button
                title="Strikethrough (Ctrl+Shift+X)"
                class:active=move || active.get().strike
                on:click=move |_| session.exec(EditorCommand::ToggleStrike)
            >
                "S"
            </button>
            <button
                title="Inline code (Ctrl+E)"
                class:active=move || active.get().code
                on:click=move |_| session.exec(EditorCommand::ToggleCode)
            >
                "</>"
            </button>

            <div class="toolbar-separator"></div>

            <button
                title="Bullet list"
                class:active=move || active.get().bullet_list
                on:click=move |_| session.exec(EditorCommand::ToggleBulletList)
            >
                "• List"
            </button>
            <button
                title="Ordered list"
                class:active=move || active.get().ordered_list
                on:click=move |_| session.exec(EditorCommand::ToggleOrderedList)
            >
                "1. List"
            </button>
            <button
                title="Blockquote"
                class:active=move || active.get().blockquote
                on:click=move |_| session.exec(EditorCommand::ToggleBlockquote)
            >
                "Quote"
            </button>
            <button
                title="Task list"
                class:active=move || active.get().task_list
                on:click=move |_| session.exec(EditorCommand::ToggleTaskList)
            >
                "Tasks"
            </button>

            <div class="toolbar-separator"></div>

            <button
                title="Link (Ctrl+K)"
                class:active=move || active.get().link
                on:click=move |_| session.edit_link()
            >
                "Link"
            </button>
            {move || {
                active
                    .get()
                    .link
                    .then(|| {
                        view! {
                            <button
                                title="Remove link"
                                on:click=move |_| session.exec(EditorCommand::UnsetLink)
                            >
                                "Unlink"
                            </button>
                        }
                    })
            }}

            <div class="toolbar-separator"></div>

            {move || {
                if active.get().table {
                    view! {
                        <span class="toolbar-group">
                            <button
                                title="Add column"
                                on:click=move |_| session.exec(EditorCommand::AddColumnAfter)
                            >
                                "+Col"
                            </button>
                            <button
                                title="Add row"
                                on:click=move |_| session.exec(EditorCommand::AddRowAfter)
                            >
                                "+Row"
                            </button>
                            <button
                                title="Delete column"
                                on:click=move |_| session.exec(EditorCommand::DeleteColumn)
                            >
                                "-Col"
                            </button>
                            <button
                                title="Delete row"
                                on:click=move |_| session.exec(EditorCommand::DeleteRow)
                            >
                                "-Row"
                            </button>
                            <button
                                title="Delete table"
                                on:click=move |_| session.exec(EditorCommand::DeleteTable)
                            >
                                "No Table"
                            </button>
                        </span>
                    }
                        .into_any()
                } else {
                    view! {
                        <button
                            title="Insert table"
                            on:click=move |_| session.exec(EditorCommand::InsertTable)
                        >
                            "Table"
                        </button>
                    }
                        .into_any()
                }
            }}

            <div class="toolbar-separator"></div>

            <button
                title="Horizontal rule"
                on:click=move |_| session.exec(EditorCommand::SetHorizontalRule)
            >
                "—"
            </button>

            <div class="toolbar-separator"></div>

            <button
                title="Undo (Ctrl+Z)"
                prop:disabled=move || !active.get().can_undo
                on:click=move |_| session.exec(EditorCommand::Undo)
            >
                "Undo"
            </button>
            <button
                title="Redo (Ctrl+Shift+Z)"
                prop:disabled=move || !active.get().can_redo
                on:click=move |_| session.exec(EditorCommand::Redo)
            >
                "Redo"
            </button>

            <div class="toolbar-spacer"></div>

            <select
                class="toolbar-select"
                title="Zoom"
                prop:value=move || zoom.get().to_string()
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                        zoom.set(value.clamp(50, 200));
                    }
                }
            >
                {ZOOM_LEVELS
                    .iter()
                    .map(|level| {
                        view! { <option value=level.to_string()>{format!("{level}%")}</option> }
                    })
                    .collect_view()}
            </select>

            <div class="toolbar-separator"></div>

            <span class="toolbar-file">
                {move || {
                    let name = session.file_name.get();
                    let name = if name.is_empty() { "Untitled".to_owned() } else { name };
                    let marker = if session.dirty.get() { " *" } else { "" };
                    format!("{name}{marker}")
                }}
            </span>
        </div>
    }
}
