use std::collections::HashSet;

use htmd::options::{BulletListMarker, CodeBlockStyle, HeadingStyle, Options as MarkdownOptions};
use htmd::{Element, HtmlToMarkdown};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn parse_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders Markdown source to the HTML dialect the rich-text engine consumes.
///
/// Task lists are rewritten at the event level: an unordered list containing a
/// task marker becomes `<ul data-type="taskList">` and its marked items become
/// `<li data-type="taskItem" data-checked="...">`, with the checked state taken
/// straight from the parser rather than matched back out of rendered HTML.
pub fn markdown_to_rich_text(markdown: &str) -> String {
    let events: Vec<Event> = Parser::new_ext(markdown, parse_options()).collect();
    let events = rewrite_task_lists(events);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, events.into_iter());
    html
}

fn rewrite_task_lists(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    // First pass: unordered lists that contain a task marker anywhere at item
    // level are task lists. Markers in ordered lists are left to the renderer.
    let mut task_list_starts = HashSet::new();
    let mut stack: Vec<(usize, bool)> = Vec::new();
    for (idx, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::List(ordered)) => stack.push((idx, ordered.is_none())),
            Event::End(TagEnd::List(_)) => {
                stack.pop();
            }
            Event::TaskListMarker(_) => {
                if let Some(&(start, unordered)) = stack.last() {
                    if unordered {
                        task_list_starts.insert(start);
                    }
                }
            }
            _ => {}
        }
    }

    let mut out = Vec::with_capacity(events.len());
    let mut task_stack: Vec<bool> = Vec::new();
    for idx in 0..events.len() {
        match &events[idx] {
            Event::Start(Tag::List(ordered)) => {
                let is_task = ordered.is_none() && task_list_starts.contains(&idx);
                task_stack.push(is_task);
                if is_task {
                    out.push(Event::Html(CowStr::Borrowed("<ul data-type=\"taskList\">\n")));
                } else {
                    out.push(events[idx].clone());
                }
            }
            Event::End(TagEnd::List(_)) => {
                if task_stack.pop() == Some(true) {
                    out.push(Event::Html(CowStr::Borrowed("</ul>\n")));
                } else {
                    out.push(events[idx].clone());
                }
            }
            Event::Start(Tag::Item) if task_stack.last() == Some(&true) => {
                match item_marker(&events, idx) {
                    Some(checked) => out.push(Event::Html(CowStr::from(format!(
                        "<li data-type=\"taskItem\" data-checked=\"{checked}\">"
                    )))),
                    // An unmarked item inside a task list stays a plain item.
                    None => out.push(events[idx].clone()),
                }
            }
            Event::TaskListMarker(_) if task_stack.last() == Some(&true) => {}
            _ => out.push(events[idx].clone()),
        }
    }
    out
}

/// The marker follows the item start directly, or after the opening paragraph
/// in a loose list.
fn item_marker(events: &[Event<'_>], item_start: usize) -> Option<bool> {
    for event in events.iter().skip(item_start + 1).take(2) {
        match event {
            Event::TaskListMarker(checked) => return Some(*checked),
            Event::Start(Tag::Paragraph) => continue,
            _ => return None,
        }
    }
    None
}

fn attr_value(element: &Element, name: &str) -> Option<String> {
    element
        .attrs
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

fn converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .options(MarkdownOptions {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            bullet_list_marker: BulletListMarker::Dash,
            ..Default::default()
        })
        // Task items carry their state as an attribute, so the rule keys on
        // that instead of sniffing checkbox markup out of the content.
        .add_handler(vec!["li"], |element: Element| {
            let checked = attr_value(&element, "data-checked")?;
            let marker = if checked == "true" { "[x]" } else { "[ ]" };
            let text = element.content.trim().replace('\n', "\n    ");
            Some(format!("- {marker} {text}\n"))
        })
        .add_handler(vec!["ul"], |element: Element| {
            if attr_value(&element, "data-type").as_deref() != Some("taskList") {
                return None;
            }
            Some(format!("\n{}\n", element.content))
        })
        .build()
}

/// Serializes the engine's HTML back to Markdown. Conversion problems are
/// logged and produce an empty document rather than tearing down the UI.
pub fn rich_text_to_markdown(html: &str) -> String {
    match converter().convert(html) {
        Ok(markdown) => markdown,
        Err(err) => {
            tracing::warn!(?err, "rich text conversion failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn task_lines(markdown: &str) -> Vec<String> {
        markdown
            .lines()
            .map(str::trim_end)
            .filter(|line| line.starts_with("- ["))
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn renders_task_list_attributes() {
        let html = markdown_to_rich_text("- [ ] first\n- [x] second\n");
        assert!(html.contains("<ul data-type=\"taskList\">"));
        assert!(html.contains("<li data-type=\"taskItem\" data-checked=\"false\">"));
        assert!(html.contains("<li data-type=\"taskItem\" data-checked=\"true\">"));
        assert!(!html.contains("<input"));
    }

    #[test]
    fn renders_task_list_attributes_in_loose_lists() {
        let html = markdown_to_rich_text("- [x] first\n\n- [ ] second\n");
        assert!(html.contains("data-checked=\"true\""));
        assert!(html.contains("data-checked=\"false\""));
    }

    #[test]
    fn plain_lists_are_untouched() {
        let html = markdown_to_rich_text("- one\n- two\n");
        assert!(html.contains("<ul>"));
        assert!(!html.contains("data-type"));
    }

    #[test]
    fn round_trips_basic_markdown() {
        // Semantic equivalence: the serializer is free to pick its own
        // emphasis delimiters, so compare the rendered structure.
        let source = "# Title\n\nSome **bold** and *italic* text.\n\n- one\n- two\n";
        let back = rich_text_to_markdown(&markdown_to_rich_text(source));
        assert_eq!(
            normalized(&markdown_to_rich_text(&back)),
            normalized(&markdown_to_rich_text(source))
        );
    }

    #[test]
    fn round_trips_plain_paragraph_text() {
        let source = "just a paragraph of text\n";
        let back = rich_text_to_markdown(&markdown_to_rich_text(source));
        assert_eq!(normalized(&back), normalized(source));
    }

    #[test]
    fn round_trips_task_state_exactly() {
        let source = "- [ ] a\n- [x] b\n";
        let back = rich_text_to_markdown(&markdown_to_rich_text(source));
        assert_eq!(task_lines(&back), vec!["- [ ] a", "- [x] b"]);
    }

    #[test]
    fn rich_text_rendering_is_idempotent() {
        let source = "# Notes\n\ntext with `code`\n\n- [x] done\n- [ ] todo\n";
        let first = markdown_to_rich_text(source);
        let again = markdown_to_rich_text(&rich_text_to_markdown(&first));
        assert_eq!(normalized(&again), normalized(&first));
    }

    #[test]
    fn task_items_reindent_inner_line_breaks() {
        let html = "<ul data-type=\"taskList\">\
                    <li data-type=\"taskItem\" data-checked=\"true\">first<br>second</li>\
                    </ul>";
        let markdown = rich_text_to_markdown(html);
        assert!(markdown.contains("- [x] first"));
        assert!(markdown.contains("\n    second"));
    }

    #[test]
    fn heading_round_trip_uses_atx_style() {
        let back = rich_text_to_markdown("<h2>Section</h2>");
        assert_eq!(back.trim(), "## Section");
    }
}
