// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Markdown rendering, delegated to pulldown-cmark.
//!
//! Two targets: an HTML body for export, and styled terminal text for the
//! live preview pane. The terminal side is a thin mapping from the parser's
//! event stream to `ratatui` lines; it is not a markdown implementation.

use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const HEADING_COLOR: Color = Color::Cyan;
const CODE_COLOR: Color = Color::Yellow;
const QUOTE_COLOR: Color = Color::DarkGray;
const RULE_COLOR: Color = Color::DarkGray;
const LINK_COLOR: Color = Color::LightBlue;
const RAW_HTML_COLOR: Color = Color::DarkGray;

const RULE_WIDTH: usize = 40;

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Renders markdown to an HTML body fragment (no surrounding document).
pub fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options());
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Renders markdown to styled terminal text for the preview pane.
///
/// Wrapping is left to the widget that draws the result.
pub fn markdown_to_text(source: &str) -> Text<'static> {
    let mut builder = TextBuilder::default();

    for event in Parser::new_ext(source, parser_options()) {
        match event {
            Event::Start(tag) => builder.start_tag(tag),
            Event::End(tag) => builder.end_tag(tag),
            Event::Text(text) => builder.push_text(&text),
            Event::Code(code) => builder.push_inline_code(&code),
            Event::Html(raw) | Event::InlineHtml(raw) => builder.push_raw_html(&raw),
            Event::FootnoteReference(name) => builder.push_footnote_reference(&name),
            Event::SoftBreak => builder.push_soft_break(),
            Event::HardBreak => builder.flush_line(),
            Event::Rule => builder.push_rule(),
            Event::TaskListMarker(checked) => builder.push_task_marker(checked),
            _ => {}
        }
    }

    builder.finish()
}

#[derive(Default)]
struct TextBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    heading: Option<HeadingLevel>,
    bold: usize,
    italic: usize,
    strikethrough: usize,
    link: usize,
    code_block: bool,
    quote_depth: usize,
    table_head: bool,
    // One counter per open list; `None` marks an unordered list.
    list_stack: Vec<Option<u64>>,
}

impl TextBuilder {
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Inside a list item the paragraph flows into the item line.
                if self.list_stack.is_empty() {
                    self.block_break();
                }
            }
            Tag::Heading { level, .. } => {
                self.block_break();
                self.heading = Some(level);
                let hashes = "#".repeat(heading_depth(level));
                self.spans.push(Span::styled(format!("{hashes} "), self.style()));
            }
            Tag::BlockQuote(_) => {
                self.block_break();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.block_break();
                self.code_block = true;
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.block_break();
                } else if !self.spans.is_empty() {
                    self.flush_line();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                if !self.spans.is_empty() {
                    self.flush_line();
                }
                let depth = self.list_stack.len().saturating_sub(1);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{number}. ");
                        *number += 1;
                        marker
                    }
                    _ => "• ".to_owned(),
                };
                self.spans.push(Span::raw(format!("{}{marker}", "  ".repeat(depth))));
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { .. } | Tag::Image { .. } => self.link += 1,
            Tag::Table(_) => self.block_break(),
            Tag::TableHead => self.table_head = true,
            Tag::TableCell => {
                if !self.spans.is_empty() {
                    self.spans.push(Span::styled(" │ ", Style::default().fg(QUOTE_COLOR)));
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.list_stack.is_empty() {
                    self.flush_line();
                }
            }
            TagEnd::Heading(_) => {
                self.flush_line();
                self.heading = None;
            }
            TagEnd::BlockQuote(_) => {
                if !self.spans.is_empty() {
                    self.flush_line();
                }
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if !self.spans.is_empty() {
                    self.flush_line();
                }
                self.code_block = false;
            }
            TagEnd::List(_) => {
                if !self.spans.is_empty() {
                    self.flush_line();
                }
                self.list_stack.pop();
            }
            TagEnd::Item => {
                if !self.spans.is_empty() {
                    self.flush_line();
                }
            }
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => self.link = self.link.saturating_sub(1),
            TagEnd::Table => {
                if !self.spans.is_empty() {
                    self.flush_line();
                }
            }
            TagEnd::TableHead => {
                self.flush_line();
                self.table_head = false;
            }
            TagEnd::TableRow => self.flush_line(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut first = true;
        for part in text.split('\n') {
            if !first {
                self.flush_line();
            }
            first = false;
            if !part.is_empty() {
                self.spans.push(Span::styled(part.to_owned(), self.style()));
            }
        }
    }

    fn push_inline_code(&mut self, code: &str) {
        let style = self.style().fg(CODE_COLOR);
        self.spans.push(Span::styled(code.to_owned(), style));
    }

    fn push_raw_html(&mut self, raw: &str) {
        let style = Style::default().fg(RAW_HTML_COLOR);
        for (index, part) in raw.split('\n').enumerate() {
            if index > 0 {
                self.flush_line();
            }
            if !part.is_empty() {
                self.spans.push(Span::styled(part.to_owned(), style));
            }
        }
    }

    fn push_footnote_reference(&mut self, name: &str) {
        let style = Style::default().fg(QUOTE_COLOR);
        self.spans.push(Span::styled(format!("[^{name}]"), style));
    }

    fn push_soft_break(&mut self) {
        self.spans.push(Span::styled(" ".to_owned(), self.style()));
    }

    fn push_rule(&mut self) {
        self.block_break();
        self.lines.push(Line::from(Span::styled(
            "─".repeat(RULE_WIDTH),
            Style::default().fg(RULE_COLOR),
        )));
    }

    fn push_task_marker(&mut self, checked: bool) {
        let marker = if checked { "[x] " } else { "[ ] " };
        self.spans.push(Span::raw(marker.to_owned()));
    }

    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.heading.is_some() {
            style = style.fg(HEADING_COLOR).add_modifier(Modifier::BOLD);
        }
        if self.code_block {
            style = style.fg(CODE_COLOR);
        }
        if self.quote_depth > 0 {
            style = style.fg(QUOTE_COLOR);
        }
        if self.bold > 0 || self.table_head {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strikethrough > 0 {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if self.link > 0 {
            style = style.fg(LINK_COLOR).add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn flush_line(&mut self) {
        let mut spans = std::mem::take(&mut self.spans);
        if self.quote_depth > 0 {
            spans.insert(
                0,
                Span::styled("│ ".repeat(self.quote_depth), Style::default().fg(QUOTE_COLOR)),
            );
        }
        self.lines.push(Line::from(spans));
    }

    /// Ends the pending line and separates the next block with one blank.
    fn block_break(&mut self) {
        if !self.spans.is_empty() {
            self.flush_line();
        }
        if self.lines.last().is_some_and(|line| !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Text<'static> {
        if !self.spans.is_empty() {
            self.flush_line();
        }
        Text::from(self.lines)
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests;
