// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::Modifier;
use ratatui::text::{Line, Text};

use super::{markdown_to_html, markdown_to_text};

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn lines(text: &Text<'_>) -> Vec<String> {
    text.lines.iter().map(line_text).collect()
}

#[test]
fn html_renders_headings_and_paragraphs() {
    let html = markdown_to_html("# Hi\n\nhello *there*");
    assert!(html.contains("<h1>Hi</h1>"));
    assert!(html.contains("<em>there</em>"));
}

#[test]
fn html_renders_tables() {
    let html = markdown_to_html("| a | b |\n| - | - |\n| 1 | 2 |");
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>1</td>"));
}

#[test]
fn html_renders_strikethrough_and_task_lists() {
    let html = markdown_to_html("~~gone~~\n\n- [x] done\n- [ ] open");
    assert!(html.contains("<del>gone</del>"));
    assert!(html.contains("checked"));
}

#[test]
fn html_of_empty_source_is_empty() {
    assert_eq!(markdown_to_html(""), "");
}

#[test]
fn text_prefixes_headings_with_hashes() {
    let text = markdown_to_text("## Section");
    assert_eq!(lines(&text), vec!["## Section"]);
    assert!(text.lines[0].spans[0]
        .style
        .add_modifier
        .contains(Modifier::BOLD));
}

#[test]
fn text_separates_paragraphs_with_one_blank_line() {
    let text = markdown_to_text("first\n\nsecond");
    assert_eq!(lines(&text), vec!["first", "", "second"]);
}

#[test]
fn text_joins_soft_breaks_with_a_space() {
    let text = markdown_to_text("one\ntwo");
    assert_eq!(lines(&text), vec!["one two"]);
}

#[test]
fn text_renders_unordered_list_bullets() {
    let text = markdown_to_text("- a\n- b");
    assert_eq!(lines(&text), vec!["• a", "• b"]);
}

#[test]
fn text_numbers_ordered_lists() {
    let text = markdown_to_text("1. a\n1. b\n1. c");
    assert_eq!(lines(&text), vec!["1. a", "2. b", "3. c"]);
}

#[test]
fn text_indents_nested_lists() {
    let text = markdown_to_text("- a\n  - b");
    assert_eq!(lines(&text), vec!["• a", "  • b"]);
}

#[test]
fn text_preserves_code_block_lines_verbatim() {
    let text = markdown_to_text("```\nlet x = 1;\nlet y = 2;\n```");
    assert_eq!(lines(&text), vec!["let x = 1;", "let y = 2;"]);
}

#[test]
fn text_prefixes_blockquote_lines() {
    let text = markdown_to_text("> quoted");
    assert_eq!(lines(&text), vec!["│ quoted"]);
}

#[test]
fn text_drops_the_quote_prefix_after_the_blockquote_ends() {
    let text = markdown_to_text("> quoted\n\nplain");
    assert_eq!(lines(&text), vec!["│ quoted", "", "plain"]);
}

#[test]
fn text_renders_task_markers() {
    let text = markdown_to_text("- [x] done\n- [ ] open");
    assert_eq!(lines(&text), vec!["• [x] done", "• [ ] open"]);
}

#[test]
fn text_renders_rules_as_a_horizontal_bar() {
    let text = markdown_to_text("a\n\n---\n\nb");
    let rendered = lines(&text);
    assert!(rendered.iter().any(|line| line.starts_with('─')));
}

#[test]
fn text_of_empty_source_is_empty() {
    assert!(markdown_to_text("").lines.is_empty());
}
