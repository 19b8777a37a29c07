use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use idpc_autocomplete::navigator::Row;

use super::app_state::{App, Focus, MAX_VISIBLE_ROWS};
use crate::widgets::popup;

const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_OFFSET_X: u16 = 1;
const FIELD_LABEL_WIDTH: usize = 14;

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Search input on top, address fields below, status line at the bottom
        let [input_area, fields_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.regions.input = input_area;

        self.render_input_field(frame, input_area);
        self.render_fields(frame, fields_area);
        self.render_status(frame, status_area);

        // Dropdown last so it overlays the fields
        self.render_suggestions(frame, input_area, frame.area());
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_input_field(&mut self, frame: &mut Frame, area: Rect) {
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search address ")
                .border_style(self.border_style(Focus::Input)),
        );
        frame.render_widget(&self.textarea, area);
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Address ")
            .border_style(self.border_style(Focus::Form));

        let lines: Vec<Line> = self
            .controller
            .options()
            .output_fields
            .keys()
            .map(|attribute| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", attribute, width = FIELD_LABEL_WIDTH),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(self.field_value(attribute).to_string()),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = self.status();
        let line = Line::from(vec![
            Span::styled(status, Style::default().fg(Color::Gray)),
            Span::styled(
                "  (Tab: switch pane, Esc: quit)",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the suggestion dropdown under the input field
    fn render_suggestions(&mut self, frame: &mut Frame, input_area: Rect, bounds: Rect) {
        self.regions.list = None;
        self.regions.list_inner = None;

        let navigator = self.controller.navigator();
        if !navigator.is_open() || navigator.rows().is_empty() {
            return;
        }

        let visible_count = (navigator.rows().len() as u16).min(MAX_VISIBLE_ROWS);
        let area = popup::popup_below_anchor(
            input_area,
            bounds,
            visible_count + POPUP_BORDER_HEIGHT,
            POPUP_OFFSET_X,
        );
        if area.height <= POPUP_BORDER_HEIGHT {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);

        self.controller
            .navigator_mut()
            .set_visible_height(inner.height as u32);

        let navigator = self.controller.navigator();
        let visible = navigator.viewport().visible_rows(navigator.rows().len());
        let max_width = inner.width as usize;

        let items: Vec<ListItem> = navigator.rows()[visible]
            .iter()
            .map(|row| match row {
                Row::Message { text } => ListItem::new(Line::from(Span::styled(
                    truncate_to_width(text, max_width),
                    Style::default().fg(Color::Red),
                ))),
                Row::Suggestion { text, highlighted } => {
                    let style = if *highlighted {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    ListItem::new(Line::from(Span::styled(
                        truncate_to_width(text, max_width),
                        style,
                    )))
                }
            })
            .collect();

        popup::clear_area(frame, area);
        frame.render_widget(List::new(items).block(block), area);

        self.regions.list = Some(area);
        self.regions.list_inner = Some(inner);
    }
}

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width - 1 {
            break;
        }
        result.push(c);
        width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
