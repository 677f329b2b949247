use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use halsa_core::ChatRole;

/// Wrap text to fit within a given width, returning multiple lines.
/// Uses word boundaries for wrapping (doesn't break mid-word).
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Suggested questions only appear on a fresh conversation.
    let suggestions_height = if app.fresh_conversation() { 4 } else { 0 };

    let [header_area, chat_area, suggestions_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(suggestions_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    if suggestions_height > 0 {
        render_suggestions(app, frame, suggestions_area);
    }
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let t = app.session.translations();
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", t.title),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(t.subtitle, Style::default().fg(Color::White)),
        Span::styled(
            format!("  [{}]", app.session.language().as_str().to_uppercase()),
            Style::default().fg(Color::Black),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

/// Build the transcript as pre-wrapped lines so scroll math is exact.
fn transcript_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let t = app.session.translations();
    let messages = app.session.messages();
    let last_idx = messages.len().saturating_sub(1);
    let mut lines: Vec<Line> = Vec::new();

    for (i, msg) in messages.iter().enumerate() {
        let (label, label_style) = match msg.role {
            ChatRole::User => (
                t.label_you,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            ChatRole::Assistant => (
                t.label_assistant,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(Span::styled(format!("{}:", label), label_style)));

        // The newest assistant message renders through the typewriter
        // while it is still revealing.
        let revealing =
            i == last_idx && msg.role == ChatRole::Assistant && app.typewriter.is_typing();
        let content = if revealing {
            app.typewriter.displayed()
        } else {
            msg.content.as_str()
        };

        for raw_line in content.lines() {
            for wrapped in wrap_text_to_width(raw_line, width) {
                lines.push(Line::from(wrapped));
            }
        }
        if content.is_empty() {
            lines.push(Line::default());
        }

        if !revealing && !msg.website_urls.is_empty() {
            for url in &msg.website_urls {
                lines.push(Line::from(Span::styled(
                    format!("  {}", url),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        lines.push(Line::default());
    }

    if app.session.is_busy() {
        // Typing indicator cycles one to three dots, one step per
        // 300 ms (six 50 ms ticks).
        let dots = "·".repeat(((app.animation_frame / 6) % 3 + 1) as usize);
        lines.push(Line::from(Span::styled(
            format!("{}: {}", t.label_assistant, dots),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for wrapped in wrap_text_to_width(app.ticker.current(), width) {
            lines.push(Line::from(Span::styled(
                wrapped,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }

    lines
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    app.chat_height = inner.height;
    app.chat_width = inner.width;

    let lines = transcript_lines(app, (inner.width as usize).max(1));
    app.chat_total_lines = lines.len() as u16;

    let max_scroll = app.chat_total_lines.saturating_sub(app.chat_height);
    if app.follow_bottom {
        app.chat_scroll = max_scroll;
    } else {
        app.chat_scroll = app.chat_scroll.min(max_scroll);
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    let t = app.session.translations();

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", t.popular_questions),
        Style::default().fg(Color::DarkGray),
    ))];
    for (i, question) in t.suggested_questions.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}. ", i + 1),
                Style::default().fg(Color::Cyan).bold(),
            ),
            Span::raw(*question),
        ]));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let t = app.session.translations();
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    // Horizontal scroll keeps the cursor visible in a long input.
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    if app.input.is_empty() {
        let placeholder = Paragraph::new(t.input_placeholder)
            .style(Style::default().fg(Color::DarkGray))
            .block(input_block);
        frame.render_widget(placeholder, area);
    } else {
        let visible_text: String = app
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        let input = Paragraph::new(visible_text)
            .style(Style::default().fg(Color::Cyan))
            .block(input_block);
        frame.render_widget(input, area);
    }

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Editing => " Enter send · Esc browse · Ctrl+C quit ",
        InputMode::Normal => " i compose · l language · 1-3 ask a suggestion · j/k scroll · q quit ",
    };

    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_word_boundaries() {
        let wrapped = wrap_text_to_width("ont i halsen och snuva", 10);
        assert_eq!(wrapped, vec!["ont i", "halsen och", "snuva"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text_to_width("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wrap_zero_width_passes_through() {
        assert_eq!(wrap_text_to_width("hej", 0), vec!["hej".to_string()]);
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        // Five two-byte characters fit a width of five.
        let wrapped = wrap_text_to_width("ååååå ö", 5);
        assert_eq!(wrapped, vec!["ååååå", "ö"]);
    }
}
