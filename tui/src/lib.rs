//! TUI rendering for the CTF terminal using ratatui.

mod input;
mod theme;

pub use input::{apply_event, handle_events, handle_key};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Wrap,
    },
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use ctf_engine::{App, SECRET_TARGET, StatusKind, TranscriptLine};

/// Height of the input box including borders.
pub const INPUT_HEIGHT: u16 = 3;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let [header, transcript, input, status] = Layout::vertical([
        Constraint::Length(1),            // Header
        Constraint::Min(3),               // Transcript
        Constraint::Length(INPUT_HEIGHT), // Input
        Constraint::Length(1),            // Status bar
    ])
    .areas(frame.area());

    draw_header(frame, app, header, &palette, &glyphs);
    draw_transcript(frame, app, transcript, &palette, &glyphs);
    draw_input(frame, app, input, &palette, &glyphs);
    draw_status_bar(frame, app, status, &palette, &glyphs);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let (solved, total) = app.progress();
    let secrets = app.session().discovered_secrets().len();
    let separator = Span::styled(format!(" {} ", glyphs.separator), styles::key_hint(palette));

    let progress_style = if solved == total {
        Style::default()
            .fg(palette.success)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text_secondary)
    };

    let header = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("{}@{}", app.user(), app.host()), styles::prompt(palette)),
        separator.clone(),
        Span::styled(
            format!("{} {solved}/{total} solved", progress_bar(solved, total, glyphs)),
            progress_style,
        ),
        separator,
        Span::styled(
            format!("{secrets}/{SECRET_TARGET} secrets"),
            Style::default().fg(palette.accent),
        ),
    ]));
    frame.render_widget(header, area);
}

fn progress_bar(solved: usize, total: usize, glyphs: &Glyphs) -> String {
    let mut bar = String::new();
    for i in 0..total {
        bar.push_str(if i < solved {
            glyphs.solved
        } else {
            glyphs.locked
        });
    }
    bar
}

fn draw_transcript(
    frame: &mut Frame,
    app: &mut App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette))
        .title(Line::from(Span::styled(
            " terminal ",
            Style::default().fg(palette.text_secondary),
        )));

    let lines: Vec<Line<'static>> = app
        .transcript()
        .iter()
        .map(|line| transcript_line(line, palette, glyphs))
        .collect();

    // Calculate content height and visible height for scrolling
    let inner = block.inner(area);
    let total_lines = wrapped_line_count(&lines, inner.width);
    let visible_height = inner.height;

    let max_scroll = total_lines.saturating_sub(visible_height);
    app.scroll_mut().update_limits(max_scroll, visible_height);
    let scroll_offset = app.scroll().offset_from_top();

    let transcript = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));

    frame.render_widget(transcript, area);

    // Only render scrollbar when content exceeds viewport
    if max_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some(glyphs.arrow_up))
            .end_symbol(Some(glyphs.arrow_down))
            .track_symbol(Some(glyphs.track))
            .thumb_symbol(glyphs.thumb)
            .style(Style::default().fg(palette.text_muted));

        // content_length = scrollable range (max_scroll), not total_lines
        let mut scrollbar_state =
            ScrollbarState::new(max_scroll as usize).position(scroll_offset as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn transcript_line(line: &TranscriptLine, palette: &Palette, glyphs: &Glyphs) -> Line<'static> {
    if line.is_input_echo {
        return Line::from(vec![
            Span::styled(format!("{} ", glyphs.prompt), styles::prompt(palette)),
            Span::styled(line.text.clone(), styles::input_echo(palette)),
        ]);
    }
    Line::from(Span::styled(
        line.text.clone(),
        output_style(&line.text, palette),
    ))
}

/// Color output lines by what they report.
fn output_style(text: &str, palette: &Palette) -> Style {
    let base = Style::default().fg(palette.text_secondary);
    if text.contains("Correct! Challenge solved!")
        || text.contains("All challenges completed!")
        || text.contains("Secret discovered:")
    {
        base.fg(palette.success).add_modifier(Modifier::BOLD)
    } else if text.contains("FLAG{") {
        styles::flag(palette)
    } else if text.starts_with("Command not found:")
        || text.starts_with("Challenge not found:")
        || text.starts_with("Invalid input:")
        || text.starts_with("cat: ")
        || text.starts_with("curl: ")
    {
        base.fg(palette.error)
    } else if text.starts_with("usage: ")
        || text.starts_with("Hint")
        || text == "You already solved this challenge!"
    {
        base.fg(palette.warning)
    } else if text.ends_with("[SOLVED]") || text.starts_with("Unlocked: ") {
        base.fg(palette.success)
    } else if text.starts_with("Progress: ") {
        base.fg(palette.accent)
    } else {
        base
    }
}

fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut total: u16 = 0;

    for line in lines {
        let line_width = line.width();
        let rows = if line_width == 0 {
            1
        } else {
            ((line_width - 1) / width) + 1
        };
        total = total.saturating_add(u16::try_from(rows).unwrap_or(u16::MAX));
    }

    total
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let prompt = format!("{} ", glyphs.prompt);
    let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX);
    let content_width = usize::from(area.width.saturating_sub(2).saturating_sub(prompt_width));

    let draft = app.draft().text();
    let cursor_index = app.draft().byte_index();
    let cursor_display_pos = draft[..cursor_index].width();

    // Keep the cursor visible by scrolling the draft horizontally.
    let (display_text, horizontal_scroll) = if content_width > 0
        && cursor_display_pos >= content_width
    {
        let scroll_target = cursor_display_pos - content_width + 1;
        let mut byte_offset = draft.len();
        let mut skipped_width = 0;
        for (idx, grapheme) in draft.grapheme_indices(true) {
            if skipped_width >= scroll_target {
                byte_offset = idx;
                break;
            }
            skipped_width += grapheme.width();
        }
        (&draft[byte_offset..], skipped_width)
    } else {
        (draft, 0)
    };

    let title = Line::from(vec![Span::styled(
        format!(" {}@{}:~$ ", app.user(), app.host()),
        styles::prompt(palette),
    )]);
    let hints = Line::from(vec![
        Span::styled("Enter", styles::key_highlight(palette)),
        Span::styled(" run  ", styles::key_hint(palette)),
        Span::styled("Esc", styles::key_highlight(palette)),
        Span::styled(" quit ", styles::key_hint(palette)),
    ])
    .alignment(Alignment::Right);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(prompt, styles::prompt(palette)),
        Span::styled(display_text, Style::default().fg(palette.text_primary)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.prompt))
            .title_top(title)
            .title_top(hints),
    );
    frame.render_widget(input, area);

    let visible_cursor = u16::try_from(cursor_display_pos - horizontal_scroll).unwrap_or(u16::MAX);
    let cursor_x = area
        .x
        .saturating_add(1 + prompt_width)
        .saturating_add(visible_cursor)
        .min(area.right().saturating_sub(2));
    frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
}

pub(crate) fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let spans = if let Some(msg) = app.status_message() {
        let (prefix, color) = match app.status_kind() {
            StatusKind::Error => ("Error: ", palette.error),
            StatusKind::Warning => ("", palette.warning),
            StatusKind::Success => ("", palette.success),
            StatusKind::Info => ("", palette.text_secondary),
        };
        vec![Span::styled(format!("{prefix}{msg}"), Style::default().fg(color))]
    } else {
        let sep = format!("  {}  ", glyphs.separator);
        vec![
            Span::styled(
                format!("{}/{}", glyphs.arrow_up, glyphs.arrow_down),
                styles::key_highlight(palette),
            ),
            Span::styled(" history", styles::key_hint(palette)),
            Span::styled(sep.clone(), styles::key_hint(palette)),
            Span::styled("PgUp/PgDn", styles::key_highlight(palette)),
            Span::styled(" scroll", styles::key_hint(palette)),
            Span::styled(sep, styles::key_hint(palette)),
            Span::styled("Ctrl+L", styles::key_highlight(palette)),
            Span::styled(" clear", styles::key_hint(palette)),
        ]
    };

    let mut line = vec![Span::raw(" ")];
    line.extend(spans);
    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::text::Line;

    use super::{progress_bar, theme::glyphs, wrapped_line_count};
    use ctf_types::ui::UiOptions;

    #[test]
    fn wrapped_count_rounds_up() {
        let lines = vec![Line::from("abcdef"), Line::from(""), Line::from("abc")];
        assert_eq!(wrapped_line_count(&lines, 3), 4);
        assert_eq!(wrapped_line_count(&lines, 4), 4);
        assert_eq!(wrapped_line_count(&lines, 10), 3);
    }

    #[test]
    fn progress_bar_marks_solved() {
        let ascii = glyphs(UiOptions {
            ascii_only: true,
            high_contrast: false,
        });
        assert_eq!(progress_bar(2, 5, &ascii), "++---");
    }
}
