use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use crate::session::{CharState, Session};
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let cyan_italic_style = Style::default().patch(italic_style).fg(Color::Cyan);

        if !session.has_finished() {
            let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
            let prompt_occupied_lines: u16 = session
                .target
                .lines()
                .map(|line| (line.width() as f64 / max_chars_per_line as f64).ceil().max(1.0) as u16)
                .sum();

            let single_line = !session.target.contains('\n')
                && session.target.width() <= max_chars_per_line as usize;

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .constraints(
                    [
                        Constraint::Length(
                            area.height.saturating_sub(prompt_occupied_lines) / 2,
                        ),
                        Constraint::Length(2),
                        Constraint::Length(prompt_occupied_lines),
                        Constraint::Length(
                            area.height.saturating_sub(prompt_occupied_lines) / 2,
                        ),
                    ]
                    .as_ref(),
                )
                .split(area);

            let timer = Paragraph::new(Span::styled(
                session.seconds_remaining.to_string(),
                dim_bold_style,
            ))
            .alignment(Alignment::Center);

            timer.render(chunks[1], buf);

            let widget = Paragraph::new(prompt_lines(
                session,
                green_bold_style,
                red_bold_style,
                dim_bold_style,
            ))
            .alignment(if single_line {
                // when the prompt is small enough to fit on one line
                // centering the text gives a nice zen feeling
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false });

            widget.render(chunks[2], buf);
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .horizontal_margin(HORIZONTAL_MARGIN)
                .vertical_margin(VERTICAL_MARGIN)
                .constraints(
                    [
                        Constraint::Length(1), // stats
                        Constraint::Length(1), // personal best
                        Constraint::Length(1), // sound indicator
                        Constraint::Length(1), // padding
                        Constraint::Min(1),    // history
                        Constraint::Length(1), // legend
                    ]
                    .as_ref(),
                )
                .split(area);

            if let Some(result) = &session.result {
                let stats = Paragraph::new(Span::styled(
                    format!(
                        "{} wpm   {}% acc   {:.2}s",
                        result.speed_wpm, result.accuracy_percent, result.elapsed_secs
                    ),
                    bold_style,
                ))
                .alignment(Alignment::Center);

                stats.render(chunks[0], buf);

                let best_line = match self.history.best_wpm() {
                    Some(best) if result.speed_wpm >= best && best > 0 => {
                        String::from("new personal best")
                    }
                    Some(best) => format!("personal best: {best} wpm"),
                    None => String::new(),
                };

                let best = Paragraph::new(Span::styled(best_line, cyan_italic_style))
                    .alignment(Alignment::Center);

                best.render(chunks[1], buf);
            }

            let sound = Paragraph::new(Span::styled(
                if self.bell.is_enabled() {
                    "sound on"
                } else {
                    "sound off"
                },
                dim_bold_style,
            ))
            .alignment(Alignment::Center);

            sound.render(chunks[2], buf);

            let history_lines: Vec<Line> = self
                .history
                .entries()
                .iter()
                .map(|entry| {
                    Line::from(vec![
                        Span::styled(
                            format!(
                                "{} wpm   {}% acc   {:.2}s",
                                entry.result.speed_wpm,
                                entry.result.accuracy_percent,
                                entry.result.elapsed_secs
                            ),
                            bold_style,
                        ),
                        Span::styled(format!("   {}", entry.age()), italic_style),
                    ])
                })
                .collect();

            let history = Paragraph::new(history_lines).alignment(Alignment::Center);

            history.render(chunks[4], buf);

            let legend = Paragraph::new(Span::styled(
                String::from(if Browser::is_available() {
                    "(r)etry / (n)ew / (m)ute / (t)weet / (esc)ape"
                } else {
                    "(r)etry / (n)ew / (m)ute / (esc)ape"
                }),
                italic_style,
            ));

            legend.render(chunks[5], buf);
        }
    }
}

/// One display line per target line, one span per target character.
/// Mistyped characters show what was typed (a middle dot for whitespace);
/// the character under the cursor is underlined.
fn prompt_lines(
    session: &Session,
    green_bold_style: Style,
    red_bold_style: Style,
    dim_bold_style: Style,
) -> Vec<Line<'static>> {
    let states = session.char_states();
    let input_chars: Vec<char> = session.input.chars().collect();
    let cursor = session.cursor_pos();

    let mut lines = Vec::new();
    let mut spans: Vec<Span> = Vec::new();

    for (idx, (target_char, state)) in session.target.chars().zip(states).enumerate() {
        if target_char == '\n' {
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }

        let mut style = match state {
            CharState::Correct => green_bold_style,
            CharState::Incorrect => red_bold_style,
            CharState::Unmatched => dim_bold_style,
        };
        if idx == cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        let symbol = match state {
            CharState::Incorrect => match input_chars.get(idx) {
                Some(c) if c.is_whitespace() => "·".to_owned(),
                Some(c) => c.to_string(),
                None => "·".to_owned(),
            },
            _ => target_char.to_string(),
        };

        spans.push(Span::styled(symbol, style));
    }

    lines.push(Line::from(spans));
    lines
}
