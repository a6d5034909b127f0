use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use typesprint::{scoring::Outcome, session::Phase};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "[x]"
    } else {
        "[ ]"
    }
}

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

        let cursor_style = Style::default()
            .patch(bold_style)
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_width = session.target().width();
        let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
            1
        } else {
            ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1), // padding
                Constraint::Length(1), // stats
                Constraint::Length(1), // progress
                Constraint::Length(1), // bests
                Constraint::Length(1), // status
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "typesprint",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let typed = session.input().chars().count();
        let spans = session
            .target()
            .chars()
            .zip(session.outcomes())
            .enumerate()
            .map(|(idx, (expected, outcome))| match outcome {
                Outcome::Correct => Span::styled(expected.to_string(), green_bold_style),
                Outcome::Incorrect => Span::styled(
                    match expected {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    red_bold_style,
                ),
                Outcome::Pending if idx == typed => {
                    Span::styled(expected.to_string(), cursor_style)
                }
                Outcome::Pending => Span::styled(expected.to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        let (wpm, accuracy) = match session.result() {
            Some(result) => (result.wpm.to_string(), format!("{}%", result.accuracy)),
            None => ("-".to_string(), "-".to_string()),
        };
        Paragraph::new(Span::styled(
            format!(
                "time {}s   wpm {}   acc {}   progress {}/{}",
                session.elapsed_seconds(),
                wpm,
                accuracy,
                typed,
                session.target().chars().count()
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
            .ratio(session.progress())
            .label("")
            .render(chunks[6], buf);

        let bests = session.bests();
        Paragraph::new(Span::styled(
            format!("best {} wpm   best {}% acc", bests.wpm, bests.accuracy),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

        let status = match session.phase() {
            Phase::Idle => "start typing to begin".to_string(),
            Phase::Active => String::new(),
            Phase::Finished => match session.advance_remaining() {
                Some(left) => format!("done! next sentence in {}s", left.as_secs_f64().ceil()),
                None => "done! (→) for a new sentence".to_string(),
            },
        };
        Paragraph::new(Span::styled(
            status,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

        let settings = session.settings();
        Paragraph::new(Span::styled(
            format!(
                "{} auto next ^a   {} sound ^s   (←) restart / (→) new / (esc) quit",
                on_off(settings.auto_advance),
                on_off(settings.sound_enabled)
            ),
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[10], buf);
    }
}
