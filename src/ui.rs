pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, LineGauge, Paragraph, Widget, Wrap,
    },
};

use corrguess::score::Grade;

use crate::{
    ui::charting::{axis_ticks, gauge_ratio, segments},
    App,
};

const HORIZONTAL_MARGIN: u16 = 2;

const POINT_COLOR: Color = Color::Cyan;
const GUESS_COLOR: Color = Color::Green;
const TRUTH_COLOR: Color = Color::Red;

pub fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::S => Color::Green,
        Grade::A => Color::Blue,
        Grade::B => Color::Magenta,
        Grade::C => Color::Rgb(255, 152, 0),
        Grade::F => Color::Red,
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

fn draw_outline(ctx: &mut Context, outline: &[(f64, f64)], color: Color) {
    for ((x1, y1), (x2, y2)) in segments(outline) {
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let round = &session.round;
        let settings = &session.settings;
        let digits = settings.r_digits as usize;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let mut constraints = vec![
            Constraint::Length(1), // title + streak
            Constraint::Length(3), // guess gauge
            Constraint::Min(5),    // scatter plot
            Constraint::Length(1), // score
        ];
        if self.show_settings {
            constraints.push(Constraint::Length(4));
        }
        constraints.push(Constraint::Length(1)); // legend

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(constraints.as_slice())
            .split(area);

        Paragraph::new(Span::styled("Correlation Guessing Game", bold_style))
            .alignment(Alignment::Left)
            .render(chunks[0], buf);
        Paragraph::new(Span::styled(
            format!("S-streak {}", session.streak.dock_label()),
            bold_style,
        ))
        .alignment(Alignment::Right)
        .render(chunks[0], buf);

        let gauge_title = if round.is_evaluated() {
            "Your guess (scored)"
        } else {
            "Guess the correlation"
        };
        LineGauge::default()
            .block(Block::default().borders(Borders::ALL).title(gauge_title))
            .filled_style(Style::default().fg(GUESS_COLOR).add_modifier(Modifier::BOLD))
            .unfilled_style(dim_style)
            .label(format!("r = {:+.*}", digits, round.guess))
            .ratio(gauge_ratio(round.guess))
            .render(chunks[1], buf);

        let bounds = round.bounds;
        let coords = round.dataset.coords();
        let ellipse = settings.ellipse();
        let guess_outline = settings
            .show_guess_ellipse
            .then(|| round.guess_ellipse(ellipse));
        let true_outline = if settings.show_true_ellipse {
            round.true_ellipse(ellipse)
        } else {
            None
        };

        let plot_title = if round.is_evaluated() {
            match round.realized_r() {
                Some(realized) => format!(
                    "True correlation: r = {:.*}  (points as drawn: {:.*})",
                    digits,
                    round.true_r(),
                    digits,
                    realized
                ),
                None => format!("True correlation: r = {:.*}", digits, round.true_r()),
            }
        } else {
            format!("N = {}", round.dataset.len())
        };

        Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(plot_title))
            .marker(Marker::Braille)
            .x_bounds(bounds.x())
            .y_bounds(bounds.y())
            .paint(|ctx| {
                if bounds.min_y <= 0.0 && bounds.max_y >= 0.0 {
                    ctx.draw(&CanvasLine::new(
                        bounds.min_x,
                        0.0,
                        bounds.max_x,
                        0.0,
                        Color::DarkGray,
                    ));
                }
                if bounds.min_x <= 0.0 && bounds.max_x >= 0.0 {
                    ctx.draw(&CanvasLine::new(
                        0.0,
                        bounds.min_y,
                        0.0,
                        bounds.max_y,
                        Color::DarkGray,
                    ));
                }
                for (x, label) in axis_ticks(bounds.x()) {
                    ctx.print(x, bounds.min_y, Span::styled(label, dim_style));
                }
                for (y, label) in axis_ticks(bounds.y()) {
                    ctx.print(bounds.min_x, y, Span::styled(label, dim_style));
                }
                ctx.layer();

                if let Some(outline) = &guess_outline {
                    draw_outline(ctx, outline, GUESS_COLOR);
                }
                if let Some(outline) = &true_outline {
                    draw_outline(ctx, outline, TRUTH_COLOR);
                }
                ctx.layer();

                ctx.draw(&Points {
                    coords: &coords,
                    color: POINT_COLOR,
                });
            })
            .render(chunks[2], buf);

        let score_line = match round.evaluation {
            Some(evaluation) => Line::from(vec![
                Span::styled(
                    format!(
                        "{} Score: {:.2}   Grade: {}",
                        evaluation.grade.emblem(),
                        evaluation.score,
                        evaluation.grade
                    ),
                    Style::default()
                        .fg(grade_color(evaluation.grade))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   ({} difficulty)", settings.difficulty),
                    italic_style,
                ),
            ]),
            None => Line::from(Span::styled(
                "Read the cloud, set your guess, then press (enter) to evaluate",
                italic_style,
            )),
        };
        Paragraph::new(score_line)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if self.show_settings {
            let settings_text = format!(
                "N: {} (+/-) | Difficulty: {} (d) | Decimals: {} (p) | Seed: {}\nGuess ellipse: {} (g) | True ellipse after scoring: {} (t)",
                settings.n_points,
                settings.difficulty,
                settings.r_digits,
                round.seed,
                on_off(settings.show_guess_ellipse),
                on_off(settings.show_true_ellipse),
            );
            Paragraph::new(settings_text)
                .block(Block::default().borders(Borders::TOP).title("Settings"))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[4], buf);
        }

        let action = if round.is_evaluated() {
            "(enter) next"
        } else {
            "(enter) evaluate"
        };
        let legend = Paragraph::new(Span::styled(
            format!("(←/→) step / (↑/↓) x10 / {action} / (s)ettings / (esc)ape"),
            italic_style,
        ));
        legend.render(chunks[chunks.len() - 1], buf);
    }
}
