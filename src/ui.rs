use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use kwiz::quiz::{Category, Difficulty, Phase, SessionQuestion};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase() {
            Phase::SelectingFilters => render_menu(self, area, buf),
            Phase::InProgress => render_question(self, area, buf),
            Phase::NoQuestionsAvailable => render_no_questions(area, buf),
            Phase::Complete => render_results(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn difficulty_style(difficulty: Difficulty) -> Style {
    let color = match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("configure your quiz", bold())));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("categories", dim())));

    for (row, category) in Category::ALL.into_iter().enumerate() {
        lines.push(menu_row(
            row == app.menu.cursor,
            app.draft.categories.contains(&category),
            &category.to_string(),
        ));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("difficulties", dim())));

    for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let row = Category::ALL.len() + i;
        lines.push(menu_row(
            row == app.menu.cursor,
            app.draft.difficulties.contains(&difficulty),
            &difficulty.to_string(),
        ));
    }

    lines.push(Line::default());
    if let Some(err) = &app.menu.error {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "space toggle · a everything · enter start · esc quit",
        dim(),
    )));

    // Center the menu block on the widest row
    let width = lines
        .iter()
        .map(|l| {
            l.spans
                .iter()
                .map(|s| s.content.width())
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0) as u16;
    let height = lines.len() as u16;
    let centered = centered_rect(area, width, height);

    Paragraph::new(lines).render(centered, buf);
}

fn menu_row(under_cursor: bool, selected: bool, label: &str) -> Line<'static> {
    let cursor = if under_cursor { "> " } else { "  " };
    let mark = if selected { "[x] " } else { "[ ] " };

    let style = if under_cursor {
        bold()
    } else if selected {
        Style::default()
    } else {
        dim()
    };

    Line::from(Span::styled(format!("{cursor}{mark}{label}"), style))
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(sq) = app.session.current_question() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // padding
            Constraint::Min(1),    // question body
            Constraint::Length(1), // key legend
        ])
        .split(area);

    let (position, total) = app.session.progress();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!("question {position} of {total}"), bold()),
        Span::raw("   "),
        Span::styled(format!("score {}", app.session.score()), bold()),
        Span::raw("   "),
        Span::styled(format!("hints left {}", app.session.hints_remaining()), dim()),
    ]));
    header.render(chunks[0], buf);

    let body = Paragraph::new(question_lines(app, sq))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    body.render(chunks[2], buf);

    let legend = if app.session.is_answered() {
        "n next · esc quit"
    } else {
        "1-9 answer · h hint · esc quit"
    };
    Paragraph::new(Span::styled(legend, dim()))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

fn question_lines<'a>(app: &'a App, sq: &'a SessionQuestion) -> Vec<Line<'a>> {
    let question = sq.question();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            question.category.to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            question.difficulty.to_string(),
            difficulty_style(question.difficulty),
        ),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(question.prompt.as_str(), bold())));
    lines.push(Line::default());

    if let Some(code) = &question.code {
        for code_line in code.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {code_line}"),
                Style::default().fg(Color::Cyan),
            )));
        }
        lines.push(Line::default());
    }

    let answered = app.session.is_answered();
    let selected = app.session.selected();
    let correct = sq.correct_presented_index();

    for (presented, option) in sq.presented_options().into_iter().enumerate() {
        let number = presented + 1;
        let (style, marker) = if !answered {
            (Style::default(), "")
        } else if presented == correct {
            (
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                " ✓",
            )
        } else if Some(presented) == selected {
            (
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                " ✗",
            )
        } else {
            (dim(), "")
        };
        lines.push(Line::from(Span::styled(
            format!("{number}) {option}{marker}"),
            style,
        )));
    }

    if app.session.hint_revealed() && !answered {
        lines.push(Line::default());
        let hint = question.hint.as_deref().unwrap_or("(no hint for this one)");
        lines.push(Line::from(Span::styled(
            format!("hint: {hint}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    if answered {
        let was_correct = selected == Some(correct);
        let (verdict, verdict_style) = if was_correct {
            (
                "Correct! ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                "Incorrect. ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(verdict, verdict_style),
            Span::raw(question.explanation.as_str()),
        ]));
    }

    lines
}

fn render_no_questions(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("no questions match your filters", bold())),
        Line::default(),
        Line::from(Span::styled("m back to menu · esc quit", dim())),
    ];
    let height = lines.len() as u16;
    let centered = centered_rect(area, area.width.saturating_sub(2 * HORIZONTAL_MARGIN), height);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered, buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.session.final_result() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // top spacer
            Constraint::Length(1), // headline
            Constraint::Length(1), // padding
            Constraint::Length(1), // score summary
            Constraint::Length(1), // padding
            Constraint::Length(1), // gauge
            Constraint::Min(1),    // bottom spacer
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled("quiz complete!", bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let summary = format!(
        "{}% · grade {} · {} out of {}",
        result.percentage,
        result.letter,
        app.session.score(),
        app.session.total_questions()
    );
    Paragraph::new(Span::styled(summary, bold()))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let gauge_color = match result.letter {
        'A' | 'B' => Color::Green,
        'C' | 'D' => Color::Yellow,
        _ => Color::Red,
    };
    Gauge::default()
        .gauge_style(Style::default().fg(gauge_color))
        .percent(result.percentage.min(100) as u16)
        .render(chunks[5], buf);

    Paragraph::new(Span::styled("r try again · esc quit", dim()))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
}
