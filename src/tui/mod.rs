//! Ratatui-based terminal form.
//!
//! Eleven inputs laid out in two columns (personal details and lifestyle on the
//! left, academic habits and environment on the right), a Predict action, and a
//! result line showing the last prediction.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::error::{AppError, EXIT_RUNTIME};
use crate::form::{Field, FormState, Section, Widget};
use crate::models::Predictor;

/// Index of the Predict action in the navigation order (after the fields).
const PREDICT_INDEX: usize = Field::ALL.len();

const TAGLINE: &str =
    "Fill in your academic and lifestyle details below to predict your likely exam score.";

/// Start the TUI with an already loaded pipeline.
pub fn run(pipeline: Arc<dyn Predictor>) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(pipeline);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_RUNTIME,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    form: FormState,
    pipeline: Arc<dyn Predictor>,
    selected: usize,
    /// Text being typed into a numeric field, if editing.
    editing: Option<String>,
    status: String,
}

impl App {
    fn new(pipeline: Arc<dyn Predictor>) -> Self {
        Self {
            form: FormState::new(),
            pipeline,
            selected: 0,
            editing: None,
            status: "Fill in your details, then press p (or Enter on Predict).".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read()
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))?
            {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn selected_field(&self) -> Option<Field> {
        Field::ALL.get(self.selected).copied()
    }

    /// Handle one key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.selected < PREDICT_INDEX {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Char('p') => self.submit(),
            KeyCode::Enter => match self.selected_field() {
                None => self.submit(),
                Some(field) => {
                    if let Widget::Spinner(spinner) = self.form.widget(field) {
                        self.editing = Some(String::new());
                        self.status = format!(
                            "Type a value for {} ({}..={}). Enter to apply, Esc to cancel.",
                            field.label(),
                            spinner.domain().min,
                            spinner.domain().max
                        );
                    }
                }
            },
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => buffer.push(c),
            KeyCode::Enter => {
                let text = self.editing.take().unwrap_or_default();
                self.apply_edit(&text);
            }
            _ => {}
        }
    }

    fn apply_edit(&mut self, text: &str) {
        let Some(field) = self.selected_field() else {
            return;
        };
        let value = match text.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.status = format!("'{text}' is not a number.");
                return;
            }
        };
        match self.form.set_number(field, value) {
            Ok(()) => {
                self.status = format!("{}: {}", field.label(), self.form.widget(field).display());
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn adjust(&mut self, delta: i32) {
        if let Some(field) = self.selected_field() {
            self.form.widget_mut(field).adjust(delta);
        }
    }

    fn submit(&mut self) {
        self.status = match self.form.on_submit(self.pipeline.as_ref()) {
            Ok(_) => "Prediction complete.".to_string(),
            Err(_) => "Prediction failed.".to_string(),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_predict(frame, chunks[2]);
        self.draw_result(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Student Exam Score Predictor",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_column(frame, columns[0], &[Section::Personal, Section::Lifestyle]);
        self.draw_column(frame, columns[1], &[Section::Academic, Section::Environment]);
    }

    fn draw_column(&self, frame: &mut ratatui::Frame<'_>, area: Rect, sections: &[Section]) {
        let mut lines: Vec<Line> = Vec::new();
        for (i, &section) in sections.iter().enumerate() {
            if i > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(
                section.title(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (idx, field) in Field::ALL.iter().enumerate() {
                if field.section() == section {
                    lines.push(self.field_line(idx, *field));
                }
            }
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn field_line(&self, idx: usize, field: Field) -> Line<'static> {
        let selected = idx == self.selected;
        let value = match (&self.editing, selected) {
            (Some(buffer), true) => format!("{buffer}_"),
            _ => self.form.widget(field).display(),
        };
        let marker = if selected { "» " } else { "  " };
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{:<22}", field.label()), style),
            Span::styled(format!(" {value}"), style.add_modifier(Modifier::BOLD)),
        ])
    }

    fn draw_predict(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let style = if self.selected == PREDICT_INDEX {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Green)
        };
        let p = Paragraph::new("Predict Exam Score!")
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (text, style) = match self.form.outcome() {
            None => (String::new(), Style::default()),
            Some(Ok(_)) => (
                self.form.result_message().unwrap_or_default(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Some(Err(_)) => (
                self.form.result_message().unwrap_or_default(),
                Style::default().fg(Color::Red),
            ),
        };
        let p = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Result").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter type value  p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
