use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::warn;

use tuition_book::commands::{self, Command};
use tuition_book::{
    DeleteTuitionCommand, FindTuitionCommand, Index, ListTuitionCommand, Model, Session, Tuition,
    TuitionFilter,
};

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing keywords for find
    Find,
}

pub struct App {
    pub model: Model,
    pub state: TableState,
    pub show_detail: bool,
    pub input_mode: InputMode,
    pub input: String,
    /// Feedback of the last command, shown in the status bar
    pub feedback: String,
    pub now: NaiveDateTime,
}

impl App {
    pub fn new(model: Model) -> Self {
        let mut state = TableState::default();
        if !model.filtered_view().is_empty() {
            state.select(Some(0));
        }

        Self {
            model,
            state,
            show_detail: false,
            input_mode: InputMode::Normal,
            input: String::new(),
            feedback: String::new(),
            now: Local::now().naive_local(),
        }
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub fn shown_count(&self) -> usize {
        self.model.filtered_view().len()
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_tuition(&self) -> Option<&Tuition> {
        self.state
            .selected()
            .and_then(|i| self.model.filtered_view().get(i))
    }

    /// Run a command and record its feedback; selection is kept in range
    pub fn execute(&mut self, command: &dyn Command) {
        self.feedback = match commands::run(command, &mut self.model) {
            Ok(result) => result.feedback,
            Err(e) => e.to_string(),
        };
        self.clamp_selection();
    }

    pub fn list_all(&mut self) {
        self.execute(&ListTuitionCommand);
    }

    pub fn delete_selected(&mut self) {
        let Some(selected) = self.state.selected() else {
            self.feedback = "No student selected".to_string();
            return;
        };
        self.execute(&DeleteTuitionCommand::new(Index::from_zero_based(selected)));
    }

    pub fn start_find(&mut self) {
        self.input_mode = InputMode::Find;
        self.input.clear();
    }

    pub fn cancel_find(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn submit_find(&mut self) {
        let keywords: Vec<String> = self.input.split_whitespace().map(String::from).collect();
        self.input_mode = InputMode::Normal;
        self.input.clear();

        if keywords.is_empty() {
            self.feedback = "Type at least one keyword to find".to_string();
            return;
        }
        self.execute(&FindTuitionCommand::new(keywords));
        if !self.model.filtered_view().is_empty() {
            self.state.select(Some(0));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.shown_count();
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn next(&mut self) {
        let len = self.shown_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.shown_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.shown_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + PAGE_SIZE).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.shown_count() == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(PAGE_SIZE),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        warn!(error = %err, "terminal UI stopped");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.input_mode == InputMode::Find {
            match key.code {
                KeyCode::Enter => app.submit_find(),
                KeyCode::Esc => app.cancel_find(),
                KeyCode::Backspace => {
                    app.input.pop();
                }
                KeyCode::Char(c) => app.input.push(c),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Enter => app.toggle_detail(),
            KeyCode::Char('/') => app.start_find(),
            KeyCode::Char('l') => app.list_all(),
            KeyCode::Char('d') => app.delete_selected(),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::PageDown => app.page_down(),
            KeyCode::PageUp => app.page_up(),
            KeyCode::Home => {
                if app.shown_count() > 0 {
                    app.state.select(Some(0));
                }
            }
            KeyCode::End => {
                let len = app.shown_count();
                if len > 0 {
                    app.state.select(Some(len - 1));
                }
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar / find input
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // Student list
                Constraint::Percentage(45), // Detail panel
            ])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app);
    }

    match app.input_mode {
        InputMode::Find => render_find_input(f, chunks[2], app),
        InputMode::Normal => render_status_bar(f, chunks[2], app),
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let filter_style = if *app.model.filter() == TuitionFilter::ShowAll {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let header_text = vec![Line::from(vec![
        Span::styled(
            "Tuition Book",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Students: {}", app.model.tuitions().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Shown: {}", app.shown_count()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        Span::styled(app.model.filter().describe(), filter_style),
    ])];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["#", "Name", "Phone", "Study Level", "Guardian", "Next Session"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let now = app.now;
    let rows: Vec<Row> = app
        .model
        .filtered_view()
        .iter()
        .enumerate()
        .map(|(i, tuition)| {
            let student = tuition.student();
            let next_session = match tuition.upcoming_session(now) {
                Some(s) => Cell::from(s.session_date().to_string())
                    .style(Style::default().fg(Color::Green)),
                None => Cell::from("-").style(Style::default().fg(Color::DarkGray)),
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(student.name().as_str(), 28)),
                Cell::from(student.phone().to_string()),
                Cell::from(truncate(student.study_level().as_str(), 12)),
                Cell::from(format!(
                    "{} ({})",
                    student.guardian_phone(),
                    student.relationship()
                )),
                next_session,
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(30),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(24),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Students "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, app.shown_count()),
        Style::default().fg(Color::Cyan),
    )];

    if !app.feedback.is_empty() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            truncate(&app.feedback, 60),
            Style::default().fg(Color::Green),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Find | "));
    status_spans.push(Span::styled("l", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" List | "));
    status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Delete | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_find_input(f: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled(" find: ", Style::default().fg(Color::Yellow)),
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Enter to search, Esc to cancel "),
    );

    f.render_widget(input, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `2024-01-01 10:00-11:30`, with the end date shown when the session runs past midnight
fn session_window(session: &Session) -> String {
    let start = session.session_date().date_time();
    let end = session.ends_at();
    if end.date() == start.date() {
        format!("{}-{}", start.format("%Y-%m-%d %H:%M"), end.format("%H:%M"))
    } else {
        format!("{} to {}", start.format("%Y-%m-%d %H:%M"), end.format("%Y-%m-%d %H:%M"))
    }
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Student Details ");

    let Some(tuition) = app.selected_tuition() else {
        f.render_widget(Paragraph::new("No student selected").block(block), area);
        return;
    };
    let student = tuition.student();

    let mut content = vec![
        Line::from(""),
        Line::from(vec![label("  Name: "), Span::raw(student.name().to_string())]),
        Line::from(vec![label("  Phone: "), Span::raw(student.phone().to_string())]),
        Line::from(vec![label("  Email: "), Span::raw(student.email().to_string())]),
        Line::from(vec![label("  Address: "), Span::raw(student.address().to_string())]),
        Line::from(vec![
            label("  Study Level: "),
            Span::raw(student.study_level().to_string()),
        ]),
        Line::from(vec![
            label("  Guardian: "),
            Span::raw(format!(
                "{} ({})",
                student.guardian_phone(),
                student.relationship()
            )),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  SESSIONS ({})", tuition.sessions().len()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
    ];

    if tuition.sessions().is_empty() {
        content.push(Line::from(Span::styled(
            "  No sessions yet",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    for session in tuition.sessions() {
        let style = if session.session_date().date_time() >= app.now {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(vec![
            Span::styled(format!("  {}", session_window(session)), style),
            Span::raw(format!("  {}  ${}", session.subject(), session.fee())),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(Paragraph::new(content).block(block), area);
}
