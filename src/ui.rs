use anyhow::Result;
use check_validator::ValidationReport;
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
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;

const PAGE_SIZE: usize = 10;

pub struct App {
    pub file: PathBuf,
    pub report: ValidationReport,
    pub state: ListState,
    /// Last save result shown in the status bar
    pub status: Option<String>,
}

impl App {
    pub fn new(file: PathBuf, report: ValidationReport) -> Self {
        let mut state = ListState::default();
        if !report.is_valid() {
            state.select(Some(0));
        }

        Self {
            file,
            report,
            state,
            status: None,
        }
    }

    pub fn next(&mut self) {
        self.move_by(1);
    }

    pub fn previous(&mut self) {
        self.move_by(-1);
    }

    pub fn page_down(&mut self) {
        self.move_by(PAGE_SIZE as isize);
    }

    pub fn page_up(&mut self) {
        self.move_by(-(PAGE_SIZE as isize));
    }

    fn move_by(&mut self, delta: isize) {
        let total = self.report.error_count();
        if total == 0 {
            return;
        }

        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, total as isize - 1);
        self.state.select(Some(next as usize));
    }

    /// `<file>.errors.txt` next to the validated file
    pub fn save_path(&self) -> PathBuf {
        let mut name = self.file.clone().into_os_string();
        name.push(".errors.txt");
        PathBuf::from(name)
    }

    pub fn save_errors(&mut self) {
        let path = self.save_path();
        self.status = Some(match self.report.save_to(&path) {
            Ok(true) => format!("Errors saved to {}", path.display()),
            Ok(false) => "Nothing to save".to_string(),
            Err(err) => format!("Save failed: {:#}", err),
        });
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
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('s') => app.save_errors(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with file + summary
            Constraint::Min(0),    // Error list
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_errors(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let (symbol, color) = if app.report.is_valid() {
        ("✅", Color::Green)
    } else {
        ("❌", Color::Red)
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", app.file.display()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(
            format!("{} {}", symbol, app.report.summary()),
            Style::default().fg(color),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" CSV Check Validator "),
    );

    f.render_widget(header, area);
}

fn render_errors(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Errors ");

    if app.report.is_valid() {
        let ok = Paragraph::new("No errors found.")
            .style(Style::default().fg(Color::Green))
            .wrap(Wrap { trim: false })
            .block(block);
        f.render_widget(ok, area);
        return;
    }

    let items: Vec<ListItem> = app
        .report
        .messages()
        .iter()
        .map(|m| {
            let color = if m.starts_with("Duplicate") {
                Color::Yellow
            } else {
                Color::Red
            };
            ListItem::new(m.as_str()).style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.report.error_count();

    let mut status_spans = vec![Span::styled(
        format!(" Error: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(status) = &app.status {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Fast | "));
    if !app.report.is_valid() {
        status_spans.push(Span::styled("s", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Save | "));
    }
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
