use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use sqlpane_adapters::export;
use sqlpane_core::catalog::CatalogError;
use sqlpane_core::driver::Driver;
use sqlpane_core::panel::{PanelCoordinator, PanelFocus, SubmitStatus};
use sqlpane_core::surface::{LineStyle, TextSurface};
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

const TICK_RATE: Duration = Duration::from_millis(120);
const CSV_EXPORT_FILE: &str = "sqlpane-export.csv";
const JSON_EXPORT_FILE: &str = "sqlpane-export.json";

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to load table catalog: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionKey {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Msg {
    Quit,
    ToggleHelp,
    NextPane,
    Submit,
    Navigate(DirectionKey),
    Input(char),
    Backspace,
    ExportCsv,
    ExportJson,
}

#[derive(Debug)]
struct TuiApp<D> {
    coordinator: PanelCoordinator<D>,
    status_line: String,
    show_help: bool,
    should_quit: bool,
}

impl<D: Driver> TuiApp<D> {
    fn new(driver: D) -> Self {
        Self {
            coordinator: PanelCoordinator::new(driver),
            status_line: "Tab: cycle panes | Enter: run | ?: help".to_string(),
            show_help: false,
            should_quit: false,
        }
    }

    fn handle(&mut self, runtime: &Runtime, msg: Msg) {
        match msg {
            Msg::Quit => self.should_quit = true,
            Msg::ToggleHelp => self.show_help = !self.show_help,
            Msg::NextPane => {
                self.coordinator.focus_next();
                self.status_line = format!("Switched pane to {}", self.coordinator.focus().title());
            }
            Msg::Submit => self.submit(runtime),
            Msg::Navigate(direction) => self.navigate(direction),
            Msg::Input(ch) => self.coordinator.panels_mut().query.push_char(ch),
            Msg::Backspace => self.coordinator.panels_mut().query.pop_char(),
            Msg::ExportCsv => self.export_last_result(PathBuf::from(CSV_EXPORT_FILE), false),
            Msg::ExportJson => self.export_last_result(PathBuf::from(JSON_EXPORT_FILE), true),
        }
    }

    fn submit(&mut self, runtime: &Runtime) {
        match self.coordinator.focus() {
            PanelFocus::Query => match runtime.block_on(self.coordinator.submit_query()) {
                SubmitStatus::Rendered { row_count } => {
                    self.status_line = format!("{row_count} rows rendered");
                }
                SubmitStatus::FailedInline => {
                    self.status_line = "Query failed (see results pane)".to_string();
                }
            },
            PanelFocus::Tables => {
                let selected = self
                    .coordinator
                    .panels()
                    .tables
                    .line_at_cursor()
                    .map(str::to_string);
                match runtime.block_on(self.coordinator.select_table()) {
                    Ok(row_count) => {
                        let table = selected.unwrap_or_default();
                        self.status_line = format!("{row_count} rows from `{table}`");
                    }
                    Err(error) => self.status_line = format!("Select failed: {error}"),
                }
            }
            PanelFocus::Results => {
                self.status_line = "Nothing to submit in this pane".to_string();
            }
        }
    }

    fn navigate(&mut self, direction: DirectionKey) {
        let focus = self.coordinator.focus();
        let panels = self.coordinator.panels_mut();
        let surface = match focus {
            PanelFocus::Tables => &mut panels.tables,
            PanelFocus::Results => &mut panels.results,
            PanelFocus::Query => return,
        };

        match direction {
            DirectionKey::Up => surface.move_cursor_up(),
            DirectionKey::Down => surface.move_cursor_down(),
        }

        if focus == PanelFocus::Tables {
            if let Some(table) = surface.line_at_cursor() {
                self.status_line = format!("Selected table `{table}`");
            }
        }
    }

    fn export_last_result(&mut self, path: PathBuf, as_json: bool) {
        let Some(result) = self.coordinator.last_result() else {
            self.status_line = "No result set to export".to_string();
            return;
        };

        let written = if as_json {
            export::export_json(&path, result)
        } else {
            export::export_csv(&path, result)
        };

        self.status_line = match written {
            Ok(rows) => format!("Exported {rows} rows to {}", path.display()),
            Err(error) => format!("Export failed: {error}"),
        };
    }
}

pub fn run<D: Driver>(driver: D) -> Result<(), TuiError> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    let mut app = TuiApp::new(driver);

    // Catalog load happens before the terminal is taken over; a failure here
    // aborts startup with a readable error instead of a torn screen.
    let count = runtime.block_on(app.coordinator.load_catalog())?;
    app.status_line = format!("{count} tables loaded");

    let mut terminal = setup_terminal()?;
    let run_result = run_loop(&mut terminal, &runtime, &mut app);
    let restore_result = restore_terminal(&mut terminal);

    if let Err(error) = run_result {
        restore_result?;
        return Err(error);
    }

    restore_result?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), TuiError> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<D: Driver>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runtime: &Runtime,
    app: &mut TuiApp<D>,
) -> Result<(), TuiError> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(message) = map_key_event(key, app.coordinator.focus()) {
                        app.handle(runtime, message);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render<D: Driver>(frame: &mut Frame<'_>, app: &mut TuiApp<D>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(frame.area());

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    let focus = app.coordinator.focus();
    let dialect = app.coordinator.dialect_name().to_string();
    let panels = app.coordinator.panels_mut();

    render_tables_pane(frame, columns[0], &mut panels.tables, focus);
    render_query_pane(frame, right[0], &panels.query, focus);
    render_results_pane(frame, right[1], &mut panels.results, focus);

    let status = Paragraph::new(Line::from(format!(
        " {dialect} | {}",
        app.status_line
    )))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, right[2]);

    if app.show_help {
        render_help_popup(frame);
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block = block.border_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    }
    block
}

fn render_tables_pane(frame: &mut Frame<'_>, area: Rect, surface: &mut TextSurface, focus: PanelFocus) {
    let viewport = usize::from(area.height.saturating_sub(2));
    surface.ensure_cursor_visible(viewport);

    let mut lines = Vec::with_capacity(viewport);
    for (offset, line) in surface.visible_lines(viewport).iter().enumerate() {
        let absolute_index = surface.scroll() + offset;
        let marker = if absolute_index == surface.cursor() {
            ">"
        } else {
            " "
        };
        lines.push(Line::from(format!("{marker} {}", line.text)));
    }

    let widget =
        Paragraph::new(lines).block(pane_block("Tables", focus == PanelFocus::Tables));
    frame.render_widget(widget, area);
}

fn render_query_pane(frame: &mut Frame<'_>, area: Rect, surface: &TextSurface, focus: PanelFocus) {
    let widget = Paragraph::new(surface.buffer())
        .block(pane_block("Query", focus == PanelFocus::Query));
    frame.render_widget(widget, area);
}

fn render_results_pane(
    frame: &mut Frame<'_>,
    area: Rect,
    surface: &mut TextSurface,
    focus: PanelFocus,
) {
    let viewport = usize::from(area.height.saturating_sub(2));
    surface.ensure_cursor_visible(viewport);

    let lines: Vec<Line<'_>> = surface
        .visible_lines(viewport)
        .iter()
        .map(|line| match line.style {
            LineStyle::Plain => Line::from(line.text.clone()),
            LineStyle::Error => Line::styled(
                line.text.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        })
        .collect();

    let widget =
        Paragraph::new(lines).block(pane_block("Results", focus == PanelFocus::Results));
    frame.render_widget(widget, area);
}

fn render_help_popup(frame: &mut Frame<'_>) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let help = Paragraph::new(vec![
        Line::from("Keymap"),
        Line::from("Tab: cycle panes"),
        Line::from("Enter: run query (query pane) or open table (tables pane)"),
        Line::from("Arrows or j/k: move selection / scroll"),
        Line::from("e / E: export results as CSV / JSON (results pane)"),
        Line::from("?: toggle help"),
        Line::from("q or Esc: quit"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(help, area);
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100_u16 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100_u16 - height_percent) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100_u16 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100_u16 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

fn map_key_event(key: KeyEvent, focus: PanelFocus) -> Option<Msg> {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }

    match key.code {
        KeyCode::Tab => return Some(Msg::NextPane),
        KeyCode::Esc => return Some(Msg::Quit),
        KeyCode::Enter => return Some(Msg::Submit),
        KeyCode::Up => return Some(Msg::Navigate(DirectionKey::Up)),
        KeyCode::Down => return Some(Msg::Navigate(DirectionKey::Down)),
        _ => {}
    }

    if focus == PanelFocus::Query {
        return match key.code {
            KeyCode::Backspace => Some(Msg::Backspace),
            KeyCode::Char(ch) => Some(Msg::Input(ch)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Msg::Quit),
        KeyCode::Char('?') => Some(Msg::ToggleHelp),
        KeyCode::Char('k') => Some(Msg::Navigate(DirectionKey::Up)),
        KeyCode::Char('j') => Some(Msg::Navigate(DirectionKey::Down)),
        KeyCode::Char('e') if focus == PanelFocus::Results => Some(Msg::ExportCsv),
        KeyCode::Char('E') if focus == PanelFocus::Results => Some(Msg::ExportJson),
        _ => None,
    }
}
