use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use ffstat_terminal::provider::{self, StatsSource};
use ffstat_terminal::state::{
    AppState, Delta, ProviderCommand, TableView, apply_delta, direction_marker, view_label,
};
use ffstat_terminal::stats::{PlayerStatRecord, ScoringView, format_stat};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                self.state.next_page();
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                self.state.prev_page();
            }
            KeyCode::Tab => self.state.focus_next_column(),
            KeyCode::BackTab => self.state.focus_prev_column(),
            KeyCode::Char('s') => {
                self.state.sort_on_focused();
                self.request_stats();
            }
            KeyCode::Char('v') => {
                if self.state.toggle_view() {
                    self.request_stats();
                }
            }
            KeyCode::Char('1') => {
                if self.state.set_view(ScoringView::Ppr) {
                    self.request_stats();
                }
            }
            KeyCode::Char('2') => {
                if self.state.set_view(ScoringView::NonPpr) {
                    self.request_stats();
                }
            }
            KeyCode::Char('/') => self.state.search_active = true,
            KeyCode::Char(' ') | KeyCode::Char('a') => {
                if self.state.toggle_cursor_player().is_none() {
                    self.state.push_log("[INFO] No player under cursor");
                }
            }
            KeyCode::Char('r') => self.state.reset_team(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.state.search_active = false,
            KeyCode::Backspace => self.state.pop_search_char(),
            KeyCode::Char(c) => self.state.push_search_char(c),
            _ => {}
        }
    }

    fn request_stats(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Stats fetch unavailable");
            return;
        };
        let sort = self.state.sort;
        if tx.send(ProviderCommand::FetchStats { sort }).is_err() {
            self.state.push_log("[WARN] Stats request failed");
        } else {
            self.state.mark_fetch_requested();
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_stats_provider(StatsSource::from_env(), tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    app.request_stats();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let mut line1 = "FANTASY FOOTBALL STAT PREDICTOR".to_string();
    if state.is_refreshing() {
        line1.push_str(" | refreshing");
    }
    if let Some(updated) = &state.updated {
        line1.push_str(&format!(" | Updated {updated}"));
    }
    let line2 = format!(
        "View: {} | Sort: {} {}",
        view_label(state.view),
        state.sort.field.label(),
        direction_marker(state.sort.direction)
    );
    let cursor = if state.search_active { "_" } else { "" };
    let line3 = format!("Search: {}{cursor}", state.search);
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to search | Backspace Delete | Enter/Esc Done".to_string();
    }
    "j/k Move | n/p Page | Tab Column | s Sort | v PPR/Non-PPR | / Search | Space Add/Remove | r Reset | ? Help | q Quit".to_string()
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.loading {
        let loading = Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    }
    if let Some(err) = &state.error {
        let error = Paragraph::new(format!("Error fetching data: {err}"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(32)])
        .split(area);

    render_stats_table(frame, columns[0], state);
    render_team(frame, columns[1], state);
}

fn table_columns() -> [Constraint; 12] {
    [
        Constraint::Min(18),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(5),
    ]
}

fn render_stats_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let widths = table_columns();
    render_table_header(frame, sections[0], &widths, state);

    let list_area = sections[1];
    let table = state.table_view();
    let rows = table.rows();
    if rows.is_empty() {
        let message = if state.search.is_empty() {
            "No player stats"
        } else {
            "No players match the search"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
    } else if list_area.height > 0 {
        let visible = list_area.height as usize;
        let (start, end) = visible_range(state.cursor, rows.len(), visible);
        for (i, idx) in (start..end).enumerate() {
            let row_area = Rect {
                x: list_area.x,
                y: list_area.y + i as u16,
                width: list_area.width,
                height: 1,
            };
            render_stat_row(frame, row_area, &widths, state, rows[idx], idx == state.cursor);
        }
    }

    let pagination = Paragraph::new(pagination_text(&table))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(pagination, sections[2]);
}

fn render_table_header(frame: &mut Frame, area: Rect, widths: &[Constraint], state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Player", style);
    for (i, field) in state.view.columns().iter().enumerate() {
        let label = if *field == state.sort.field {
            format!("{}{}", field.short_label(), direction_marker(state.sort.direction))
        } else {
            field.short_label().to_string()
        };
        let cell_style = if i == state.header_focus {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };
        render_cell_text(frame, cols[i + 1], &label, cell_style);
    }
    render_cell_text(frame, cols[11], "Team", style);
}

fn render_stat_row(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    state: &AppState,
    record: &PlayerStatRecord,
    under_cursor: bool,
) {
    let on_team = state.team.contains(&record.player);
    let mut row_style = Style::default();
    if on_team {
        row_style = row_style.fg(Color::Green);
    }
    if under_cursor {
        row_style = row_style.bg(Color::DarkGray);
        frame.render_widget(Block::default().style(row_style), area);
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);

    render_cell_text(frame, cols[0], &record.player, row_style);
    for (i, field) in state.view.columns().iter().enumerate() {
        render_cell_text(frame, cols[i + 1], &format_stat(record.get(*field)), row_style);
    }
    let mark = if on_team { "[x]" } else { "[ ]" };
    render_cell_text(frame, cols[11], mark, row_style);
}

fn pagination_text(table: &TableView) -> String {
    format!(
        "Page {} of {} | {} players",
        table.page,
        table.total_pages(),
        table.filtered.len()
    )
}

fn render_team(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!("Selected Players ({})", state.team.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let names = if state.team.is_empty() {
        "No players selected".to_string()
    } else {
        state.team.players().join("\n")
    };
    frame.render_widget(Paragraph::new(names), sections[0]);

    let total = format!(
        "Total Projected Points:\n{} ({})",
        format_stat(Some(state.total_points())),
        view_label(state.view)
    );
    let summary = Paragraph::new(total).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(summary, sections[1]);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Fantasy Football Stat Predictor - Help",
        "",
        "Table:",
        "  j/k or ↑/↓      Move row cursor",
        "  n/p or →/←      Next / previous page",
        "  Tab / Shift-Tab Focus sortable column",
        "  s               Sort on focused column",
        "  /               Search players by name",
        "",
        "Scoring:",
        "  v               Toggle PPR / Non-PPR",
        "  1 / 2           PPR / Non-PPR",
        "",
        "Team:",
        "  Space / a       Add or remove player",
        "  r               Reset team",
        "",
        "  ?               Toggle help",
        "  q               Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
