use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
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

use crate::board::TaskBoard;
use crate::filter::filter_tasks;
use crate::models::{Accent, InputMode, Priority, Task};

pub struct App {
    pub board: TaskBoard,
    pub list_state: ListState,
    pub mode: InputMode,
    pub filter: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: TaskBoard) -> Self {
        let mut app = App {
            board,
            list_state: ListState::default(),
            mode: InputMode::Normal,
            filter: String::new(),
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    /// Board indices currently on screen, in list order.
    pub fn visible(&self) -> Vec<usize> {
        filter_tasks(self.board.tasks(), &self.filter)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let row = self.list_state.selected()?;
        let index = *self.visible().get(row)?;
        self.board.tasks().get(index)
    }

    pub fn next_item(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_item(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        };
        self.list_state.select(Some(i));
    }

    /// Keeps the selection on a visible row after the list shrinks or grows.
    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    fn select_task(&mut self, index: usize) {
        if let Some(row) = self.visible().iter().position(|&i| i == index) {
            self.list_state.select(Some(row));
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|task| task.id) {
            self.board.toggle_complete(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|task| task.id) {
            self.board.delete(id);
            self.clamp_selection();
        }
    }

    fn submit_new_task(&mut self) {
        if self.board.submit().is_some() {
            self.mode = InputMode::Normal;
            self.clamp_selection();
            let last = self.board.tasks().len() - 1;
            self.select_task(last);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            InputMode::NewTask => self.handle_new_task_key(key),
            InputMode::Filter => self.handle_filter_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next_item();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous_item();
            }
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.mode = InputMode::NewTask;
            }
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                self.toggle_selected();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.delete_selected();
            }
            KeyCode::Char('/') => {
                self.mode = InputMode::Filter;
            }
            KeyCode::Char('1') => self.board.set_pending_priority(Priority::Low),
            KeyCode::Char('2') => self.board.set_pending_priority(Priority::Medium),
            KeyCode::Char('3') => self.board.set_pending_priority(Priority::High),
            _ => {}
        }
    }

    fn handle_new_task_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_new_task(),
            KeyCode::Esc => {
                self.board.clear_input();
                self.mode = InputMode::Normal;
            }
            KeyCode::Tab => self.board.cycle_pending_priority(),
            KeyCode::Backspace => self.board.pop_input(),
            KeyCode::Char(c) if is_text_input(&key) => self.board.push_input(c),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.filter.clear();
                self.mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Char(c) if is_text_input(&key) => {
                self.filter.push(c);
            }
            _ => {}
        }
        self.clamp_selection();
    }
}

/// Shift is fine for typing; Ctrl and Alt chords are never text.
fn is_text_input(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

pub fn run_tui(board: TaskBoard) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(board);
    log::info!("board opened with {} tasks", app.board.tasks().len());
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    log::info!("board closed at {}", app.board.summary());
    res.context("Terminal event loop failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

pub fn accent_style(accent: Accent) -> Style {
    match accent {
        Accent::High => Style::default().fg(Color::Red),
        Accent::Medium => Style::default().fg(Color::Yellow),
        Accent::Low => Style::default().fg(Color::Blue),
        Accent::Done => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tasks(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
    render_help(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.board.summary();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", summary),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ];
    if !app.filter.is_empty() {
        spans.push(Span::styled(
            format!(" filter: {}", app.filter),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Task Board"));
    f.render_widget(header, area);
}

fn render_tasks(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(area);

    let tasks: Vec<ListItem> = app
        .visible()
        .into_iter()
        .filter_map(|i| app.board.tasks().get(i))
        .map(|task| {
            let checkbox = if task.completed { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox, Style::default().fg(Color::White)),
                Span::styled(format!("{} ", task.text), accent_style(task.accent())),
                Span::styled(
                    format!("[{}]", task.priority),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let tasks_list = List::new(tasks)
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(tasks_list, chunks[0], &mut app.list_state);

    let info_text = match app.selected_task() {
        Some(task) => {
            let assignee = match &task.assignee {
                Some(a) => format!("{}\nAvatar: {}", a.name, a.avatar_url),
                None => "unassigned".to_string(),
            };
            format!(
                "Task: {}\nPriority: {}\nStatus: {}\nAssignee: {}\nCreated: {}\nId: {}",
                task.text,
                task.priority,
                if task.completed { "done" } else { "open" },
                assignee,
                task.created_at.format("%Y-%m-%d %H:%M:%S"),
                task.id
            )
        }
        None if app.board.tasks().is_empty() => "No tasks yet\n\nPress 'a' to add one".to_string(),
        None => "No task selected".to_string(),
    };

    let info_paragraph = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).title("Task Info"))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    f.render_widget(info_paragraph, chunks[1]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let priority = app.board.pending_priority();
    let priority_style = accent_style(match priority {
        Priority::High => Accent::High,
        Priority::Medium => Accent::Medium,
        Priority::Low => Accent::Low,
    });

    let (title, text, border) = match app.mode {
        InputMode::NewTask => ("New Task", app.board.input(), Color::Yellow),
        InputMode::Filter => ("Filter", app.filter.as_str(), Color::Cyan),
        InputMode::Normal => ("New Task", app.board.input(), Color::White),
    };

    let mut spans = vec![Span::raw(text.to_string())];
    if app.mode != InputMode::Normal {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    if app.mode != InputMode::Filter {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("({})", priority), priority_style));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode {
        InputMode::Normal => {
            "a: add • space: toggle • d: delete • /: filter • 1/2/3: priority • q: quit"
        }
        InputMode::NewTask => "Enter: add • Tab: priority • Esc: cancel",
        InputMode::Filter => "Enter: keep filter • Esc: clear filter",
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
