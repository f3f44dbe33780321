//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates the sidebar,
//! task views, sticky wall, search and dialogs.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::fields::{format_priority, format_status};
use crate::note::NotePatch;
use crate::seed::DEFAULT_NOTE_COLOR;
use crate::store::Store;
use crate::task::{NewTask, Task, TaskPatch};
use crate::tui::colors::{hex_color, theme};
use crate::tui::input::InputField;
use crate::views;

/// Application screens.
#[derive(Clone, Copy, PartialEq)]
enum AppState {
    Browse,
    TaskDetail,
    AddTask,
    AddNote,
    Search,
    Confirm,
    Help,
}

/// What the main pane is showing, mirroring the sidebar entries.
#[derive(Clone, PartialEq)]
enum View {
    Today,
    Upcoming,
    Overdue,
    StickyWall,
    Search,
    List(u64),
    Tag(u64),
}

#[derive(Clone, Copy, PartialEq)]
enum Focus {
    Sidebar,
    Main,
}

/// A deletion awaiting confirmation.
#[derive(Clone, Copy)]
enum PendingDelete {
    Task(u64),
    Note(u64),
    List(u64),
    Tag(u64),
}

struct SidebarItem {
    view: View,
    label: String,
    color: Option<String>,
}

/// Main application state for the terminal user interface.
pub struct App<'a> {
    store: &'a mut Store,
    state: AppState,
    view: View,
    previous_view: View,
    focus: Focus,
    sidebar_index: usize,
    task_state: TableState,
    visible_tasks: Vec<u64>,
    note_index: usize,
    input: InputField,
    status_message: String,
    pending_delete: Option<PendingDelete>,
}

impl<'a> App<'a> {
    /// Create a new App borrowing the store for the whole session.
    pub fn new(store: &'a mut Store) -> Self {
        let mut app = App {
            store,
            state: AppState::Browse,
            view: View::Today,
            previous_view: View::Today,
            focus: Focus::Main,
            sidebar_index: 0,
            task_state: TableState::default(),
            visible_tasks: Vec::new(),
            note_index: 0,
            input: InputField::new(),
            status_message: String::new(),
            pending_delete: None,
        };
        app.refresh();
        app
    }

    /// Main event loop: render, then process input until quit.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }

    // ---- derived state ----

    fn current_tasks(&self) -> Vec<Task> {
        match &self.view {
            View::Today => self.store.today_tasks(),
            View::Upcoming => self.store.upcoming_tasks(),
            View::Overdue => self.store.overdue_tasks(),
            View::Search => self.store.search_tasks(self.store.search_query()),
            View::StickyWall => Vec::new(),
            View::List(id) => self
                .store
                .get_list(*id)
                .map(|l| l.name.clone())
                .map(|name| self.store.tasks_by_list(&name))
                .unwrap_or_default(),
            View::Tag(id) => self
                .store
                .get_tag(*id)
                .map(|t| t.name.clone())
                .map(|name| self.store.tasks_by_tag(&name))
                .unwrap_or_default(),
        }
    }

    fn view_title(&self) -> String {
        match &self.view {
            View::Today => "Today".into(),
            View::Upcoming => "Upcoming".into(),
            View::Overdue => "Overdue".into(),
            View::StickyWall => "Sticky Wall".into(),
            View::Search => format!("Search: {}", self.store.search_query()),
            View::List(id) => match self.store.get_list(*id) {
                Some(l) => format!("List: {}", l.name),
                None => "List".into(),
            },
            View::Tag(id) => match self.store.get_tag(*id) {
                Some(t) => format!("Tag: {}", t.name),
                None => "Tag".into(),
            },
        }
    }

    /// Recompute the visible task ids for the current view and clamp the
    /// table selection.
    fn refresh(&mut self) {
        self.visible_tasks = self.current_tasks().iter().map(|t| t.id).collect();
        if self.visible_tasks.is_empty() {
            self.task_state.select(None);
        } else {
            let idx = self
                .task_state
                .selected()
                .unwrap_or(0)
                .min(self.visible_tasks.len() - 1);
            self.task_state.select(Some(idx));
        }
        let note_count = self.store.sticky_notes().len();
        if self.note_index >= note_count {
            self.note_index = note_count.saturating_sub(1);
        }
    }

    fn selected_task_id(&self) -> Option<u64> {
        self.task_state
            .selected()
            .and_then(|idx| self.visible_tasks.get(idx))
            .copied()
    }

    fn sidebar_items(&self) -> Vec<SidebarItem> {
        let mut items = vec![
            SidebarItem {
                view: View::Today,
                label: format!("Today ({})", self.store.today_tasks().len()),
                color: None,
            },
            SidebarItem {
                view: View::Upcoming,
                label: format!("Upcoming ({})", self.store.upcoming_tasks().len()),
                color: None,
            },
            SidebarItem {
                view: View::Overdue,
                label: format!("Overdue ({})", self.store.overdue_tasks().len()),
                color: None,
            },
            SidebarItem {
                view: View::StickyWall,
                label: format!("Sticky Wall ({})", self.store.sticky_notes().len()),
                color: None,
            },
        ];
        for list in self.store.lists() {
            items.push(SidebarItem {
                view: View::List(list.id),
                label: format!("• {} ({})", list.name, list.count),
                color: Some(list.color),
            });
        }
        for tag in self.store.tags() {
            items.push(SidebarItem {
                view: View::Tag(tag.id),
                label: format!("# {} ({})", tag.name, tag.count),
                color: Some(tag.color),
            });
        }
        items
    }

    // ---- input ----

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let should_quit = match self.state {
                    AppState::Browse => self.handle_browse_input(key.code, key.modifiers),
                    AppState::TaskDetail => self.handle_detail_input(key.code),
                    AppState::AddTask => self.handle_add_task_input(key.code),
                    AppState::AddNote => self.handle_add_note_input(key.code),
                    AppState::Search => self.handle_search_input(key.code),
                    AppState::Confirm => self.handle_confirm_input(key.code),
                    AppState::Help => {
                        self.state = AppState::Browse;
                        false
                    }
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn handle_browse_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state = AppState::Help;
                return false;
            }
            KeyCode::Char('b') => {
                self.store.toggle_sidebar();
                if !self.store.sidebar_open() {
                    self.focus = Focus::Main;
                }
                return false;
            }
            KeyCode::Char('m') => {
                self.store.toggle_dark_mode();
                return false;
            }
            KeyCode::Char('/') => {
                self.previous_view = self.view.clone();
                self.input.clear();
                self.store.set_search_query(String::new());
                self.view = View::Search;
                self.state = AppState::Search;
                self.refresh();
                return false;
            }
            KeyCode::Char('a') => {
                if self.view == View::StickyWall {
                    self.input.clear();
                    self.state = AppState::AddNote;
                } else {
                    self.input.clear();
                    self.store.set_is_creating_task(true);
                    self.state = AppState::AddTask;
                }
                return false;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Main,
                    Focus::Main if self.store.sidebar_open() => Focus::Sidebar,
                    Focus::Main => Focus::Main,
                };
                return false;
            }
            _ => {}
        }
        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Main => self.handle_main_key(key),
        }
        false
    }

    fn handle_sidebar_key(&mut self, key: KeyCode) {
        let items = self.sidebar_items();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.sidebar_index + 1 < items.len() {
                    self.sidebar_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_index = self.sidebar_index.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
                if let Some(item) = items.get(self.sidebar_index) {
                    self.view = item.view.clone();
                    self.focus = Focus::Main;
                    self.refresh();
                }
            }
            KeyCode::Char('d') => {
                // Deleting lists and tags happens from the sidebar; the
                // affordance disappears when only one list remains.
                match items.get(self.sidebar_index).map(|i| i.view.clone()) {
                    Some(View::List(id)) => {
                        if self.store.lists().len() > 1 {
                            self.pending_delete = Some(PendingDelete::List(id));
                            self.state = AppState::Confirm;
                        }
                    }
                    Some(View::Tag(id)) => {
                        self.pending_delete = Some(PendingDelete::Tag(id));
                        self.state = AppState::Confirm;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyCode) {
        if self.view == View::StickyWall {
            self.handle_wall_key(key);
            return;
        }
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(idx) = self.task_state.selected() {
                    if idx + 1 < self.visible_tasks.len() {
                        self.task_state.select(Some(idx + 1));
                    }
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(idx) = self.task_state.selected() {
                    self.task_state.select(Some(idx.saturating_sub(1)));
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.store.sidebar_open() {
                    self.focus = Focus::Sidebar;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_task_id() {
                    self.store.set_selected_task(Some(id));
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.selected_task_id() {
                    self.toggle_complete(id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    self.pending_delete = Some(PendingDelete::Task(id));
                    self.state = AppState::Confirm;
                }
            }
            _ => {}
        }
    }

    fn handle_wall_key(&mut self, key: KeyCode) {
        let notes = self.store.sticky_notes();
        match key {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                if self.note_index + 1 < notes.len() {
                    self.note_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.note_index = self.note_index.saturating_sub(1);
            }
            KeyCode::Char('p') => {
                if let Some(note) = notes.get(self.note_index) {
                    let pinned = note.pinned;
                    let id = note.id;
                    self.store.update_sticky_note(
                        id,
                        NotePatch {
                            pinned: Some(!pinned),
                            ..NotePatch::default()
                        },
                    );
                    self.status_message =
                        format!("{} note {id}", if pinned { "Unpinned" } else { "Pinned" });
                }
            }
            KeyCode::Char('d') => {
                if let Some(note) = notes.get(self.note_index) {
                    self.pending_delete = Some(PendingDelete::Note(note.id));
                    self.state = AppState::Confirm;
                }
            }
            _ => {}
        }
    }

    fn handle_detail_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                self.store.set_selected_task(None);
                self.state = AppState::Browse;
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.store.selected_task() {
                    self.toggle_complete(id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.store.selected_task() {
                    self.pending_delete = Some(PendingDelete::Task(id));
                    self.state = AppState::Confirm;
                }
            }
            _ => {}
        }
        false
    }

    fn handle_add_task_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => {
                self.input.clear();
                self.store.set_is_creating_task(false);
                self.state = AppState::Browse;
            }
            KeyCode::Enter => {
                let title = self.input.take();
                if !title.trim().is_empty() {
                    let id = self.store.add_task(self.new_task_for_view(title));
                    self.status_message = format!("Added task {id}");
                }
                self.store.set_is_creating_task(false);
                self.state = AppState::Browse;
                self.refresh();
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }
        false
    }

    /// Pre-fill the new task from the current view: its list, its tag, or
    /// a due date matching the date bucket being looked at.
    fn new_task_for_view(&self, title: String) -> NewTask {
        let mut new = NewTask {
            title: title.trim().to_string(),
            ..NewTask::default()
        };
        match &self.view {
            View::List(id) => new.list = self.store.get_list(*id).map(|l| l.name.clone()),
            View::Tag(id) => {
                if let Some(tag) = self.store.get_tag(*id) {
                    new.tags = vec![tag.name.clone()];
                }
            }
            View::Today | View::Overdue => {
                new.due_date = Some(chrono::Local::now().date_naive());
            }
            View::Upcoming => {
                new.due_date = Some(chrono::Local::now().date_naive() + chrono::Duration::days(1));
            }
            View::StickyWall | View::Search => {}
        }
        new
    }

    fn handle_add_note_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => {
                self.input.clear();
                self.state = AppState::Browse;
            }
            KeyCode::Enter => {
                let title = self.input.take();
                if !title.trim().is_empty() {
                    let id =
                        self.store
                            .add_sticky_note(title.trim(), "", DEFAULT_NOTE_COLOR);
                    self.status_message = format!("Added note {id}");
                }
                self.state = AppState::Browse;
                self.refresh();
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }
        false
    }

    fn handle_search_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => {
                self.input.clear();
                self.store.set_search_query(String::new());
                self.view = self.previous_view.clone();
                self.state = AppState::Browse;
                self.refresh();
            }
            KeyCode::Enter => {
                self.state = AppState::Browse;
                self.focus = Focus::Main;
            }
            KeyCode::Backspace => {
                self.input.handle_backspace();
                self.store.set_search_query(self.input.value.clone());
                self.refresh();
            }
            KeyCode::Char(c) => {
                self.input.handle_char(c);
                self.store.set_search_query(self.input.value.clone());
                self.refresh();
            }
            _ => {}
        }
        false
    }

    fn handle_confirm_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(pending) = self.pending_delete.take() {
                    self.apply_delete(pending);
                }
                self.state = AppState::Browse;
                self.refresh();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::Browse;
            }
            _ => {}
        }
        false
    }

    fn apply_delete(&mut self, pending: PendingDelete) {
        match pending {
            PendingDelete::Task(id) => {
                if self.store.delete_task(id) {
                    self.status_message = format!("Deleted task {id}");
                }
                if self.store.selected_task() == Some(id) {
                    self.store.set_selected_task(None);
                }
            }
            PendingDelete::Note(id) => {
                if self.store.delete_sticky_note(id) {
                    self.status_message = format!("Deleted note {id}");
                }
            }
            PendingDelete::List(id) => {
                if self.view == View::List(id) {
                    self.view = View::Today;
                }
                if self.store.delete_list(id) {
                    self.status_message = "Deleted list; its tasks moved to 'Personal'".into();
                }
            }
            PendingDelete::Tag(id) => {
                if self.view == View::Tag(id) {
                    self.view = View::Today;
                }
                if self.store.delete_tag(id) {
                    self.status_message = "Deleted tag and pruned it from tasks".into();
                }
            }
        }
    }

    fn toggle_complete(&mut self, id: u64) {
        let Some(task) = self.store.get_task(id) else {
            return;
        };
        let done = views::is_active(task);
        let patch = if done {
            TaskPatch {
                completed: Some(true),
                status: Some(crate::fields::Status::Closed),
                ..TaskPatch::default()
            }
        } else {
            TaskPatch {
                completed: Some(false),
                status: Some(crate::fields::Status::New),
                ..TaskPatch::default()
            }
        };
        self.store.update_task(id, patch);
        self.status_message = format!(
            "Task {id} {}",
            if done { "completed" } else { "reopened" }
        );
        self.refresh();
    }

    // ---- rendering ----

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        let body = chunks[0];
        let main_area = if self.store.sidebar_open() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(26), Constraint::Min(0)].as_ref())
                .split(body);
            self.render_sidebar(f, cols[0]);
            cols[1]
        } else {
            body
        };

        match self.state {
            AppState::TaskDetail => self.render_task_detail(f, main_area),
            AppState::Help => self.render_help(f, main_area),
            _ if self.view == View::StickyWall => self.render_sticky_wall(f, main_area),
            _ => self.render_task_table(f, main_area),
        }

        match self.state {
            AppState::AddTask => self.render_input_popup(f, "New Task"),
            AppState::AddNote => self.render_input_popup(f, "New Note"),
            AppState::Confirm => self.render_confirm(f, main_area),
            _ => {}
        }

        self.render_status_bar(f, chunks[1]);
    }

    fn render_sidebar(&mut self, f: &mut Frame, area: Rect) {
        let th = theme(self.store.dark_mode());
        let items = self.sidebar_items();
        if self.sidebar_index >= items.len() {
            self.sidebar_index = items.len().saturating_sub(1);
        }
        let lines: Vec<Line> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut style = match &item.color {
                    Some(hex) => Style::default().fg(hex_color(hex)),
                    None => Style::default().fg(th.fg),
                };
                if i == self.sidebar_index && self.focus == Focus::Sidebar {
                    style = Style::default().bg(th.highlight_bg).fg(th.highlight_fg);
                } else if item.view == self.view {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Line::from(Span::styled(item.label.clone(), style))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("daylist")
            .border_style(if self.focus == Focus::Sidebar {
                Style::default().fg(th.accent)
            } else {
                Style::default().fg(th.dim)
            });
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_task_table(&mut self, f: &mut Frame, area: Rect) {
        let th = theme(self.store.dark_mode());
        let today = views::today();
        let tasks = self.current_tasks();

        let mut title = format!("{} ({})", self.view_title(), tasks.len());
        if self.state != AppState::Search {
            title.push_str(" - press '?' for help");
        }

        let header = Row::new(
            ["ID", "Status", "Pri", "Due", "Title"]
                .iter()
                .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().bg(th.bar_bg).fg(th.bar_fg))
        .height(1);

        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| {
                let due_str = views::format_due_relative(task.due_date, today);
                let is_overdue = task
                    .due_date
                    .map(views::normalise_date)
                    .is_some_and(|d| d < today);
                let style = if !views::is_active(task) {
                    Style::default().fg(th.dim)
                } else if is_overdue {
                    Style::default().fg(th.overdue)
                } else {
                    Style::default().fg(th.fg)
                };
                let tags_str = if task.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", task.tags.join(","))
                };
                Row::new(vec![
                    Cell::from(task.id.to_string()),
                    Cell::from(format_status(task.status)),
                    Cell::from(format_priority(task.priority)),
                    Cell::from(due_str),
                    Cell::from(format!("{}{}", task.title, tags_str)),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Min(25),
        ];

        let area = if self.state == AppState::Search {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
                .split(area);
            let search = Paragraph::new(self.input.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search (Enter to keep results, Esc to cancel)")
                    .border_style(Style::default().fg(th.accent)),
            );
            f.render_widget(search, chunks[0]);
            f.set_cursor_position((
                chunks[0].x + 1 + self.input.cursor as u16,
                chunks[0].y + 1,
            ));
            chunks[1]
        } else {
            area
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(if self.focus == Focus::Main {
                        Style::default().fg(th.accent)
                    } else {
                        Style::default().fg(th.dim)
                    }),
            )
            .row_highlight_style(Style::default().bg(th.highlight_bg).fg(th.highlight_fg))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_state);
    }

    fn render_task_detail(&mut self, f: &mut Frame, area: Rect) {
        let th = theme(self.store.dark_mode());
        let Some(task) = self
            .store
            .selected_task()
            .and_then(|id| self.store.get_task(id))
        else {
            self.state = AppState::Browse;
            return;
        };
        let today = views::today();

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut text = vec![
            Line::from(vec![
                Span::styled("ID: ", bold),
                Span::raw(task.id.to_string()),
            ]),
            Line::from(vec![Span::styled("Title: ", bold), Span::raw(&task.title)]),
            Line::from(vec![
                Span::styled("Status: ", bold),
                Span::raw(format_status(task.status)),
            ]),
            Line::from(vec![
                Span::styled("Priority: ", bold),
                Span::raw(format_priority(task.priority)),
            ]),
            Line::from(vec![Span::styled("List: ", bold), Span::raw(&task.list)]),
            Line::from(vec![
                Span::styled("Due: ", bold),
                Span::raw(match task.due_date {
                    Some(d) => format!("{d} ({})", views::format_due_relative(Some(d), today)),
                    None => "-".into(),
                }),
            ]),
            Line::from(vec![
                Span::styled("Tags: ", bold),
                Span::raw(if task.tags.is_empty() {
                    "-".into()
                } else {
                    task.tags.join(", ")
                }),
            ]),
            Line::from(""),
        ];
        if let Some(desc) = &task.description {
            text.push(Line::from(Span::styled("Description:", bold)));
            for line in desc.lines() {
                text.push(Line::from(line.to_string()));
            }
        }

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(th.fg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Task - 'c' complete, 'd' delete, Esc back"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_sticky_wall(&mut self, f: &mut Frame, area: Rect) {
        let th = theme(self.store.dark_mode());
        let notes = self.store.sticky_notes();

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!("Sticky Wall ({})", notes.len()))
            .border_style(if self.focus == Focus::Main {
                Style::default().fg(th.accent)
            } else {
                Style::default().fg(th.dim)
            });
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        if notes.is_empty() {
            let empty = Paragraph::new("No notes yet. Press 'a' to add one.")
                .style(Style::default().fg(th.dim))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        // Two columns of fixed-height cards, scrolled so the selection is
        // always on screen.
        let card_height = 7u16;
        let visible_rows = (inner.height / card_height).max(1) as usize;
        let total_rows = notes.len().div_ceil(2);
        let selected_row = self.note_index / 2;
        let first_row = selected_row
            .saturating_sub(visible_rows - 1)
            .min(total_rows.saturating_sub(visible_rows));

        for (i, note) in notes.iter().enumerate() {
            let row = i / 2;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let col = (i % 2) as u16;
            let half_width = inner.width / 2;
            let card = Rect {
                x: inner.x + col * half_width,
                y: inner.y + ((row - first_row) as u16) * card_height,
                width: half_width,
                height: card_height.min(inner.height),
            };
            let pin = if note.pinned { " 📌" } else { "" };
            let border = if i == self.note_index && self.focus == Focus::Main {
                Style::default().fg(th.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(hex_color(&note.color))
            };
            let paragraph = Paragraph::new(note.content.as_str())
                .style(Style::default().fg(th.fg))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("{}{pin}", note.title))
                        .border_style(border),
                )
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, card);
        }
    }

    fn render_input_popup(&mut self, f: &mut Frame, title: &str) {
        let th = theme(self.store.dark_mode());
        let area = centered_rect(60, 12, f.area());
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{title} - Enter to save, Esc to cancel"))
            .border_style(Style::default().fg(th.accent));
        let inner = block.inner(area);
        f.render_widget(block, area);
        let paragraph = Paragraph::new(self.input.value.as_str()).style(Style::default().fg(th.fg));
        f.render_widget(paragraph, inner);
        f.set_cursor_position((inner.x + self.input.cursor as u16, inner.y));
    }

    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let th = theme(self.store.dark_mode());
        let what = match self.pending_delete {
            Some(PendingDelete::Task(id)) => format!("Delete task {id}"),
            Some(PendingDelete::Note(id)) => format!("Delete note {id}"),
            Some(PendingDelete::List(_)) => {
                "Delete this list (tasks move to 'Personal')".to_string()
            }
            Some(PendingDelete::Tag(_)) => {
                "Delete this tag (it is removed from all tasks)".to_string()
            }
            None => return,
        };
        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                what,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Confirm")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(th.overdue)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("daylist Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Navigation:", bold)),
            Line::from("  j/k or arrows  Move selection"),
            Line::from("  Tab, h/l       Switch between sidebar and main pane"),
            Line::from("  Enter/Space    Open view / task details"),
            Line::from(""),
            Line::from(Span::styled("Tasks:", bold)),
            Line::from("  a              Add task in the current view"),
            Line::from("  c              Toggle completion"),
            Line::from("  d              Delete (with confirmation)"),
            Line::from("  /              Live search"),
            Line::from(""),
            Line::from(Span::styled("Sticky Wall:", bold)),
            Line::from("  a              Add note"),
            Line::from("  p              Pin/unpin note"),
            Line::from("  d              Delete note"),
            Line::from(""),
            Line::from(Span::styled("Interface:", bold)),
            Line::from("  b              Toggle sidebar"),
            Line::from("  m              Toggle dark mode"),
            Line::from("  d (sidebar)    Delete selected list or tag"),
            Line::from("  q/Ctrl+C/Esc   Quit"),
        ];
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let th = theme(self.store.dark_mode());
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Browse if self.view == View::StickyWall => {
                    "a add note | p pin | d delete | ? help".to_string()
                }
                AppState::Browse => {
                    format!("{} tasks | a add | c complete | / search | ? help",
                        self.visible_tasks.len())
                }
                AppState::TaskDetail => "Task Details".to_string(),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::AddNote => "Add New Note".to_string(),
                AppState::Search => "Search".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(th.bar_bg).fg(th.bar_fg))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }
}

/// Centered sub-rectangle used by the modal dialogs.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
