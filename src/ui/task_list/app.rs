use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::actions;
use crate::error::Result;
use crate::filter::{Filter, FilterCounts};
use crate::notify::{NotificationQueue, QueueSink};
use crate::storage::Backend;
use crate::task::TaskList;

use super::input::{InputEdit, InputLine};
use super::model::{self, Focus, ViewModel};
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleFocus,
    Focus(Focus),
    Edit(InputEdit),
    Submit,
    Move(isize),
    Toggle(String),
    Delete(String),
    SetFilter(Filter),
}

/// Composition root: owns every piece of state the view reads.
pub struct AppState<B> {
    tasks: TaskList<B>,
    filter: Filter,
    input: InputLine,
    focus: Focus,
    selected: usize,
    notifications: NotificationQueue,
}

impl<B: Backend> AppState<B> {
    pub fn new(tasks: TaskList<B>, filter: Filter, notifications: NotificationQueue) -> Self {
        Self {
            tasks,
            filter,
            input: InputLine::default(),
            focus: Focus::Input,
            selected: 0,
            notifications,
        }
    }

    pub fn tasks(&self) -> &TaskList<B> {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self) -> &str {
        self.input.value()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn snapshot(&self) -> ViewModel {
        let rows = model::rows(self.tasks.tasks(), self.filter);
        let selected = model::clamp_selection(self.selected, rows.len());
        ViewModel {
            input: self.input.value().to_string(),
            cursor: self.input.cursor(),
            focus: self.focus,
            filter: self.filter,
            counts: FilterCounts::from_tasks(self.tasks.tasks()),
            rows,
            selected,
            notifications: self.notifications.visible().cloned().collect(),
        }
    }

    /// Translate a key press into an action for the focused control.
    pub fn action_for_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
            return Some(Action::ToggleFocus);
        }

        match self.focus {
            Focus::Input => match key.code {
                KeyCode::Enter => Some(Action::Submit),
                KeyCode::Esc => Some(Action::Focus(Focus::List)),
                _ => InputEdit::from_key(key).map(Action::Edit),
            },
            Focus::List => {
                let selected_id = || self.snapshot().selected_row().map(|row| row.id.clone());
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                    KeyCode::Char('a') | KeyCode::Char('i') => Some(Action::Focus(Focus::Input)),
                    KeyCode::Char('j') | KeyCode::Down => Some(Action::Move(1)),
                    KeyCode::Char('k') | KeyCode::Up => Some(Action::Move(-1)),
                    KeyCode::Char(' ') | KeyCode::Char('x') => selected_id().map(Action::Toggle),
                    KeyCode::Char('d') | KeyCode::Delete => selected_id().map(Action::Delete),
                    KeyCode::Char('1') => Some(Action::SetFilter(Filter::All)),
                    KeyCode::Char('2') => Some(Action::SetFilter(Filter::Active)),
                    KeyCode::Char('3') => Some(Action::SetFilter(Filter::Completed)),
                    KeyCode::Char('l') | KeyCode::Right => {
                        Some(Action::SetFilter(self.filter.next()))
                    }
                    KeyCode::Char('h') | KeyCode::Left => {
                        Some(Action::SetFilter(self.filter.previous()))
                    }
                    _ => None,
                }
            }
        }
    }

    /// Apply one action. Returns true when the app should exit.
    pub fn dispatch(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return true,
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
            }
            Action::Focus(focus) => self.focus = focus,
            Action::Edit(edit) => self.input.apply(edit),
            Action::Submit => {
                let mut sink = QueueSink::new(&mut self.notifications, now);
                // Failures are already surfaced as notifications; the input
                // is kept so the user can fix it.
                if actions::add_task(&mut self.tasks, self.input.value(), &mut sink).is_ok() {
                    self.input.clear();
                }
            }
            Action::Move(delta) => {
                let len = model::rows(self.tasks.tasks(), self.filter).len();
                let current = model::clamp_selection(self.selected, len).unwrap_or(0);
                self.selected = model::step_selection(current, delta, len);
            }
            Action::Toggle(id) => {
                let mut sink = QueueSink::new(&mut self.notifications, now);
                let _ = actions::toggle_task(&mut self.tasks, &id, &mut sink);
            }
            Action::Delete(id) => {
                let mut sink = QueueSink::new(&mut self.notifications, now);
                let _ = actions::delete_task(&mut self.tasks, &id, &mut sink);
            }
            Action::SetFilter(filter) => {
                if filter != self.filter {
                    self.filter = filter;
                    self.selected = 0;
                }
            }
        }
        false
    }

    /// Expire notifications. Returns true if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifications.expire(now)
    }
}

/// Run the interactive view until the user quits.
pub fn run<B: Backend>(app: &mut AppState<B>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<B>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if app.tick(Instant::now()) {
            dirty = true;
        }

        if dirty {
            let snapshot = app.snapshot();
            terminal.draw(|frame| view::render(frame, &snapshot))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = app.action_for_key(key) {
                        tracing::trace!(?action, "dispatch");
                        if app.dispatch(action, Instant::now()) {
                            break;
                        }
                        dirty = true;
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}
