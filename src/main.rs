mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use kwiz::config::{Config, ConfigStore, FileConfigStore};
use kwiz::history::{HistoryLog, SessionRecord};
use kwiz::quiz::session::{DEFAULT_HINT_BUDGET, DEFAULT_MAX_QUESTIONS};
use kwiz::quiz::{
    Category, Deck, Difficulty, Filters, Phase, QuizError, Session, SessionOptions,
};
use kwiz::runtime::{CrosstermEventSource, QuizEvent, Runner};

/// terminal trivia quiz with filtered decks and graded results
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal trivia quiz for developer-interview topics. Pick categories and difficulties, answer shuffled multiple-choice questions with a session-wide hint budget, and get a graded result."
)]
pub struct Cli {
    /// categories to include (repeatable; a complete selection skips the menu)
    #[clap(short = 'c', long = "category", value_enum)]
    categories: Vec<Category>,

    /// difficulties to include (repeatable; a complete selection skips the menu)
    #[clap(short = 'd', long = "difficulty", value_enum)]
    difficulties: Vec<Difficulty>,

    /// maximum number of questions in a session
    #[clap(short = 'n', long, default_value_t = DEFAULT_MAX_QUESTIONS)]
    number_of_questions: usize,

    /// number of hints available per session
    #[clap(long, default_value_t = DEFAULT_HINT_BUDGET)]
    hints: usize,

    /// quiz on every category and difficulty, skipping the menu
    #[clap(short = 'a', long)]
    all: bool,

    /// pick uniformly from the filtered pool instead of balancing difficulties
    #[clap(long)]
    uniform: bool,

    /// seed for reproducible sessions
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            max_questions: self.number_of_questions,
            hint_budget: self.hints,
            balanced: !self.uniform,
        }
    }

    /// Filter selection provided on the command line, if a complete one was.
    fn filters(&self) -> Option<Filters> {
        if self.all {
            return Some(Filters::all());
        }
        if self.categories.is_empty() || self.difficulties.is_empty() {
            return None;
        }
        Some(Filters::new(
            self.categories.iter().copied(),
            self.difficulties.iter().copied(),
        ))
    }
}

#[derive(Debug, Default)]
pub struct MenuState {
    pub cursor: usize,
    pub error: Option<QuizError>,
}

const MENU_ROWS: usize = Category::ALL.len() + Difficulty::ALL.len();

#[derive(Debug)]
pub struct App {
    pub cli: Cli,
    pub session: Session,
    pub draft: Filters,
    pub menu: MenuState,
    rng: StdRng,
    config_store: FileConfigStore,
    history: HistoryLog,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self::with_stores(cli, FileConfigStore::new(), HistoryLog::new())
    }

    pub fn with_stores(cli: Cli, config_store: FileConfigStore, history: HistoryLog) -> Self {
        let config = config_store.load();
        let session = Session::new(Deck::builtin(), cli.session_options());

        let rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let draft = cli.filters().unwrap_or_else(|| Filters {
            categories: config.categories.clone(),
            difficulties: config.difficulties.clone(),
        });

        let mut app = Self {
            session,
            draft,
            menu: MenuState::default(),
            rng,
            config_store,
            history,
            cli,
        };

        // A complete selection on the command line starts the quiz directly
        if app.cli.filters().is_some() {
            app.start_quiz();
        }

        app
    }

    fn start_quiz(&mut self) {
        match self.session.start(self.draft.clone(), &mut self.rng) {
            Ok(()) => {
                self.menu.error = None;
                let _ = self.config_store.save(&Config {
                    max_questions: self.cli.number_of_questions,
                    hint_budget: self.cli.hints,
                    categories: self.draft.categories.clone(),
                    difficulties: self.draft.difficulties.clone(),
                    balanced: !self.cli.uniform,
                });
            }
            Err(err) => self.menu.error = Some(err),
        }
    }

    fn toggle_menu_row(&mut self) {
        let row = self.menu.cursor;
        if row < Category::ALL.len() {
            self.draft.toggle_category(Category::ALL[row]);
        } else {
            self.draft
                .toggle_difficulty(Difficulty::ALL[row - Category::ALL.len()]);
        }
    }

    fn advance_and_log(&mut self) {
        self.session.advance();
        if self.session.phase() == Phase::Complete {
            if let Some(record) = SessionRecord::from_session(&self.session) {
                let _ = self.history.append(&record);
            }
        }
    }

    /// Applies one key press; returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if key.code == KeyCode::Esc {
            return true;
        }

        match self.session.phase() {
            Phase::SelectingFilters => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.menu.cursor = self.menu.cursor.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.menu.cursor = (self.menu.cursor + 1).min(MENU_ROWS - 1);
                }
                KeyCode::Char(' ') => self.toggle_menu_row(),
                KeyCode::Char('a') => self.draft = Filters::all(),
                KeyCode::Enter => self.start_quiz(),
                _ => {}
            },
            Phase::InProgress => match key.code {
                KeyCode::Char(c @ '1'..='9') => {
                    let presented = c as usize - '1' as usize;
                    self.session.answer(presented);
                }
                KeyCode::Char('h') => self.session.use_hint(),
                KeyCode::Char('n') | KeyCode::Enter => self.advance_and_log(),
                _ => {}
            },
            Phase::NoQuestionsAvailable => match key.code {
                KeyCode::Char('m') | KeyCode::Char('r') | KeyCode::Enter => {
                    self.session.reset();
                    self.menu = MenuState::default();
                }
                _ => {}
            },
            Phase::Complete => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => {
                    self.session.reset();
                    self.menu = MenuState::default();
                }
                _ => {}
            },
        }

        false
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let Some(event) = runner.step() else {
            break;
        };

        match event {
            QuizEvent::Resize => {}
            QuizEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
