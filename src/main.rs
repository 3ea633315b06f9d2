pub mod config;
pub mod corpus;
pub mod feedback;
pub mod history;
pub mod runtime;
pub mod score;
pub mod session;
pub mod ui;
pub mod util;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{QuoteSet, RandomPicker, SentencePicker},
    feedback::{cue_for, FeedbackSink, TerminalBell},
    history::History,
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner},
    session::Session,
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use webbrowser::Browser;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// minimal typing speed test tui with per-keystroke feedback and in-session history
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing speed test TUI: reproduce the target text exactly before the countdown runs out, with per-keystroke bell feedback and an in-session result history."
)]
pub struct Cli {
    /// number of seconds on the countdown
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// quote set to draw target texts from
    #[clap(short = 'q', long, value_enum)]
    quotes: Option<SupportedQuotes>,

    /// custom target text to use
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// start with the bell muted
    #[clap(long)]
    muted: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedQuotes {
    Classic,
    Pangrams,
}

impl SupportedQuotes {
    fn as_corpus(&self) -> QuoteSet {
        QuoteSet::new(self.to_string().to_lowercase())
    }

    fn from_config(name: &str) -> Self {
        Self::from_str(name, true).unwrap_or(SupportedQuotes::Classic)
    }
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub session: Session,
    pub history: History,
    pub bell: TerminalBell,
    pub seconds: u64,
    pub quotes: SupportedQuotes,
}

impl App {
    pub fn new(cli: Cli, config: &Config) -> Self {
        let seconds = cli.seconds.unwrap_or(config.seconds);
        let quotes = cli
            .quotes
            .unwrap_or_else(|| SupportedQuotes::from_config(&config.quotes));
        let sound = if cli.muted { false } else { config.sound };

        let target = match &cli.prompt {
            Some(prompt) => prompt.clone(),
            None => RandomPicker.pick(&quotes.as_corpus()),
        };

        Self {
            session: Session::with_limit(target, seconds),
            history: History::new(),
            bell: TerminalBell::new(sound),
            cli: Some(cli),
            seconds,
            quotes,
        }
    }

    /// Replaces the active session. `Some` retries the given text, `None`
    /// draws a fresh random target. History and bell state carry over.
    pub fn reset(&mut self, prompt: Option<String>) {
        let target = prompt.unwrap_or_else(|| RandomPicker.pick(&self.quotes.as_corpus()));
        self.session = Session::with_limit(target, self.seconds);
    }

    pub fn type_char(&mut self, c: char) {
        let mut next = self.session.input.clone();
        next.push(c);
        self.apply_input(next);
    }

    pub fn backspace(&mut self) {
        let mut next = self.session.input.clone();
        next.pop();
        self.apply_input(next);
    }

    fn apply_input(&mut self, next: String) {
        if self.session.has_finished() {
            return;
        }
        let outcome = self.session.on_input_change(&next);
        if let Some(cue) = cue_for(outcome, self.session.has_finished()) {
            self.bell.emit(cue);
        }
    }

    pub fn record_result(&mut self) {
        if let Some(result) = &self.session.result {
            self.history.record(result.clone());
        }
    }

    fn current_config(&self) -> Config {
        Config {
            seconds: self.seconds,
            quotes: self.quotes.to_string().to_lowercase(),
            sound: self.bell.is_enabled(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = store.load();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli, &config);
    let mut runner = Runner::new(CrosstermEventSource::new(), TICK_INTERVAL);
    start_tui(&mut terminal, &mut app, &mut runner, &store)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug)]
enum ExitType {
    Restart,
    New,
    Quit,
}

fn start_tui<B: Backend, E: EventSource, S: ConfigStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E>,
    store: &S,
) -> Result<(), Box<dyn Error>> {
    loop {
        let mut exit_type: ExitType = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match runner.step() {
                AppEvent::Tick => {
                    if app.session.has_started() && !app.session.has_finished() {
                        app.session.on_tick();

                        if app.session.has_finished() {
                            runner.disarm();
                            app.record_result();
                        }

                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                AppEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                AppEvent::Key(key) => {
                    match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Backspace => {
                            if !app.session.has_finished() {
                                app.backspace();
                                after_input(app, runner);
                            }
                        }
                        KeyCode::Enter => {
                            if !app.session.has_finished() {
                                app.type_char('\n');
                                after_input(app, runner);
                            }
                        }
                        KeyCode::Left => {
                            exit_type = ExitType::Restart;
                            break;
                        }
                        KeyCode::Right => {
                            exit_type = ExitType::New;
                            break;
                        }
                        KeyCode::Char(c) => {
                            if key.modifiers.contains(KeyModifiers::CONTROL)
                                && key.code == KeyCode::Char('c')
                            // ctrl+c to quit
                            {
                                break;
                            }

                            if !app.session.has_finished() {
                                app.type_char(c);
                                after_input(app, runner);
                            } else {
                                match c {
                                    't' => {
                                        if Browser::is_available() {
                                            if let Some(result) = &app.session.result {
                                                webbrowser::open(&format!("https://twitter.com/intent/tweet?text={}%20wpm%20%2F%20{}%25%20acc%20%2F%20{:.2}s%0A%0Ahttps%3A%2F%2Fgithub.com%2Fkeyrate%2Fkeyrate", result.speed_wpm, result.accuracy_percent, result.elapsed_secs))
                                                .unwrap_or_default();
                                            }
                                        }
                                    }
                                    'r' => {
                                        exit_type = ExitType::Restart;
                                        break;
                                    }
                                    'n' => {
                                        exit_type = ExitType::New;
                                        break;
                                    }
                                    'm' => {
                                        app.bell.toggle();
                                        let _ = store.save(&app.current_config());
                                    }
                                    _ => {}
                                }
                            }
                        }
                        _ => {}
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        // A reset must cancel any tick still pending for the old session.
        match exit_type {
            ExitType::Restart => {
                runner.disarm();
                app.reset(Some(app.session.target.clone()));
            }
            ExitType::New => {
                runner.disarm();
                app.reset(None);
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

/// Arms the countdown once the clock starts and disarms it the moment the
/// session reaches a terminal state, so no tick outlives the session.
fn after_input<E: EventSource>(app: &mut App, runner: &mut Runner<E>) {
    if app.session.has_finished() {
        runner.disarm();
        app.record_result();
    } else if app.session.has_started() && !runner.is_armed() {
        runner.arm();
    }
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
