mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEvent,
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
use typesprint::{
    bank::{BankError, SentenceBank},
    config::{Config, ConfigStore, FileConfigStore},
    keys::{command_for, Command},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Settings, TypingSession},
};

/// minimal typing speed tester: one sentence, wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the sentence shown as fast and as accurately as you can. The timer starts on the first key; words-per-minute and accuracy are shown once the sentence matches exactly."
)]
pub struct Cli {
    /// custom sentence to practice instead of the built-in bank
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// start a new sentence automatically after finishing
    #[clap(long, conflicts_with = "no_auto_advance")]
    auto_advance: bool,

    /// stay on the finished sentence until a new one is requested
    #[clap(long)]
    no_auto_advance: bool,

    /// ring the terminal bell when a sentence is finished
    #[clap(long, conflicts_with = "no_sound")]
    sound: bool,

    /// never ring the terminal bell
    #[clap(long)]
    no_sound: bool,

    /// seconds to wait before the next sentence when auto-advancing
    #[clap(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(0..=3600))]
    advance_delay: Option<u64>,

    /// store the resolved settings as startup defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Config file values, overridden by any flag given on the command line
    fn settings(&self, cfg: &Config) -> Settings {
        let mut settings = Settings::from(cfg);
        if self.auto_advance {
            settings.auto_advance = true;
        }
        if self.no_auto_advance {
            settings.auto_advance = false;
        }
        if self.sound {
            settings.sound_enabled = true;
        }
        if self.no_sound {
            settings.sound_enabled = false;
        }
        if let Some(secs) = self.advance_delay {
            settings.advance_delay = Duration::from_secs(secs);
        }
        settings
    }

    fn bank(&self) -> Result<SentenceBank, BankError> {
        match &self.prompt {
            Some(prompt) => SentenceBank::single(prompt.clone()),
            None => SentenceBank::builtin(),
        }
    }

    /// Resolve the bank and settings, saving the settings only once the
    /// bank is known to be usable
    fn prepare(
        &self,
        store: &impl ConfigStore,
    ) -> Result<(SentenceBank, Settings), Box<dyn Error>> {
        let bank = self.bank()?;
        let settings = self.settings(&store.load());
        if self.save_config {
            store.save(&Config::from(&settings))?;
        }
        Ok((bank, settings))
    }
}

#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
}

impl App {
    pub fn new(session: TypingSession) -> Self {
        Self { session }
    }

    /// Returns false once the user asked to quit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match command_for(&key, self.session.input()) {
            Command::Quit => return false,
            Command::Input(next) => {
                if self.session.accepts_input() {
                    self.session.on_keystroke(next);
                }
            }
            Command::NewSentence => self.session.start(),
            Command::Restart => self.session.restart(),
            Command::ToggleAutoAdvance => self.session.toggle_auto_advance(),
            Command::ToggleSound => self.session.toggle_sound(),
            Command::Ignore => {}
        }
        true
    }

    /// Fire due timers. Returns true when the screen needs a redraw.
    pub fn on_tick(&mut self) -> bool {
        let poll = self.session.poll();
        // keep the auto-advance countdown moving
        poll.changed() || self.session.advance_pending()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let (bank, settings) = match cli.prepare(&FileConfigStore::new()) {
        Ok(prepared) => prepared,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(TypingSession::new(bank, settings));
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.on_tick() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
