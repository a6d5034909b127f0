use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use strum_macros::Display;

use crate::bank::{self, BankError, SentenceBank};
use crate::clock::{Clock, SystemClock};
use crate::scoring::{self, Outcome};
use crate::sound::{Chime, TerminalBell};
use crate::timer::{OneShotTimer, RepeatingTimer};

/// How often the elapsed time is refreshed while typing
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The event loop must poll at least this often for ticks to land on time
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(3);

/// Longer auto-advance delays are clamped to this
pub const MAX_ADVANCE_DELAY: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

/// User toggles that survive across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub auto_advance: bool,
    pub sound_enabled: bool,
    pub advance_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_advance: true,
            sound_enabled: false,
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }
}

/// Running maxima over every finished session of this process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bests {
    pub wpm: u32,
    pub accuracy: u32,
}

impl Bests {
    fn record(&mut self, result: &SessionResult) {
        self.wpm = self.wpm.max(result.wpm);
        self.accuracy = self.accuracy.max(result.accuracy);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_seconds: u64,
}

/// What a call to [`TypingSession::poll`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Poll {
    pub ticked: bool,
    pub advanced: bool,
}

impl Poll {
    pub fn changed(&self) -> bool {
        self.ticked || self.advanced
    }
}

/// One practice attempt plus the state carried between attempts.
///
/// The session is the single owner of both timers: the once-per-second
/// elapsed ticker (armed on the first keystroke) and the one-shot
/// auto-advance (armed on finish). Every path out of a session (finish,
/// `reset`, `start`, drop) disarms them.
pub struct TypingSession {
    bank: SentenceBank,
    target: String,
    input: String,
    started_at: Option<Instant>,
    elapsed_seconds: u64,
    phase: Phase,
    result: Option<SessionResult>,
    bests: Bests,
    settings: Settings,
    ticker: RepeatingTimer,
    advance: OneShotTimer,
    clock: Box<dyn Clock>,
    chime: Box<dyn Chime>,
    rng: StdRng,
}

impl fmt::Debug for TypingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingSession")
            .field("target", &self.target)
            .field("input", &self.input)
            .field("started_at", &self.started_at)
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("phase", &self.phase)
            .field("bests", &self.bests)
            .field("settings", &self.settings)
            .field("ticker", &self.ticker)
            .field("advance", &self.advance)
            .finish_non_exhaustive()
    }
}

impl TypingSession {
    pub fn new(bank: SentenceBank, settings: Settings) -> Self {
        Self::with_parts(
            bank,
            settings,
            Box::new(SystemClock),
            Box::new(TerminalBell),
            StdRng::from_entropy(),
        )
    }

    pub fn with_parts(
        bank: SentenceBank,
        settings: Settings,
        clock: Box<dyn Clock>,
        chime: Box<dyn Chime>,
        mut rng: StdRng,
    ) -> Self {
        let target = bank.pick(&mut rng).to_string();
        Self {
            bank,
            target,
            input: String::new(),
            started_at: None,
            elapsed_seconds: 0,
            phase: Phase::Idle,
            result: None,
            bests: Bests::default(),
            settings,
            ticker: RepeatingTimer::new(TICK_PERIOD),
            advance: OneShotTimer::new(),
            clock,
            chime,
            rng,
        }
    }

    /// New attempt on a freshly picked sentence
    pub fn start(&mut self) {
        self.cancel_timers();
        self.target = self.bank.pick(&mut self.rng).to_string();
        self.clear_attempt();
    }

    /// New attempt on `sentence`, or on the current target when `None`.
    ///
    /// A blank sentence is rejected with the same check the bank applies,
    /// and the session is left untouched.
    pub fn reset(&mut self, sentence: Option<String>) -> Result<(), BankError> {
        if let Some(sentence) = &sentence {
            bank::check_sentence(0, sentence)?;
        }

        self.cancel_timers();
        if let Some(sentence) = sentence {
            self.target = sentence;
        }
        self.clear_attempt();
        Ok(())
    }

    /// New attempt on the current target
    pub fn restart(&mut self) {
        self.cancel_timers();
        self.clear_attempt();
    }

    /// Feed the full current input. Returns the result when this keystroke
    /// completes the sentence.
    ///
    /// Input is frozen once finished: later keystrokes are accepted and
    /// dropped until the next `start`/`reset`. A browser text box would keep
    /// taking edits here; freezing keeps `is_finished()` equivalent to
    /// `input() == target()`.
    pub fn on_keystroke(&mut self, new_input: impl Into<String>) -> Option<SessionResult> {
        if self.phase == Phase::Finished {
            return None;
        }

        let now = self.clock.now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.phase = Phase::Active;
            self.ticker.arm(now);
        }

        self.input = new_input.into();

        if self.input == self.target {
            Some(self.finish(now))
        } else {
            None
        }
    }

    /// Refresh `elapsed_seconds` from the clock. No-op unless active.
    pub fn tick(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        if let Some(started_at) = self.started_at {
            self.elapsed_seconds = self.clock.now().duration_since(started_at).as_secs();
        }
    }

    /// Fire whichever timers are due
    pub fn poll(&mut self) -> Poll {
        let now = self.clock.now();
        let mut poll = Poll::default();

        if self.ticker.poll(now) > 0 {
            self.tick();
            poll.ticked = true;
        }

        if self.advance.poll(now) {
            self.start();
            poll.advanced = true;
        }

        poll
    }

    pub fn compute_wpm(&self) -> u32 {
        scoring::compute_wpm(&self.target, self.elapsed_seconds)
    }

    pub fn compute_accuracy(&self) -> u32 {
        scoring::compute_accuracy(&self.target, &self.input)
    }

    pub fn toggle_auto_advance(&mut self) {
        self.settings.auto_advance = !self.settings.auto_advance;
        if !self.settings.auto_advance {
            self.advance.cancel();
        }
    }

    pub fn toggle_sound(&mut self) {
        self.settings.sound_enabled = !self.settings.sound_enabled;
    }

    /// False while a finished session waits for its auto-advance
    pub fn accepts_input(&self) -> bool {
        !(self.phase == Phase::Finished && self.advance.is_pending())
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    pub fn bests(&self) -> Bests {
        self.bests
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn bank(&self) -> &SentenceBank {
        &self.bank
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn advance_pending(&self) -> bool {
        self.advance.is_pending()
    }

    pub fn advance_remaining(&self) -> Option<Duration> {
        self.advance.remaining(self.clock.now())
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        scoring::char_outcomes(&self.target, &self.input)
    }

    pub fn progress(&self) -> f64 {
        scoring::progress(&self.target, &self.input)
    }

    fn finish(&mut self, now: Instant) -> SessionResult {
        self.ticker.cancel();
        if let Some(started_at) = self.started_at {
            self.elapsed_seconds = now.duration_since(started_at).as_secs();
        }
        self.phase = Phase::Finished;

        let result = SessionResult {
            wpm: self.compute_wpm(),
            accuracy: self.compute_accuracy(),
            elapsed_seconds: self.elapsed_seconds,
        };
        self.result = Some(result);
        self.bests.record(&result);

        if self.settings.sound_enabled {
            let _ = self.chime.play();
        }

        if self.settings.auto_advance {
            let delay = self.settings.advance_delay.min(MAX_ADVANCE_DELAY);
            self.advance.schedule(now, delay);
        }

        result
    }

    fn cancel_timers(&mut self) {
        self.ticker.cancel();
        self.advance.cancel();
    }

    fn clear_attempt(&mut self) {
        self.input.clear();
        self.started_at = None;
        self.elapsed_seconds = 0;
        self.phase = Phase::Idle;
        self.result = None;
    }
}
