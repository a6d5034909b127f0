use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use typesprint::{
    clock::ManualClock,
    keys::{command_for, Command},
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    session::{Phase, Settings},
    sound::Silent,
    SentenceBank, TypingSession,
};

fn session(sentence: &str, settings: Settings) -> (TypingSession, ManualClock) {
    let clock = ManualClock::new();
    let session = TypingSession::with_parts(
        SentenceBank::single(sentence).unwrap(),
        settings,
        Box::new(clock.clone()),
        Box::new(Silent),
        StdRng::seed_from_u64(11),
    );
    (session, clock)
}

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Minimal event loop: keys become full-input keystrokes, ticks poll timers
fn drive<F: FnMut(&AppEvent)>(
    runner: &Runner<TestEventSource, FixedTicker>,
    session: &mut TypingSession,
    steps: u32,
    mut on_event: F,
) {
    for _ in 0..steps {
        let event = runner.step();
        on_event(&event);
        match event {
            AppEvent::Tick => {
                session.poll();
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if let Command::Input(next) = command_for(&key, session.input()) {
                    session.on_keystroke(next);
                }
            }
        }
    }
}

// Headless integration using the internal runtime + TypingSession without a TTY
#[test]
fn headless_typing_flow_completes() {
    let (mut session, clock) = session(
        "Hello world!",
        Settings {
            auto_advance: false,
            ..Settings::default()
        },
    );

    let (tx, rx) = mpsc::channel();
    for c in "Hello world!".chars() {
        tx.send(key(c)).unwrap();
    }
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    // half a second of simulated time per key
    drive(&runner, &mut session, 12, |_| clock.advance(Duration::from_millis(500)));

    assert!(session.is_finished());
    let result = session.result().unwrap();
    // first key at 0.5s, last at 6.0s
    assert_eq!(result.elapsed_seconds, 5);
    assert_eq!(result.wpm, 24);
    assert_eq!(result.accuracy, 100);
    assert!(!session.is_ticking());
}

#[test]
fn headless_ticks_advance_elapsed_time() {
    let (mut session, clock) = session("slow typist", Settings::default());
    let (tx, rx) = mpsc::channel();
    tx.send(key('s')).unwrap();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    drive(&runner, &mut session, 1, |_| {});
    assert_eq!(session.phase(), Phase::Active);

    // no more keys: every step times out into a Tick
    drive(&runner, &mut session, 4, |_| clock.advance_secs(1));

    assert_eq!(session.elapsed_seconds(), 4);
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn headless_auto_advance_starts_next_session() {
    let (mut session, clock) = session("ok", Settings::default());
    let (tx, rx) = mpsc::channel();
    tx.send(key('o')).unwrap();
    tx.send(key('k')).unwrap();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    drive(&runner, &mut session, 2, |_| {});
    assert!(session.is_finished());

    drive(&runner, &mut session, 2, |_| clock.advance_secs(1));
    assert!(session.is_finished());

    drive(&runner, &mut session, 1, |_| clock.advance_secs(1));
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.input(), "");
    assert_eq!(session.bests().accuracy, 100);
}
