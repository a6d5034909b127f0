use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

/// Completion sound. Callers ignore the result: a failed chime must never
/// affect the session.
pub trait Chime {
    fn play(&self) -> io::Result<()>;
}

/// Rings the terminal bell (BEL on stdout)
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

/// No output at all
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Chime for Silent {
    fn play(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Counts plays; optionally fails every call. For tests.
#[derive(Clone, Debug, Default)]
pub struct CountingChime {
    plays: Rc<Cell<usize>>,
    fail: bool,
}

impl CountingChime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            plays: Rc::default(),
            fail: true,
        }
    }

    pub fn plays(&self) -> usize {
        self.plays.get()
    }
}

impl Chime for CountingChime {
    fn play(&self) -> io::Result<()> {
        self.plays.set(self.plays.get() + 1);
        if self.fail {
            Err(io::Error::new(io::ErrorKind::Other, "no audio output"))
        } else {
            Ok(())
        }
    }
}
