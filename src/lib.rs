// Library surface for headless/integration tests and reuse.
// Terminal setup and rendering stay in the binary.
pub mod bank;
pub mod clock;
pub mod config;
pub mod keys;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod sound;
pub mod timer;

pub use bank::SentenceBank;
pub use session::{Settings, TypingSession};
