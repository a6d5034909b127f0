/// Per-character state of the target sentence, used for colouring
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Pending,
}

/// Words of `target` per elapsed minute, rounded. Zero elapsed time gives 0.
pub fn compute_wpm(target: &str, elapsed_seconds: u64) -> u32 {
    if elapsed_seconds == 0 {
        return 0;
    }

    let words = target.split_whitespace().count() as f64;
    let minutes = elapsed_seconds as f64 / 60.0;

    (words / minutes).round().max(0.0) as u32
}

/// Percentage of target positions matched by `input`, rounded.
///
/// Only the first `target.len()` characters of `input` are compared; anything
/// typed past the end of the target neither counts for nor against.
pub fn compute_accuracy(target: &str, input: &str) -> u32 {
    let total = target.chars().count();
    if total == 0 {
        return 0;
    }

    let correct = target
        .chars()
        .zip(input.chars())
        .filter(|(expected, typed)| expected == typed)
        .count();

    ((correct as f64 / total as f64) * 100.0).round() as u32
}

/// One outcome per character of `target`
pub fn char_outcomes(target: &str, input: &str) -> Vec<Outcome> {
    let mut typed = input.chars();

    target
        .chars()
        .map(|expected| match typed.next() {
            Some(c) if c == expected => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
            None => Outcome::Pending,
        })
        .collect()
}

/// Typed characters over target characters, clamped to 0.0..=1.0
pub fn progress(target: &str, input: &str) -> f64 {
    let total = target.chars().count();
    if total == 0 {
        return 0.0;
    }

    (input.chars().count() as f64 / total as f64).clamp(0.0, 1.0)
}
