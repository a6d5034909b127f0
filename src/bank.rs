use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

const DEFAULT_BANK_FILE: &str = "sentences.json";

#[derive(Debug, Error)]
pub enum BankError {
    #[error("sentence bank is empty")]
    Empty,

    #[error("sentence {0} is blank")]
    BlankSentence(usize),

    #[error("bank file {0} not found")]
    MissingFile(String),

    #[error("bank file is not valid utf-8")]
    NotUtf8,

    #[error("unable to deserialize bank json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A practice sentence must contain something to type
pub fn check_sentence(idx: usize, sentence: &str) -> Result<(), BankError> {
    if sentence.trim().is_empty() {
        Err(BankError::BlankSentence(idx))
    } else {
        Ok(())
    }
}

#[derive(Deserialize)]
struct BankFile {
    #[allow(dead_code)]
    name: String,
    sentences: Vec<String>,
}

/// Immutable, never-empty list of practice sentences
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceBank {
    sentences: Vec<String>,
}

impl SentenceBank {
    pub fn new(sentences: Vec<String>) -> Result<Self, BankError> {
        if sentences.is_empty() {
            return Err(BankError::Empty);
        }
        for (idx, sentence) in sentences.iter().enumerate() {
            check_sentence(idx, sentence)?;
        }
        Ok(Self { sentences })
    }

    /// The bank shipped with the binary
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_embedded(DEFAULT_BANK_FILE)
    }

    fn from_embedded(file_name: &str) -> Result<Self, BankError> {
        let file = LANG_DIR
            .get_file(file_name)
            .ok_or_else(|| BankError::MissingFile(file_name.to_string()))?;
        let contents = file.contents_utf8().ok_or(BankError::NotUtf8)?;
        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let parsed: BankFile = serde_json::from_str(json)?;
        Self::new(parsed.sentences)
    }

    /// Single-sentence bank, used for `--prompt`
    pub fn single(sentence: impl Into<String>) -> Result<Self, BankError> {
        Self::new(vec![sentence.into()])
    }

    /// Uniformly random pick
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // non-empty is checked at construction
        self.sentences
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
