// The text the rain is made of. One unit (a line or a word) is picked per
// spawn event and every character of it becomes a falling letter.
use std::path::Path;

use rand::Rng;

use crate::error::Error;

pub const DEFAULT_TEXT: &str = "\
I never meant to cause you any sorrow
I never meant to cause you any pain
I only wanted one time to see you laughing
I only wanted to see you
Laughing in the purple rain
Purple rain, purple rain
I only want to see you
Laughing in the purple rain";

/// How a text is cut into spawnable units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Units {
    #[default]
    Lines,
    Words,
}

#[derive(Clone, Debug)]
pub struct TextCorpus {
    units: Vec<String>,
}

impl TextCorpus {
    /// Split `text` into trimmed, non-empty units. Fails if nothing is left.
    pub fn parse(text: &str, units: Units) -> Result<Self, Error> {
        let units: Vec<String> = match units {
            Units::Lines => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            Units::Words => text.split_whitespace().map(String::from).collect(),
        };
        if units.is_empty() {
            return Err(Error::Corpus("text contains no usable lines".into()));
        }
        Ok(Self { units })
    }

    pub fn from_file(path: &Path, units: Units) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, units)
            .map_err(|e| Error::Corpus(format!("{}: {e}", path.display())))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Uniform pick over all units.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.units[rng.random_range(0..self.units.len())]
    }
}

impl Default for TextCorpus {
    fn default() -> Self {
        Self {
            units: DEFAULT_TEXT.lines().map(String::from).collect(),
        }
    }
}
