use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Nivel de dificultad derivado del número de palabras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whitespace Unicode más U+FEFF (BOM), que también separa palabras.
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Recorta separadores (incluido U+FEFF) en ambos extremos.
pub fn trim_content(content: &str) -> &str {
    content.trim_matches(is_word_separator)
}

/// Palabras = tramos no vacíos entre separadores.
pub fn word_count(content: &str) -> usize {
    content.split(is_word_separator).filter(|w| !w.is_empty()).count()
}

/// Minutos de lectura redondeados hacia arriba (mínimo 1).
pub fn reading_time(word_count: usize, words_per_minute: NonZeroU32) -> usize {
    word_count.div_ceil(words_per_minute.get() as usize).max(1)
}

/// `> 300` hard, `> 100` medium, resto easy.
pub fn difficulty(word_count: usize) -> Difficulty {
    match word_count {
        n if n > 300 => Difficulty::Hard,
        n if n > 100 => Difficulty::Medium,
        _ => Difficulty::Easy,
    }
}
