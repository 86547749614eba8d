use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Categoría declarada del contenido. Sólo afecta al texto del resumen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Article,
    Blog,
    Social,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Article, ContentType::Blog, ContentType::Social];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Blog => "blog",
            ContentType::Social => "social",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL.into_iter()
                        .find(|t| t.as_str() == s)
                        .ok_or_else(|| DomainError::InvalidContent(format!("unknown content type '{s}'")))
    }
}
