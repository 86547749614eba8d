//! Resumen extractivo: primera oración más una línea de detalle opcional.

use crate::ContentType;

const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Primera oración no vacía terminada en `.`.
///
/// Si el texto no tiene ningún fragmento entre terminadores (p. ej. `"?!"`),
/// la semilla es el propio texto recortado.
pub fn summary_seed(content: &str) -> String {
    match content.split(TERMINATORS).map(str::trim).find(|s| !s.is_empty()) {
        Some(first) => format!("{first}."),
        None => {
            let trimmed = content.trim();
            if trimmed.is_empty() || trimmed.ends_with(TERMINATORS) {
                trimmed.to_string()
            } else {
                format!("{trimmed}.")
            }
        }
    }
}

/// Construye el resumen; la línea de detalle se añade sólo cuando
/// `word_count > detail_threshold`.
pub fn summarize(content: &str,
                 content_type: ContentType,
                 word_count: usize,
                 reading_time: usize,
                 detail_threshold: usize)
                 -> String {
    let mut summary = summary_seed(content);
    if word_count > detail_threshold {
        summary.push_str(&format!(" This {content_type} contains {word_count} words and takes approximately \
                                   {reading_time} minute(s) to read."));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_uses_first_fragment() {
        assert_eq!(summary_seed("Hello world! Second one."), "Hello world.");
        assert_eq!(summary_seed("...  Leading dots here"), "Leading dots here.");
    }

    #[test]
    fn seed_without_fragments_is_never_undefined() {
        assert_eq!(summary_seed(" ?!.. "), "?!..");
        assert_eq!(summary_seed(""), "");
    }
}
