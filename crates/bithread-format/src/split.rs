// Splitting raw model output into per-language lines.
//
// The model is asked to prefix each version with `[ID]` or `[EN]`. Lines are
// attributed to whichever tag was seen most recently; lines before the first
// tag have no language and are dropped.

use bithread_model::{Language, LanguageLines};

/// Partition tagged bilingual text into Indonesian and English lines.
///
/// Blank lines are skipped. A line starting with a language tag switches the
/// active language; the tag is removed and any remaining text on that line
/// belongs to the new language.
pub fn split(raw: &str) -> LanguageLines {
    let mut lines = LanguageLines::default();
    let mut current: Option<Language> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let text = match Language::from_tagged_line(line) {
            Some(lang) => {
                current = Some(lang);
                line.replace(lang.tag(), "").trim().to_string()
            }
            None => line.to_string(),
        };

        match current {
            Some(lang) if !text.is_empty() => lines.push(lang, text),
            Some(_) => {}
            None => tracing::trace!(line = %text, "Dropping line before first language tag"),
        }
    }

    lines
}
