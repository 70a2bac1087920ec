use std::fmt;

/// One of the two languages a bilingual thread is written in.
///
/// The model is asked to prefix each version with the language's tag, and the
/// same tag is used downstream to split the output back apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Indonesian,
    English,
}

impl Language {
    /// Output order: Indonesian first, then English.
    pub const ALL: [Language; 2] = [Language::Indonesian, Language::English];

    /// The literal marker for this language (e.g., "[ID]").
    pub fn tag(self) -> &'static str {
        match self {
            Language::Indonesian => "[ID]",
            Language::English => "[EN]",
        }
    }

    /// ISO 639-1 code (e.g., "id").
    pub fn code(self) -> &'static str {
        match self {
            Language::Indonesian => "id",
            Language::English => "en",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Indonesian => "Bahasa Indonesia",
            Language::English => "English",
        }
    }

    /// Match a line that starts with one of the language tags.
    pub fn from_tagged_line(line: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|lang| line.starts_with(lang.tag()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
