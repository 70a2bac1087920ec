use crate::language::Language;

/// Generated lines grouped by language, in the order the model produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageLines {
    pub id_lines: Vec<String>,
    pub en_lines: Vec<String>,
}

impl LanguageLines {
    pub fn lines(&self, language: Language) -> &[String] {
        match language {
            Language::Indonesian => &self.id_lines,
            Language::English => &self.en_lines,
        }
    }

    pub(crate) fn lines_mut(&mut self, language: Language) -> &mut Vec<String> {
        match language {
            Language::Indonesian => &mut self.id_lines,
            Language::English => &mut self.en_lines,
        }
    }

    /// Append a line to the given language's sequence.
    pub fn push(&mut self, language: Language, line: impl Into<String>) {
        self.lines_mut(language).push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.id_lines.is_empty() && self.en_lines.is_empty()
    }
}

/// An ordered sequence of tweets in a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub language: Language,
    pub tweets: Vec<String>,
}

impl Thread {
    pub fn new(language: Language, tweets: Vec<String>) -> Self {
        Self { language, tweets }
    }

    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// File name this thread is saved under (e.g., `thread_id.txt`).
    pub fn file_name(&self) -> String {
        format!("thread_{}.txt", self.language.code())
    }

    /// Tweets separated by a blank line, as written to disk.
    pub fn file_contents(&self) -> String {
        self.tweets.join("\n\n")
    }
}

/// The Indonesian and English threads produced from one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilingualThreads {
    pub indonesian: Thread,
    pub english: Thread,
}

impl BilingualThreads {
    pub fn get(&self, language: Language) -> &Thread {
        match language {
            Language::Indonesian => &self.indonesian,
            Language::English => &self.english,
        }
    }

    /// Both threads in output order.
    pub fn iter(&self) -> impl Iterator<Item = &Thread> {
        Language::ALL.into_iter().map(move |lang| self.get(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lines_push() {
        let mut lines = LanguageLines::default();
        assert!(lines.is_empty());

        lines.push(Language::Indonesian, "halo");
        lines.push(Language::English, "hello");
        lines.push(Language::English, "world");

        assert_eq!(lines.lines(Language::Indonesian), ["halo"]);
        assert_eq!(lines.lines(Language::English), ["hello", "world"]);
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_thread_file_contents() {
        let thread = Thread::new(
            Language::English,
            vec!["first tweet".to_string(), "second tweet".to_string()],
        );
        assert_eq!(thread.file_name(), "thread_en.txt");
        assert_eq!(thread.file_contents(), "first tweet\n\nsecond tweet");
        assert_eq!(thread.len(), 2);
    }

    #[test]
    fn test_empty_thread_writes_empty_file() {
        let thread = Thread::new(Language::Indonesian, Vec::new());
        assert!(thread.is_empty());
        assert_eq!(thread.file_contents(), "");
        assert_eq!(thread.file_name(), "thread_id.txt");
    }

    #[test]
    fn test_bilingual_iter_order() {
        let threads = BilingualThreads {
            indonesian: Thread::new(Language::Indonesian, vec!["A".into()]),
            english: Thread::new(Language::English, vec!["B".into()]),
        };
        let langs: Vec<Language> = threads.iter().map(|t| t.language).collect();
        assert_eq!(langs, vec![Language::Indonesian, Language::English]);
        assert_eq!(threads.get(Language::English).tweets, ["B"]);
    }
}
