// Greedy packing of lines into tweet-sized chunks.

use bithread_model::{Language, Thread};

/// Maximum length of a packed tweet before any tag/index is added, in chars.
pub const MAX_TWEET_CHARS: usize = 250;

/// Pack lines into tweets.
///
/// Lines are joined with single spaces while the joined buffer stays within
/// [`MAX_TWEET_CHARS`]; otherwise the buffer is emitted and the line starts a
/// new one. A single line longer than the limit is never split and becomes an
/// oversized tweet of its own.
///
/// When `tag` is non-empty and more than one tweet results, each tweet is
/// rewritten as `"{tag} {text} ({i}/{n})"`. A single tweet is left as-is.
pub fn pack<S: AsRef<str>>(lines: &[S], tag: Option<&str>) -> Vec<String> {
    let mut tweets = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in lines {
        let line = line.as_ref();
        let line_len = line.chars().count();

        if current_len + 1 + line_len <= MAX_TWEET_CHARS {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(line);
            current_len += line_len;
        } else {
            if !current.is_empty() {
                tweets.push(std::mem::take(&mut current));
            }
            current = line.to_string();
            current_len = line_len;
        }
    }

    if !current.is_empty() {
        tweets.push(current);
    }

    match tag.filter(|t| !t.is_empty()) {
        Some(tag) if tweets.len() > 1 => {
            let total = tweets.len();
            tweets
                .into_iter()
                .enumerate()
                .map(|(i, tweet)| format!("{tag} {tweet} ({}/{total})", i + 1))
                .collect()
        }
        _ => tweets,
    }
}

/// Pack one language's lines into a tagged thread.
pub fn pack_thread<S: AsRef<str>>(lines: &[S], language: Language) -> Thread {
    Thread::new(language, pack(lines, Some(language.tag())))
}
