use bithread_model::{BilingualThreads, Language};

pub mod output;
pub mod pack;
pub mod split;

pub use pack::{pack, pack_thread, MAX_TWEET_CHARS};
pub use split::split;

/// Turn raw generated text into the Indonesian and English threads.
///
/// Malformed output (missing tags, no text after a tag) is not an error: the
/// affected thread is simply empty, and a warning is logged.
pub fn build_threads(raw: &str) -> BilingualThreads {
    let lines = split::split(raw);
    tracing::info!(
        id_lines = lines.id_lines.len(),
        en_lines = lines.en_lines.len(),
        "Split generated text"
    );

    let indonesian = pack::pack_thread(lines.lines(Language::Indonesian), Language::Indonesian);
    let english = pack::pack_thread(lines.lines(Language::English), Language::English);

    for thread in [&indonesian, &english] {
        if thread.is_empty() {
            tracing::warn!(
                lang = %thread.language,
                tag = thread.language.tag(),
                "No lines found for language; thread will be empty"
            );
        } else {
            tracing::info!(lang = %thread.language, tweets = thread.len(), "Packed thread");
        }
    }

    BilingualThreads { indonesian, english }
}
