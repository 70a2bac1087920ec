use anyhow::{Context, Result};
use bithread_model::{BilingualThreads, Language, Thread};
use std::fs;
use std::path::{Path, PathBuf};

/// Write both threads to `output_dir` as `thread_id.txt` and `thread_en.txt`.
///
/// Creates the directory if it doesn't exist. Existing files are overwritten.
/// Tweets are separated by a blank line. Returns the written paths in output
/// order.
pub fn write_threads(threads: &BilingualThreads, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    threads
        .iter()
        .map(|thread| write_thread(thread, dir))
        .collect()
}

fn write_thread(thread: &Thread, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(thread.file_name());
    fs::write(&path, thread.file_contents())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), tweets = thread.len(), "Wrote {} thread", thread.language);
    Ok(path)
}

/// Numbered console preview of both threads.
pub fn render_preview(threads: &BilingualThreads) -> String {
    let mut out = String::new();
    for thread in threads.iter() {
        out.push_str(&format!("\n=== {} THREAD ===\n", preview_title(thread.language)));
        for (i, tweet) in thread.tweets.iter().enumerate() {
            out.push_str(&format!("\nTweet #{}:\n{tweet}\n", i + 1));
        }
    }
    out
}

/// Summary of where each thread was saved.
pub fn render_saved(threads: &BilingualThreads, paths: &[PathBuf]) -> String {
    let mut out = String::from("\n✅ Threads saved to:\n");
    for (thread, path) in threads.iter().zip(paths) {
        out.push_str(&format!("- {}: {}\n", thread.language.display_name(), path.display()));
    }
    out
}

fn preview_title(language: Language) -> &'static str {
    match language {
        Language::Indonesian => "INDONESIAN",
        Language::English => "ENGLISH",
    }
}
