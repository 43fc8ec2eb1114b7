pub mod file;
pub mod lenient;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Typed input from `--input <file.json>` or, failing that, piped stdin.
/// `None` when neither supplies anything, so flags apply.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => file::read_json(p).map(Some),
        None => stdin::read_stdin(),
    }
}
