//! Input normalisation for the REPL.

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
