use std::path::PathBuf;

/// Run-time configuration threaded into the scanner and the REPL. Built from
/// CLI flags/environment by the binary front end; there is no external
/// config file format.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Whether `/* */` block comments require balanced nesting (`/*` inside a
    /// comment opens another level) or merely end at the first `*/` seen.
    pub strict_block_comments: bool,
    /// Where the REPL persists its `rustyline` history between sessions.
    pub history_path: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(strict_block_comments: bool, history_path: Option<PathBuf>) -> Self {
        RunConfig { strict_block_comments, history_path }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            strict_block_comments: true,
            history_path: home::home_dir().map(|mut home| {
                home.push(".rocks_history");
                home
            }),
        }
    }
}
