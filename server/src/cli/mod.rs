pub mod database_migration;
pub mod file_io;

/// The two web applications, which can be served (and migrated, filled with data) by this binary.
/// Each of them uses its own database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Application {
    /// The Fyyur venue/artist/show directory (HTML)
    Fyyur,
    /// The Trivia quiz API (JSON)
    Trivia,
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Application::Fyyur => f.write_str("fyyur"),
            Application::Trivia => f.write_str("trivia"),
        }
    }
}
