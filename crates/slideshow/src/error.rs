use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlideshowError {
    /// A slideshow needs at least one panel to have a cursor.
    #[error("deck has no slides")]
    EmptyDeck,

    #[error("invalid front matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),
}
