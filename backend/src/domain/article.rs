//! Article entity: the concrete record type served by the API.

use std::fmt;

use super::Record;

/// Maximum title length in characters (matches the `varchar(200)` column).
pub const TITLE_MAX: usize = 200;
/// Maximum body length in characters.
pub const BODY_MAX: usize = 100_000;

/// Validation errors returned by [`Article::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    BodyTooLong { max: usize },
    /// NUL characters cannot be stored in PostgreSQL text columns.
    ControlCharacter { field: &'static str },
}

impl ArticleValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::BodyTooLong { .. } => "body",
            Self::ControlCharacter { field } => *field,
        }
    }

    /// Stable machine-readable validation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::BodyTooLong { .. } => "body_too_long",
            Self::ControlCharacter { .. } => "control_character",
        }
    }
}

impl fmt::Display for ArticleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::BodyTooLong { max } => write!(f, "body must be at most {max} characters"),
            Self::ControlCharacter { field } => write!(f, "{field} must not contain NUL characters"),
        }
    }
}

impl std::error::Error for ArticleValidationError {}

/// Article content. Base metadata lives on the surrounding [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    title: String,
    body: String,
}

impl Article {
    /// Validate and construct an article; the title is trimmed.
    ///
    /// # Examples
    /// ```
    /// use groundwork::domain::Article;
    ///
    /// let article = Article::try_new("  Hello  ", "World").expect("valid article");
    /// assert_eq!(article.title(), "Hello");
    /// assert!(Article::try_new("   ", "").is_err());
    /// ```
    pub fn try_new(
        title: impl AsRef<str>,
        body: impl Into<String>,
    ) -> Result<Self, ArticleValidationError> {
        let title = title.as_ref().trim();
        if title.contains('\0') {
            return Err(ArticleValidationError::ControlCharacter { field: "title" });
        }
        if title.is_empty() {
            return Err(ArticleValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(ArticleValidationError::TitleTooLong { max: TITLE_MAX });
        }
        let body = body.into();
        if body.contains('\0') {
            return Err(ArticleValidationError::ControlCharacter { field: "body" });
        }
        if body.chars().count() > BODY_MAX {
            return Err(ArticleValidationError::BodyTooLong { max: BODY_MAX });
        }
        Ok(Self {
            title: title.to_owned(),
            body,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}

/// A stored article with its base metadata.
pub type ArticleRecord = Record<Article>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn trims_title() {
        let article = Article::try_new(" Notes ", "text").expect("valid");
        assert_eq!(article.title(), "Notes");
        assert_eq!(article.body(), "text");
    }

    #[rstest]
    #[case("", "", ArticleValidationError::EmptyTitle)]
    #[case(&"t".repeat(TITLE_MAX + 1), "", ArticleValidationError::TitleTooLong { max: TITLE_MAX })]
    #[case("ok", &"b".repeat(BODY_MAX + 1), ArticleValidationError::BodyTooLong { max: BODY_MAX })]
    #[case("a\u{0}b", "", ArticleValidationError::ControlCharacter { field: "title" })]
    #[case("ok", "line\u{0}", ArticleValidationError::ControlCharacter { field: "body" })]
    fn rejects_invalid_input(
        #[case] title: &str,
        #[case] body: &str,
        #[case] expected: ArticleValidationError,
    ) {
        assert_eq!(Article::try_new(title, body), Err(expected));
    }

    #[rstest]
    fn title_limit_counts_characters_not_bytes() {
        let title = "é".repeat(TITLE_MAX);
        assert!(Article::try_new(title, "").is_ok());
    }
}
