use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const EMPTY_CONTENT: &str = "Content can not be empty!";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub img: String,
}

/// Body of a create request. Every field is optional on the wire so that
/// missing fields surface as a validation error rather than a parse error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieInput {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub img: Option<String>,
}

impl MovieInput {
    /// Builds the domain movie, or rejects the request if any field is
    /// missing or empty. `next_id` runs only once the input is valid.
    pub fn validate(self, next_id: impl FnOnce() -> String) -> Result<Movie, ApiError> {
        fn required(field: Option<String>) -> Result<String, ApiError> {
            field.filter(|v| !v.is_empty()).ok_or_else(|| ApiError::Validation(EMPTY_CONTENT.into()))
        }

        let name = required(self.name)?;
        let genre = required(self.genre)?;
        let img = required(self.img)?;
        Ok(Movie { id: next_id(), name, genre, img })
    }
}

/// Fields of an update request. An `id` in the body is never deserialized.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub img: Option<String>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.genre.is_none() && self.img.is_none()
    }
}

/// Case-insensitive substring filter on `name`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameFilter(String);

impl NameFilter {
    /// Returns `None` for a blank term, which means "list everything".
    pub fn new(term: Option<String>) -> Option<Self> {
        term.filter(|t| !t.is_empty()).map(Self)
    }

    /// `LIKE` pattern matched against `lower(name)` with `\` as the escape
    /// character.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.to_lowercase().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
