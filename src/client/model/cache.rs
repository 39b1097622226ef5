use crate::client::model::error::ApiError;

/// Fetch state for page-level data.
#[derive(Clone)]
pub enum Cache<T> {
    NotFetched,
    Fetched(T),
    Error(ApiError),
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Cache::NotFetched
    }
}

impl<T> Cache<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Cache::Fetched(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Cache::Error(err) => Some(err),
            _ => None,
        }
    }
}
