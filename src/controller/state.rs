use std::fmt;
use std::sync::Arc;

use crate::app::ErrorInfo;

/// Lifecycle of one controller. Exactly one variant is active.
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(Arc<T>),
    Failure(ErrorInfo),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            FetchState::Failure(error) => Some(error),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> FetchSnapshot<T> {
        FetchSnapshot {
            data: self.data().cloned(),
            loading: self.is_loading(),
            error: self.error().cloned(),
        }
    }
}

// Manual impls: `Arc<T>` is cloneable for any `T`.
impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(data) => FetchState::Success(Arc::clone(data)),
            FetchState::Failure(error) => FetchState::Failure(error.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FetchState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchState::Idle => f.write_str("Idle"),
            FetchState::Loading => f.write_str("Loading"),
            FetchState::Success(data) => f.debug_tuple("Success").field(data).finish(),
            FetchState::Failure(error) => f.debug_tuple("Failure").field(error).finish(),
        }
    }
}

/// The `{data, loading, error}` view presentation code renders from.
pub struct FetchSnapshot<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

impl<T> FetchSnapshot<T> {
    /// Nothing loaded, nothing pending, nothing failed.
    pub fn is_blank(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }
}

impl<T> Clone for FetchSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FetchSnapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchSnapshot")
            .field("data", &self.data)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}
