//! View routing: `/` is the list, `/projects/<id>` a single project, and any
//! other path falls back to the list.

/// A resolved view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
}

impl Route {
    /// Resolve a path. Unknown paths redirect to [`Route::List`].
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let Some(rest) = path.trim().strip_prefix('/') else {
            return Self::List;
        };
        let mut segments = rest.trim_end_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("projects"), Some(id), None) if !id.is_empty() => Self::Detail(id.to_string()),
            _ => Self::List,
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Detail(id) => format!("/projects/{id}"),
        }
    }
}
