//! Routing seam between the login screen and whatever hosts it.

/// Options for a single navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one,
    /// so "back" does not return to the login screen.
    pub replace: bool,
}

impl NavigateOptions {
    pub const REPLACE: Self = Self { replace: true };
}

/// Navigation collaborator handed to the login screen.
pub trait Navigator: Send {
    fn navigate(&mut self, path: &str, options: NavigateOptions);

    /// Current location.
    fn location(&self) -> &str;
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    entries: Vec<String>,
}

impl HistoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Pops the current entry. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, path: &str, options: NavigateOptions) {
        tracing::debug!(path, replace = options.replace, "navigate");
        if options.replace {
            self.entries.pop();
        }
        self.entries.push(path.to_string());
    }

    fn location(&self) -> &str {
        self.entries.last().map_or("", String::as_str)
    }
}
