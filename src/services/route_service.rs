use log::debug;
use regex::Regex;

use crate::errors::WikiError;
use crate::types::Action;

/// Validates request paths of the form `/<view|edit|save>/<title>`
pub struct PathRouter {
    pattern: Regex,
}

impl PathRouter {
    pub fn new() -> Self {
        let pattern = Regex::new(r"^/(edit|save|view)/(.+)$").expect("route pattern is valid");
        Self { pattern }
    }

    /// Split a decoded request path into its action and title.
    ///
    /// The title is everything after the action segment, slashes included.
    pub fn route(&self, path: &str) -> Result<(Action, String), WikiError> {
        let Some(caps) = self.pattern.captures(path) else {
            debug!("No route for path '{}'", path);
            return Err(WikiError::NotFound);
        };
        let action = match &caps[1] {
            "view" => Action::View,
            "edit" => Action::Edit,
            _ => Action::Save,
        };
        Ok((action, caps[2].to_string()))
    }
}

impl Default for PathRouter {
    fn default() -> Self {
        Self::new()
    }
}
