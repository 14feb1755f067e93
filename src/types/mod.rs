use std::sync::Arc;
use std::time::SystemTime;

use crate::components::TemplateSet;
use crate::services::{LinkRewriter, PageStore, PathRouter};

/// Title shown for `/`
pub const FRONT_PAGE: &str = "FrontPage";

/// A wiki page: its title doubles as the storage key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
    /// Modification time of the stored record, when loaded from disk
    pub modified: Option<SystemTime>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { title: title.into(), body: body.into(), modified: None }
    }

    /// A page with no content yet
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body split on newlines
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(|line| line.trim_end_matches('\r').to_string()).collect()
    }
}

/// Actions reachable through `/<action>/<title>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Save => "save",
        }
    }
}

/// Application state shared across all handlers, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub templates: Arc<TemplateSet>,
    pub router: Arc<PathRouter>,
    pub links: Arc<LinkRewriter>,
}

impl AppState {
    pub fn new(store: PageStore, templates: TemplateSet) -> Self {
        Self {
            store: Arc::new(store),
            templates: Arc::new(templates),
            router: Arc::new(PathRouter::new()),
            links: Arc::new(LinkRewriter::new()),
        }
    }
}
