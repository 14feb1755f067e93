use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::{encode_title, escape_html, last_modified_html};

const BUILTIN_VIEW: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{{TITLE}}</title></head><body><h1>{{TITLE}}</h1><p>[<a href=\"/edit/{{TITLE_PATH}}\">edit</a>]</p><div class=\"page\">{{BODY}}</div>{{MODIFIED}}</body></html>";

const BUILTIN_EDIT: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Editing {{TITLE}}</title></head><body><h1>Editing {{TITLE}}</h1><form action=\"/save/{{TITLE_PATH}}\" method=\"POST\"><div><textarea name=\"body\" rows=\"20\" cols=\"80\">{{BODY}}</textarea></div><div><input type=\"submit\" value=\"Save\"></div></form></body></html>";

/// Values substituted into a template
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub body_html: String,
    pub modified: Option<String>,
}

impl TemplateContext {
    /// Context for showing a page whose body has already been turned into HTML
    pub fn for_view(page: &Page) -> Self {
        let body_html = page
            .lines()
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| format!("<p>{}</p>", line))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            title: page.title.clone(),
            body_html,
            modified: Some(last_modified_html(page.modified)),
        }
    }

    /// Context for the edit form; the raw body goes into a textarea
    pub fn for_edit(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            body_html: escape_html(&page.text()),
            modified: None,
        }
    }
}

/// Named HTML templates, loaded once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<String, String>,
}

impl TemplateSet {
    /// Only the built-in `view` and `edit` templates
    pub fn builtin() -> Self {
        let mut templates = HashMap::new();
        templates.insert("view".to_string(), BUILTIN_VIEW.to_string());
        templates.insert("edit".to_string(), BUILTIN_EDIT.to_string());
        Self { templates }
    }

    /// Load every `*.html` file in `dir`, keyed by file stem. Built-ins fill
    /// in `view` and `edit` when the directory does not provide them.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut set = Self::builtin();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Template directory {:?} not found, using built-in templates", dir);
                return Ok(set);
            }
            Err(e) => return Err(WikiError::Io(e)),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)?;
            debug!("Loaded template '{}' from {:?}", name, path);
            set.templates.insert(name.to_string(), source);
        }

        info!("Loaded {} templates from {:?}", set.templates.len(), dir);
        Ok(set)
    }

    /// Render the template called `name`
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String, WikiError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::TemplateError(format!("no template named \"{}\"", name)))?;

        Ok(template
            .replace("{{TITLE_PATH}}", &escape_html(&encode_title(&context.title)))
            .replace("{{TITLE}}", &escape_html(&context.title))
            .replace("{{MODIFIED}}", context.modified.as_deref().unwrap_or(""))
            .replace("{{BODY}}", &context.body_html))
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_wraps_lines_in_paragraphs() {
        let page = Page::new("Home", "first\n\nsecond <b>");
        let context = TemplateContext::for_view(&page);
        assert_eq!(context.body_html, "<p>first</p>\n<p>second <b></p>");
    }

    #[test]
    fn edit_escapes_body() {
        let page = Page::new("Home", "</textarea>");
        let html = TemplateSet::builtin().render("edit", &TemplateContext::for_edit(&page)).unwrap();
        assert!(html.contains("&lt;/textarea&gt;"));
        assert!(html.contains("action=\"/save/Home\""));
    }

    #[test]
    fn title_is_escaped_and_encoded() {
        let page = Page::empty("A & B");
        let html = TemplateSet::builtin().render("view", &TemplateContext::for_view(&page)).unwrap();
        assert!(html.contains("<h1>A &amp; B</h1>"));
        assert!(html.contains("href=\"/edit/A%20&amp;%20B\""));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let context = TemplateContext::for_edit(&Page::empty("X"));
        let err = TemplateSet::builtin().render("missing", &context).unwrap_err();
        assert!(matches!(err, WikiError::TemplateError(_)));
    }

    #[test]
    fn directory_templates_override_builtins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "<main>{{TITLE}}: {{BODY}}</main>").unwrap();
        fs::write(dir.path().join("footer.html"), "<footer></footer>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let set = TemplateSet::load(dir.path()).unwrap();
        let context = TemplateContext::for_edit(&Page::empty("T"));
        assert_eq!(set.render("footer", &context).unwrap(), "<footer></footer>");
        assert!(set.render("edit", &context).is_ok());
        assert!(set.render("notes", &context).is_err());

        let html = set.render("view", &TemplateContext::for_view(&Page::new("T", "hi"))).unwrap();
        assert_eq!(html, "<main>T: <p>hi</p></main>");
    }

    #[test]
    fn missing_directory_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let set = TemplateSet::load(&dir.path().join("absent")).unwrap();
        let builtin = TemplateSet::builtin();
        let context = TemplateContext::for_edit(&Page::new("T", "x"));
        assert_eq!(set.render("edit", &context).unwrap(), builtin.render("edit", &context).unwrap());
        assert!(set.render("view", &context).is_ok());
    }
}
