//! Theme engine
//!
//! Template rendering using Tera. The built-in templates are compiled into the
//! binary; a configured directory can replace any of them by file name.

use std::error::Error as StdError;
use std::fs;
use std::path::Path;
use tera::{Context as TeraContext, Tera};

mod error;

pub use error::ThemeError;

/// Built-in templates, keyed by the name handlers render them with
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("admin/index.html", include_str!("../../templates/admin/index.html")),
    ("admin/edit.html", include_str!("../../templates/admin/edit.html")),
    ("posts/index.html", include_str!("../../templates/posts/index.html")),
    ("posts/show.html", include_str!("../../templates/posts/show.html")),
];

/// Theme engine for rendering templates
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Engine with only the built-in templates
    pub fn new() -> Result<Self, ThemeError> {
        Self::build(None)
    }

    /// Engine whose templates are overridden by files found under `dir`.
    ///
    /// A template is replaced when `dir/<name>` exists, e.g.
    /// `dir/admin/edit.html`. Missing files keep the built-in version and a
    /// missing directory is an error.
    pub fn with_overrides(dir: &Path) -> Result<Self, ThemeError> {
        if !dir.is_dir() {
            return Err(ThemeError::NotFound(dir.display().to_string()));
        }
        Self::build(Some(dir))
    }

    fn build(dir: Option<&Path>) -> Result<Self, ThemeError> {
        let mut sources = Vec::with_capacity(BUILTIN_TEMPLATES.len());

        for (name, builtin) in BUILTIN_TEMPLATES {
            let override_path = dir.map(|d| d.join(name)).filter(|p| p.is_file());
            let source = match override_path {
                Some(path) => {
                    tracing::info!("Template override loaded: {}", path.display());
                    fs::read_to_string(&path)?
                }
                None => builtin.to_string(),
            };
            sources.push((*name, source));
        }

        let mut tera = Tera::default();
        // Added as one batch so `extends` resolves regardless of order.
        tera.add_raw_templates(sources)
            .map_err(|e| ThemeError::TemplateError(describe(&e)))?;

        Ok(Self { tera })
    }

    /// Render a template by name
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String, ThemeError> {
        self.tera.render(template, context).map_err(|e| {
            ThemeError::TemplateError(format!("Failed to render '{}': {}", template, describe(&e)))
        })
    }

    pub fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template)
    }
}

/// Flatten a Tera error and its causes into one message
fn describe(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        message.push_str(&format!("\n  Caused by: {}", s));
        source = s.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPost, PostFormErrors, TITLE_REQUIRED};

    fn edit_context(values: &NewPost, errors: &PostFormErrors) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert("heading", "Edit Post");
        context.insert("action", "/posts/admin/hello-world");
        context.insert("submit_label", "Update Post");
        context.insert("values", values);
        context.insert("errors", errors);
        context
    }

    #[test]
    fn test_builtin_templates_loaded() {
        let engine = ThemeEngine::new().unwrap();
        for (name, _) in BUILTIN_TEMPLATES {
            assert!(engine.has_template(name), "missing {}", name);
        }
    }

    #[test]
    fn test_edit_form_prefills_values_and_escapes() {
        let engine = ThemeEngine::new().unwrap();
        let values = NewPost::new("Fish & <Chips>", "hello-world", "body");

        let html = engine
            .render("admin/edit.html", &edit_context(&values, &PostFormErrors::default()))
            .unwrap();

        assert!(html.contains(r#"value="Fish &amp; &lt;Chips&gt;""#));
        assert!(html.contains(r#"action="/posts/admin/hello-world""#));
        assert!(!html.contains("field-error"));
    }

    #[test]
    fn test_edit_form_shows_field_errors() {
        let engine = ThemeEngine::new().unwrap();
        let errors = PostFormErrors {
            title: Some(TITLE_REQUIRED),
            ..PostFormErrors::default()
        };

        let html = engine
            .render("admin/edit.html", &edit_context(&NewPost::default(), &errors))
            .unwrap();

        assert!(html.contains("Title is required!"));
        assert!(!html.contains("Slug is required!"));
    }

    #[test]
    fn test_override_directory_replaces_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("error.html"),
            "custom {{ status }}: {{ message }}",
        )
        .unwrap();

        let engine = ThemeEngine::with_overrides(dir.path()).unwrap();
        let mut context = TeraContext::new();
        context.insert("status", &404);
        context.insert("message", "gone");

        assert_eq!(engine.render("error.html", &context).unwrap(), "custom 404: gone");
        assert!(engine.has_template("admin/edit.html"));
    }

    #[test]
    fn test_missing_override_directory_is_error() {
        let result = ThemeEngine::with_overrides(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(ThemeError::NotFound(_))));
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let engine = ThemeEngine::new().unwrap();
        let err = engine.render("nope.html", &TeraContext::new()).unwrap_err();
        assert!(matches!(err, ThemeError::TemplateError(_)));
    }
}
