use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::WikiError;
use crate::services::LinkRewriter;
use crate::types::RenderablePage;
use crate::utils::escape_html;

/// Names of the templates loaded at startup; each lives at `{dir}/{name}.html`
pub const TEMPLATE_NAMES: [&str; 2] = ["edit", "view"];

const HELPER_GENERATE_LINKS: &str = "generateLinks";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Field { helper: Option<Helper>, field: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Helper {
    GenerateLinks,
}

/// A named template parsed into literal text and `{{ ... }}` actions.
#[derive(Debug, Clone)]
struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    fn parse(name: &str, source: &str) -> Result<Self, WikiError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                WikiError::Template(format!("template {name}: unclosed action"))
            })?;
            segments.push(Self::parse_action(name, &after[..end])?);
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { name: name.to_string(), segments })
    }

    fn parse_action(name: &str, action: &str) -> Result<Segment, WikiError> {
        let words: Vec<&str> = action.split_whitespace().collect();
        match words.as_slice() {
            [field] => Ok(Segment::Field { helper: None, field: field.to_string() }),
            [helper, field] if *helper == HELPER_GENERATE_LINKS => Ok(Segment::Field {
                helper: Some(Helper::GenerateLinks),
                field: field.to_string(),
            }),
            [helper, _] => Err(WikiError::Template(format!(
                "template {name}: function \"{helper}\" not defined"
            ))),
            _ => Err(WikiError::Template(format!(
                "template {name}: malformed action \"{}\"",
                action.trim()
            ))),
        }
    }
}

/// The set of page templates, loaded once and shared read-only.
///
/// `Title` is escaped on output. `Body` is trusted HTML and inserted as is.
/// The `generateLinks` helper runs the bracket-link rewriter over a field.
pub struct TemplateSet {
    templates: HashMap<String, Template>,
    links: LinkRewriter,
}

impl TemplateSet {
    /// Load every template in [`TEMPLATE_NAMES`] from `dir`
    pub fn load(dir: &Path, links: LinkRewriter) -> Result<Self, WikiError> {
        let mut sources = Vec::with_capacity(TEMPLATE_NAMES.len());
        for name in TEMPLATE_NAMES {
            let path = dir.join(format!("{name}.html"));
            let source = fs::read_to_string(&path).map_err(|e| {
                WikiError::Template(format!("reading {}: {e}", path.display()))
            })?;
            log::debug!("Loaded template '{}' from {:?}", name, path);
            sources.push((name.to_string(), source));
        }
        Self::from_sources(sources, links)
    }

    /// Build a template set from in-memory `(name, source)` pairs
    pub fn from_sources<I, N, S>(sources: I, links: LinkRewriter) -> Result<Self, WikiError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        let mut templates = HashMap::new();
        for (name, source) in sources {
            let name = name.into();
            let template = Template::parse(&name, source.as_ref())?;
            templates.insert(name, template);
        }
        Ok(Self { templates, links })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Execute the named template against a page
    pub fn render(&self, name: &str, page: &RenderablePage) -> Result<String, WikiError> {
        let template = self.templates.get(name).ok_or_else(|| {
            WikiError::Template(format!("no such template \"{name}\""))
        })?;

        let mut out = String::new();
        for segment in &template.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { helper, field } => {
                    let value = self.field_value(&template.name, page, field)?;
                    match helper {
                        Some(Helper::GenerateLinks) => {
                            out.push_str(&self.links.generate_links_str(&value))
                        }
                        None => out.push_str(&value),
                    }
                }
            }
        }
        Ok(out)
    }

    fn field_value(
        &self,
        template: &str,
        page: &RenderablePage,
        field: &str,
    ) -> Result<String, WikiError> {
        match field {
            "Title" => Ok(escape_html(&page.title)),
            "Body" => Ok(page.body.clone()),
            other => Err(WikiError::Template(format!(
                "template {template}: can't evaluate field {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(title: &str, body: &str) -> RenderablePage {
        RenderablePage { title: title.to_string(), body: body.to_string() }
    }

    fn set(sources: &[(&str, &str)]) -> Result<TemplateSet, WikiError> {
        TemplateSet::from_sources(sources.iter().copied(), LinkRewriter::new().unwrap())
    }

    #[test]
    fn substitutes_title_and_trusted_body() {
        let templates = set(&[("view", "<h1>{{ Title }}</h1><div>{{Body}}</div>")]).unwrap();
        let html = templates
            .render("view", &page("Home", r#"<a href="/view/FAQ">FAQ</a>"#))
            .unwrap();
        assert_eq!(html, r#"<h1>Home</h1><div><a href="/view/FAQ">FAQ</a></div>"#);
    }

    #[test]
    fn title_is_escaped() {
        let templates = set(&[("view", "{{Title}}")]).unwrap();
        assert_eq!(templates.render("view", &page("<b>", "")).unwrap(), "&lt;b&gt;");
    }

    #[test]
    fn generate_links_helper_rewrites_field() {
        let templates = set(&[("view", "{{ generateLinks Body }}")]).unwrap();
        let html = templates.render("view", &page("Home", "go [There]")).unwrap();
        assert_eq!(html, r#"go <a href="/view/There">There</a>"#);
    }

    #[test]
    fn missing_template_is_an_error() {
        let templates = set(&[("view", "x")]).unwrap();
        let err = templates.render("edit", &page("Home", "")).unwrap_err();
        assert!(matches!(err, WikiError::Template(ref m) if m.contains("edit")));
    }

    #[test]
    fn unknown_field_fails_at_execution() {
        let templates = set(&[("view", "{{ Author }}")]).unwrap();
        let err = templates.render("view", &page("Home", "")).unwrap_err();
        assert!(matches!(err, WikiError::Template(ref m) if m.contains("Author")));
    }

    #[test]
    fn unknown_helper_and_unclosed_action_fail_at_load() {
        assert!(matches!(set(&[("view", "{{ shout Body }}")]), Err(WikiError::Template(_))));
        assert!(matches!(set(&[("view", "<p>{{ Body </p>")]), Err(WikiError::Template(_))));
        assert!(matches!(set(&[("view", "{{ }}")]), Err(WikiError::Template(_))));
    }

    #[test]
    fn load_reads_named_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "V:{{Title}}").unwrap();
        std::fs::write(dir.path().join("edit.html"), "E:{{Title}}").unwrap();

        let templates = TemplateSet::load(dir.path(), LinkRewriter::new().unwrap()).unwrap();
        assert!(templates.contains("view") && templates.contains("edit"));
        assert_eq!(templates.render("edit", &page("Home", "")).unwrap(), "E:Home");
    }

    #[test]
    fn load_fails_when_a_template_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "{{Title}}").unwrap();
        let err = TemplateSet::load(dir.path(), LinkRewriter::new().unwrap()).err().unwrap();
        assert!(matches!(err, WikiError::Template(ref m) if m.contains("edit.html")));
    }

    #[test]
    fn shipped_templates_parse_and_render() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tmpl");
        let templates = TemplateSet::load(&dir, LinkRewriter::new().unwrap()).unwrap();
        let view = templates.render("view", &page("Home", "hello")).unwrap();
        assert!(view.contains("Home") && view.contains("hello"));
        let edit = templates.render("edit", &page("Home", "hello")).unwrap();
        assert!(edit.contains("/save/Home"));
    }
}
