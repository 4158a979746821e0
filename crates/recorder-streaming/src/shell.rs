//! Shell template abstraction.

use recorder_core::{escape_html, open_tag, HeadOptions, RenderOptions};

/// Head content for the shell.
#[derive(Debug, Clone, Default)]
pub struct HeadContent {
    /// Page title.
    pub title: Option<String>,
    /// Meta tags.
    pub meta: Vec<(String, String)>,
}

impl HeadContent {
    /// Render head content to HTML.
    pub fn render(&self) -> String {
        let mut html = String::from("<meta charset=\"utf-8\">\n");

        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        }

        for (name, content) in &self.meta {
            html.push_str(&format!(
                r#"<meta name="{}" content="{}">"#,
                escape_html(name),
                escape_html(content)
            ));
            html.push('\n');
        }

        html
    }
}

impl From<&HeadOptions> for HeadContent {
    fn from(head: &HeadOptions) -> Self {
        Self {
            title: head.title.clone(),
            meta: head
                .meta
                .iter()
                .map(|m| (m.name.clone(), m.content.clone()))
                .collect(),
        }
    }
}

/// The document parts surrounding the root component.
#[derive(Debug, Clone)]
pub struct Shell {
    opening: String,
    closing: String,
}

impl Shell {
    /// Build the shell for validated render options.
    ///
    /// An `html` container yields a full document with doctype, head and
    /// body. Any other container yields a bare element for embedding.
    pub fn from_options(options: &RenderOptions) -> Self {
        let attributes = options.container_attribute_list();
        let container = open_tag(&options.container_tag, &attributes);

        if !options.is_document() {
            return Self {
                opening: container,
                closing: format!("</{}>", options.container_tag),
            };
        }

        let mut opening = String::from("<!DOCTYPE html>\n");
        opening.push_str(&container);
        opening.push_str("\n<head>\n");
        opening.push_str(&HeadContent::from(&options.head).render());
        opening.push_str("</head>\n<body>\n");

        Self {
            opening,
            closing: "\n</body>\n</html>\n".to_string(),
        }
    }

    /// Render the opening part of the shell (before the root).
    pub fn render_opening(&self) -> &str {
        &self.opening
    }

    /// Render the closing part of the shell (after the root).
    pub fn render_closing(&self) -> &str {
        &self.closing
    }

    /// Wrap a rendered body in the shell.
    pub fn wrap(&self, body: &str) -> String {
        let mut html = String::with_capacity(self.opening.len() + body.len() + self.closing.len());
        html.push_str(&self.opening);
        html.push_str(body);
        html.push_str(&self.closing);
        html
    }
}
