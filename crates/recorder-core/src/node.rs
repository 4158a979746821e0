//! Document tree and component abstraction.

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["base", "br", "hr", "img", "input", "link", "meta"];

/// A node in the rendered document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with ordered attributes and children.
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
    /// Escaped text content.
    Text(String),
    /// A sequence of nodes without a wrapping element.
    Fragment(Vec<Node>),
}

impl Node {
    /// Create an element with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Add an attribute. No-op on text and fragment nodes.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.push((name.into(), value.into()));
        }
        self
    }

    /// Append a child. Text nodes ignore children.
    pub fn with_child(mut self, child: Node) -> Self {
        match &mut self {
            Self::Element { children, .. } | Self::Fragment(children) => children.push(child),
            Self::Text(_) => {}
        }
        self
    }

    /// Serialize the tree into HTML tokens in document order.
    ///
    /// Each opening tag, text run and closing tag is one token, so the
    /// streaming renderer can flush at token boundaries.
    pub fn tokens(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.push_tokens(&mut out);
        out
    }

    fn push_tokens(&self, out: &mut Vec<String>) {
        match self {
            Self::Element {
                tag,
                attributes,
                children,
            } => {
                out.push(open_tag(tag, attributes));
                if is_void(tag) {
                    return;
                }
                for child in children {
                    child.push_tokens(out);
                }
                out.push(format!("</{}>", tag));
            }
            Self::Text(content) => out.push(escape_html(content)),
            Self::Fragment(children) => {
                for child in children {
                    child.push_tokens(out);
                }
            }
        }
    }

    /// Serialize the tree to an HTML string.
    pub fn to_html(&self) -> String {
        self.tokens().concat()
    }
}

/// A unit that produces a document tree.
///
/// Components are pure: rendering the same component twice yields equal trees.
pub trait Component: Send + Sync {
    /// Produce the component's document tree.
    fn render(&self) -> Node;
}

/// Render an opening tag with escaped attribute values.
pub fn open_tag(tag: &str, attributes: &[(String, String)]) -> String {
    let mut html = format!("<{}", tag);
    for (name, value) in attributes {
        html.push_str(&format!(r#" {}="{}""#, name, escape_html(value)));
    }
    html.push('>');
    html
}

/// Check whether a tag is a void element.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// HTML escape text and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
