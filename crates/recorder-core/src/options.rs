//! Render options shared by both rendering modes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// A `<meta name=... content=...>` entry for the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Head content for the document shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadOptions {
    /// Page title. Omitted from the head when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta tags, rendered in order.
    #[serde(default)]
    pub meta: Vec<MetaTag>,
}

/// Options understood by the renderer.
///
/// Entries forward these unchanged; the renderer validates them before
/// producing any output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Base path for built assets. Must begin and end with `/`.
    #[serde(default = "default_base")]
    pub base: String,

    /// Tag of the container element. `html` renders a full document.
    #[serde(default = "default_container_tag")]
    pub container_tag: String,

    /// Attributes on the container element.
    #[serde(default = "default_container_attributes")]
    pub container_attributes: BTreeMap<String, String>,

    /// Document head content.
    #[serde(default)]
    pub head: HeadOptions,
}

fn default_base() -> String {
    "/build/".to_string()
}

fn default_container_tag() -> String {
    "html".to_string()
}

fn default_container_attributes() -> BTreeMap<String, String> {
    BTreeMap::from([("lang".to_string(), "en-us".to_string())])
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base: default_base(),
            container_tag: default_container_tag(),
            container_attributes: default_container_attributes(),
            head: HeadOptions::default(),
        }
    }
}

impl RenderOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset base path.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Set the container tag.
    pub fn with_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = tag.into();
        self
    }

    /// Set a container attribute.
    pub fn with_container_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.container_attributes.insert(name.into(), value.into());
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.head.title = Some(title.into());
        self
    }

    /// Add a meta tag.
    pub fn with_meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.head.meta.push(MetaTag {
            name: name.into(),
            content: content.into(),
        });
        self
    }

    /// Whether the container renders a full HTML document.
    pub fn is_document(&self) -> bool {
        self.container_tag == "html"
    }

    /// Container attributes in render order, including `data-base`.
    pub fn container_attribute_list(&self) -> Vec<(String, String)> {
        let mut attributes: Vec<(String, String)> = self
            .container_attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        attributes.push(("data-base".to_string(), self.base.clone()));
        attributes
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(RenderError::InvalidOptions(format!(
                "base must begin and end with '/': {:?}",
                self.base
            )));
        }

        if !is_valid_tag(&self.container_tag) {
            return Err(RenderError::InvalidOptions(format!(
                "invalid container tag: {:?}",
                self.container_tag
            )));
        }

        if let Some(name) = self
            .container_attributes
            .keys()
            .find(|name| !is_valid_attribute_name(name))
        {
            return Err(RenderError::InvalidOptions(format!(
                "invalid container attribute name: {:?}",
                name
            )));
        }

        if let Some(tag) = self
            .head
            .meta
            .iter()
            .find(|tag| tag.name.trim().is_empty())
        {
            return Err(RenderError::InvalidOptions(format!(
                "meta tag with empty name (content {:?})",
                tag.content
            )));
        }

        Ok(())
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        _ => false,
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
