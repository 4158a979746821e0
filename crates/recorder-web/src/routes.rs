//! Page components.

use recorder_core::{Component, Node};

/// Heading shown on the index page.
pub const PAGE_HEADING: &str = "Qwik Mosquitto Recorder";

/// Explanatory text shown below the heading.
pub const PAGE_INTRO: &str =
    "This UI will surface MQTT messages and system status once the API layer is wired in.";

/// The index page: a heading and a placeholder paragraph.
pub fn index_page() -> Node {
    Node::element("main")
        .with_child(Node::element("h1").with_child(Node::text(PAGE_HEADING)))
        .with_child(Node::element("p").with_child(Node::text(PAGE_INTRO)))
}

/// Document root for the only route.
#[derive(Debug, Clone, Copy, Default)]
pub struct Root;

impl Component for Root {
    fn render(&self) -> Node {
        index_page()
    }
}
