//! HTML renderer
//!
//! Writes a standalone page that loads mermaid.js and renders the diagram
//! in the browser.

use crate::render::{detect_diagram_type, DiagramRenderer, RenderError, RenderHint, RenderOutput};
use std::path::PathBuf;
use tracing::debug;

/// mermaid.js ES module loaded by the generated page
const MERMAID_MODULE_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs";

/// Default output file
pub const DEFAULT_OUTPUT: &str = "lemmatree.html";

/// Standalone HTML page renderer
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    output: PathBuf,
    title: String,
}

impl HtmlRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            title: "Lemma Dependency Flowchart".to_string(),
        }
    }

    /// Page title (typically the document name)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the page contents
    pub fn page(&self, diagram: &str, hint: &RenderHint) -> String {
        let title = escape_html(&self.title);
        let body = escape_html(diagram);

        let mut page = String::with_capacity(body.len() * 2 + 1024);
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", title));
        page.push_str("<style>\n");
        page.push_str("  body { font-family: system-ui, sans-serif; margin: 2rem; }\n");
        page.push_str(&format!(
            "  .diagram {{ height: {}px; overflow: auto; border: 1px solid #ddd; }}\n",
            hint.height
        ));
        page.push_str("  pre.source { background: #f6f8fa; padding: 1rem; overflow: auto; }\n");
        page.push_str("</style>\n</head>\n<body>\n");
        page.push_str(&format!("<h1>{}</h1>\n", title));
        page.push_str("<div class=\"diagram\">\n<pre class=\"mermaid\">\n");
        page.push_str(&body);
        page.push_str("\n</pre>\n</div>\n");
        page.push_str(
            "<p><small>The accuracy of the flowchart depends on the model's interpretation of \
             the LaTeX structure and the explicit references in the text.</small></p>\n",
        );
        page.push_str("<details>\n<summary>Mermaid code</summary>\n<pre class=\"source\">");
        page.push_str(&body);
        page.push_str("</pre>\n</details>\n");
        page.push_str("<script type=\"module\">\n");
        page.push_str(&format!("  import mermaid from '{}';\n", MERMAID_MODULE_URL));
        page.push_str("  mermaid.initialize({ startOnLoad: true });\n");
        page.push_str("</script>\n</body>\n</html>\n");
        page
    }
}

impl DiagramRenderer for HtmlRenderer {
    fn render(&self, diagram: &str, hint: &RenderHint) -> Result<RenderOutput, RenderError> {
        let kind = detect_diagram_type(diagram)?;
        debug!(kind, output = %self.output.display(), "writing HTML page");

        std::fs::write(&self.output, self.page(diagram, hint))?;
        Ok(RenderOutput {
            path: self.output.clone(),
        })
    }

    fn name(&self) -> &str {
        "html"
    }
}

/// Escape text for HTML element content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
