use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::svg_renderer::escape_xml;

/// Offset between the pointer and the tooltip's top edge, in pixels.
pub const TOOLTIP_POINTER_OFFSET_PX: f64 = 28.0;

const TOOLTIP_SCRIPT: &str = r#"(function () {
  var tooltip = document.getElementById(TOOLTIP_ID);
  if (!tooltip) { return; }
  document.querySelectorAll("g.hover-region").forEach(function (region) {
    region.addEventListener("mouseover", function (event) {
      tooltip.textContent = "";
      tooltip.appendChild(document.createTextNode(region.dataset.tooltipTitle));
      tooltip.appendChild(document.createElement("br"));
      tooltip.appendChild(document.createTextNode("Percentage: " + region.dataset.tooltipDetail));
      tooltip.style.left = event.pageX + "px";
      tooltip.style.top = (event.pageY - TOOLTIP_OFFSET) + "px";
      tooltip.style.opacity = 1;
    });
    region.addEventListener("mouseout", function () {
      tooltip.style.opacity = 0;
    });
  });
})();"#;

/// Static page hosting every chart in its own container plus the shared
/// floating tooltip element.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlPage {
    title: String,
    tooltip_id: String,
    containers: IndexMap<String, String>,
}

impl HtmlPage {
    #[must_use]
    pub fn new(title: impl Into<String>, tooltip_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tooltip_id: tooltip_id.into(),
            containers: IndexMap::new(),
        }
    }

    /// Places `svg` into the container `container_id`, replacing any
    /// previous content of that container.
    pub fn mount(&mut self, container_id: impl Into<String>, svg: impl Into<String>) {
        self.containers.insert(container_id.into(), svg.into());
    }

    /// Empties a container while keeping its slot in the page.
    pub fn clear(&mut self, container_id: &str) {
        if let Some(content) = self.containers.get_mut(container_id) {
            content.clear();
        }
    }

    #[must_use]
    pub fn container(&self, container_id: &str) -> Option<&str> {
        self.containers.get(container_id).map(String::as_str)
    }

    pub fn container_ids(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_xml(&self.title)));
        html.push_str("</head>\n<body>\n");

        for (container_id, svg) in &self.containers {
            html.push_str(&format!(
                "<div id=\"{}\" class=\"chart-container\">\n{}</div>\n",
                escape_xml(container_id),
                svg
            ));
        }

        html.push_str(&format!(
            "<div id=\"{}\" class=\"tooltip\" style=\"position: absolute; opacity: 0;\"></div>\n",
            escape_xml(&self.tooltip_id)
        ));
        let script = TOOLTIP_SCRIPT
            .replace(
                "TOOLTIP_ID",
                &serde_json::to_string(&self.tooltip_id).unwrap_or_default(),
            )
            .replace("TOOLTIP_OFFSET", &TOOLTIP_POINTER_OFFSET_PX.to_string());
        html.push_str(&format!("<script>\n{script}\n</script>\n"));
        html.push_str("</body>\n</html>\n");
        html
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_html()).map_err(ChartError::Io)?;
        debug!(path = %path.display(), containers = self.containers.len(), "page written");
        Ok(())
    }
}
