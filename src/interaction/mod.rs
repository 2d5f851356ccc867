use serde::{Deserialize, Serialize};

use crate::render::{
    HoverRegion, RenderFrame, TOOLTIP_POINTER_OFFSET_PX, TooltipContent, escape_xml,
};

/// Public tooltip state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    /// Page-space position of the tooltip's top-left corner.
    pub left_px: f64,
    pub top_px: f64,
    pub content: Option<TooltipContent>,
}

impl TooltipState {
    /// Tooltip markup: the title, a line break, then `Percentage: {detail}`.
    ///
    /// Empty when no content has been shown yet.
    #[must_use]
    pub fn html(&self) -> String {
        self.content
            .as_ref()
            .map(|content| {
                format!(
                    "{}<br>Percentage: {}",
                    escape_xml(&content.title),
                    escape_xml(&content.detail)
                )
            })
            .unwrap_or_default()
    }
}

/// Headless hover model for one chart frame.
///
/// Mirrors the page script: entering a hover region shows its content next
/// to the pointer, leaving every region hides the tooltip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipController {
    cursor_x: f64,
    cursor_y: f64,
    state: TooltipState,
}

impl TooltipController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    /// Hit-tests `(x, y)` in frame space and positions the tooltip at the
    /// page-space pointer `(page_x, page_y)`.
    ///
    /// Regions drawn later sit on top, so the last hit wins. Returns whether
    /// the tooltip is visible afterwards.
    pub fn on_pointer_move(
        &mut self,
        frame: &RenderFrame,
        x: f64,
        y: f64,
        page_x: f64,
        page_y: f64,
    ) -> bool {
        self.cursor_x = x;
        self.cursor_y = y;
        match hit_test(frame, x, y) {
            Some(region) => {
                self.state.visible = true;
                self.state.left_px = page_x;
                self.state.top_px = page_y - TOOLTIP_POINTER_OFFSET_PX;
                self.state.content = Some(region.tooltip.clone());
            }
            None => self.state.visible = false,
        }
        self.state.visible
    }

    /// Hides the tooltip; the last content is kept for fade-out.
    pub fn on_pointer_leave(&mut self) {
        self.state.visible = false;
    }
}

/// Topmost hover region under `(x, y)`.
#[must_use]
pub fn hit_test(frame: &RenderFrame, x: f64, y: f64) -> Option<&HoverRegion> {
    frame
        .hover_regions
        .iter()
        .rev()
        .find(|region| region.shape.contains(x, y))
}
