//! Output ports: where frames and hover updates go.

use crate::domain::error::ChartError;
use crate::domain::interaction::HoverInfo;
use crate::domain::render::Frame;

/// A drawing surface that can show a rendered frame.
pub trait RenderSurface {
    fn present(&mut self, frame: &Frame) -> Result<(), ChartError>;
}

/// Receives hover changes; `None` means the tooltip should close.
pub trait HoverSink {
    fn on_hover(&mut self, hover: Option<&HoverInfo>);
}
