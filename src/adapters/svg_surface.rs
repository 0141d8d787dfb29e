//! SVG rendering surface.
//!
//! Serialises a [`Frame`] into a standalone SVG document, one `<g>` per
//! layer run, and either writes it to a file or keeps it in memory.

use crate::domain::error::ChartError;
use crate::domain::render::{DrawCommand, Frame, Layer, TextAnchor};
use crate::ports::surface_port::RenderSurface;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const DASH_PATTERN: &str = "4 3";
const FONT_FAMILY: &str = "sans-serif";

pub struct SvgSurface {
    path: Option<PathBuf>,
    last: Option<String>,
}

impl SvgSurface {
    /// Writes each presented frame to `path`, replacing the previous one.
    pub fn to_file(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            last: None,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            last: None,
        }
    }

    /// The document produced by the most recent `present`.
    pub fn svg(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl RenderSurface for SvgSurface {
    fn present(&mut self, frame: &Frame) -> Result<(), ChartError> {
        let svg = to_svg(frame);
        if let Some(path) = &self.path {
            fs::write(path, &svg).map_err(|e| ChartError::Output {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            info!(path = %path.display(), primitives = frame.primitives.len(), "wrote SVG chart");
        }
        self.last = Some(svg);
        Ok(())
    }
}

pub fn to_svg(frame: &Frame) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        frame.width, frame.height, frame.width, frame.height
    );
    out.push('\n');

    let mut current: Option<Layer> = None;
    for primitive in &frame.primitives {
        if current != Some(primitive.layer) {
            if current.is_some() {
                out.push_str("</g>\n");
            }
            out.push_str(&format!(r#"<g class="{}">"#, primitive.layer.name()));
            out.push('\n');
            current = Some(primitive.layer);
        }
        out.push_str(&element(&primitive.command));
        out.push('\n');
    }
    if current.is_some() {
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn element(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x,
            y,
            width,
            height,
            escape(fill)
        ),
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
            dashed,
        } => format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"{}/>"#,
            x1,
            y1,
            x2,
            y2,
            escape(stroke),
            width,
            dash(*dashed)
        ),
        DrawCommand::Polyline {
            points,
            stroke,
            width,
            dashed,
        } => {
            let points: Vec<String> = points
                .iter()
                .map(|(x, y)| format!("{:.1},{:.1}", x, y))
                .collect();
            format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
                points.join(" "),
                escape(stroke),
                width,
                dash(*dashed)
            )
        }
        DrawCommand::Text {
            x,
            y,
            text,
            size,
            fill,
            anchor,
        } => format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            FONT_FAMILY,
            size,
            escape(fill),
            anchor_name(*anchor),
            escape(text)
        ),
    }
}

fn dash(dashed: bool) -> String {
    if dashed {
        format!(r#" stroke-dasharray="{}""#, DASH_PATTERN)
    } else {
        String::new()
    }
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_frame() -> Frame {
        let mut frame = Frame::new(400.0, 300.0);
        frame.push(
            Layer::Background,
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 300.0,
                fill: "white".into(),
            },
        );
        frame.push(
            Layer::Overlay,
            DrawCommand::Polyline {
                points: vec![(10.0, 20.0), (30.0, 40.5)],
                stroke: "blue".into(),
                width: 1.0,
                dashed: true,
            },
        );
        frame.push(
            Layer::Title,
            DrawCommand::Text {
                x: 8.0,
                y: 16.0,
                text: "AT&T <daily>".into(),
                size: 14.0,
                fill: "black".into(),
                anchor: TextAnchor::Start,
            },
        );
        frame
    }

    #[test]
    fn document_has_dimensions() {
        let svg = to_svg(&sample_frame());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="400""#));
        assert!(svg.contains(r#"viewBox="0 0 400 300""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn dashed_polyline_gets_dasharray() {
        let svg = to_svg(&sample_frame());
        assert!(svg.contains(r#"points="10.0,20.0 30.0,40.5""#));
        assert!(svg.contains(r#"stroke-dasharray="4 3""#));
    }

    #[test]
    fn text_is_escaped() {
        let svg = to_svg(&sample_frame());
        assert!(svg.contains("AT&amp;T &lt;daily&gt;"));
        assert!(svg.contains(r#"text-anchor="start""#));
    }

    #[test]
    fn layers_are_grouped() {
        let svg = to_svg(&sample_frame());
        assert_eq!(svg.matches("<g ").count(), 3);
        assert_eq!(svg.matches("</g>").count(), 3);
        assert!(svg.contains(r#"<g class="overlay">"#));
    }

    #[test]
    fn empty_frame_is_bare_document() {
        let svg = to_svg(&Frame::new(100.0, 100.0));
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn present_keeps_last_document() {
        let mut surface = SvgSurface::in_memory();
        assert!(surface.svg().is_none());
        surface.present(&sample_frame()).unwrap();
        assert!(surface.svg().unwrap().contains("<polyline"));
    }

    #[test]
    fn present_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        let mut surface = SvgSurface::to_file(path.clone());

        surface.present(&sample_frame()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(Some(written.as_str()), surface.svg());
    }

    #[test]
    fn present_reports_unwritable_path() {
        let mut surface = SvgSurface::to_file(PathBuf::from("/nonexistent/dir/chart.svg"));
        match surface.present(&sample_frame()) {
            Err(ChartError::Output { path, .. }) => assert!(path.contains("chart.svg")),
            other => panic!("expected Output error, got {:?}", other),
        }
    }
}
