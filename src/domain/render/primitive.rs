//! Draw primitives emitted by the render pipeline.

/// Drawing layer, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Grid,
    Candle,
    Overlay,
    Volume,
    Macd,
    Rsi,
    Placeholder,
    Legend,
    Title,
}

impl Layer {
    pub fn name(self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Grid => "grid",
            Layer::Candle => "candle",
            Layer::Overlay => "overlay",
            Layer::Volume => "volume",
            Layer::Macd => "macd",
            Layer::Rsi => "rsi",
            Layer::Placeholder => "placeholder",
            Layer::Legend => "legend",
            Layer::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        width: f64,
        dashed: bool,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: String,
        width: f64,
        dashed: bool,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        fill: String,
        anchor: TextAnchor,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub layer: Layer,
    pub command: DrawCommand,
}

/// One rendered chart: an ordered list of primitives over a surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    pub placeholder: bool,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
            placeholder: false,
        }
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.primitives.push(Primitive { layer, command });
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.primitives
            .iter()
            .filter(move |p| p.layer == layer)
            .map(|p| &p.command)
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).count()
    }

    /// All text drawn on the frame, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| match &p.command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
