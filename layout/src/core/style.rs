//! This module represents the style of the lines and circles that are drawn.

#[derive(Clone, Debug)]
pub struct StyleAttr {
    pub line_color: String,
    pub line_width: f64,
    pub fill_color: Option<String>,
}

impl StyleAttr {
    pub fn new(line_color: &str, line_width: f64, fill_color: Option<&str>) -> Self {
        Self {
            line_color: line_color.to_string(),
            line_width,
            fill_color: fill_color.map(|c| c.to_string()),
        }
    }

    /// The style of the edges.
    pub fn edge() -> Self {
        StyleAttr::new("black", 0.1, None)
    }

    /// The style of the real nodes.
    pub fn node() -> Self {
        StyleAttr::new("black", 0.2, Some("red"))
    }
}
