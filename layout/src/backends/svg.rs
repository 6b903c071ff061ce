//! SVG rendering backend that accepts draw calls and saves the output to a file.

use crate::core::format::RenderBackend;
use crate::core::geometry::Point;
use crate::core::style::StyleAttr;

static SVG_HEADER: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

static SVG_DEFS: &str = r#"<defs>
<marker id="endarrow" markerWidth="10" markerHeight="7"
refX="10" refY="3.5" orient="auto" markerUnits="userSpaceOnUse">
<polygon points="0 0, 10 3.5, 0 7" />
</marker>
</defs>
"#;

static SVG_FOOTER: &str = "</svg>";

/// The space that is left around the drawing.
const PADDING: f64 = 5.;

pub struct SVGWriter {
    content: String,
    view_size: Point,
    counter: usize,
}

impl SVGWriter {
    pub fn new() -> SVGWriter {
        SVGWriter {
            content: String::new(),
            view_size: Point::zero(),
            counter: 0,
        }
    }
}

impl Default for SVGWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SVGWriter {
    // Grow the viewable svg window to include the point \p point plus some
    // offset \p size.
    fn grow_window(&mut self, point: Point, size: Point) {
        self.view_size.x = self.view_size.x.max(point.x + size.x + PADDING);
        self.view_size.y = self.view_size.y.max(point.y + size.y + PADDING);
    }

    /// \returns the number of shapes that were drawn.
    pub fn num_shapes(&self) -> usize {
        self.counter
    }

    pub fn finalize(&self) -> String {
        let mut result = String::new();
        result.push_str(SVG_HEADER);

        let svg_line = format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\
            \" xmlns=\"http://www.w3.org/2000/svg\" version=\"1.0\">\n",
            self.view_size.x,
            self.view_size.y,
            self.view_size.x,
            self.view_size.y
        );
        result.push_str(&svg_line);
        result.push_str(SVG_DEFS);
        result.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"white\" />\n",
            self.view_size.x, self.view_size.y
        ));
        result.push_str(&self.content);
        result.push_str(SVG_FOOTER);
        result
    }
}

impl RenderBackend for SVGWriter {
    fn draw_line(&mut self, start: Point, stop: Point, arrow: bool, look: &StyleAttr) {
        self.grow_window(start, Point::zero());
        self.grow_window(stop, Point::zero());

        let end = if arrow {
            "marker-end=\"url(#endarrow)\""
        } else {
            ""
        };
        let line = format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"{}\" \
            stroke=\"{}\" {} />\n",
            start.x, start.y, stop.x, stop.y, look.line_width, look.line_color, end
        );
        self.content.push_str(&line);
        self.counter += 1;
    }

    fn draw_circle(&mut self, xy: Point, radius: f64, look: &StyleAttr) {
        self.grow_window(xy, Point::splat(radius));
        let fill_color = look.fill_color.as_deref().unwrap_or("transparent");
        let line = format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" \
            stroke-width=\"{}\" stroke=\"{}\" />\n",
            xy.x, xy.y, radius, fill_color, look.line_width, look.line_color
        );
        self.content.push_str(&line);
        self.counter += 1;
    }
}

#[test]
fn test_svg_document() {
    let mut svg = SVGWriter::new();
    svg.draw_line(Point::new(5., 5.), Point::new(15., 25.), true, &StyleAttr::edge());
    svg.draw_circle(Point::new(15., 25.), 2., &StyleAttr::node());
    let doc = svg.finalize();
    assert_eq!(svg.num_shapes(), 2);
    assert!(doc.starts_with(SVG_HEADER));
    assert!(doc.contains("width=\"22\" height=\"32\""));
    assert!(doc.contains("marker-end=\"url(#endarrow)\""));
    assert!(doc.contains("<circle cx=\"15\" cy=\"25\" r=\"2\" fill=\"red\""));
    assert!(doc.ends_with(SVG_FOOTER));
}
