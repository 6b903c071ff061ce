//! Defines the interface between the layout and the rendering backends.

use super::{geometry::Point, style::StyleAttr};

/// This is the trait that all rendering backends need to implement.
pub trait RenderBackend {
    /// Draw a line between \p start and \p stop. If \p arrow is set then the
    /// line ends with an arrow head at \p stop.
    fn draw_line(&mut self, start: Point, stop: Point, arrow: bool, look: &StyleAttr);

    /// Draw a circle with the center \p xy, and radius \p radius.
    fn draw_circle(&mut self, xy: Point, radius: f64, look: &StyleAttr);
}
