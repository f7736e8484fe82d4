use crate::error::Error;
use crate::geo::{Point, Rect};
use crate::sprites::{Drawable, Image, Sprite};
use core::fmt;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Transform};

/// Corner radius of the button background.
const BORDER_RADIUS: f32 = 12.0;

/// Generic button with a label.
///
/// The image is composed once, from a rounded background and the label centered on it. The
/// button does nothing on its own; the game decides when it was hit.
pub struct Button {
    rect: Rect,
    image: Image,
    on_hit: Box<dyn FnMut()>,
}

impl Button {
    /// Create a button.
    ///
    /// # Arguments
    ///
    /// * `label` - Pre-rendered label, centered on the button.
    /// * `rect` - Where the button sits, in display coordinates.
    /// * `color` - Straight RGBA background color.
    /// * `on_hit` - Called every time the button is hit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] when `rect` has no area.
    pub fn new<F>(label: &Image, rect: Rect, color: [u8; 4], on_hit: F) -> Result<Button, Error>
    where
        F: FnMut() + 'static,
    {
        let (width, height) = (rect.width(), rect.height());
        let mut pixmap = Pixmap::new(width, height).ok_or(Error::InvalidSize { width, height })?;

        if let Some(path) = rounded_rect(width as f32, height as f32, BORDER_RADIUS) {
            let mut paint = Paint::default();
            let [r, g, b, a] = color;
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = true;

            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }

        // Center the label, relative to the button's own top-left corner
        let x = (width as i32 - label.width() as i32) / 2;
        let y = (height as i32 - label.height() as i32) / 2;
        let label = label.to_pixmap()?;
        pixmap.draw_pixmap(
            x,
            y,
            label.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        Ok(Button {
            rect,
            image: Image::from_pixmap(pixmap),
            on_hit: Box::new(on_hit),
        })
    }

    /// What the button does when hit.
    pub fn hit(&mut self) {
        (self.on_hit)();
    }

    /// Test whether a point (e.g. the mouse cursor) is on the button.
    pub fn contains(&self, point: &Point) -> bool {
        self.rect.contains(point)
    }
}

impl Sprite for Button {
    fn image(&self) -> &Image {
        &self.image
    }

    fn rect(&self) -> Rect {
        self.rect
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("rect", &self.rect)
            .field("image", &self.image)
            .finish_non_exhaustive()
    }
}

/// A rectangle with quadratic corners, anchored at the origin.
fn rounded_rect(width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = radius.min(width / 2.0).min(height / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(width - r, 0.0);
    pb.quad_to(width, 0.0, width, r);
    pb.line_to(width, height - r);
    pb.quad_to(width, height, width - r, height);
    pb.line_to(r, height);
    pb.quad_to(0.0, height, 0.0, height - r);
    pb.line_to(0.0, r);
    pb.quad_to(0.0, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}
