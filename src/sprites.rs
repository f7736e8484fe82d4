use crate::config::Display;
use crate::error::Error;
use crate::geo::{Point, Rect};
use line_drawing::Bresenham;
use std::rc::Rc;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// A decoded image.
///
/// Pixels are RGBA with premultiplied alpha, the same layout `tiny_skia` uses, so images move in
/// and out of pixmaps without conversion. The pixel data is reference counted; cloning an `Image`
/// is cheap and every sprite showing the same frame shares one buffer.
#[derive(Clone, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Rc<[u8]>,
}

/// Drawables can be blitted to the pixel buffer.
pub trait Drawable {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixels(&self) -> &[u8];
}

/// Anything the host draws: the image to show and where to show it.
pub trait Sprite {
    /// The currently displayed image.
    fn image(&self) -> &Image;

    /// Bounding rectangle of the displayed image, in display coordinates.
    fn rect(&self) -> Rect;
}

impl Image {
    /// Create an image from straight (non-premultiplied) RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] when either dimension is 0 or `rgba` does not hold exactly
    /// `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, mut rgba: Vec<u8>) -> Result<Image, Error> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return Err(Error::InvalidSize { width, height });
        }

        for pixel in rgba.chunks_exact_mut(4) {
            let alpha = pixel[3];
            for channel in &mut pixel[..3] {
                *channel = premultiply(*channel, alpha);
            }
        }

        Ok(Image {
            width,
            height,
            pixels: Rc::from(rgba),
        })
    }

    /// Create an image filled with a single straight RGBA color.
    ///
    /// Handy for placeholders and labels drawn without a font.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Image {
        let [r, g, b, a] = color;
        let pixel = [premultiply(r, a), premultiply(g, a), premultiply(b, a), a];
        let pixels = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect::<Vec<u8>>();

        Image {
            width,
            height,
            pixels: Rc::from(pixels),
        }
    }

    /// Copy the image into a `tiny_skia` pixmap.
    pub(crate) fn to_pixmap(&self) -> Result<Pixmap, Error> {
        let invalid = || Error::InvalidSize {
            width: self.width,
            height: self.height,
        };
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(invalid)?;
        pixmap.data_mut().copy_from_slice(&self.pixels);

        Ok(pixmap)
    }

    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Image {
        let width = pixmap.width();
        let height = pixmap.height();

        Image {
            width,
            height,
            pixels: Rc::from(pixmap.take()),
        }
    }
}

impl Drawable for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}

/// Rotate an image counter-clockwise by `degrees` around its center.
///
/// The result is sized to the bounding box of the rotated image, so it grows for angles that are
/// not multiples of 90 degrees. Uncovered corners are transparent.
pub fn rotate(image: &Image, degrees: i32) -> Result<Image, Error> {
    if degrees % 360 == 0 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let radians = (degrees as f32).to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());

    // Shave float noise so right angles do not gain a pixel
    let width = (w * cos + h * sin - 1e-3).ceil().max(1.0) as u32;
    let height = (w * sin + h * cos - 1e-3).ceil().max(1.0) as u32;

    let source = image.to_pixmap()?;
    let mut pixmap = Pixmap::new(width, height).ok_or(Error::InvalidSize { width, height })?;

    // `tiny_skia` rotates clockwise in screen space
    let transform = Transform::from_rotate_at(-(degrees as f32), w / 2.0, h / 2.0)
        .post_translate((width as f32 - w) / 2.0, (height as f32 - h) / 2.0);
    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint::default(),
        transform,
        None,
    );

    Ok(Image::from_pixmap(pixmap))
}

/// Draw a sprite to the pixel buffer at its bounding rectangle.
pub fn draw<S>(screen: &mut [u8], display: &Display, sprite: &S)
where
    S: Sprite + ?Sized,
{
    blit(screen, display, &sprite.rect().p1, sprite.image());
}

/// Blit a drawable to the pixel buffer.
///
/// The screen is an opaque RGBA buffer of `display.width * display.height` pixels. Drawables are
/// composited with source-over blending and clipped to the display.
pub fn blit<D>(screen: &mut [u8], display: &Display, dest: &Point, drawable: &D)
where
    D: Drawable + ?Sized,
{
    let (width, height) = (drawable.width() as i32, drawable.height() as i32);
    let pixels = drawable.pixels();

    // Visible span of the drawable, in drawable coordinates
    let x0 = (-dest.x).max(0);
    let y0 = (-dest.y).max(0);
    let x1 = width.min(display.width - dest.x);
    let y1 = height.min(display.height - dest.y);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let span = (x1 - x0) as usize * 4;
    for y in y0..y1 {
        let s = (y * width + x0) as usize * 4;
        let i = ((dest.y + y) * display.width + dest.x + x0) as usize * 4;

        let zipped = screen[i..i + span]
            .chunks_exact_mut(4)
            .zip(pixels[s..s + span].chunks_exact(4));
        for (dst, src) in zipped {
            let inverse = 255 - src[3] as u16;
            for c in 0..4 {
                dst[c] = src[c].saturating_add(((dst[c] as u16 * inverse + 127) / 255) as u8);
            }
        }
    }
}

/// Draw a line to the pixel buffer using Bresenham's algorithm.
pub fn line(screen: &mut [u8], display: &Display, p1: &Point, p2: &Point, color: [u8; 4]) {
    for (x, y) in Bresenham::new((p1.x, p1.y), (p2.x, p2.y)) {
        if x < 0 || y < 0 || x >= display.width || y >= display.height {
            continue;
        }
        let i = (x + y * display.width) as usize * 4;

        screen[i..i + 4].copy_from_slice(&color);
    }
}

/// Draw the outline of a rectangle to the pixel buffer.
pub fn outline(screen: &mut [u8], display: &Display, rect: &Rect, color: [u8; 4]) {
    let p1 = rect.p1;
    let p2 = Point::new(rect.p2.x - 1, rect.p2.y - 1);
    let p3 = Point::new(p1.x, p2.y);
    let p4 = Point::new(p2.x, p1.y);

    line(screen, display, &p1, &p3, color);
    line(screen, display, &p3, &p2, color);
    line(screen, display, &p2, &p4, color);
    line(screen, display, &p4, &p1, color);
}
