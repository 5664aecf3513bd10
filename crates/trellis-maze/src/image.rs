//! Read-only pixel access for maze images.
//!
//! Decoding image files is left to the caller: anything that can report its
//! dimensions and a packed `0xRRGGBB` colour per pixel can implement
//! [`PixelSource`]. [`Bitmap`] is a plain in-memory implementation, with an
//! ASCII-art constructor that is handy for fixtures.

use crate::error::MazeError;

/// Packed white, the default background (open) colour.
pub const WHITE: u32 = 0x00FF_FFFF;
/// Packed black, used for walls by [`Bitmap::from_ascii`].
pub const BLACK: u32 = 0x0000_0000;
/// Bits of a packed pixel that carry colour. Alpha is ignored.
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// An image the maze builder can read.
pub trait PixelSource {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Packed colour at `(x, y)`, or `None` when out of bounds.
    ///
    /// Implementations may carry alpha in the top byte; only
    /// [`RGB_MASK`] bits are compared.
    fn pixel(&self, x: usize, y: usize) -> Option<u32>;
}

/// Row-major in-memory image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::SizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, MazeError> {
        let expected = width.checked_mul(height).ok_or(MazeError::SizeMismatch {
            expected: usize::MAX,
            actual: pixels.len(),
        })?;
        if pixels.len() != expected {
            return Err(MazeError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Render ASCII art where every character becomes a `scale` x `scale`
    /// block: `#` is a wall, any other non-whitespace character is open.
    ///
    /// Lines are trimmed and blank lines skipped, so fixtures may be
    /// indented.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::SizeMismatch`] if the lines differ in length.
    pub fn from_ascii(art: &str, scale: usize) -> Result<Self, MazeError> {
        let rows: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let columns = rows.first().map_or(0, |row| row.chars().count());
        if let Some(ragged) = rows.iter().find(|row| row.chars().count() != columns) {
            return Err(MazeError::SizeMismatch {
                expected: columns,
                actual: ragged.chars().count(),
            });
        }

        let mut bitmap = Self::filled(columns * scale, rows.len() * scale, BLACK);
        for (row, line) in rows.iter().enumerate() {
            for (column, ch) in line.chars().enumerate() {
                if ch != '#' {
                    bitmap.fill_block(column * scale, row * scale, scale, WHITE);
                }
            }
        }
        Ok(bitmap)
    }

    /// Set a single pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    fn fill_block(&mut self, x0: usize, y0: usize, size: usize, color: u32) {
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                self.set(x, y, color);
            }
        }
    }
}

impl PixelSource for Bitmap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        assert!(Bitmap::from_vec(2, 2, vec![WHITE; 4]).is_ok());
        assert_eq!(
            Bitmap::from_vec(2, 2, vec![WHITE; 3]),
            Err(MazeError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn pixel_lookup_is_bounds_checked() {
        let mut bitmap = Bitmap::filled(3, 2, BLACK);
        bitmap.set(2, 1, WHITE);
        bitmap.set(9, 9, WHITE);
        assert_eq!(bitmap.pixel(2, 1), Some(WHITE));
        assert_eq!(bitmap.pixel(0, 0), Some(BLACK));
        assert_eq!(bitmap.pixel(3, 0), None);
        assert_eq!(bitmap.pixel(0, 2), None);
    }

    #[test]
    fn ascii_art_scales_blocks() {
        let bitmap = Bitmap::from_ascii(
            "
            #.
            ..
            ",
            2,
        )
        .expect("valid art");
        assert_eq!((bitmap.width(), bitmap.height()), (4, 4));
        assert_eq!(bitmap.pixel(0, 0), Some(BLACK));
        assert_eq!(bitmap.pixel(1, 1), Some(BLACK));
        assert_eq!(bitmap.pixel(2, 0), Some(WHITE));
        assert_eq!(bitmap.pixel(0, 3), Some(WHITE));
    }

    #[test]
    fn ragged_ascii_is_rejected() {
        let err = Bitmap::from_ascii("###\n##\n", 1).expect_err("ragged");
        assert_eq!(
            err,
            MazeError::SizeMismatch {
                expected: 3,
                actual: 2
            }
        );
    }
}
