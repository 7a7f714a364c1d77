use crate::error::{CubeError, Result};
use image::RgbImage;
use rayon::prelude::*;

/// Map image heights with a known cube reconstruction.
///
/// The height doubles as the cube edge length. For each entry `h - 1`
/// divides 255 evenly, so quantizing a full-intensity channel lands exactly
/// on the last cell.
pub const CUBE_HEIGHTS: [u32; 8] = [2, 4, 6, 16, 18, 52, 86, 256];

/// A 3-D lookup cube reconstructed from a map image.
///
/// The map's flat row-major RGB buffer is read as a strided
/// (green, red, blue) view: entry `(gi, ri, bi)` is the pixel at row `gi`,
/// column `ri * edge + bi`. That is the shape the blocked-grid layout paints,
/// so any map built at a blocked step can be applied back, as can the same
/// image after hand-editing its swatches in a paint program.
///
/// ```
/// use cubesheet::{build_map_image, CubeLut, Step};
///
/// let map = build_map_image(Step::new(51)?)?;
/// let lut = CubeLut::from_image(&map)?;
/// // Grading the map through itself changes nothing.
/// assert_eq!(lut.apply_image(&map), map);
/// # Ok::<(), cubesheet::CubeError>(())
/// ```
pub struct CubeLut {
    /// Levels per channel, equal to the source map's height.
    edge: usize,
    /// Divisor quantizing an input channel to a cube index, `255/(edge-1)`.
    divisor: u8,
    /// The map's raw pixel buffer, `edge^3` RGB triples.
    data: Vec<u8>,
}

impl CubeLut {
    /// Reconstructs the cube hidden in a map image.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::UnknownMapHeight`] when the height is not in
    /// [`CUBE_HEIGHTS`], and [`CubeError::MalformedMap`] when the width is
    /// not `height * height` (the buffer would not hold a full cube).
    pub fn from_image(map: &RgbImage) -> Result<Self> {
        let height = map.height();
        if !CUBE_HEIGHTS.contains(&height) {
            return Err(CubeError::UnknownMapHeight(height));
        }
        let expected = height * height;
        if map.width() != expected {
            return Err(CubeError::MalformedMap {
                width: map.width(),
                height,
                expected,
            });
        }

        Ok(CubeLut {
            edge: height as usize,
            divisor: (255 / (height - 1)) as u8,
            data: map.as_raw().clone(),
        })
    }

    /// Levels per channel of this cube.
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Looks up the output color for one input color.
    ///
    /// Each channel is quantized by truncating division, then clamped to the
    /// last cell so a boundary value can never index past the cube.
    pub fn lookup(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let gi = quantize(g, self.divisor, self.edge);
        let ri = quantize(r, self.divisor, self.edge);
        let bi = quantize(b, self.divisor, self.edge);
        let offset = ((gi * self.edge + ri) * self.edge + bi) * 3;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Remaps every pixel of `input` through the cube.
    ///
    /// Pixels are independent, so the remap runs in parallel over 3-byte
    /// chunks of the output buffer while the cube is shared read-only.
    pub fn apply_image(&self, input: &RgbImage) -> RgbImage {
        let (width, height) = input.dimensions();
        let mut buf = input.as_raw().clone();

        buf.par_chunks_mut(3).for_each(|pixel| {
            let rgb = self.lookup(pixel[0], pixel[1], pixel[2]);
            pixel.copy_from_slice(&rgb);
        });

        RgbImage::from_raw(width, height, buf).expect("output buffer matches input dimensions")
    }
}

fn quantize(channel: u8, divisor: u8, edge: usize) -> usize {
    ((channel / divisor) as usize).min(edge - 1)
}
