use crate::error::{CubeError, Result};
use crate::rgb_cube::{rgb_to_xy, Step};
use image::{Rgb, RgbImage};

/// Builds the cheat-sheet image encoding the full quantized RGB cube.
///
/// Every sampled triple `(0..256).step_by(step)` per channel is painted at
/// the pixel position [`rgb_to_xy`] assigns it, red varying slowest and blue
/// fastest. The layout is injective on the sampled lattice, so each pixel of
/// the result holds exactly one sampled color.
///
/// ```
/// use cubesheet::{build_map_image, Step};
///
/// let map = build_map_image(Step::new(51)?)?;
/// assert_eq!(map.dimensions(), (36, 6));
/// # Ok::<(), cubesheet::CubeError>(())
/// ```
///
/// # Errors
///
/// Returns [`CubeError::UnmappedStep`] for step 16, and
/// [`CubeError::MappedPixelOutOfBounds`] if a coordinate ever lands outside
/// the image. The latter means the dimension formula and the layout disagree
/// for the step, so the build aborts with the offending color and coordinate
/// instead of clamping.
pub fn build_map_image(step: Step) -> Result<RgbImage> {
    let (width, height) = step.map_dimensions();
    let mut img = RgbImage::new(width, height);

    let s = step.get() as usize;
    for r in (0..256).step_by(s) {
        for g in (0..256).step_by(s) {
            for b in (0..256).step_by(s) {
                let color = Rgb([r as u8, g as u8, b as u8]);
                let (x, y) = rgb_to_xy(color, step)?;
                if x >= width || y >= height {
                    let Rgb([r, g, b]) = color;
                    return Err(CubeError::MappedPixelOutOfBounds {
                        r,
                        g,
                        b,
                        x,
                        y,
                        width,
                        height,
                    });
                }
                img.put_pixel(x, y, color);
            }
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb_cube::xy_to_rgb;

    #[test]
    fn dimensions_follow_the_step() {
        let map = build_map_image(Step::new(4).unwrap()).unwrap();
        assert_eq!(map.dimensions(), (512, 512));
        let map = build_map_image(Step::new(3).unwrap()).unwrap();
        assert_eq!(map.dimensions(), (7396, 86));
        let map = build_map_image(Step::new(51).unwrap()).unwrap();
        assert_eq!(map.dimensions(), (36, 6));
    }

    #[test]
    fn corner_pixels_hold_the_expected_samples() {
        let map = build_map_image(Step::new(4).unwrap()).unwrap();
        assert_eq!(*map.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*map.get_pixel(63, 0), Rgb([0, 0, 252]));
        assert_eq!(*map.get_pixel(0, 63), Rgb([0, 252, 0]));
        assert_eq!(*map.get_pixel(448, 448), Rgb([252, 0, 0]));
        assert_eq!(*map.get_pixel(511, 511), Rgb([252, 252, 252]));
    }

    #[test]
    fn every_pixel_inverts_back_to_its_own_color() {
        // The builder fills the image completely, and each pixel agrees with
        // the inverse mapping. Together with injectivity this is the
        // bijection between lattice and pixel set.
        for raw in [17, 51] {
            let step = Step::new(raw).unwrap();
            let map = build_map_image(step).unwrap();
            for (x, y, pixel) in map.enumerate_pixels() {
                assert_eq!(xy_to_rgb(x, y, step).unwrap(), *pixel);
            }
        }
    }

    #[test]
    fn step_sixteen_cannot_be_built() {
        assert_eq!(
            build_map_image(Step::new(16).unwrap()),
            Err(CubeError::UnmappedStep(16))
        );
    }
}
