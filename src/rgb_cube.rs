use crate::error::{CubeError, Result};
use image::Rgb;

/// Step values a map image can be generated at.
///
/// Kept in one place so the GUI, the CLI wrappers, and validation all agree
/// on what the tool accepts.
pub const SUPPORTED_STEPS: [u16; 7] = [1, 3, 4, 5, 16, 17, 51];

/// A validated quantization step.
///
/// The step is the number of raw channel units between two sampled levels:
/// step 1 samples every 24-bit color, step 51 samples six levels per channel.
/// Smaller steps mean denser sampling and a larger map image.
///
/// Construct one with [`Step::new`]; arbitrary integers are rejected there,
/// so every `Step` in flight is one the rest of the crate knows how to size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    One,
    Three,
    Four,
    Five,
    Sixteen,
    Seventeen,
    FiftyOne,
}

/// How a step folds the red axis onto the two pixel axes.
///
/// Blue and green always land on X and Y directly (divided by the step); the
/// layout families differ only in where red goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepFamily {
    /// The quantized red value is split bitwise: its low `bits` select a tile
    /// column and its high bits a tile row. Blue and green vary within each
    /// tile, so the map is a square grid of `2^bits x 2^bits` tiles.
    PackedBits { bits: u32 },
    /// The quantized red value selects one of `block` contiguous column
    /// groups; blue varies inside a group and green alone selects the row.
    /// The map comes out wide and short: `block * block` columns, `block` rows.
    BlockedGrid { block: u32 },
}

impl Step {
    /// Validates a raw step value.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::UnsupportedStep`] for anything outside
    /// [`SUPPORTED_STEPS`].
    pub fn new(raw: u16) -> Result<Self> {
        match raw {
            1 => Ok(Step::One),
            3 => Ok(Step::Three),
            4 => Ok(Step::Four),
            5 => Ok(Step::Five),
            16 => Ok(Step::Sixteen),
            17 => Ok(Step::Seventeen),
            51 => Ok(Step::FiftyOne),
            other => Err(CubeError::UnsupportedStep(other)),
        }
    }

    /// The raw step value.
    pub const fn get(self) -> u16 {
        match self {
            Step::One => 1,
            Step::Three => 3,
            Step::Four => 4,
            Step::Five => 5,
            Step::Sixteen => 16,
            Step::Seventeen => 17,
            Step::FiftyOne => 51,
        }
    }

    /// Number of sampled levels per channel, `1 + 255/step`.
    pub const fn levels(self) -> u32 {
        1 + 255 / self.get() as u32
    }

    /// The layout family for this step, or `None` for step 16, which sizes a
    /// map image but has no pixel layout of its own.
    pub const fn family(self) -> Option<StepFamily> {
        match self {
            Step::One => Some(StepFamily::PackedBits { bits: 4 }),
            Step::Four => Some(StepFamily::PackedBits { bits: 3 }),
            Step::Sixteen => None,
            Step::Three | Step::Five | Step::Seventeen | Step::FiftyOne => {
                Some(StepFamily::BlockedGrid {
                    block: 1 + 255 / self.get() as u32,
                })
            }
        }
    }

    /// Width and height of the map image generated at this step.
    ///
    /// ```
    /// use cubesheet::rgb_cube::Step;
    ///
    /// assert_eq!(Step::new(4)?.map_dimensions(), (512, 512));
    /// assert_eq!(Step::new(3)?.map_dimensions(), (7396, 86));
    /// # Ok::<(), cubesheet::CubeError>(())
    /// ```
    pub fn map_dimensions(self) -> (u32, u32) {
        match self.family() {
            Some(StepFamily::PackedBits { bits }) => {
                let dim = (256 / self.get() as u32) << bits;
                (dim, dim)
            }
            Some(StepFamily::BlockedGrid { block }) => (block * block, block),
            // Step 16: four 16x16 tiles per side.
            None => (64, 64),
        }
    }

    fn mapped_family(self) -> Result<StepFamily> {
        self.family()
            .ok_or(CubeError::UnmappedStep(self.get()))
    }
}

/// Maps a color to its pixel position in the map image for `step`.
///
/// Channel values need not be multiples of the step; they are quantized by
/// truncating division on the way in.
///
/// ```
/// use cubesheet::rgb_cube::{rgb_to_xy, Step};
/// use image::Rgb;
///
/// let step = Step::new(4)?;
/// assert_eq!(rgb_to_xy(Rgb([0, 0, 0]), step)?, (0, 0));
/// assert_eq!(rgb_to_xy(Rgb([0, 0, 255]), step)?, (63, 0));
/// assert_eq!(rgb_to_xy(Rgb([255, 0, 0]), step)?, (448, 448));
/// assert_eq!(rgb_to_xy(Rgb([255, 255, 255]), step)?, (511, 511));
/// # Ok::<(), cubesheet::CubeError>(())
/// ```
///
/// # Errors
///
/// Returns [`CubeError::UnmappedStep`] for step 16.
pub fn rgb_to_xy(color: Rgb<u8>, step: Step) -> Result<(u32, u32)> {
    let s = step.get() as u32;
    let Rgb([r, g, b]) = color;
    let (r, g, b) = (r as u32, g as u32, b as u32);

    match step.mapped_family()? {
        StepFamily::PackedBits { bits } => {
            let tile = 256 / s;
            let rq = r / s;
            let xr = rq & ((1 << bits) - 1);
            let yr = rq >> bits;
            Ok((b / s + xr * tile, g / s + yr * tile))
        }
        StepFamily::BlockedGrid { block } => Ok((b / s + (r / s) * block, g / s)),
    }
}

/// Recovers the color encoded at a pixel position of a `step` map image.
///
/// Inverse of [`rgb_to_xy`] on the sampled lattice. The recovered channel
/// values are always step-aligned, so colors that were not multiples of the
/// step come back rounded down:
///
/// ```
/// use cubesheet::rgb_cube::{rgb_to_xy, xy_to_rgb, Step};
/// use image::Rgb;
///
/// let step = Step::new(4)?;
/// let (x, y) = rgb_to_xy(Rgb([255, 255, 255]), step)?;
/// assert_eq!(xy_to_rgb(x, y, step)?, Rgb([252, 252, 252]));
/// # Ok::<(), cubesheet::CubeError>(())
/// ```
///
/// # Errors
///
/// Returns [`CubeError::UnmappedStep`] for step 16 and
/// [`CubeError::CoordinateOutOfBounds`] for coordinates beyond the step's
/// map dimensions.
pub fn xy_to_rgb(x: u32, y: u32, step: Step) -> Result<Rgb<u8>> {
    let family = step.mapped_family()?;
    let (width, height) = step.map_dimensions();
    if x >= width || y >= height {
        return Err(CubeError::CoordinateOutOfBounds {
            x,
            y,
            width,
            height,
            step: step.get(),
        });
    }

    let s = step.get() as u32;
    let (r, g, b) = match family {
        StepFamily::PackedBits { bits } => {
            let tile = 256 / s;
            let b = s * (x % tile);
            let g = s * (y % tile);
            let r = s * ((x / tile) | ((y / tile) << bits));
            (r, g, b)
        }
        StepFamily::BlockedGrid { block } => {
            let b = s * (x % block);
            let g = s * y;
            let r = s * (x / block);
            (r, g, b)
        }
    };
    Ok(Rgb([r as u8, g as u8, b as u8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Steps that carry a pixel layout, i.e. everything except 16.
    const MAPPED_STEPS: [u16; 6] = [1, 3, 4, 5, 17, 51];

    fn xy(r: u8, g: u8, b: u8, step: u16) -> (u32, u32) {
        rgb_to_xy(Rgb([r, g, b]), Step::new(step).unwrap()).unwrap()
    }

    #[test]
    fn step_four_corner_coordinates() {
        assert_eq!(xy(0, 0, 0, 4), (0, 0));
        assert_eq!(xy(0, 0, 255, 4), (63, 0));
        assert_eq!(xy(0, 255, 0, 4), (0, 63));
        assert_eq!(xy(0, 255, 255, 4), (63, 63));
        assert_eq!(xy(128, 128, 128, 4), (32, 288));
        assert_eq!(xy(255, 0, 0, 4), (448, 448));
        assert_eq!(xy(255, 0, 255, 4), (511, 448));
        assert_eq!(xy(255, 255, 0, 4), (448, 511));
        assert_eq!(xy(255, 255, 255, 4), (511, 511));
    }

    #[test]
    fn step_three_block_coordinates() {
        assert_eq!(xy(0, 0, 0, 3), (0, 0));
        assert_eq!(xy(0, 0, 255, 3), (85, 0));
        assert_eq!(xy(0, 255, 0, 3), (0, 85));
        assert_eq!(xy(128, 128, 128, 3), (3654, 42));
        assert_eq!(xy(255, 0, 0, 3), (7310, 0));
        assert_eq!(xy(255, 255, 255, 3), (7395, 85));
    }

    #[test]
    fn round_trip_holds_on_every_sampled_lattice() {
        for raw in MAPPED_STEPS {
            let step = Step::new(raw).unwrap();
            let s = raw as usize;
            for r in (0..256).step_by(s) {
                for g in (0..256).step_by(s) {
                    for b in (0..256).step_by(s) {
                        let color = Rgb([r as u8, g as u8, b as u8]);
                        let (x, y) = rgb_to_xy(color, step).unwrap();
                        assert_eq!(
                            xy_to_rgb(x, y, step).unwrap(),
                            color,
                            "round trip broke at {color:?} step {raw}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn mapping_is_injective_on_each_sampled_lattice() {
        for raw in MAPPED_STEPS {
            let step = Step::new(raw).unwrap();
            let (width, height) = step.map_dimensions();
            let mut seen = vec![false; (width * height) as usize];
            let mut count = 0u32;
            let s = raw as usize;
            for r in (0..256).step_by(s) {
                for g in (0..256).step_by(s) {
                    for b in (0..256).step_by(s) {
                        let (x, y) = rgb_to_xy(Rgb([r as u8, g as u8, b as u8]), step).unwrap();
                        let idx = (y * width + x) as usize;
                        assert!(!seen[idx], "step {raw}: collision at ({x}, {y})");
                        seen[idx] = true;
                        count += 1;
                    }
                }
            }
            let levels = step.levels();
            assert_eq!(count, levels * levels * levels);
        }
    }

    #[test]
    fn quantization_rounds_down_within_one_step() {
        // Off-lattice inputs land on the nearest lower sample.
        let step = Step::new(4).unwrap();
        let (x, y) = rgb_to_xy(Rgb([130, 129, 131]), step).unwrap();
        assert_eq!(xy_to_rgb(x, y, step).unwrap(), Rgb([128, 128, 128]));
    }

    #[test]
    fn rejects_steps_outside_the_supported_set() {
        for raw in [0, 2, 8, 10, 64, 255] {
            assert_eq!(Step::new(raw), Err(CubeError::UnsupportedStep(raw)));
        }
        for raw in SUPPORTED_STEPS {
            assert!(Step::new(raw).is_ok());
        }
    }

    #[test]
    fn step_sixteen_sizes_a_map_but_does_not_fold() {
        let step = Step::new(16).unwrap();
        assert_eq!(step.map_dimensions(), (64, 64));
        assert_eq!(step.family(), None);
        assert_eq!(
            rgb_to_xy(Rgb([0, 0, 0]), step),
            Err(CubeError::UnmappedStep(16))
        );
        assert!(matches!(
            xy_to_rgb(0, 0, step),
            Err(CubeError::UnmappedStep(16))
        ));
    }

    #[test]
    fn inverse_rejects_coordinates_beyond_the_map() {
        let four = Step::new(4).unwrap();
        assert!(matches!(
            xy_to_rgb(512, 0, four),
            Err(CubeError::CoordinateOutOfBounds { x: 512, .. })
        ));
        let three = Step::new(3).unwrap();
        assert!(matches!(
            xy_to_rgb(0, 86, three),
            Err(CubeError::CoordinateOutOfBounds { y: 86, .. })
        ));
    }

    #[test]
    fn recovered_channels_are_step_aligned() {
        let step = Step::new(51).unwrap();
        let (width, height) = step.map_dimensions();
        for y in 0..height {
            for x in 0..width {
                let Rgb([r, g, b]) = xy_to_rgb(x, y, step).unwrap();
                assert_eq!(r % 51, 0);
                assert_eq!(g % 51, 0);
                assert_eq!(b % 51, 0);
            }
        }
    }
}
