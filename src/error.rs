use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CubeError>;

/// Errors raised while folding the RGB cube, building a map image, or
/// reconstructing a lookup cube from one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// The step value is not in the supported set.
    #[error("unsupported step {0}, expected one of 1, 3, 4, 5, 16, 17, 51")]
    UnsupportedStep(u16),

    /// The step sizes a map image but defines no pixel layout. Only step 16
    /// falls in this gap.
    #[error("step {0} sizes a map image but has no coordinate mapping")]
    UnmappedStep(u16),

    /// An inverse-mapping coordinate lies outside the map for its step.
    #[error("coordinate ({x}, {y}) lies outside the {width}x{height} map for step {step}")]
    CoordinateOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        step: u16,
    },

    /// A sampled color mapped outside the image being built. This means the
    /// dimension formula and the layout disagree for the step, so the build
    /// aborts rather than clamping and corrupting the cube.
    #[error(
        "color ({r}, {g}, {b}) mapped to ({x}, {y}), outside the {width}x{height} map being built"
    )]
    MappedPixelOutOfBounds {
        r: u8,
        g: u8,
        b: u8,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// The map image height matches no known cube edge length.
    #[error("map height {0} matches no known cube, expected one of 2, 4, 6, 16, 18, 52, 86, 256")]
    UnknownMapHeight(u32),

    /// The map image is not wide enough (or too wide) to hold its cube.
    #[error("map image is {width}x{height}, expected {expected}x{height} to hold a {height}-level cube")]
    MalformedMap {
        width: u32,
        height: u32,
        expected: u32,
    },
}
