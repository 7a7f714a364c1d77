//! Folds the RGB color cube into a 2-D "cheat sheet" image and grades
//! photographs through it.
//!
//! A map image generated at some quantization step places every sampled
//! (R, G, B) triple at a deterministic pixel position. The same image, read
//! back as a 3-D lookup cube, remaps arbitrary photos; edit the map's
//! swatches in a paint program and the edit applies uniformly to every
//! photo graded through it.
//!
//! # Quick start
//!
//! ```
//! use cubesheet::{build_map_image, CubeLut, Step};
//!
//! let map = build_map_image(Step::new(51)?)?;
//! let lut = CubeLut::from_image(&map)?;
//! let graded = lut.apply_image(&map);
//! assert_eq!(graded, map);
//! # Ok::<(), cubesheet::CubeError>(())
//! ```

pub mod cube_lut;
pub mod error;
pub mod file_handler;
pub mod map_builder;
pub mod metadata_handler;
pub mod rgb_cube;

pub use cube_lut::{CubeLut, CUBE_HEIGHTS};
pub use error::{CubeError, Result};
pub use map_builder::build_map_image;
pub use rgb_cube::{rgb_to_xy, xy_to_rgb, Step, StepFamily, SUPPORTED_STEPS};
