use cubesheet::CubeLut;
use std::env;

/// Grades a single photo through a map image.
///
/// Usage: `apply_map [map.png] [input] [output]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let map_path = args.next().unwrap_or_else(|| "cube-step3.png".to_string());
    let input_path = args.next().unwrap_or_else(|| "input.jpg".to_string());
    let output_path = args.next().unwrap_or_else(|| "output.jpg".to_string());

    let map = image::open(&map_path)?.to_rgb8();
    let lut = CubeLut::from_image(&map)?;

    let input = image::open(&input_path)?.to_rgb8();
    let graded = lut.apply_image(&input);
    graded.save(&output_path)?;

    println!("Graded {} through {} → {}", input_path, map_path, output_path);
    Ok(())
}
