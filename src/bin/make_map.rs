use cubesheet::{build_map_image, Step};
use std::env;

/// Builds the cheat-sheet image for a step and writes it as a PNG.
///
/// Usage: `make_map [step] [output.png]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let raw_step: u16 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 3,
    };
    let out_path = args
        .next()
        .unwrap_or_else(|| format!("cube-step{raw_step}.png"));

    let step = Step::new(raw_step)?;
    let map = build_map_image(step)?;
    map.save(&out_path)?;

    println!(
        "Wrote {}x{} map for step {} to {}",
        map.width(),
        map.height(),
        raw_step,
        out_path
    );
    Ok(())
}
