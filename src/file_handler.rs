use crate::cube_lut::CubeLut;
use crate::metadata_handler::copy_metadata;
use image::ImageReader;
use std::{
    fs, io,
    path::Path,
    sync::{Arc, Mutex},
};
use walkdir::WalkDir;

/// Extensions the grading pass handles. Everything else is copied through
/// untouched so a mixed shoot folder survives the trip intact.
const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Grades every photo under `input_dir` through `lut` into `output_dir`.
///
/// The directory structure is mirrored on the output side. Supported image
/// formats are decoded, remapped through the cube, saved, and given the
/// original's EXIF metadata; other files are copied as-is. Failures are
/// reported to the shared status log and processing moves on to the next
/// file.
pub fn process_images(
    input_dir: &Path,
    output_dir: &Path,
    lut: &CubeLut,
    logger: Arc<Mutex<Vec<String>>>,
) {
    let log = |msg: String| {
        if let Ok(mut entries) = logger.lock() {
            entries.push(msg);
        }
    };

    if !input_dir.exists() {
        log(format!(
            "Image input directory not found: {}",
            input_dir.display()
        ));
        return;
    }

    let files: Vec<_> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .collect();
    let total = files.len();
    log(format!("Found {} files to process.", total));

    for (i, entry) in files.into_iter().enumerate() {
        let path = entry.path();
        let rel = match path.strip_prefix(input_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let out_path = output_dir.join(rel);
        if let Some(parent) = out_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log(format!(
                    "Error creating directory {}: {}",
                    parent.display(),
                    e
                ));
                continue;
            }
        }

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        let result = match ext.as_deref() {
            Some(ext) if PHOTO_EXTENSIONS.contains(&ext) => grade_photo(path, &out_path, lut),
            _ => fs::copy(path, &out_path).map(|_| ()),
        };

        match result {
            Ok(()) => log(format!("Processed {}/{}: {}", i + 1, total, rel.display())),
            Err(e) => log(format!("Error processing {}: {}", path.display(), e)),
        }
    }

    log(format!("Finished processing {} files.", total));
}

/// Decodes one photo, remaps it through the cube, and saves the result with
/// the original's metadata.
fn grade_photo(src: &Path, dst: &Path, lut: &CubeLut) -> io::Result<()> {
    let img = ImageReader::open(src)?
        .decode()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to decode {}: {}", src.display(), e),
            )
        })?
        .to_rgb8();

    let graded = lut.apply_image(&img);
    graded.save(dst).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("failed to save {}: {}", dst.display(), e),
        )
    })?;

    if let Err(e) = copy_metadata(src, dst) {
        eprintln!("Warning: failed to copy metadata for {:?}: {}", src, e);
    }
    Ok(())
}
