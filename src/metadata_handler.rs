use little_exif::metadata::Metadata;
use std::io;
use std::path::Path;

/// Carries EXIF metadata from the original photo over to its graded copy.
pub fn copy_metadata(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = Metadata::new_from_path(src).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("failed to read metadata from {}: {}", src.display(), e),
        )
    })?;

    metadata.write_to_file(dst).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("failed to write metadata to {}: {}", dst.display(), e),
        )
    })?;

    Ok(())
}
