use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

// Upload layout: uploads/<id>/source.csv and uploads/<id>/plot.png.
// Files are written once per upload and never deleted by this service.

const CSV_FILE_NAME: &str = "source.csv";
const PLOT_FILE_NAME: &str = "plot.png";

pub fn ensure_upload_root(root: &Path) -> std::io::Result<()> {
    ensure_dir(root)
}

/// Allocate a fresh upload id and create its directory
pub fn allocate_upload_dir(root: &Path) -> std::io::Result<(String, PathBuf)> {
    let upload_id = Uuid::new_v4().to_string();
    let dir = root.join(&upload_id);
    ensure_dir(&dir)?;
    Ok((upload_id, dir))
}

pub fn upload_dir(root: &Path, upload_id: &str) -> PathBuf {
    root.join(upload_id)
}

pub fn csv_path(root: &Path, upload_id: &str) -> PathBuf {
    upload_dir(root, upload_id).join(CSV_FILE_NAME)
}

pub fn plot_path(root: &Path, upload_id: &str) -> PathBuf {
    upload_dir(root, upload_id).join(PLOT_FILE_NAME)
}

/// Upload ids are server-generated UUIDs; anything else is rejected before
/// touching the filesystem so path segments from clients cannot traverse.
pub fn is_valid_upload_id(upload_id: &str) -> bool {
    Uuid::parse_str(upload_id).is_ok()
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
