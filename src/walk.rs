use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions of the shader stages glslangValidator understands.
const SHADER_EXTENSIONS: &[&str] = &["vert", "frag", "comp", "geom", "tesc", "tese"];

pub fn is_shader_source(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| SHADER_EXTENSIONS.contains(&extension))
        .unwrap_or(false)
}

/// Lazily yields every shader source under `root`, at any depth.
///
/// A missing or unreadable root simply yields nothing; a directory that
/// cannot be entered mid-walk is skipped rather than aborting the walk.
pub fn shader_sources(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                debug!("skipping unreadable entry: {error}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_shader_source(path))
}
