//! Output path policy for downloaded artifacts.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{JobMode, LtxModel};

/// Per-user directory artifacts land in when no override is given.
const DEFAULT_DIR_SUFFIX: &str = "Desktop/cineclaw";

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Returns the default output directory (`~/Desktop/cineclaw`).
pub fn default_output_dir() -> Result<PathBuf> {
    let home = home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine home directory (HOME/USERPROFILE not set); \
             pass an explicit --output path",
        )
    })?;
    Ok(home.join(DEFAULT_DIR_SUFFIX))
}

fn file_name_with_timestamp(mode: JobMode, model: LtxModel, timestamp: &str) -> String {
    format!("cineclaw-{}-{}-{}.mp4", mode.as_str(), model.as_str(), timestamp)
}

/// Generates the artifact filename: mode, model, and a local timestamp.
pub fn generated_file_name(mode: JobMode, model: LtxModel) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    file_name_with_timestamp(mode, model, &timestamp)
}

/// Resolves where to write the downloaded video.
///
/// An explicit file path wins; otherwise a timestamped filename is placed in
/// `dir` (or the default per-user directory). The chosen directory is
/// created if needed.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    dir: Option<&Path>,
    mode: JobMode,
    model: LtxModel,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        return Ok(path.to_path_buf());
    }

    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => default_output_dir()?,
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(generated_file_name(mode, model)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_embeds_mode_model_timestamp() {
        let name = file_name_with_timestamp(
            JobMode::TextToVideo,
            LtxModel::Fast,
            "20260806-101530",
        );
        assert_eq!(name, "cineclaw-t2v-ltx-2-fast-20260806-101530.mp4");
    }

    #[test]
    fn test_generated_file_name_shape() {
        let name = generated_file_name(JobMode::AudioToVideo, LtxModel::Pro);
        assert!(name.starts_with("cineclaw-a2v-ltx-2-pro-"));
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("nested").join("clip.mp4");
        let resolved = resolve_output_path(
            Some(&explicit),
            None,
            JobMode::TextToVideo,
            LtxModel::Fast,
        )
        .unwrap();
        assert_eq!(resolved, explicit);
        // Parent directory was created.
        assert!(explicit.parent().unwrap().is_dir());
    }

    #[test]
    fn test_dir_override_gets_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_output_path(
            None,
            Some(dir.path()),
            JobMode::ImageToVideo,
            LtxModel::Pro,
        )
        .unwrap();
        assert_eq!(resolved.parent().unwrap(), dir.path());
        let name = resolved.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("cineclaw-i2v-ltx-2-pro-"));
    }
}
