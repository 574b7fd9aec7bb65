//! Locating the transform profile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tabulator_core::TransformProfile;
use tracing::{debug, warn};

/// `profile.toml` in the platform config directory.
pub fn default_profile_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "tabulator", "tabulator")?;
    Some(proj.config_dir().join("profile.toml"))
}

/// Resolve the profile: an explicit path must load; the default location is
/// optional and a broken file there only warns.
pub fn resolve(explicit: Option<&Path>) -> Result<TransformProfile> {
    if let Some(path) = explicit {
        return TransformProfile::from_file(path)
            .with_context(|| format!("Failed to read profile {}", path.display()));
    }

    let Some(path) = default_profile_path().filter(|p| p.exists()) else {
        return Ok(TransformProfile::default());
    };
    match TransformProfile::from_file(&path) {
        Ok(profile) => {
            debug!(path = %path.display(), "loaded profile");
            Ok(profile)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable profile");
            Ok(TransformProfile::default())
        }
    }
}
