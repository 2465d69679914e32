use std::path::{Path, PathBuf};

use glob::glob;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::session::RecordedSession;

fn json_filter(rp: glob::GlobResult) -> Option<PathBuf> {
    if let Ok(p) = rp {
        if p.as_os_str().to_string_lossy().ends_with(".json") {
            return Some(p);
        }
    }
    None
}

/// Loads every recorded session under a folder.
///
/// Session files are discovered with a recursive glob and parsed in parallel;
/// files that fail to parse are skipped with a warning. Sessions come back
/// sorted by file name.
pub fn load_sessions(root_folder: &str) -> std::io::Result<Vec<RecordedSession>> {
    if !Path::new(root_folder).is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", root_folder),
        ));
    }
    log::trace!("loading sessions from {}", root_folder);
    let paths = glob(format!("{}/**/*", root_folder).as_str()).expect("failed");
    let mut sorted_paths: Vec<PathBuf> = paths.into_iter().filter_map(json_filter).collect();
    sorted_paths.sort();

    let sessions: Vec<RecordedSession> = sorted_paths
        .par_iter()
        .progress_count(sorted_paths.len() as u64)
        .filter_map(|path| {
            let contents = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    return None;
                }
            };
            match serde_json::from_str::<RecordedSession>(&contents) {
                Ok(session) => Some(session),
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect();
    Ok(sessions)
}
