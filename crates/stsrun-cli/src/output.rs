//! Result file persistence and output formatting.

use std::path::{Path, PathBuf};

use stsrun_core::{ProblemSize, ResultBundle, StsError};
use stsrun_orchestration::BundleSink;

/// Path of the result file for size `n` under `dir`.
#[must_use]
pub fn result_path(dir: &Path, n: ProblemSize) -> PathBuf {
    dir.join(format!("{n}.json"))
}

/// Write a bundle as pretty-printed JSON to `<dir>/<n>.json`.
///
/// # Errors
///
/// Returns [`StsError::MissingOutputDirectory`] when `dir` does not exist and
/// [`StsError::Persist`] when the file cannot be written.
pub fn write_bundle(dir: &Path, n: ProblemSize, bundle: &ResultBundle) -> Result<PathBuf, StsError> {
    if !dir.is_dir() {
        return Err(StsError::MissingOutputDirectory(dir.to_path_buf()));
    }
    let path = result_path(dir, n);
    let content = bundle.to_json_pretty().map_err(|e| StsError::Persist {
        path: path.clone(),
        source: std::io::Error::other(e),
    })?;
    std::fs::write(&path, content).map_err(|source| StsError::Persist {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Sink writing one JSON file per problem size into a fixed directory.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BundleSink for JsonFileSink {
    fn persist(&self, n: ProblemSize, bundle: &ResultBundle) -> Result<PathBuf, StsError> {
        write_bundle(&self.dir, n, bundle)
    }
}

/// Format whole seconds for display.
#[must_use]
pub fn format_seconds(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m{:02}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stsrun_core::RunResult;

    fn size(n: u32) -> ProblemSize {
        ProblemSize::new(n).unwrap()
    }

    #[test]
    fn result_path_named_by_size() {
        assert_eq!(
            result_path(Path::new("res/CP"), size(12)),
            PathBuf::from("res/CP/12.json")
        );
    }

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut bundle = ResultBundle::new();
        bundle.insert("gecode", RunResult::empty(size(4), 300));

        let path = JsonFileSink::new(dir.path()).persist(size(4), &bundle).unwrap();

        assert_eq!(path, dir.path().join("4.json"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"gecode": {"sol": [], "n": 4, "time": 300, "optimal": false}})
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("res").join("CP");
        let err = write_bundle(&missing, size(2), &ResultBundle::new()).unwrap_err();
        assert!(matches!(err, StsError::MissingOutputDirectory(p) if p == missing));
        assert!(!missing.exists());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2.json"), "stale").unwrap();
        write_bundle(dir.path(), size(2), &ResultBundle::new()).unwrap();
        let content = std::fs::read_to_string(dir.path().join("2.json")).unwrap();
        assert_eq!(content.trim(), "{}");
    }

    #[test]
    fn format_seconds_short_and_long() {
        assert_eq!(format_seconds(7), "7s");
        assert_eq!(format_seconds(300), "5m00s");
        assert_eq!(format_seconds(61), "1m01s");
    }
}
