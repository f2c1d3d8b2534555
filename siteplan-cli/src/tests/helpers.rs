//! Test helpers for writing instance files into scratch workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use siteplan_core::test_support::sample_record;
use tempfile::TempDir;

/// Scratch directory that lives as long as the returned guard.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Writes the three-site instance to `path` as JSON.
pub(super) fn write_sample_instance(path: &Utf8Path) {
    let payload = serde_json::to_string_pretty(&sample_record()).expect("serialise instance");
    write_utf8(path, payload.as_bytes());
}
