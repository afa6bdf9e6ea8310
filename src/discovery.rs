use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find all `.sql` files under `dir` (recursively, case-insensitive
/// extension match). Results are sorted so corpus runs are
/// deterministic across platforms.
pub fn find_sql_files(dir: &Path) -> Vec<PathBuf> {
    let mut sql_files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
        })
        .map(|entry| entry.into_path())
        .collect();
    sql_files.sort();
    sql_files
}
