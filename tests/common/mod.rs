//! Fixture setup shared by the unit tests (`src/test_helpers.rs`) and the
//! integration tests in this directory.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Copy `fixtures/book/` to a temp directory and return it.
///
/// Tests get an isolated project they can mutate and stage into.
pub fn copy_book_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/book");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
