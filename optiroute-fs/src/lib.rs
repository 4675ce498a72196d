//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Trip inputs (address lists, gazetteers) are read and exports (duration
//! matrices) are written through these helpers so every crate touches the
//! filesystem the same way.
#![forbid(unsafe_code)]

use std::io::{self, Read, Write};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path for reading using ambient authority.
///
/// # Errors
///
/// Propagates the underlying I/O error, e.g. [`io::ErrorKind::NotFound`].
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read the whole file at `path` into a string.
///
/// # Errors
///
/// Fails when the file cannot be opened or is not valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Write `contents` to `path`, creating parent directories and truncating
/// any existing file.
///
/// # Errors
///
/// Fails when a directory cannot be created or the file cannot be written.
pub fn write_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let mut file = dir.create(name.as_str())?;
    file.write_all(contents)?;
    file.flush()
}

/// Return whether a path exists and is a regular file.
///
/// # Errors
///
/// Returns [`io::ErrorKind::NotFound`] when nothing exists at `path`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Ensure the parent directory for `path` exists.
///
/// # Errors
///
/// Propagates failures to open the base directory or create the missing
/// components.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_os_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} should include a file name")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Split a parent path into an ambient base directory and a relative suffix
/// that cap-std can resolve beneath it.
fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative_utf8 = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((dir, relative_utf8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        (tmp, root)
    }

    #[rstest]
    fn write_then_read_creates_parents(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("exports/trip/durations.csv");
        write_file(&path, b"0, 12\n11, 0\n").expect("write");
        assert_eq!(read_to_string(&path).expect("read"), "0, 12\n11, 0\n");
    }

    #[rstest]
    fn write_truncates_existing_file(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("out.txt");
        write_file(&path, b"a much longer first version").expect("first write");
        write_file(&path, b"short").expect("second write");
        assert_eq!(read_to_string(&path).expect("read"), "short");
    }

    #[rstest]
    fn file_is_file_distinguishes_directories(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let file = root.join("addresses.txt");
        write_file(&file, b"depot\n").expect("write");
        assert!(file_is_file(&file).expect("inspect file"));
        let dir = root.join("nested");
        std::fs::create_dir(&dir).expect("mkdir");
        assert!(!file_is_file(&dir).expect("inspect dir"));
    }

    #[rstest]
    fn missing_file_reports_not_found(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let err = read_to_string(&root.join("absent.txt")).expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let inspect = file_is_file(&root.join("absent.txt")).expect_err("missing");
        assert_eq!(inspect.kind(), io::ErrorKind::NotFound);
    }
}
