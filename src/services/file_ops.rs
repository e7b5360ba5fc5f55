//! Source file reading and output file writing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads the whole source file as text.
pub fn read_source(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Sibling output path: `{stem}{suffix}{extension}` in the same directory.
///
/// `style.css` with the default `-modified` suffix becomes
/// `style-modified.css`; extension-less names just get the suffix appended.
pub fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match source.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    source.with_file_name(file_name)
}

/// Writes `content` to `path` using the temp-file-then-rename pattern.
/// A pre-existing file at `path` is silently overwritten.
pub fn write_output(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = match path.file_name() {
        Some(name) => {
            let mut tmp = name.to_os_string();
            tmp.push(".tmp");
            path.with_file_name(tmp)
        }
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Output path has no file name",
            ));
        }
    };

    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_with_extension() {
        assert_eq!(
            output_path(Path::new("/tmp/style.css"), "-modified"),
            PathBuf::from("/tmp/style-modified.css")
        );
        assert_eq!(
            output_path(Path::new("page.html"), "-modified"),
            PathBuf::from("page-modified.html")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(
            output_path(Path::new("/tmp/notes"), "-modified"),
            PathBuf::from("/tmp/notes-modified")
        );
    }

    #[test]
    fn test_output_path_hidden_file() {
        // ".vimrc" has no extension in path terms; the suffix lands at the end.
        assert_eq!(
            output_path(Path::new("/home/u/.vimrc"), "-modified"),
            PathBuf::from("/home/u/.vimrc-modified")
        );
    }

    #[test]
    fn test_output_path_custom_suffix() {
        assert_eq!(
            output_path(Path::new("a/b/theme.css"), ".new"),
            PathBuf::from("a/b/theme.new.css")
        );
    }

    #[test]
    fn test_write_output_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("out.css");

        write_output(&path, "first").expect("first write failed");
        assert_eq!(read_source(&path).expect("read failed"), "first");

        write_output(&path, "second").expect("overwrite failed");
        assert_eq!(read_source(&path).expect("read failed"), "second");

        // No temp file left behind.
        assert!(!dir.path().join("out.css.tmp").exists());
    }
}
