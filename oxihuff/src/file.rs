//! Whole-file compression helpers.
//!
//! Files are read completely, transformed in memory, and written completely.
//! Compressed files get the `.hac` extension appended.

use crate::{HuffmanDecoder, HuffmanEncoder};
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::progress::Progress;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of compressed files.
pub const EXTENSION: &str = "hac";

/// Extension used when a decompressed file name cannot be derived.
pub const FALLBACK_EXTENSION: &str = "out";

/// Default output for compressing `input`: `<input>.hac`.
pub fn compressed_path(input: &Path) -> PathBuf {
    append_extension(input, EXTENSION)
}

/// Default output for decompressing `input`.
///
/// A trailing `.hac` (any case) is stripped; otherwise `.out` is appended.
pub fn decompressed_path(input: &Path) -> PathBuf {
    let has_suffix = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));
    if has_suffix && input.file_stem().is_some() {
        input.with_extension("")
    } else {
        append_extension(input, FALLBACK_EXTENSION)
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn check_paths(input: &Path, output: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(OxiHuffError::invalid_input(format!(
            "{} is not a file",
            input.display()
        )));
    }
    if input == output {
        return Err(OxiHuffError::invalid_input(format!(
            "output path {} would overwrite the input",
            output.display()
        )));
    }
    Ok(())
}

/// Compress `input` into `output` (default `<input>.hac`).
///
/// Returns the path written.
pub fn compress_file<P: Progress>(
    input: &Path,
    output: Option<&Path>,
    progress: P,
) -> Result<PathBuf> {
    let output = output.map_or_else(|| compressed_path(input), Path::to_path_buf);
    check_paths(input, &output)?;

    let data = fs::read(input)?;
    let compressed = HuffmanEncoder::with_progress(progress).encode(&data)?;
    fs::write(&output, &compressed)?;

    log::info!(
        "compressed {} ({} bytes) -> {} ({} bytes)",
        input.display(),
        data.len(),
        output.display(),
        compressed.len()
    );
    Ok(output)
}

/// Decompress `input` into `output` (default derived by [`decompressed_path`]).
///
/// Returns the path written. Nothing is written if decoding fails.
pub fn decompress_file<P: Progress>(
    input: &Path,
    output: Option<&Path>,
    progress: P,
) -> Result<PathBuf> {
    let output = output.map_or_else(|| decompressed_path(input), Path::to_path_buf);
    check_paths(input, &output)?;

    let data = fs::read(input)?;
    let decompressed = HuffmanDecoder::with_progress(progress).decode(&data)?;
    fs::write(&output, &decompressed)?;

    log::info!(
        "decompressed {} ({} bytes) -> {} ({} bytes)",
        input.display(),
        data.len(),
        output.display(),
        decompressed.len()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff_core::NoProgress;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("oxihuff-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_paths() {
        assert_eq!(
            compressed_path(Path::new("dir/notes.txt")),
            PathBuf::from("dir/notes.txt.hac")
        );
        assert_eq!(
            decompressed_path(Path::new("dir/notes.txt.hac")),
            PathBuf::from("dir/notes.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("notes.HAC")),
            PathBuf::from("notes")
        );
        assert_eq!(
            decompressed_path(Path::new("notes.bin")),
            PathBuf::from("notes.bin.out")
        );
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = scratch_dir("file-roundtrip");
        let input = dir.join("sample.txt");
        let content = b"file contents with a } brace and\nnewlines\n".repeat(20);
        fs::write(&input, &content).unwrap();

        let compressed = compress_file(&input, None, NoProgress).unwrap();
        assert_eq!(compressed, dir.join("sample.txt.hac"));

        let restored_path = dir.join("restored.txt");
        let restored =
            decompress_file(&compressed, Some(&restored_path), NoProgress).unwrap();
        assert_eq!(fs::read(restored).unwrap(), content);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_missing_input() {
        let dir = scratch_dir("missing-input");
        let err = compress_file(&dir.join("nope.txt"), None, NoProgress).unwrap_err();
        assert!(matches!(err, OxiHuffError::InvalidInput { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_overwriting_input() {
        let dir = scratch_dir("overwrite");
        let input = dir.join("same.bin");
        fs::write(&input, b"data").unwrap();
        let err = compress_file(&input, Some(&input), NoProgress).unwrap_err();
        assert!(matches!(err, OxiHuffError::InvalidInput { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_writes_nothing() {
        let dir = scratch_dir("corrupt");
        let input = dir.join("bad.hac");
        fs::write(&input, b"not a container").unwrap();
        let err = decompress_file(&input, None, NoProgress).unwrap_err();
        assert!(matches!(err, OxiHuffError::MalformedContainer { .. }));
        assert!(!dir.join("bad").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
