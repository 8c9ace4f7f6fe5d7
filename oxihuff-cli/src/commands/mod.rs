//! Command implementations for OxiHuff CLI.

pub mod compress;
pub mod decompress;
pub mod info;
pub mod test;
pub mod tree;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use test::cmd_test;
pub use tree::cmd_tree;

use clap::ValueEnum;
use oxihuff::OxiHuffError;
use std::path::{Path, PathBuf};

/// How a positional INPUT argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum InputMode {
    /// A file if the path exists, raw text otherwise (default)
    #[default]
    Auto,
    /// Always a file path
    File,
    /// Always the data itself
    Raw,
}

/// Where the bytes to compress come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Raw(Vec<u8>),
}

impl InputMode {
    pub fn resolve(self, input: &str) -> Result<Source, OxiHuffError> {
        let path = Path::new(input);
        match self {
            InputMode::Auto if path.is_file() => Ok(Source::File(path.to_path_buf())),
            InputMode::Auto | InputMode::Raw => Ok(Source::Raw(input.as_bytes().to_vec())),
            InputMode::File if path.is_file() => Ok(Source::File(path.to_path_buf())),
            InputMode::File => Err(OxiHuffError::invalid_input(format!(
                "{} is not a file",
                path.display()
            ))),
        }
    }
}

impl Source {
    /// Read the source completely.
    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        match self {
            Source::File(path) => std::fs::read(path),
            Source::Raw(data) => Ok(data.clone()),
        }
    }

    /// Short description for status lines.
    pub fn describe(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Raw(data) => format!("<raw input, {} bytes>", data.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_raw_and_auto() {
        let text = "definitely not an existing file ~~";
        assert_eq!(
            InputMode::Raw.resolve(text).unwrap(),
            Source::Raw(text.as_bytes().to_vec())
        );
        assert_eq!(
            InputMode::Auto.resolve(text).unwrap(),
            Source::Raw(text.as_bytes().to_vec())
        );
    }

    #[test]
    fn test_resolve_file_mode_requires_file() {
        let err = InputMode::File
            .resolve("definitely not an existing file ~~")
            .unwrap_err();
        assert!(matches!(err, OxiHuffError::InvalidInput { .. }));
    }

    #[test]
    fn test_resolve_existing_file() {
        let path = std::env::temp_dir().join(format!("oxihuff-cli-{}.txt", std::process::id()));
        std::fs::write(&path, b"abc").unwrap();
        let input = path.to_str().unwrap();

        let source = InputMode::Auto.resolve(input).unwrap();
        assert_eq!(source, Source::File(path.clone()));
        assert_eq!(source.read().unwrap(), b"abc");
        assert_eq!(
            InputMode::Raw.resolve(input).unwrap(),
            Source::Raw(input.as_bytes().to_vec())
        );

        std::fs::remove_file(&path).unwrap();
    }
}
