//! Reading plan text from a file or stdin.

use camino::Utf8Path;
use fs_err as fs;
use std::io::{self, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin")]
    Stdin(#[source] io::Error),

    #[error("no plan text provided")]
    Empty,
}

/// Read plan output from `file`, or from stdin when no file is given.
/// Whitespace-only input is rejected rather than analyzed as a clean plan.
pub fn read_plan_text(file: Option<&Utf8Path>) -> Result<String, InputError> {
    let text = match file {
        Some(path) => fs::read_to_string(path).map_err(|source| InputError::File {
            path: path.to_string(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(InputError::Stdin)?;
            buf
        }
    };

    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn reads_plan_text_from_file() {
        let temp = TempDir::new().expect("temp dir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let path = dir.join("plan.txt");
        std::fs::write(&path, "No changes.\n").expect("write plan");

        let text = read_plan_text(Some(&path)).expect("read plan");
        assert_eq!(text, "No changes.\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_plan_text(Some(Utf8Path::new("does-not-exist.txt"))).expect_err("missing");
        assert!(err.to_string().contains("does-not-exist.txt"));
    }

    #[test]
    fn whitespace_only_file_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let path = dir.join("plan.txt");
        std::fs::write(&path, "  \n\t\n").expect("write plan");

        let err = read_plan_text(Some(&path)).expect_err("empty input");
        assert!(matches!(err, InputError::Empty));
    }
}
