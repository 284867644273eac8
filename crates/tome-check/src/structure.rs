//! Required directories, files and headings.

use std::io::ErrorKind;
use std::path::Path;

use tome_config::CheckConfig;

use crate::error::CheckError;
use crate::report::{CheckKind, Violation};

/// Check the course skeleton.
///
/// A heading counts as present when some line equals it after trimming
/// trailing whitespace. A file listed under `required_headings` that does not
/// exist is reported once, not once per heading.
pub fn check_structure(
    source_dir: &Path,
    config: &CheckConfig,
) -> Result<Vec<Violation>, CheckError> {
    let mut violations = Vec::new();

    for dir in &config.required_dirs {
        if !source_dir.join(dir).is_dir() {
            violations.push(Violation::new(
                CheckKind::Structure,
                format!("{dir}/"),
                "required directory is missing",
            ));
        }
    }
    for file in &config.required_files {
        if !source_dir.join(file).is_file() {
            violations.push(Violation::new(
                CheckKind::Structure,
                file.as_str(),
                "required file is missing",
            ));
        }
    }

    for (file, headings) in &config.required_headings {
        let path = source_dir.join(file);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                violations.push(Violation::new(
                    CheckKind::Structure,
                    file.as_str(),
                    "file with required headings is missing",
                ));
                continue;
            }
            Err(e) => return Err(CheckError::io(path, e)),
        };
        for heading in headings {
            let wanted = heading.trim_end();
            if !text.lines().any(|line| line.trim_end() == wanted) {
                violations.push(Violation::new(
                    CheckKind::Structure,
                    file.as_str(),
                    format!("missing heading '{wanted}'"),
                ));
            }
        }
    }

    Ok(violations)
}
