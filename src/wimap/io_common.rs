use std::path::{Path, PathBuf};

use crate::wimap::*;

/// Resolves a file name from a configuration file against the directory of that file.
/// Absolute paths are kept as they are.
pub fn resolve_path(root: Option<&Path>, file: &str) -> String {
    match root {
        Some(root_p) if Path::new(file).is_relative() => {
            let p: PathBuf = root_p.join(file);
            p.as_path().display().to_string()
        }
        _ => file.to_string(),
    }
}

/// Writes the map to the given file, or to the standard output when no file (or
/// `stdout`) is given.
pub fn write_output(out: Option<&str>, content: &str) -> MapResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing map to {:?}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })
        }
    }
}
