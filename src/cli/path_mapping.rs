use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Map an input XML file to its conventional output path: same directory,
/// same stem, `.json` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// The temporary sibling path an output file is written to before being
/// renamed into place. Keeping it in the same directory keeps the rename
/// on one filesystem.
pub fn temp_output_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output.json"));
    name.push(".tmp");
    output.with_file_name(name)
}
