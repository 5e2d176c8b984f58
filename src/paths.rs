//! Flattening and normalization of the delimiter-joined lists stored in
//! `.uvprojx` files.
//!
//! Keil keeps include paths as `;`-separated strings with Windows
//! separators (`..\Drivers\Inc;..\Core\Inc`) and defines as `,`-separated
//! strings (`USE_HAL_DRIVER,STM32F103xB`).  The helpers here turn those raw
//! values into the flat lists written to the Qt project.

/// Delimiter between entries of an `<IncludePath>` value.
pub const INCLUDE_DELIMITER: char = ';';

/// Delimiter between entries of a `<Define>` value.
pub const DEFINE_DELIMITER: char = ',';

/// Replace every backslash with a forward slash.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Directory part of an already normalized path: everything before the last
/// `/`.  A bare file name lives in the project directory itself, `"."`.
pub fn containing_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => ".",
    }
}

/// Split every raw entry on `delimiter`, normalize separators and keep each
/// resulting path once, in order of first appearance.
///
/// Empty segments (e.g. from a trailing `;`) are dropped.
pub fn flatten_and_dedupe<S: AsRef<str>>(raw: &[S], delimiter: char) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for entry in raw {
        for segment in entry.as_ref().split(delimiter) {
            if segment.is_empty() {
                continue;
            }
            let path = normalize_separators(segment);
            if !out.contains(&path) {
                out.push(path);
            }
        }
    }

    out
}

/// Split every raw entry on `delimiter` and keep every token as written.
///
/// Unlike [`flatten_and_dedupe`] nothing is removed: repeated defines
/// (e.g. from both the C and the assembler `VariousControls`) stay repeated.
pub fn flatten_defines<S: AsRef<str>>(raw: &[S], delimiter: char) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.as_ref().split(delimiter))
        .map(String::from)
        .collect()
}
