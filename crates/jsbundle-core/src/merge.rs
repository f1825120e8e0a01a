use std::fs;
use std::path::Path;

use crate::error::MergeError;
use crate::marker::{DECLARED_ENCODING, shell_quote};

/// Options controlling bundle rendering.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Enclose the bundle in `"use strict";` plus a self-invoking function.
    pub wrap: bool,
    /// Global-scope names exported via `self.<name> = <name>;`, emitted in
    /// order inside the wrapper ahead of its closing line.
    pub exports: Vec<String>,
}

/// Merge every `.js` file directly inside `dir` into one bundle.
///
/// Files are taken in lexicographic filename order so the output is
/// deterministic across platforms. Subdirectories are not entered.
pub fn merge_dir(dir: &Path, options: &MergeOptions) -> Result<String, MergeError> {
    let entries = fs::read_dir(dir).map_err(|source| MergeError::DirRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| MergeError::DirRead {
            path: dir.to_path_buf(),
            source,
        })?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".js") {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    log::debug!("merging {} files from {}", names.len(), dir.display());

    let mut files = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let content =
            fs::read_to_string(&path).map_err(|source| MergeError::FileRead { path, source })?;
        files.push((name, content));
    }
    Ok(render_bundle(&files, options))
}

/// Render `(filename, content)` pairs into bundle text.
///
/// Each file is announced by `\n// Inserted file <name> encoding='utf-8'\n`
/// followed by its raw content; nothing else separates segments.
pub fn render_bundle(files: &[(String, String)], options: &MergeOptions) -> String {
    let mut bundle = String::new();
    if options.wrap {
        bundle.push_str("\"use strict\";\n(function()\n{");
    }
    for (name, content) in files {
        bundle.push_str(&format!(
            "\n// Inserted file {} encoding='{}'\n",
            shell_quote(name),
            DECLARED_ENCODING
        ));
        bundle.push_str(content);
    }
    if options.wrap {
        for name in &options.exports {
            bundle.push_str(&format!("\nself.{name} = {name};"));
        }
        bundle.push_str("\n})();\n");
    }
    bundle
}
