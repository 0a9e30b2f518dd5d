use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use crate::{parse_slcs, translate, CompileError, Mode};

/// Makes the formula hold in every state reachable from the initial one, which
/// is how every pixel of the image gets checked.
pub const MU_PREFIX: &str = "[true*] nu X.";

/// Wraps a translated body into the formula that gets written out.
pub fn emit(body: &str, mode: Mode) -> String {
    match mode.is_bound() {
        true => format!("{MU_PREFIX}{body}"),
        false => body.to_string(),
    }
}

/// Compiles SLCS source into the contents of a `.mcf` file.
pub fn compile(source: &str, mode: Mode) -> Result<String, CompileError> {
    let tree = parse_slcs(source, mode)?;
    info!("AST representation SLCS formula: {tree}");

    let body = translate(&tree, mode)?;
    Ok(emit(&body, mode))
}

/// The `.mcf` file a `.slcs` file is translated to by default.
pub fn mcf_path(input: &Path) -> Result<PathBuf> {
    if input.extension() != Some("slcs".as_ref()) {
        bail!("Expected a .slcs formula file, got {}", input.display());
    }
    Ok(input.with_extension("mcf"))
}

/// Compiles the formula in `input` and writes it to `output`, or next to the
/// input when not given. Nothing is written if compilation fails.
pub fn compile_file(input: &Path, output: Option<&Path>, mode: Mode) -> Result<(PathBuf, String)> {
    let default_output = mcf_path(input)?;
    let output = output.map(Path::to_path_buf).unwrap_or(default_output);

    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read formula file {}", input.display()))?;
    let formula =
        compile(&source, mode).with_context(|| format!("Failed to compile {}", input.display()))?;
    info!("modal mu-formula: {formula}");

    fs::write(&output, &formula)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Saved modal mu-formula to {}", output.display());

    Ok((output, formula))
}
