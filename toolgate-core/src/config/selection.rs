//! Picks the gateway config file the runner should use.
//!
//! Order of precedence: an explicit file name, then a run suffix, then the
//! configs found on disk (asking the user when there is more than one).

use super::error::SelectionError;
use crate::constants::{CONFIG_FILE_PREFIX, LEGACY_CONFIG_FILE};
use glob::{Pattern, glob};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn config_file_name(suffix: &str) -> String {
    format!("{CONFIG_FILE_PREFIX}{suffix}.json")
}

/// All configs in `dir`, sorted by name, with the legacy file first when present.
pub fn discover_configs(dir: &Path) -> Result<Vec<PathBuf>, SelectionError> {
    let pattern = format!(
        "{}/{CONFIG_FILE_PREFIX}*.json",
        Pattern::escape(&dir.to_string_lossy())
    );
    let mut candidates: Vec<PathBuf> = glob(&pattern)?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    let legacy = dir.join(LEGACY_CONFIG_FILE);
    if legacy.is_file() {
        candidates.insert(0, legacy);
    }
    debug!(count = candidates.len(), dir = %dir.display(), "Discovered gateway configs");
    Ok(candidates)
}

/// Resolve the config to load.
///
/// Returns `Ok(None)` when nothing was given and nothing exists on disk, which
/// callers treat as "setup has not been run yet".
pub fn choose_config_file<R, W>(
    dir: &Path,
    cli_arg: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<Option<PathBuf>, SelectionError>
where
    R: BufRead,
    W: Write,
{
    if let Some(arg) = cli_arg.filter(|arg| !arg.is_empty()) {
        let direct = dir.join(arg);
        if direct.is_file() {
            return Ok(Some(direct));
        }
        let by_suffix = dir.join(config_file_name(arg));
        if by_suffix.is_file() {
            return Ok(Some(by_suffix));
        }
        return Err(SelectionError::NotFound(arg.to_string()));
    }

    let mut candidates = discover_configs(dir)?;
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => prompt_for_choice(dir, &candidates, input, output).map(Some),
    }
}

fn prompt_for_choice<R, W>(
    dir: &Path,
    candidates: &[PathBuf],
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, SelectionError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Multiple gateway config files found. Choose one:")?;
    for (index, path) in candidates.iter().enumerate() {
        writeln!(output, "  {}) {}", index + 1, display_name(path))?;
    }

    loop {
        write!(output, "Select [1-{}] (default 1): ", candidates.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(SelectionError::InputClosed);
        }
        let choice = line.trim();

        if choice.is_empty() {
            return Ok(candidates[0].clone());
        }
        if let Ok(index) = choice.parse::<usize>() {
            if (1..=candidates.len()).contains(&index) {
                return Ok(candidates[index - 1].clone());
            }
        }
        let typed = dir.join(choice);
        if typed.is_file() {
            return Ok(typed);
        }
        writeln!(output, "Invalid selection, try again.")?;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
