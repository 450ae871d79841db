// Config selection tests
//
// Selection runs against a temp directory with in-memory stdin/stdout.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use toolgate_core::config::{SelectionError, choose_config_file};

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "{}").expect("write config stub");
    path
}

fn select(dir: &Path, arg: Option<&str>, typed: &str) -> (Result<Option<PathBuf>, SelectionError>, String) {
    let mut input = Cursor::new(typed.as_bytes().to_vec());
    let mut output = Vec::new();
    let result = choose_config_file(dir, arg, &mut input, &mut output);
    (result, String::from_utf8(output).expect("utf8 output"))
}

#[test]
fn no_configs_means_no_selection() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "unrelated.json");

    let (result, output) = select(dir.path(), None, "");
    assert_eq!(result.expect("selection"), None);
    assert!(output.is_empty());
}

#[test]
fn single_config_is_chosen_without_prompting() {
    let dir = tempdir().expect("tempdir");
    let only = touch(dir.path(), "gateway_config_0042.json");

    let (result, output) = select(dir.path(), None, "");
    assert_eq!(result.expect("selection"), Some(only));
    assert!(output.is_empty(), "unexpected prompt: {output}");
}

#[test]
fn several_configs_prompt_and_accept_index() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "gateway_config_1111.json");
    let second = touch(dir.path(), "gateway_config_2222.json");

    let (result, output) = select(dir.path(), None, "9\n2\n");
    assert_eq!(result.expect("selection"), Some(second));
    assert!(output.contains("Multiple gateway config files found. Choose one:"));
    assert!(output.contains("Invalid selection, try again."));
}

#[test]
fn legacy_file_is_listed_first() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "gateway_config_1111.json");
    let legacy = touch(dir.path(), "gateway_config.json");

    let (result, output) = select(dir.path(), None, "\n");
    assert_eq!(result.expect("selection"), Some(legacy));
    assert!(output.contains("  1) gateway_config.json"));
}

#[test]
fn suffix_argument_resolves_to_file() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "gateway_config_1111.json");
    let wanted = touch(dir.path(), "gateway_config_2222.json");

    let (result, _) = select(dir.path(), Some("2222"), "");
    assert_eq!(result.expect("selection"), Some(wanted));
}

#[test]
fn filename_argument_is_used_verbatim() {
    let dir = tempdir().expect("tempdir");
    let custom = touch(dir.path(), "custom.json");
    touch(dir.path(), "gateway_config_0002.json");

    let (result, output) = select(dir.path(), Some("custom.json"), "");
    assert_eq!(result.expect("selection"), Some(custom));
    assert!(output.is_empty(), "unexpected prompt: {output}");
}

#[test]
fn filename_argument_wins_over_suffix_lookup() {
    let dir = tempdir().expect("tempdir");
    let direct = touch(dir.path(), "0002");
    touch(dir.path(), "gateway_config_0002.json");

    let (result, _) = select(dir.path(), Some("0002"), "");
    assert_eq!(result.expect("selection"), Some(direct));
}

#[test]
fn unknown_argument_is_an_error() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "gateway_config_1111.json");

    let (result, _) = select(dir.path(), Some("9999"), "");
    assert!(matches!(result, Err(SelectionError::NotFound(arg)) if arg == "9999"));
}

#[test]
fn closed_input_aborts_the_prompt() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "gateway_config_1111.json");
    touch(dir.path(), "gateway_config_2222.json");

    let (result, _) = select(dir.path(), None, "");
    assert!(matches!(result, Err(SelectionError::InputClosed)));
}
