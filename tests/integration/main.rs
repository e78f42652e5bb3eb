//! Integration tests for texproj
//!
//! These run the compiled binary against temporary LaTeX projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn create_project(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in structure {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    temp_dir
}

fn asset_project() -> TempDir {
    create_project(&[
        (
            "main.tex",
            "\\input{b.tex}\n \\includegraphics{fig1.pdf}\n \\bibliography{./ref}\n",
        ),
        (
            "b.tex",
            " \\includegraphics[width=0.8\\linewidth]{./figure/fig2.pdf}\n",
        ),
        ("fig1.pdf", "placeholder\n"),
        ("figure/fig2.pdf", "placeholder\n"),
        ("ref.bib", "placeholder\n"),
        ("format.bst", "placeholder\n"),
        ("my.sty", "placeholder\n"),
        ("unused1.tex", "placeholder\n"),
        ("unused2.pdf", "placeholder\n"),
        ("exclude/a.tex", "placeholder\n"),
    ])
}

fn texproj(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_texproj"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute texproj")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_help() {
    let temp_dir = create_project(&[]);
    let output = texproj(temp_dir.path(), &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("flat"));
    assert!(stdout.contains("find_unused"));
}

#[test]
fn test_flat_with_output() {
    let temp_dir = create_project(&[
        ("main.tex", "aaa\n\\input{b.tex}\n"),
        ("b.tex", "bbb\n  \\input{c.tex}  "),
        ("c.tex", "ccc\n  %\\input{d.tex}"),
    ]);
    let root = temp_dir.path();

    let output = texproj(root, &["flat", "main.tex", "-o", "flat.tex"]);
    assert!(output.status.success(), "{}", stderr(&output));

    assert_eq!(fs::read_to_string(root.join("flat.tex")).unwrap(), "aaa\nbbb\nccc\n");
    assert!(stderr(&output).contains("The output has been written to flat.tex"));
}

#[test]
fn test_flat_default_output() {
    let temp_dir = create_project(&[("paper/main.tex", "only line\n")]);
    let root = temp_dir.path();

    let output = texproj(root, &["flat", "paper/main.tex"]);
    assert!(output.status.success(), "{}", stderr(&output));

    // Relative to the working directory, not the project
    assert_eq!(fs::read_to_string(root.join("out.tex")).unwrap(), "only line\n");
}

#[test]
fn test_flat_output_from_config() {
    let temp_dir = create_project(&[
        ("main.tex", "body\n"),
        (".texproj.toml", "[flat]\noutput = \"flat.tex\"\n"),
    ]);
    let root = temp_dir.path();

    let output = texproj(root, &["flat", "main.tex"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(root.join("flat.tex")).unwrap(), "body\n");
}

#[test]
fn test_flat_warns_on_missing_file() {
    let temp_dir = create_project(&[("main.tex", "a\n\\input{nowhere}\nb\n")]);
    let root = temp_dir.path();

    let output = texproj(root, &["flat", "main.tex"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("nowhere.tex is missing"));
    assert_eq!(fs::read_to_string(root.join("out.tex")).unwrap(), "a\nb\n");
}

#[test]
fn test_find_unused() {
    let temp_dir = asset_project();
    let root = temp_dir.path();

    let output = texproj(
        root,
        &[
            "find_unused",
            "main.tex",
            "--exclude-dirs",
            "exclude",
            "--exclude-extensions",
            ".sty,bst",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let log = stderr(&output);
    assert!(log.contains("Unused file: unused1.tex"));
    assert!(log.contains("Unused file: unused2.pdf"));
    assert!(!log.contains("Unused file: exclude"));
    assert!(!log.contains("my.sty"));
    assert!(log.contains("Total 2 unused files"));
}

#[test]
fn test_find_unused_filters_from_config() {
    let temp_dir = asset_project();
    let root = temp_dir.path();
    fs::write(
        root.join(".texproj.toml"),
        "[find_unused]\nexclude_dirs = [\"exclude\"]\nexclude_extensions = [\"sty\", \"bst\"]\n",
    )
    .unwrap();

    let output = texproj(root, &["find_unused", "main.tex"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Total 2 unused files"));
}

#[test]
fn test_quiet_with_log_file() {
    let temp_dir = asset_project();
    let root = temp_dir.path();
    let log_dir = TempDir::new().unwrap();
    let log_path = log_dir.path().join("texproj.log");

    let output = texproj(
        root,
        &["find_unused", "main.tex", "--quiet", "--log-file", log_path.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert!(!stderr(&output).contains("Total"));

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Total 5 unused files"));
    assert!(log.contains("INFO"));
}

#[test]
fn test_unrecognized_operation() {
    let temp_dir = create_project(&[("main.tex", "x\n")]);
    let output = texproj(temp_dir.path(), &["compile", "main.tex"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("Unrecognized operation: compile"));
}

#[test]
fn test_root_with_space_fails() {
    let temp_dir = create_project(&[("my paper/main.tex", "x\n")]);
    let output = texproj(temp_dir.path(), &["flat", "my paper/main.tex"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Do not support file path with spaces"));
}

#[test]
fn test_circular_inclusion_fails() {
    let temp_dir = create_project(&[("main.tex", "\\input{a}\n"), ("a.tex", "\\input{main}\n")]);
    let output = texproj(temp_dir.path(), &["flat", "main.tex"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Circular inclusion"));
}

#[test]
fn test_find_unused_logs_paths_relative_to_cwd() {
    let temp_dir = create_project(&[
        ("paper/main.tex", "text\n"),
        ("paper/x.pdf", "pdf"),
        ("tools/run.sh", "#!/bin/sh\n"),
    ]);
    let cwd = temp_dir.path().join("tools");

    let output = texproj(&cwd, &["find_unused", "../paper/main.tex"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Unused file: ../paper/x.pdf"));
}
