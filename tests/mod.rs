use std::{
    fs,
    io::{stderr, stdout, Write},
    path::{Path, PathBuf},
    process::{Command, Output},
};
use tempfile::TempDir;

const SOURCE: &str = "\
start:
MOV AX, BX
  ADD CX, 1
MOVABLE DX
\tmov dx, ax
; add nothing here
JMP start
";

const DEFINITIONS: &str = "\
MOV,move data
ADD,add
not a definition
JMP,Unconditional jump
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn asmfinder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asmfinder"))
        .args(args)
        .output()
        .expect("Failed to execute asmfinder")
}

fn run(args: &[&str]) -> String {
    let output = asmfinder(args);

    if !output.status.success() {
        stdout().write(&output.stdout).unwrap();
        stderr().write(&output.stderr).unwrap();
        panic!("asmfinder {:?} resulted in status {:?}", args, output.status.code());
    }

    String::from_utf8(output.stdout)
        .unwrap()
        .replace("\r\n", "\n")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn prints_summary_and_results() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);
    let defs = write(&dir, "defs.txt", DEFINITIONS);

    let stdout = run(&[path_str(&source), "-d", path_str(&defs)]);

    assert_eq!(
        stdout,
        "Name    Count  Description\n\
         MOV         2  move data\n\
         ADD         1  add\n\
         JMP         1  Unconditional jump\n\
         \n\
         MOV AX, BX # Line 2, move data\n\
         \x20 ADD CX, 1 # Line 3, add\n\
         \tmov dx, ax # Line 5, move data\n\
         JMP start # Line 7, Unconditional jump\n"
    );
}

#[test]
fn saves_results_grouped_by_instruction() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);
    let results = dir.path().join("results.txt");

    run(&[
        path_str(&source),
        "-a",
        "JMP,jump",
        "-a",
        "MOV,move",
        "--order",
        "instruction",
        "-o",
        path_str(&results),
    ]);

    assert_eq!(
        fs::read_to_string(&results).unwrap(),
        "JMP start # Line 7, jump\n\
         MOV AX, BX # Line 2, move\n\
         \tmov dx, ax # Line 5, move\n"
    );
}

#[test]
fn config_file_selects_substring_policy() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", "  MOV  \nXMOV AX\nMOV,AX\n");
    let config = write(&dir, "asmfinder.toml", "policy = \"substring-isolation\"\n");
    let results = dir.path().join("results.txt");

    run(&[
        path_str(&source),
        "-a",
        "MOV,move",
        "-c",
        path_str(&config),
        "-o",
        path_str(&results),
    ]);

    assert_eq!(
        fs::read_to_string(&results).unwrap(),
        "  MOV   # Line 1, move\nMOV,AX # Line 3, move\n"
    );
}

#[test]
fn exports_combined_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);
    let defs = write(&dir, "defs.txt", DEFINITIONS);
    let exported = dir.path().join("exported.txt");

    run(&[
        path_str(&source),
        "-d",
        path_str(&defs),
        "-a",
        "NOP,no operation",
        "--export-definitions",
        path_str(&exported),
    ]);

    assert_eq!(
        fs::read_to_string(&exported).unwrap(),
        "MOV,move data\nADD,add\nJMP,Unconditional jump\nNOP,no operation\n"
    );
}

#[test]
fn rust_log_enables_debug_output_without_verbose_flag() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);

    let output = Command::new(env!("CARGO_BIN_EXE_asmfinder"))
        .args(&[path_str(&source), "-a", "MOV,move"])
        .env("RUST_LOG", "debug")
        .output()
        .expect("Failed to execute asmfinder");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("starting scan"));
}

#[test]
fn quiet_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);

    let output = Command::new(env!("CARGO_BIN_EXE_asmfinder"))
        .args(&[path_str(&source), "-a", "MOV,move"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute asmfinder");

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("starting scan"));
}

#[test]
fn prints_version() {
    let stdout = run(&["--version"]);

    assert_eq!(stdout, format!("asmfinder {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn fails_without_instructions() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);

    let output = asmfinder(&[path_str(&source)]);

    assert!(!output.status.success());
}

#[test]
fn fails_on_invalid_added_instruction() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(&dir, "prog.asm", SOURCE);

    assert!(!asmfinder(&[path_str(&source), "-a", "MOV"]).status.success());
    assert!(!asmfinder(&[path_str(&source), "-a", ",empty"]).status.success());
}

#[test]
fn fails_on_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.asm");

    let output = asmfinder(&[path_str(&missing), "-a", "MOV,move"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.asm"));
}
