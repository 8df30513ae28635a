use inotree::hierarchy::Hierarchy;
use inotree::listing::Painter;
use inotree::store::DiskStorage;
use inotree::tooling::{Flow, Shell};
use std::io::Cursor;
use tempfile::TempDir;

fn shell(temp: &TempDir) -> Shell<DiskStorage, Vec<u8>> {
    let storage = DiskStorage::open(temp.path().join("root")).unwrap();
    let hierarchy = Hierarchy::open(storage, 3).unwrap();
    Shell::new(hierarchy, Vec::new(), Painter::new(false))
}

fn output(shell: &Shell<DiskStorage, Vec<u8>>) -> String {
    String::from_utf8(shell.output().clone()).unwrap()
}

#[test]
fn session_creates_lists_and_finds() {
    let temp = TempDir::new().unwrap();
    let mut shell = shell(&temp);
    for line in [
        "createDirectory docs",
        "cd docs",
        "createFile \"meeting notes.txt\"",
        "chmod \"meeting notes.txt\" 6",
        "ls",
        "find \"meeting notes.txt\"",
        "cd..",
        "ls -R",
    ] {
        assert_eq!(shell.execute_line(line).unwrap(), Flow::Continue);
    }
    let out = output(&shell);
    assert!(out.contains("3 -rw-r--r-- meeting notes.txt "), "{}", out);
    assert!(out.contains("Found: meeting notes.txt id: 3"), "{}", out);
    assert!(out.contains("\n  drwxr--r-- docs "), "{}", out);
    assert!(out.contains("\n    -rw-r--r-- meeting notes.txt "), "{}", out);
    assert!(temp.path().join("root/docs/meeting notes.txt").is_file());
}

#[test]
fn errors_are_reported_and_session_continues() {
    let temp = TempDir::new().unwrap();
    let mut shell = shell(&temp);
    shell.execute_line("createFile a").unwrap();
    for line in [
        "chmod a 8",
        "chmod a abc",
        "rename missing other",
        "cd a",
        "frobnicate",
        "lookup 99",
    ] {
        assert_eq!(shell.execute_line(line).unwrap(), Flow::Continue);
    }
    let out = output(&shell);
    assert_eq!(out.matches("Error: Invalid argument").count(), 2, "{}", out);
    assert_eq!(out.matches("Error: Not found").count(), 3, "{}", out);
    assert!(out.contains("Unknown command: frobnicate"), "{}", out);
    assert_eq!(
        shell.hierarchy().find_by_name("a").unwrap().permissions.as_str(),
        "rwxr--r--"
    );
}

#[test]
fn lookup_and_ids_go_through_index() {
    let temp = TempDir::new().unwrap();
    let mut shell = shell(&temp);
    for line in ["createDirectory d", "cd d", "createFile f", "cd..", "delete d"] {
        shell.execute_line(line).unwrap();
    }
    shell.execute_line("ids").unwrap();
    shell.execute_line("lookup 3").unwrap();
    shell.execute_line("stats --json").unwrap();

    let out = output(&shell);
    assert!(out.contains("1 2 3\n"), "{}", out);
    assert!(out.contains("index entry retained"), "{}", out);
    let json_line = out.lines().find(|l| l.starts_with('{')).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(json_line).unwrap();
    assert_eq!(parsed["index"]["entries"], 3);
    assert_eq!(parsed["stale_index_entries"], 2);
    assert_eq!(parsed["attached"], 1);
}

#[test]
fn run_loop_stops_at_exit() {
    let temp = TempDir::new().unwrap();
    let mut shell = shell(&temp);
    let input = Cursor::new("createFile one\nexit\ncreateFile two\n");
    shell.run(input, "> ").unwrap();

    assert!(shell.hierarchy().find_by_name("one").is_ok());
    assert!(shell.hierarchy().find_by_name("two").is_err());
    let out = output(&shell);
    assert!(out.contains("Current directory: "), "{}", out);
    assert!(out.contains("> "));
}

#[test]
fn run_loop_skips_non_utf8_lines() {
    let temp = TempDir::new().unwrap();
    let mut shell = shell(&temp);
    let input = Cursor::new(&b"createFile \xff\r\ncreateFile after\r\n"[..]);
    shell.run(input, "> ").unwrap();

    assert_eq!(shell.hierarchy().find_by_name("after").unwrap().id, 2);
    assert_eq!(shell.hierarchy().list_direct().count(), 1);
    assert!(temp.path().join("root").join("after").is_file());
    assert!(output(&shell).contains("Error: input is not valid UTF-8"));
}

#[test]
fn verify_reports_consistency() {
    let temp = TempDir::new().unwrap();
    let mut shell = shell(&temp);
    shell.execute_line("createFile x").unwrap();
    shell.execute_line("verify").unwrap();
    assert!(output(&shell).contains("Hierarchy and index are consistent"));
}
