use inotree::error::HierarchyError;
use inotree::hierarchy::Hierarchy;
use inotree::store::DiskStorage;
use inotree::tree::NodeKind;
use std::fs;
use tempfile::TempDir;

fn open(root: &std::path::Path) -> Hierarchy<DiskStorage> {
    Hierarchy::open(DiskStorage::open(root).unwrap(), 3).unwrap()
}

#[test]
fn created_tree_is_mapped_back_on_restart() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    {
        let mut hierarchy = open(&root);
        hierarchy.create_directory("projects").unwrap();
        hierarchy.change_directory("projects").unwrap();
        hierarchy.create_directory("inotree").unwrap();
        hierarchy.change_directory("inotree").unwrap();
        hierarchy.create_file("Cargo.toml").unwrap();
        hierarchy.change_to_parent();
        hierarchy.change_to_parent();
        hierarchy.create_file("todo.txt").unwrap();
    }
    fs::write(root.join("todo.txt"), "buy milk").unwrap();

    let reopened = open(&root);
    let names: Vec<(u64, String)> = reopened
        .nodes_by_id()
        .map(|n| (n.id, n.name.clone()))
        .collect();
    assert_eq!(
        names,
        vec![
            (1, "root".to_string()),
            (2, "projects".to_string()),
            (3, "inotree".to_string()),
            (4, "Cargo.toml".to_string()),
            (5, "todo.txt".to_string()),
        ]
    );
    let todo = reopened.lookup(5).unwrap();
    assert_eq!(todo.size, 8);
    assert_eq!(todo.kind, NodeKind::File);
    assert!(reopened.verify().is_consistent());
}

#[test]
fn operations_in_subdirectory_use_full_path() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    let mut hierarchy = open(&root);
    hierarchy.create_directory("a").unwrap();
    hierarchy.change_directory("a").unwrap();
    hierarchy.create_directory("b").unwrap();
    hierarchy.change_directory("b").unwrap();

    hierarchy.create_file("x").unwrap();
    assert!(root.join("a/b/x").is_file());
    hierarchy.rename("x", "y").unwrap();
    assert!(root.join("a/b/y").is_file());
    hierarchy.remove("y").unwrap();
    assert!(!root.join("a/b/y").exists());
    assert!(root.join("a/b").is_dir());
}

#[test]
fn lookup_reaches_any_depth_while_find_stays_local() {
    let temp = TempDir::new().unwrap();
    let mut hierarchy = open(&temp.path().join("root"));
    let mut deepest = 0;
    for level in 0..20 {
        let name = format!("level-{level}");
        hierarchy.create_directory(&name).unwrap();
        hierarchy.change_directory(&name).unwrap();
        deepest = hierarchy.create_file("leaf").unwrap();
    }
    while hierarchy.change_to_parent() {}

    assert!(matches!(
        hierarchy.find_by_name("leaf"),
        Err(HierarchyError::NotFound(_))
    ));
    let leaf = hierarchy.lookup(deepest).unwrap();
    assert_eq!(leaf.name, "leaf");
    assert!(hierarchy.is_attached(deepest));
    assert!(hierarchy
        .path_of(deepest)
        .unwrap()
        .ends_with("level-19/leaf"));
}

#[test]
fn ids_keep_increasing_after_removal() {
    let temp = TempDir::new().unwrap();
    let mut hierarchy = open(&temp.path().join("root"));
    let first = hierarchy.create_file("a").unwrap();
    hierarchy.remove("a").unwrap();
    let second = hierarchy.create_file("a").unwrap();
    assert!(second > first);
    assert_eq!(hierarchy.lookup(first).unwrap().name, "a");
    assert_eq!(hierarchy.find_by_name("a").unwrap().id, second);

    let report = hierarchy.verify();
    assert!(report.is_consistent());
    assert_eq!(report.stale_index_entries, 1);
}
