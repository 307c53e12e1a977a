use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn corpus_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("corpus");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();

    let files_dir = root.join("files");
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(files_dir.join("cats.txt"), "The cat sat. The cat ran!").unwrap();
    fs::write(
        files_dir.join("dogs.txt"),
        "A dog barked at the cat.\nThe dog slept all afternoon.",
    )
    .unwrap();
    fs::write(files_dir.join("notes.md"), "markdown is not imported").unwrap();

    let config_content = format!(
        r#"[db]
path = "{root}/data/corpus.sqlite"

[query]
context_window = 2
top_words_default = 20

[server]
bind = "127.0.0.1:7341"

[import]
root = "{root}/files"
default_genre = "literature"
default_source = "test-shelf"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("corpus.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_corpus(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = corpus_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run corpus binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn setup_imported() -> (TempDir, PathBuf) {
    let (tmp, config_path) = setup_test_env();
    let (_, stderr, success) = run_corpus(&config_path, &["init"]);
    assert!(success, "init failed: {}", stderr);
    let (stdout, stderr, success) = run_corpus(&config_path, &["import"]);
    assert!(success, "import failed: stdout={}, stderr={}", stdout, stderr);
    (tmp, config_path)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_corpus(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data/corpus.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_corpus(&config_path, &["init"]);
    assert!(success1, "First init failed");
    let (_, _, success2) = run_corpus(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_import_folder() {
    let (_tmp, config_path) = setup_test_env();
    run_corpus(&config_path, &["init"]);

    let (stdout, stderr, success) = run_corpus(&config_path, &["import"]);
    assert!(success, "import failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("scanned:    2 files"), "got: {}", stdout);
    assert!(stdout.contains("added:      2"), "got: {}", stdout);
    assert!(stdout.contains("ok"));

    // Titles already exist, so nothing is added the second time.
    let (stdout, _, success) = run_corpus(&config_path, &["import"]);
    assert!(success);
    assert!(stdout.contains("added:      0"), "got: {}", stdout);
    assert!(stdout.contains("duplicates: 2"), "got: {}", stdout);
}

#[test]
fn test_frequency() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, _, success) = run_corpus(&config_path, &["frequency", "cat"]);
    assert!(success);
    assert_eq!(stdout.trim(), "cat: 3");

    let (stdout, _, success) = run_corpus(&config_path, &["frequency", "CAT!"]);
    assert!(success);
    assert_eq!(stdout.trim(), "CAT!: 3");

    let (stdout, _, success) = run_corpus(&config_path, &["frequency", "zebra"]);
    assert!(success);
    assert_eq!(stdout.trim(), "zebra: 0");
}

#[test]
fn test_empty_keyword_fails() {
    let (_tmp, config_path) = setup_imported();

    let (_, stderr, success) = run_corpus(&config_path, &["frequency", "  "]);
    assert!(!success, "empty keyword should exit non-zero");
    assert!(stderr.contains("keyword must not be empty"), "got: {}", stderr);

    let (_, _, success) = run_corpus(&config_path, &["context", ""]);
    assert!(!success);
}

#[test]
fn test_top_words() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, _, success) = run_corpus(&config_path, &["top", "--n", "2"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().skip(2).collect();
    assert_eq!(lines.len(), 2, "got: {}", stdout);
    // "the" (4) before "cat" (3)
    assert!(lines[0].contains("the") && lines[0].contains('4'), "got: {}", stdout);
    assert!(lines[1].contains("cat") && lines[1].contains('3'), "got: {}", stdout);
}

#[test]
fn test_context() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, _, success) = run_corpus(&config_path, &["context", "dog"]);
    assert!(success);
    assert!(stdout.contains("excerpt: \"A dog barked at\""), "got: {}", stdout);
    assert!(
        stdout.contains("excerpt: \"cat. The dog slept all\""),
        "got: {}",
        stdout
    );
    assert!(stdout.contains("2 occurrence(s)"));

    let (stdout, _, success) = run_corpus(&config_path, &["context", "zebra"]);
    assert!(success);
    assert!(stdout.contains("No results"));
}

#[test]
fn test_add_and_get() {
    let (tmp, config_path) = setup_imported();
    let file = tmp.path().join("greeting.txt");
    fs::write(&file, "Sawubona mngane wami").unwrap();

    let (stdout, stderr, success) = run_corpus(
        &config_path,
        &[
            "add",
            file.to_str().unwrap(),
            "--genre",
            "Conversation",
            "--source",
            "street",
        ],
    );
    assert!(success, "add failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("added document 3 (greeting)"), "got: {}", stdout);

    let (stdout, _, success) = run_corpus(&config_path, &["get", "3"]);
    assert!(success);
    assert!(stdout.contains("title:    greeting"));
    assert!(stdout.contains("genre:    conversation"));
    assert!(stdout.contains("Sawubona mngane wami"));

    // Same title again is rejected.
    let (_, stderr, success) = run_corpus(&config_path, &["add", file.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("already exists"), "got: {}", stderr);
}

#[test]
fn test_get_missing_document() {
    let (_tmp, config_path) = setup_imported();

    let (_, stderr, success) = run_corpus(&config_path, &["get", "999"]);
    assert!(!success);
    assert!(stderr.contains("document not found: 999"));
}

#[test]
fn test_remove_updates_queries() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, _, success) = run_corpus(&config_path, &["list"]);
    assert!(success);
    assert!(stdout.contains("2 document(s)"));

    // cats.txt sorts first, so it is document 1.
    let (stdout, _, success) = run_corpus(&config_path, &["remove", "1"]);
    assert!(success);
    assert!(stdout.contains("removed document 1"));

    let (stdout, _, _) = run_corpus(&config_path, &["frequency", "cat"]);
    assert_eq!(stdout.trim(), "cat: 1");

    let (_, _, success) = run_corpus(&config_path, &["remove", "1"]);
    assert!(!success, "removing twice should fail");
}

#[test]
fn test_stats() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, _, success) = run_corpus(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Documents:   2"), "got: {}", stdout);
    assert!(stdout.contains("Words:       17"), "got: {}", stdout);
    assert!(stdout.contains("literature"), "got: {}", stdout);
}

#[test]
fn test_missing_config_fails() {
    let (_, stderr, success) = run_corpus(Path::new("/nonexistent/corpus.toml"), &["stats"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
