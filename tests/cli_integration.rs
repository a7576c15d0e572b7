use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn digicol(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("digicol").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir);
    cmd
}

fn without_examples(dir: &Path) {
    fs::write(dir.join("config.json"), r#"{ "seed_examples": false }"#).unwrap();
}

#[test]
fn first_run_seeds_examples() {
    let dir = TempDir::new().unwrap();

    digicol(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples created."))
        .stdout(predicate::str::contains("Crescent Song"))
        .stdout(predicate::str::contains("Eureka"));

    let text = fs::read_to_string(dir.path().join("collection.txt")).unwrap();
    assert!(text.starts_with("id|nombre|categoria|anio|creador|calificacion\n"));
    assert!(text.contains("4|Drako Lance|Arma|2016|Forjador K|8.8\n"));
    assert!(dir.path().join("stats.bin").exists());

    // The collection is large enough now; no second round of examples.
    digicol(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples created.").not());
}

#[test]
fn add_then_lookup_by_id() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .args([
            "add", "Eureka", "Libro", "2019", "Escritor Q", "9.2", "50", "90", "7600", "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Item 'Eureka' added with ID 1."));

    digicol(dir.path())
        .args(["stats", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID 1 - Eureka"))
        .stdout(predicate::str::contains("power: 50"))
        .stdout(predicate::str::contains("views: 7600"));

    digicol(dir.path())
        .args(["stats", "--name", "eure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rarity: 30"));
}

#[test]
fn out_of_range_rating_writes_nothing() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .args([
            "add", "Eureka", "Libro", "2019", "Escritor Q", "10.5", "50", "90", "7600", "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rating"));

    let text = fs::read_to_string(dir.path().join("collection.txt")).unwrap();
    assert_eq!(text, "id|nombre|categoria|anio|creador|calificacion\n");
}

#[test]
fn blank_search_is_rejected() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty input is not allowed"));
}

#[test]
fn search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();

    digicol(dir.path())
        .args(["search", "DRAKO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 | Drako Lance | Arma | 2016 | Forjador K | 8.8"));
}

#[test]
fn menu_runs_from_stdin() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .write_stdin("1\nAoi\nPersonaje\n2020\nAutor X\n8.5\n85\n70\n1200\n25\n2\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("MY DIGITAL COLLECTION"))
        .stdout(predicate::str::contains("Item 'Aoi' added with ID 1."))
        .stdout(predicate::str::contains("1 | Aoi | Personaje | 2020 | Autor X | 8.5"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn menu_survives_closed_input() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .arg("menu")
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The collection is empty."))
        .stdout(predicate::str::contains("Input closed. Exiting..."));
}

#[test]
fn init_creates_both_stores() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created record store"))
        .stdout(predicate::str::contains("Created stats store"));

    assert!(dir.path().join("collection.txt").exists());
    assert!(dir.path().join("stats.bin").exists());
}

#[test]
fn config_set_changes_store_file() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    digicol(dir.path())
        .args(["config", "records-file", "items.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("records-file set to items.txt"));

    digicol(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("items.txt").exists());
}

#[test]
fn malformed_rows_are_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    without_examples(dir.path());
    fs::write(
        dir.path().join("collection.txt"),
        "id|nombre|categoria|anio|creador|calificacion\n1|Aoi|Personaje|2020|Autor X|8.5\nbroken|row\n",
    )
    .unwrap();

    digicol(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aoi"))
        .stdout(predicate::str::contains("line 3"));
}

#[cfg(unix)]
#[test]
fn ctrl_c_in_menu_exits_cleanly() {
    use std::io::Read;
    use std::process::{Command as Process, Stdio};

    let dir = TempDir::new().unwrap();
    without_examples(dir.path());

    let mut child = Process::new(assert_cmd::cargo::cargo_bin("digicol"))
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    // Wait for the first prompt so the handler is in place.
    let mut stdout = child.stdout.take().unwrap();
    let mut seen = Vec::new();
    let mut byte = [0u8; 1];
    while !String::from_utf8_lossy(&seen).ends_with("[1-5]: ") {
        assert_eq!(stdout.read(&mut byte).unwrap(), 1, "menu closed early");
        seen.push(byte[0]);
    }

    let sent = Process::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert!(rest.contains("Interrupted. Exiting..."));
}
