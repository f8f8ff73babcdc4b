//! End-to-end CLI tests
//!
//! Each test runs the compiled binary against an isolated data directory
//! through the `CAISSE_CLI_DATA_DIR` override.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn caisse(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("caisse").unwrap();
    cmd.env("CAISSE_CLI_DATA_DIR", data_dir.path());
    cmd
}

fn write_rows(dir: &TempDir) -> std::path::PathBuf {
    let rows = dir.path().join("rows.json");
    std::fs::write(
        &rows,
        r#"[
            {"date": "03/10/2025", "piece": "P-001", "libelle": "Vente de formulaires", "imputation": "71.20", "recette": "1 500,00", "depense": "", "solde": "1 500,00"},
            {"date": "07/10/2025", "piece": "P-002", "libelle": "Achat fournitures", "imputation": "60.10", "recette": "", "depense": "450,50", "solde": "1 049,50"}
        ]"#,
    )
    .unwrap();
    rows
}

#[test]
fn test_export_excel_writes_file() {
    let data_dir = TempDir::new().unwrap();
    let rows = write_rows(&data_dir);
    let out = data_dir.path().join("feuille.xlsx");

    caisse(&data_dir)
        .args(["export", rows.to_str().unwrap()])
        .args(["--format", "excel"])
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Excel"));

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_pdf_default_output_path() {
    let data_dir = TempDir::new().unwrap();
    let rows = write_rows(&data_dir);

    caisse(&data_dir)
        .args(["export", rows.to_str().unwrap()])
        .args(["--title", "FEUILLE DE CAISSE"])
        .assert()
        .success();

    let out = data_dir.path().join("exports").join("feuille-de-caisse.pdf");
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_unknown_format_fails() {
    let data_dir = TempDir::new().unwrap();
    let rows = write_rows(&data_dir);

    caisse(&data_dir)
        .args(["export", rows.to_str().unwrap()])
        .args(["--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported export format"));
}

#[test]
fn test_export_is_recorded_in_history() {
    let data_dir = TempDir::new().unwrap();
    let rows = write_rows(&data_dir);
    let out = data_dir.path().join("etat.docx");

    caisse(&data_dir)
        .args(["export", rows.to_str().unwrap()])
        .args(["--format", "word"])
        .args(["--output", out.to_str().unwrap()])
        .args(["--user", "mkashama"])
        .assert()
        .success();

    caisse(&data_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXPORT OK"))
        .stdout(predicate::str::contains("mkashama"));
}

#[test]
fn test_settings_set_then_show() {
    let data_dir = TempDir::new().unwrap();

    caisse(&data_dir)
        .args(["settings", "set"])
        .args(["--principal-color", "#004080"])
        .args(["--watermark", "COPIE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enregistrees"));

    caisse(&data_dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#004080"))
        .stdout(predicate::str::contains("COPIE"));
}

#[test]
fn test_history_empty() {
    let data_dir = TempDir::new().unwrap();

    caisse(&data_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aucun export enregistre"));
}
