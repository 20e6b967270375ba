use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

const SIGNUPS: &str = "\
Nombre,Telefono,Correo
ANA maria,3001234567,ana@example.co
al,3009876543,
Beto,3001234567,
Sin telefono,12345,
";

fn write_input(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).expect("write input");
    path
}

fn run_raw(temp: &TempDir, args: &[&str]) -> Output {
    cargo_bin_cmd!("depura")
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env_remove("RUST_LOG")
        .current_dir(temp.path())
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(temp: &TempDir, args: &[&str]) -> String {
    let output = run_raw(temp, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(temp: &TempDir, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_cmd(temp, &full);
    serde_json::from_str(&stdout).expect("parse json")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("path")
}

#[test]
fn build_writes_csv_to_stdout() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);

    let stdout = run_cmd(&temp, &["build", path_str(&input), "--format", "csv"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Numero telefono,value1,value2,value3,value4,value5,Estado",
            "3001234567,Ana,,,,,",
            "3009876543,Contacto,,,,,",
        ]
    );
}

#[test]
fn build_writes_default_xlsx_in_working_dir() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);

    let stdout = run_cmd(&temp, &["build", path_str(&input)]);
    assert!(stdout.contains("2 unique contacts"), "stdout: {stdout}");
    assert!(temp.path().join("BASE_APPP_mensajeria.xlsx").exists());
}

#[test]
fn build_json_reports_stats_and_output() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);
    let out = temp.path().join("out").join("base.csv");

    let report = run_cmd_json(
        &temp,
        &["build", path_str(&input), "--out", path_str(&out)],
    );
    assert_eq!(report["count"], 2);
    assert_eq!(report["format"], "csv");
    assert_eq!(report["policy"], "permissive");
    assert_eq!(report["stats"]["rows_scanned"], 4);
    assert_eq!(report["stats"]["rows_without_phone"], 1);
    assert_eq!(report["stats"]["duplicates_dropped"], 1);
    assert_eq!(report["stats"]["fallback_names"], 1);
    assert_eq!(report["phone_columns"][0], "Telefono");
    assert_eq!(report["name_columns"][0], "Nombre");

    let written = fs::read_to_string(&out).expect("read export");
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn build_with_jobs_matches_sequential_output() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);

    let sequential = run_cmd(&temp, &["build", path_str(&input), "--format", "csv"]);
    let chunked = run_cmd(
        &temp,
        &["build", path_str(&input), "--format", "csv", "--jobs", "3"],
    );
    assert_eq!(sequential, chunked);
}

#[test]
fn explicit_columns_and_fallback_name_override_defaults() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "grupo.csv",
        "Grupo;Alumno;Acudiente\n3101112233;Li;Marta Gomez\n",
    );

    let stdout = run_cmd(
        &temp,
        &[
            "build",
            path_str(&input),
            "--format",
            "csv",
            "--phone-col",
            "Grupo",
            "--name-col",
            "Alumno",
            "--fallback-name",
            "Familia",
        ],
    );
    assert!(stdout.contains("3101112233,Familia,"), "stdout: {stdout}");

    let stdout = run_cmd(
        &temp,
        &[
            "build",
            path_str(&input),
            "--format",
            "csv",
            "--phone-col",
            "Grupo",
            "--name-col",
            "Alumno",
            "--name-col",
            "Acudiente",
        ],
    );
    assert!(stdout.contains("3101112233,Marta,"), "stdout: {stdout}");
}

#[test]
fn strict_policy_rejects_single_word_names() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "one.csv", "Nombre,Tel\nAlberto,3001234567\n");

    let permissive = run_cmd(&temp, &["build", path_str(&input), "--format", "csv"]);
    assert!(permissive.contains("3001234567,Alberto,"));

    let strict = run_cmd(
        &temp,
        &["build", path_str(&input), "--format", "csv", "--policy", "strict"],
    );
    assert!(strict.contains("3001234567,Contacto,"));

    let out = temp.path().join("strict.csv");
    let report = run_cmd_json(
        &temp,
        &[
            "build",
            path_str(&input),
            "--out",
            path_str(&out),
            "--policy",
            "strict",
        ],
    );
    assert_eq!(report["policy"], "strict");
    assert_eq!(report["stats"]["fallback_names"], 1);
}

#[test]
fn no_contacts_exits_not_found_without_writing() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "empty.csv", "Nombre,Tel\nAna,12345\nBeto,\n");

    let output = run_raw(&temp, &["build", path_str(&input)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!temp.path().join("BASE_APPP_mensajeria.xlsx").exists());
}

#[test]
fn missing_phone_columns_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "names.csv", "Nombre,Ciudad\nAna,Cali\n");

    let output = run_raw(&temp, &["preview", path_str(&input)]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("--phone-col"), "stderr: {stderr}");
}

#[test]
fn unreadable_inputs_are_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "notes.pdf", "not a sheet");

    let output = run_raw(&temp, &["build", path_str(&input)]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn json_csv_build_requires_out() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);

    let output = run_raw(&temp, &["--json", "build", path_str(&input), "--format", "csv"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn preview_json_lists_contacts_in_order() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);

    let preview = run_cmd_json(&temp, &["preview", path_str(&input), "--limit", "1"]);
    assert_eq!(preview["count"], 2);
    let contacts = preview["contacts"].as_array().expect("array");
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["phone_number"], "3001234567");
    assert_eq!(contacts[0]["primary_name"], "Ana");
    assert!(!temp.path().join("BASE_APPP_mensajeria.xlsx").exists());
}

#[test]
fn columns_json_suggests_from_keywords() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "signups.csv", SIGNUPS);

    let report = run_cmd_json(&temp, &["columns", path_str(&input)]);
    assert_eq!(report["headers"].as_array().expect("array").len(), 3);
    assert_eq!(report["phone_columns"][0], "Telefono");
    assert_eq!(report["phone_columns"][1], "Correo");
    assert_eq!(report["name_columns"][0], "Nombre");
}

#[test]
fn config_file_changes_defaults() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "one.csv", "Nombre,Tel\nAlberto,3001234567\n");
    let config = write_input(
        &temp,
        "depura.toml",
        "[extract]\npolicy = \"strict\"\nfallback_name = \"Cliente\"\n",
    );

    let stdout = run_cmd(
        &temp,
        &[
            "--config",
            path_str(&config),
            "build",
            path_str(&input),
            "--format",
            "csv",
        ],
    );
    assert!(stdout.contains("3001234567,Cliente,"), "stdout: {stdout}");
}

#[test]
fn explicit_phone_column_with_comma_in_name() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "acudientes.csv",
        "Nombre;Telefono, celular\nAna;3001234567\nBeto;3009876543\n",
    );

    let stdout = run_cmd(
        &temp,
        &[
            "build",
            path_str(&input),
            "--format",
            "csv",
            "--phone-col",
            "Telefono, celular",
        ],
    );
    assert!(stdout.contains("3001234567,Ana,"), "stdout: {stdout}");
    assert!(stdout.contains("3009876543,Beto,"), "stdout: {stdout}");
}
