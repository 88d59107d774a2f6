#![allow(deprecated)]
use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

fn expedientes() -> Command {
    let mut cmd = Command::cargo_bin("expedientes").unwrap();
    cmd.env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .env_remove("EXPEDIENTES_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn against(server: &Server) -> Command {
    let mut cmd = expedientes();
    cmd.env("SUPABASE_URL", format!("{}/", server.url()))
        .env("SUPABASE_KEY", "test-key");
    cmd
}

// ---------------------------------------------------------------------------
// configuration
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    expedientes()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("timeline"))
        .stdout(predicate::str::contains("mcp"));
}

#[test]
fn missing_url_fails_fast() {
    expedientes()
        .env("SUPABASE_KEY", "test-key")
        .args(["search", "Perez"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SUPABASE_URL is not set"));
}

#[test]
fn missing_key_fails_fast_for_mcp() {
    expedientes()
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .arg("mcp")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SUPABASE_KEY is not set"));
}

#[test]
fn unreadable_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    expedientes()
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .env("SUPABASE_KEY", "k")
        .args(["--config"])
        .arg(dir.path().join("missing.yaml"))
        .args(["search", "Perez"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn invalid_track_is_rejected() {
    expedientes()
        .env("SUPABASE_URL", "http://127.0.0.1:9")
        .env("SUPABASE_KEY", "k")
        .args(["timeline", "5", "--track", "laboral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid track 'laboral'"));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_prints_table() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/v1/expedientes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("caratula".into(), "ilike.%perez%".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .match_header("apikey", "test-key")
        .with_status(200)
        .with_body(r#"[{"id":12,"caratula":"PEREZ JUAN c/ ACME SA","estado":"21 - ABIERTO A PRUEBA"}]"#)
        .create();

    against(&server)
        .args(["search", "perez"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PEREZ JUAN c/ ACME SA"))
        .stdout(predicate::str::contains("21 - ABIERTO A PRUEBA"));
    mock.assert();
}

#[test]
fn search_json_uses_status_placeholder() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/v1/expedientes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"id":12,"caratula":"PEREZ JUAN c/ ACME SA","estado":null}]"#)
        .create();

    let out = against(&server)
        .args(["--json", "search", "Perez", "Juan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let hits: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(hits[0]["expediente_id"], 12);
    assert_eq!(hits[0]["estado"], "Sin estado registrado");
}

#[test]
fn search_without_matches_suggests_spelling() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/v1/expedientes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    against(&server)
        .args(["search", "Zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No se encontraron casos para 'Zzz'."))
        .stdout(predicate::str::contains("apellido"));
}

#[test]
fn search_store_error_fails() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/rest/v1/expedientes")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("invalid api key")
        .create();

    against(&server)
        .args(["search", "Perez"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("401"));
}

// ---------------------------------------------------------------------------
// timeline
// ---------------------------------------------------------------------------

fn mock_case(server: &mut Server, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/rest/v1/expedientes")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.5".into()))
        .with_status(200)
        .with_body(body)
        .create()
}

#[test]
fn timeline_json_merges_movements_and_persists_follow_ups() {
    let mut server = Server::new();
    let _case = mock_case(
        &mut server,
        r#"[{"id":5,"caratula":"PEREZ JUAN c/ ACME SA","estado":"21 - ABIERTO A PRUEBA","es_srt":false,"tipo_proceso":null}]"#,
    );
    let _movements = server
        .mock("GET", "/rest/v1/movimientos")
        .match_query(Matcher::UrlEncoded("expediente_id".into(), "eq.5".into()))
        .with_status(200)
        .with_body(
            r#"[{"fecha":"2024-03-15T10:00:00","tipo":"despacho","descripcion":"se abre a prueba"},
                {"fecha":"2024-01-02","tipo":"escrito","descripcion":"contesta la demanda"}]"#,
        )
        .create();
    let _follow_ups = server
        .mock("GET", "/rest/v1/seguimientos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
    let insert = server
        .mock("POST", "/rest/v1/seguimientos")
        .match_query(Matcher::UrlEncoded(
            "on_conflict".into(),
            "expediente_id,fecha,tipo".into(),
        ))
        .with_status(201)
        .create();

    let out = against(&server)
        .args(["--json", "timeline", "5"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    insert.assert();

    let timeline: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(timeline["track"], "ordinario");
    let entries = timeline["entries"].as_array().unwrap();
    assert!(!entries.is_empty() && entries.len() <= 20);
    assert!(entries.iter().all(|e| e["origen"] == "synthetic" || e["origen"] == "real"));
    assert!(timeline["generated"].as_u64().unwrap() > 0);
}

#[test]
fn timeline_survives_failed_persist() {
    let mut server = Server::new();
    let _case = mock_case(
        &mut server,
        r#"[{"id":5,"caratula":"GOMEZ ANA c/ ART","estado":"05","es_srt":true}]"#,
    );
    let _movements = server
        .mock("GET", "/rest/v1/movimientos_srt")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"fecha":"2024-03-01","tipo":"","descripcion":"Dictamen médico"}]"#)
        .create();
    let _follow_ups = server
        .mock("GET", "/rest/v1/seguimientos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
    let _insert = server
        .mock("POST", "/rest/v1/seguimientos")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    against(&server)
        .args(["timeline", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trámite administrativo"))
        .stdout(predicate::str::contains("seguimiento"));
}

#[test]
fn timeline_unknown_case_fails() {
    let mut server = Server::new();
    let _case = mock_case(&mut server, "[]");

    against(&server)
        .args(["timeline", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("case not found: 5"));
}

#[test]
fn config_file_renames_collections() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("expedientes.yaml");
    std::fs::write(&path, "store:\n  collections:\n    cases: casos_prueba\n").unwrap();

    let mock = server
        .mock("GET", "/rest/v1/casos_prueba")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    against(&server)
        .arg("--config")
        .arg(&path)
        .args(["search", "Perez"])
        .assert()
        .success();
    mock.assert();
}

// ---------------------------------------------------------------------------
// mcp
// ---------------------------------------------------------------------------

#[test]
fn mcp_answers_over_stdio() {
    let server = Server::new();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        "not json\n",
    );

    let out = against(&server)
        .arg("mcp")
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["result"]["serverInfo"]["name"], "expedientes");
    assert_eq!(lines[1]["result"]["tools"].as_array().unwrap().len(), 2);
    assert_eq!(lines[2]["error"]["code"], -32700);
}
