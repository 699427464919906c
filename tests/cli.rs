use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

const MANIFEST: &str = r#"
techpack:
  name: Web Stack
  namespace: web
  description: Web development tech pack
  version: 1.0.0
  min_sdd_version: 0.1.0
  system_path: system/SYSTEM.md
skills:
  scaffold-api: skills/scaffold-api.md
  deploy: ./skills/deploy.md
  greet: skills/greet.md
agents:
  reviewer: agents/reviewer.md
components:
  api:
    description: REST API service
    directory_pattern: services/{name}
    depends_on: [db]
    scaffolding: scaffold-api
    skills: [deploy]
    agent: reviewer
  db:
    description: Database
    directory_pattern: db/{name}
    scaffolding: scaffold-api
    singleton: true
phases:
  implement:
    orchestrator_skills: [scaffold-api, deploy]
    agents: [reviewer]
help:
  capabilities: deploy
  content: deploy
commands:
  db:
    handler: db-handler
    skill: deploy
    actions:
      migrate:
        description: Run migrations
        public: true
        destructive: true
"#;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project with one externally-installed tech pack.
fn project_fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let pack = dir.path().join("packs/web");

    write_file(&pack.join("techpack.yaml"), MANIFEST);
    write_file(&pack.join("system/SYSTEM.md"), "# System\n");
    write_file(&pack.join("skills/scaffold-api.md"), "Scaffold an API\n");
    write_file(&pack.join("skills/deploy.md"), "Deploy things\n");
    write_file(
        &pack.join("skills/greet.md"),
        "Root: <techpack-root>/data\n",
    );
    write_file(
        &pack.join("agents/reviewer.md"),
        "---\nname: API Reviewer\ndescription: Reviews APIs\nmodel: sonnet\nskills: [deploy]\n---\nPrompt body\n",
    );

    let settings = format!(
        r"techpacks:
  web:
    name: Web Stack
    namespace: web
    version: 1.0.0
    mode: external
    path: {}
",
        pack.display()
    );
    write_file(&dir.path().join("sdd/sdd-settings.yaml"), &settings);

    (dir, pack)
}

fn sdd(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sdd-system").unwrap();
    cmd.arg("--robot").arg("--project-root").arg(project);
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sdd-system").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("sdd-system").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_reports_installed_packs() {
    let (project, _) = project_fixture();
    let json = json_output(sdd(project.path()).args(["tech-pack", "list"]));
    assert_eq!(json["success"], Value::Bool(true));
    assert_eq!(json["data"]["techpacks"][0]["namespace"], "web");
    assert_eq!(json["data"]["techpacks"][0]["mode"], "external");
}

#[test]
fn test_list_human_mode() {
    let (project, _) = project_fixture();
    let mut cmd = Command::cargo_bin("sdd-system").unwrap();
    cmd.arg("--project-root")
        .arg(project.path())
        .args(["tech-pack", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web — Web Stack v1.0.0 (external)"));
}

#[test]
fn test_info_summarizes_manifest() {
    let (project, pack) = project_fixture();
    let json = json_output(sdd(project.path()).args(["tech-pack", "info", "--namespace", "web"]));
    assert_eq!(json["success"], Value::Bool(true));
    let data = &json["data"];
    assert_eq!(data["name"], "Web Stack");
    assert_eq!(data["counts"]["skills"], 3);
    assert_eq!(data["counts"]["components"], 2);
    assert_eq!(data["compatible"], Value::Bool(true));
    assert_eq!(data["path"], pack.display().to_string());
}

#[test]
fn test_unknown_namespace_fails_with_code() {
    let (project, _) = project_fixture();
    let mut cmd = sdd(project.path());
    cmd.args(["tech-pack", "info", "--namespace", "ghost"]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], Value::Bool(false));
    assert_eq!(json["code"], "namespace_not_found");
}

#[test]
fn test_validate_accepts_valid_pack() {
    let (project, pack) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "validate",
        "--path",
        &pack.display().to_string(),
    ]));
    assert_eq!(json["success"], Value::Bool(true));
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("is valid — 2 component types")
    );
}

#[test]
fn test_validate_reports_every_problem_at_once() {
    // One schema violation, one missing path, one dangling reference,
    // one dependency cycle — all four must land in one report.
    let dir = tempdir().unwrap();
    let pack = dir.path().join("broken");
    write_file(
        &pack.join("techpack.yaml"),
        r"
techpack:
  name: Broken
  namespace: broken
  description: d
  version: not-semver
  min_sdd_version: 0.1.0
  system_path: missing.md
skills:
  build: scripts/build.md
components:
  a:
    description: a
    directory_pattern: p
    depends_on: [b]
    scaffolding: ghost
  b:
    description: b
    directory_pattern: p
    depends_on: [a]
    scaffolding: build
",
    );
    write_file(&pack.join("scripts/build.md"), "x\n");

    let mut cmd = Command::cargo_bin("sdd-system").unwrap();
    cmd.arg("--robot")
        .args(["tech-pack", "validate", "--path"])
        .arg(&pack);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "validation_failed");
    let codes: Vec<&str> = json["data"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"schema_violation"));
    assert!(codes.contains(&"path_not_found"));
    assert!(codes.contains(&"unresolved_skill_reference"));
    assert!(codes.contains(&"dependency_cycle"));
}

#[test]
fn test_dependency_order_is_topological() {
    let (project, _) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "dependency-order",
        "--namespace",
        "web",
    ]));
    assert_eq!(json["success"], Value::Bool(true));
    let order: Vec<&str> = json["data"]["order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["db", "api"]);
}

#[test]
fn test_route_skills_for_declared_phase() {
    let (project, pack) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "route-skills",
        "--namespace",
        "web",
        "--phase",
        "implement",
    ]));
    assert_eq!(json["success"], Value::Bool(true));
    let skills = json["data"]["orchestrator_skills"].as_array().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0]["name"], "scaffold-api");
    assert_eq!(
        skills[0]["path"],
        pack.join("skills/scaffold-api.md").display().to_string()
    );
    assert_eq!(json["data"]["agents"][0], "reviewer");
}

#[test]
fn test_route_skills_absent_phase_is_empty_success() {
    let (project, _) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "route-skills",
        "--namespace",
        "web",
        "--phase",
        "plan",
    ]));
    assert_eq!(json["success"], Value::Bool(true));
    assert_eq!(
        json["data"]["orchestrator_skills"],
        Value::Array(Vec::new())
    );
}

#[test]
fn test_route_skills_with_component() {
    let (project, _) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "route-skills",
        "--namespace",
        "web",
        "--phase",
        "implement",
        "--component",
        "api",
    ]));
    let component_skills = json["data"]["component_skills"].as_array().unwrap();
    assert_eq!(component_skills.len(), 1);
    assert_eq!(component_skills[0]["name"], "deploy");
}

#[test]
fn test_route_skills_unknown_component_fails() {
    let (project, _) = project_fixture();
    let mut cmd = sdd(project.path());
    cmd.args([
        "tech-pack",
        "route-skills",
        "--namespace",
        "web",
        "--phase",
        "implement",
        "--component",
        "cache",
    ]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "unknown_component");
}

#[test]
fn test_route_command_returns_handler_metadata() {
    let (project, _) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "route-command",
        "--namespace",
        "web",
        "--command",
        "db",
        "--action",
        "migrate",
    ]));
    let data = &json["data"];
    assert_eq!(data["handler"], "db-handler");
    assert_eq!(data["public"], Value::Bool(true));
    assert_eq!(data["destructive"], Value::Bool(true));
    assert_eq!(data["skill"], "deploy");
}

#[test]
fn test_route_command_unknown_action() {
    let (project, _) = project_fixture();
    let mut cmd = sdd(project.path());
    cmd.args([
        "tech-pack",
        "route-command",
        "--namespace",
        "web",
        "--command",
        "db",
        "--action",
        "drop",
    ]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "unknown_action");
}

#[test]
fn test_load_skill_substitutes_techpack_root() {
    let (project, pack) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "load-skill",
        "--namespace",
        "web",
        "--skill",
        "greet",
    ]));
    assert_eq!(json["success"], Value::Bool(true));
    let expected = format!("Root: {}/data\n", pack.display());
    assert_eq!(json["data"]["content"], expected);
}

#[test]
fn test_load_agent_resolves_skills() {
    let (project, pack) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "load-agent",
        "--namespace",
        "web",
        "--agent",
        "reviewer",
    ]));
    let data = &json["data"];
    assert_eq!(data["name"], "API Reviewer");
    assert_eq!(data["model"], "sonnet");
    assert_eq!(data["skills"][0]["name"], "deploy");
    assert_eq!(
        data["prompt"],
        pack.join("agents/reviewer.md").display().to_string()
    );
}

#[test]
fn test_resolve_path_joins_directory() {
    let (project, pack) = project_fixture();
    let json = json_output(sdd(project.path()).args([
        "tech-pack",
        "resolve-path",
        "--namespace",
        "web",
        "--path",
        "templates/api",
    ]));
    assert_eq!(
        json["data"]["resolved_path"],
        pack.join("templates/api").display().to_string()
    );
}

#[test]
fn test_agent_frontmatter_command() {
    let (_project, pack) = project_fixture();
    let mut cmd = Command::cargo_bin("sdd-system").unwrap();
    cmd.arg("--robot")
        .args(["agent", "frontmatter", "--path"])
        .arg(pack.join("agents/reviewer.md"));
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["name"], "API Reviewer");
    assert_eq!(json["data"]["skills"][0], "deploy");
}

#[test]
fn test_outside_project_fails_for_namespace_commands() {
    let empty = tempdir().unwrap();
    let mut cmd = sdd(empty.path());
    cmd.args(["tech-pack", "list"]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("not in an SDD project")
    );
}
