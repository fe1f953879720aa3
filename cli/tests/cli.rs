#![allow(clippy::panic_in_result_fn)]

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::{NamedTempFile, TempDir};
use predicates::prelude::*;
use shacl2datalog::DEFAULT_INCLUDE;

const SHAPES: &str = r#"
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix ex: <http://example.org/> .

ex:PersonShape a sh:NodeShape ;
    sh:name "Person" ;
    sh:targetClass ex:Person .
"#;

const PROGRAM: &str = r#".include "shacl.dl"
severity(Person, "http://www.w3.org/ns/shacl#Violation").
// <http://example.org/PersonShape>
node_shape(Person).
target(Person, X) :- instance_of("http://example.org/Person", X).
"#;

fn cli_command() -> Result<Command> {
    Ok(Command::cargo_bin("shacl2datalog")?)
}

#[test]
fn cli_help() -> Result<()> {
    cli_command()?
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn cli_translate_file_to_file() -> Result<()> {
    let input_file = NamedTempFile::new("shapes.ttl")?;
    input_file.write_str(SHAPES)?;
    let output_file = NamedTempFile::new("shapes.dl")?;
    cli_command()?
        .arg("translate")
        .arg("--file")
        .arg(input_file.path())
        .arg("--output")
        .arg(output_file.path())
        .assert()
        .success()
        .stdout("");
    output_file.assert(PROGRAM);
    Ok(())
}

#[test]
fn cli_translate_stdin_to_stdout() -> Result<()> {
    cli_command()?
        .arg("translate")
        .arg("--format")
        .arg("text/turtle")
        .write_stdin(SHAPES)
        .assert()
        .success()
        .stdout(PROGRAM);
    Ok(())
}

#[test]
fn cli_translate_stdin_requires_format() -> Result<()> {
    cli_command()?
        .arg("translate")
        .write_stdin(SHAPES)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format"));
    Ok(())
}

#[test]
fn cli_translate_with_base_and_include() -> Result<()> {
    cli_command()?
        .arg("translate")
        .arg("--format")
        .arg("ttl")
        .arg("--base")
        .arg("http://example.org/")
        .arg("--include")
        .arg("lib/shacl.dl")
        .write_stdin("<S> a <http://www.w3.org/ns/shacl#NodeShape> .")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(".include \"lib/shacl.dl\"\n"))
        .stdout(predicate::str::contains("// <http://example.org/S>"));
    Ok(())
}

#[test]
fn cli_default_include_is_the_library_one() -> Result<()> {
    cli_command()?
        .arg("translate")
        .arg("--format")
        .arg("ttl")
        .write_stdin("")
        .assert()
        .success()
        .stdout(format!(".include \"{DEFAULT_INCLUDE}\"\n"));
    Ok(())
}

#[test]
fn cli_strict_failure_does_not_write_output() -> Result<()> {
    let dir = TempDir::new()?;
    let input_file = dir.child("shapes.ttl");
    input_file.write_str(
        "@prefix sh: <http://www.w3.org/ns/shacl#> .
        <http://example.org/S> a sh:NodeShape ; sh:name \"s\" ; sh:in ( 1 2 ) .",
    )?;
    let output_file = dir.child("shapes.dl");
    cli_command()?
        .arg("translate")
        .arg("--file")
        .arg(input_file.path())
        .arg("--output")
        .arg(output_file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sh:in"));
    output_file.assert(predicate::path::missing());

    cli_command()?
        .arg("translate")
        .arg("--file")
        .arg(input_file.path())
        .arg("--output")
        .arg(output_file.path())
        .arg("--permissive")
        .assert()
        .success();
    output_file.assert(predicate::str::contains("node_shape(s)."));
    Ok(())
}

#[test]
fn cli_permissive_mode_logs_skipped_constraints() -> Result<()> {
    cli_command()?
        .arg("translate")
        .arg("--format")
        .arg("ttl")
        .arg("--permissive")
        .env("RUST_LOG", "warn")
        .write_stdin(
            "@prefix sh: <http://www.w3.org/ns/shacl#> .
            <http://example.org/S> a sh:NodeShape ; sh:hasValue 1 .",
        )
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping constraint"));
    Ok(())
}

#[test]
fn cli_invalid_input_is_reported() -> Result<()> {
    let input_file = NamedTempFile::new("shapes.ttl")?;
    input_file.write_str("this is not turtle")?;
    cli_command()?
        .arg("translate")
        .arg("--file")
        .arg(input_file.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Error while parsing file"));
    Ok(())
}

#[test]
fn cli_cyclic_shapes_are_rejected() -> Result<()> {
    cli_command()?
        .arg("translate")
        .arg("--format")
        .arg("ttl")
        .write_stdin(
            "@prefix sh: <http://www.w3.org/ns/shacl#> .
            <http://example.org/S> a sh:NodeShape ; sh:node <http://example.org/S> .",
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("already being translated"));
    Ok(())
}
