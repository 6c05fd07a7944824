use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn extraction(identifier: &str, outlets: &[&str]) -> String {
    let text = format!(
        "PROMO AGREEMENT {identifier}\n\
         BRAND : FORTUNE\n\
         DISTRIBUTOR : DST01 - CV SUMBER\n\
         SUB PROMO TYPE : 02SD - Strata Discount\n\
         PERIODE 01/03/2024 - 31/03/2024"
    );
    let mut tables = vec![
        serde_json::json!([["SKU", "UOM", "QTY IN CTN"], ["FORTUNE PCH @1LT", "CTN", "120"]]),
        serde_json::json!([
            ["SKU", "UOM", "MIN QTY / CTN", "DISC %", "SHARE DIST %"],
            ["FORTUNE PCH @1LT", "CTN", "1-10", "2", "0"],
            ["", "", "11", "3", "1"]
        ]),
    ];
    if !outlets.is_empty() {
        let mut grid = vec![serde_json::json!(["NO", "ID OUTLET", "NAMA OUTLET"])];
        for (n, id) in outlets.iter().enumerate() {
            grid.push(serde_json::json!([(n + 1).to_string(), id, format!("TOKO {id}")]));
        }
        tables.push(serde_json::Value::Array(grid));
    }
    serde_json::json!({ "text": text, "tables": tables }).to_string()
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn dschema() -> Command {
    Command::cargo_bin("dschema").unwrap()
}

#[test]
fn process_prints_schema_json() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "agreement.json", &extraction("CP24FRIPC012-3", &[]));

    dschema()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"list_break\""))
        .stdout(predicate::str::contains("\"selectiontype\": \"IA\""))
        .stdout(predicate::str::contains("\"breakvalueto\": 99"));
}

#[test]
fn process_csv_lists_break_lines() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "agreement.json", &extraction("CP24FRIPC012-3", &[]));

    dschema()
        .args(["process", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("CP24FRIPC012-3,10,FORTUNE PCH @1LT,vendor_cashback"))
        .stdout(predicate::str::contains("share_discount,1000001,1,99,1"));
}

#[test]
fn process_plain_text_with_table_dump() {
    let dir = tempdir().unwrap();
    let text = write(
        dir.path(),
        "agreement.txt",
        "CP24FRIPC012-3\nBRAND : FORTUNE\nDISTRIBUTOR : DST01 - CV SUMBER\n\
         SUB PROMO TYPE : 02SD - Strata Discount\n01/03/2024 - 31/03/2024",
    );
    let dump = write(
        dir.path(),
        "tables.csv",
        "SKU,UOM,QTY IN CTN\nFORTUNE PCH @1LT,CTN,100/4\n---,---,---\n",
    );

    dschema()
        .args(["process", "--format", "text"])
        .arg(&text)
        .arg("--tables")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("Agreement: CP24FRIPC012-3"))
        .stdout(predicate::str::contains("Allocated: 25 CTN"));
}

#[test]
fn process_reports_missing_field() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "empty.json", r#"{ "text": "nothing here" }"#);

    dschema()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field"));
}

#[test]
fn strict_rejects_missing_quantity() {
    let dir = tempdir().unwrap();
    let content = serde_json::json!({
        "text": "CP24FRIPC012-3\nBRAND : FORTUNE\nDISTRIBUTOR : DST01 - CV SUMBER\n\
                 SUB PROMO TYPE : 02SD - Strata Discount\n01/03/2024 - 31/03/2024\n\
                 FORTUNE PCH @1LT"
    })
    .to_string();
    let input = write(dir.path(), "agreement.json", &content);

    dschema().arg("process").arg(&input).assert().success();
    dschema()
        .args(["process", "--strict"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("allocated quantity"));
}

#[test]
fn batch_writes_one_schema_per_document() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    write(dir.path(), "a.json", &extraction("CP24FRIPC012-3", &["C-01", "C-02"]));
    write(dir.path(), "b.json", &extraction("CP24FRIPC013-1", &[]));

    dschema()
        .arg("batch")
        .arg(dir.path().join("*.json").to_string_lossy().as_ref())
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success();

    let first = fs::read_to_string(out.join("CP24FRIPC012-3.json")).unwrap();
    let second = fs::read_to_string(out.join("CP24FRIPC013-1.json")).unwrap();
    assert!(first.contains("\"selectiontype\": \"ISC\""));
    assert!(second.contains("\"selectiontype\": \"ESC\""));
    assert!(second.contains("C-02"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("b.json,CP24FRIPC013-1,FORTUNE,PST,ESC"));
}

#[test]
fn batch_with_duplicates_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    write(dir.path(), "a.json", &extraction("CP24FRIPC012-3", &[]));
    write(dir.path(), "b.json", &extraction("CP24FRIPC012-3", &[]));

    dschema()
        .arg("batch")
        .arg(dir.path().join("*.json").to_string_lossy().as_ref())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate promo contract number"));

    assert!(!out.exists());
}

#[test]
fn inspect_shows_block_kinds() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "agreement.json", &extraction("CP24FRIPC012-3", &["C-01"]));

    dschema()
        .arg("inspect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("sales commitment"))
        .stdout(predicate::str::contains("strata discount"))
        .stdout(predicate::str::contains("outlet list"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    dschema()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("reduced_bound_promo_types"));

    dschema()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn explicit_config_changes_area_table() {
    let dir = tempdir().unwrap();
    let config = serde_json::json!({
        "areas": { "01": { "area_name": "CUSTOM", "org_id": 42 } }
    });
    let config_path = write(dir.path(), "config.json", &config.to_string());
    let input = write(dir.path(), "agreement.json", &extraction("CP24FRIPC012-3", &[]));

    dschema()
        .arg("--config")
        .arg(&config_path)
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Area: 01 CUSTOM (42)"));
}
