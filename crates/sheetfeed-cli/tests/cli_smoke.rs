use predicates::prelude::*;
use std::io::Write;
use assert_cmd::Command;
use tempfile::NamedTempFile;

const GACHA: &str = "Item,YT_URL,enabled,views\n\
                     Foo,https://youtu.be/foo1,TRUE,\"1,000\"\n\
                     Bar,https://youtu.be/bar1,FALSE,50\n";

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sheetfeed"));
    cmd.arg("--config").arg("/nonexistent/sheetfeed.toml");
    cmd
}

fn csv_file(text: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", text)?;
    Ok(tmp)
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    bin().arg("--help").assert().success();
    Ok(())
}

#[test]
fn parse_rows_to_json() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = csv_file("a, \"b,c\" \n\"say \"\"hi\"\"\",d\n")?;
    let output = bin().arg("parse").arg(tmp.path()).output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(v, serde_json::json!([["a", "b,c"], ["say \"hi\"", "d"]]));
    Ok(())
}

#[test]
fn parse_records_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let output = bin()
        .args(["parse", "--records"])
        .write_stdin("\u{feff}Name,Age\r\nAnn,30\r\n")
        .output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(v, serde_json::json!([{"Name": "Ann", "Age": "30"}]));
    Ok(())
}

#[test]
fn normalize_emits_canonical_csv() -> Result<(), Box<dyn std::error::Error>> {
    bin()
        .arg("normalize")
        .write_stdin("a , \"b\" ,\"c,d\"\r\n\"\"\r\n")
        .assert()
        .success()
        .stdout("a,b,\"c,d\"\n\"\"\n");
    Ok(())
}

#[test]
fn gacha_lists_enabled_entries() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = csv_file(GACHA)?;
    bin()
        .arg("gacha")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("Foo\thttps://youtu.be/foo1\n");
    Ok(())
}

#[test]
fn gacha_spin_prints_embed_urls() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = csv_file(GACHA)?;
    bin()
        .args(["gacha", "--spin", "2", "--seed", "4"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Foo\thttps://www.youtube.com/embed/foo1?autoplay=1&rel=0",
        ));
    Ok(())
}

#[test]
fn gacha_without_required_columns_fails() -> Result<(), Box<dyn std::error::Error>> {
    bin()
        .arg("gacha")
        .write_stdin("title\nx\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load gacha feed"));
    Ok(())
}

#[test]
fn named_feed_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let feed = csv_file(GACHA)?;
    let mut config = NamedTempFile::new()?;
    writeln!(config, "[feeds]\nlunch = {:?}", feed.path().display().to_string())?;
    Command::new(assert_cmd::cargo::cargo_bin!("sheetfeed"))
        .arg("--config")
        .arg(config.path())
        .args(["impact", "--feed", "lunch"])
        .assert()
        .success()
        .stdout("1000 views, 60.0 kg CO2\n");
    Ok(())
}

#[test]
fn unknown_feed_fails() -> Result<(), Box<dyn std::error::Error>> {
    bin()
        .args(["parse", "--feed", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown feed"));
    Ok(())
}

#[test]
fn video_id_and_embed() -> Result<(), Box<dyn std::error::Error>> {
    bin()
        .args(["video", "https://www.youtube.com/watch?v=abc123&t=1"])
        .assert()
        .success()
        .stdout("abc123\n");
    bin()
        .args(["video", "--embed", "--autoplay", "https://youtu.be/abc123"])
        .assert()
        .success()
        .stdout("https://www.youtube.com/embed/abc123?autoplay=1&rel=0\n");
    bin()
        .args(["video", "https://example.com/"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn quiz_result_url() -> Result<(), Box<dyn std::error::Error>> {
    bin()
        .args(["quiz", "BBBAACDE-E"])
        .assert()
        .success()
        .stdout("https://ggeggsong.com/engineer-test1-result/?type=fire\n");
    bin().args(["quiz", "XYZ"]).assert().failure();
    Ok(())
}
