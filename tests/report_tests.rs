mod common;
use common::{MARCH_EVENTS, alpha_answers, ptt, temp_path, write_config, write_events};
use predicates::str::contains;
use std::fs;
use std::path::Path;

#[test]
fn test_report_csv_from_saved_events() {
    let cfg = write_config("report_csv", "");
    let events = write_events("report_csv", MARCH_EVENTS);
    let out = temp_path("report_csv", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success()
        .stdout(contains("Report written to"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Project,01-Mar,weekend,weekend,04-Mar,05-Mar,Total"
    );
    // the Saturday demo lands in a blank weekend column
    assert_eq!(lines[1], "Alpha,0,,,1,0,1");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_report_several_projects_keep_their_order() {
    let cfg = write_config("report_order", "");
    let events = write_events("report_order", MARCH_EVENTS);
    let out = temp_path("report_order", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin("01/03/2024\n05/03/2024\nReviews\nreview\nAlpha\ndemo\n\n")
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[1], "Reviews,0,,,0,2,2");
    assert_eq!(lines[2], "Alpha,0,,,1,0,1");
}

#[test]
fn test_report_xlsx_is_the_default_format() {
    let cfg = write_config("report_xlsx", "");
    let events = write_events("report_xlsx", MARCH_EVENTS);
    let out = temp_path("report_xlsx", "xlsx");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success()
        .stdout(contains("Exporting to XLSX"));

    let bytes = fs::read(&out).expect("read exported xlsx");
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_report_json_format_flag() {
    let cfg = write_config("report_json", "");
    let events = write_events("report_json", MARCH_EVENTS);
    let out = temp_path("report_json", "out");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--format",
            "json",
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"project\": \"Alpha\""));
    assert!(content.contains("\"total\": 1"));
}

#[test]
fn test_report_preview_is_printed() {
    let cfg = write_config("report_preview", "");
    let events = write_events("report_preview", MARCH_EVENTS);
    let out = temp_path("report_preview", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success()
        .stdout(contains("Time spent on projects"))
        .stdout(contains("04-Mar"))
        .stdout(contains("Fetched 3 event(s)"));
}

#[test]
fn test_report_follows_every_saved_page() {
    let cfg = write_config("report_pages", "");
    let events = write_events(
        "report_pages",
        r#"[
          {"items": [{"summary": "demo one",
                      "start": {"dateTime": "2024-03-04T08:00:00Z"},
                      "end":   {"dateTime": "2024-03-04T09:00:00Z"}}],
           "nextPageToken": "next"},
          {"items": [{"summary": "demo two",
                      "start": {"dateTime": "2024-03-05T08:00:00Z"},
                      "end":   {"dateTime": "2024-03-05T10:00:00Z"}}]}
        ]"#,
    );
    let out = temp_path("report_pages", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Alpha,0,,,1,2,3"));
}

#[test]
fn test_report_with_word_matching() {
    let cfg = write_config("report_word", "keyword_match: word\n");
    let events = write_events(
        "report_word",
        r#"{"items": [
            {"summary": "demonstration",
             "start": {"dateTime": "2024-03-04T08:00:00Z"},
             "end":   {"dateTime": "2024-03-04T10:00:00Z"}},
            {"summary": "demo",
             "start": {"dateTime": "2024-03-05T08:00:00Z"},
             "end":   {"dateTime": "2024-03-05T09:00:00Z"}}
        ]}"#,
    );
    let out = temp_path("report_word", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Alpha,0,,,0,1,1"));
}

#[test]
fn test_report_malformed_events_are_skipped_with_a_warning() {
    let cfg = write_config("report_malformed", "");
    let events = write_events(
        "report_malformed",
        r#"{"items": [
            {"summary": "demo backwards",
             "start": {"dateTime": "2024-03-04T11:00:00Z"},
             "end":   {"dateTime": "2024-03-04T10:00:00Z"}},
            {"summary": "demo sync",
             "start": {"dateTime": "2024-03-04T10:00:00Z"},
             "end":   {"dateTime": "2024-03-04T12:00:00Z"}}
        ]}"#,
    );
    let out = temp_path("report_malformed", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success()
        .stderr(contains("Skipping malformed event 'demo backwards'"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Alpha,0,,,2,0,2"));
}

#[test]
fn test_report_all_day_events_count_full_days() {
    let cfg = write_config("report_all_day", "");
    let events = write_events(
        "report_all_day",
        r#"{"items": [
            {"summary": "demo day",
             "start": {"date": "2024-03-05"},
             "end":   {"date": "2024-03-06"}}
        ]}"#,
    );
    let out = temp_path("report_all_day", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Alpha,0,,,0,24,24"));
}

#[test]
fn test_report_until_now() {
    let cfg = write_config("report_now", "");
    let events = write_events("report_now", MARCH_EVENTS);
    let out = temp_path("report_now", "csv");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin("01/03/2024\nahora\nAlpha\ndemo\nBuscar\n")
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("Project,01-Mar,weekend,weekend,04-Mar,05-Mar,06-Mar"));
    assert!(content.lines().next().unwrap().ends_with(",Total"));
}

#[test]
fn test_report_existing_file_requires_force_in_batch_mode() {
    let cfg = write_config("report_force", "");
    let events = write_events("report_force", MARCH_EVENTS);
    let out = temp_path("report_force", "csv");
    fs::write(&out, "keep me").unwrap();

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
        ])
        .write_stdin(alpha_answers())
        .assert()
        .failure()
        .stderr(contains("already exists"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    ptt()
        .args([
            "--config",
            &cfg,
            "report",
            "--file",
            &out,
            "--events-file",
            &events,
            "--force",
        ])
        .write_stdin(alpha_answers())
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("Project,"));
}

#[test]
fn test_report_output_file_from_config() {
    let out = temp_path("report_cfg_out", "csv");
    let cfg = write_config("report_cfg_out", &format!("output_file: {out}\n"));
    let events = write_events("report_cfg_out", MARCH_EVENTS);

    ptt()
        .args(["--config", &cfg, "report", "--events-file", &events])
        .write_stdin(alpha_answers())
        .assert()
        .success();

    assert!(Path::new(&out).exists());
}
