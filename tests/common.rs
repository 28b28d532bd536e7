#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ptt() -> Command {
    cargo_bin_cmd!("projtime")
}

/// Unique path inside the system temp dir; any existing file is removed
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("projtime_{}_{}.{}", name, std::process::id(), ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a config file pinned to UTC with batch prompts, plus `extra` lines
pub fn write_config(name: &str, extra: &str) -> String {
    let path = temp_path(name, "conf");
    let content = format!(
        "utc_offset: Z\nprompt_mode: batch\ntoken_file: {}\n{}",
        temp_path(name, "token.json"),
        extra
    );
    fs::write(&path, content).expect("write test config");
    path
}

/// Save an events.list response (or an array of them) for --events-file
pub fn write_events(name: &str, json: &str) -> String {
    let path = temp_path(name, "events.json");
    fs::write(&path, json).expect("write test events");
    path
}

/// 1-5 March 2024: a demo on Saturday the 2nd, a 90 minute demo on
/// Monday the 4th and a review on Tuesday the 5th.
pub const MARCH_EVENTS: &str = r#"{
  "kind": "calendar#events",
  "items": [
    {"id": "e1", "summary": "demo prep",
     "start": {"dateTime": "2024-03-02T10:00:00Z"},
     "end":   {"dateTime": "2024-03-02T12:00:00Z"}},
    {"id": "e2", "summary": "demo sync", "description": "weekly",
     "start": {"dateTime": "2024-03-04T10:00:00Z"},
     "end":   {"dateTime": "2024-03-04T11:30:00Z"}},
    {"id": "e3", "summary": "code review",
     "start": {"dateTime": "2024-03-05T09:00:00Z"},
     "end":   {"dateTime": "2024-03-05T11:30:00Z"}}
  ]
}"#;

/// Answers for: start date, end date, one project, done.
pub fn alpha_answers() -> &'static str {
    "01/03/2024\n05/03/2024\nAlpha\ndemo\nBuscar\n"
}
