use bmsgdashboard::claude::api::ApiError;
use bmsgdashboard::claude::model::{Reply, Segment};
use bmsgdashboard::config::model::{ApiConfig, Config, DebugConfig};
use bmsgdashboard::pipeline::{publish, run, DashboardError};
use bmsgdashboard::report::extract::ExtractionError;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use uuid::Uuid;

const TODAY: &str = "2025年1月1日";

const REPLY_TEXT: &str = r#"最新情報をまとめました。
{
  "updated": "2025-01-01",
  "urgent": [{"text": "BE:FIRST FC先行 1/3締切"}],
  "live": [
    {"artist": "BE:FIRST", "artistKey": "befirst", "title": "ARENA TOUR", "date": "2/1", "tags": ["fc", "ended"], "ended": true},
    {"artist": "HANA", "artistKey": "hana", "title": "1st LIVE", "venue": "Zepp Haneda", "tags": ["general"]}
  ],
  "fc": [{"artist": "MAZZEL", "artistKey": "mazzel", "fcName": "MAZZEL FC", "status": "active"}],
  "release": [{"artist": "SKY-HI", "artistKey": "skyhi", "title": "New Single", "type": "single"}],
  "goods": []
}
以上です。"#;

fn scratch_output() -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("bmsgdashboard-pipeline-{}", Uuid::new_v4()));
    let path = dir.join("index.html");

    (dir, path)
}

fn offline_config(output_path: PathBuf, reply_file: Option<PathBuf>, skip_write: bool) -> Config {
    Config {
        api: ApiConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            model: "claude-opus-4-5".to_string(),
            max_tokens: 16,
            timeout: Duration::from_secs(1),
        },
        output_path,
        debug_config: DebugConfig {
            reply_file,
            skip_write,
        },
    }
}

fn new_year() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn select_count(html: &Html, selector: &str) -> usize {
    html.select(&Selector::parse(selector).unwrap()).count()
}

#[test_log::test(tokio::test)]
async fn should_write_the_page_from_a_reply() {
    let (dir, path) = scratch_output();
    let reply = Reply {
        segments: vec![Segment::NonText, Segment::Text(REPLY_TEXT.to_string())],
        stop_reason: Some("end_turn".to_string()),
    };

    let report = publish(&reply, TODAY, Some(&path)).await.unwrap();

    assert_eq!(report.events.len(), 2);
    assert_eq!(report.memberships.len(), 1);
    assert_eq!(report.releases.len(), 1);

    let html = Html::parse_document(&fs::read_to_string(&path).await.unwrap());

    assert_eq!(select_count(&html, "#live .event-card"), 2);
    assert_eq!(select_count(&html, "#live .event-card.befirst.ended"), 1);
    assert_eq!(select_count(&html, "#live .event-card.hana.ended"), 0);
    assert_eq!(select_count(&html, ".fc-table tbody tr .status-dot.open"), 1);
    assert_eq!(select_count(&html, "#release .event-card.skyhi"), 1);
    assert_eq!(select_count(&html, "#goods .event-card"), 0);
    assert_eq!(select_count(&html, ".urgent"), 1);

    fs::remove_dir_all(&dir).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn when_no_json_is_found_should_leave_the_previous_page_untouched() {
    let (dir, path) = scratch_output();
    fs::create_dir_all(&dir).await.unwrap();
    fs::write(&path, "<p>yesterday</p>").await.unwrap();
    let modified_before = fs::metadata(&path).await.unwrap().modified().unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;

    let result = publish(
        &Reply::from_text("I could not find any updates today.".to_string()),
        TODAY,
        Some(&path),
    )
    .await;

    assert!(
        matches!(
            result,
            Err(DashboardError::Extraction(ExtractionError::NoStructuredDataFound))
        ),
        "{:?}",
        result
    );
    assert_eq!(
        fs::metadata(&path).await.unwrap().modified().unwrap(),
        modified_before
    );
    assert_eq!(fs::read_to_string(&path).await.unwrap(), "<p>yesterday</p>");

    fs::remove_dir_all(&dir).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn when_json_is_malformed_should_not_create_a_page() {
    let (dir, path) = scratch_output();

    let result = publish(
        &Reply::from_text(r#"{"a": 1"#.to_string()),
        TODAY,
        Some(&path),
    )
    .await;

    assert!(matches!(
        result,
        Err(DashboardError::Extraction(
            ExtractionError::MalformedStructuredData(_)
        ))
    ));
    assert!(!path.exists());
    assert!(!dir.exists());
}

#[test_log::test(tokio::test)]
async fn identical_replies_should_produce_identical_pages() {
    let (dir, path) = scratch_output();
    let reply = Reply::from_text(REPLY_TEXT.to_string());

    publish(&reply, TODAY, Some(&path)).await.unwrap();
    let first = fs::read(&path).await.unwrap();
    publish(&reply, TODAY, Some(&path)).await.unwrap();
    let second = fs::read(&path).await.unwrap();

    assert_eq!(first, second);

    fs::remove_dir_all(&dir).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn without_an_output_path_should_only_return_the_report() {
    let report = publish(&Reply::from_text(REPLY_TEXT.to_string()), TODAY, None)
        .await
        .unwrap();

    assert_eq!(report.updated_date.as_deref(), Some("2025-01-01"));
    assert_eq!(report.urgent_notices, vec!["BE:FIRST FC先行 1/3締切".to_string()]);
}

#[test_log::test(tokio::test)]
async fn run_should_read_the_reply_file_and_honour_skip_write() {
    let (dir, path) = scratch_output();
    let reply_file = dir.join("reply.txt");
    fs::create_dir_all(&dir).await.unwrap();
    fs::write(&reply_file, REPLY_TEXT).await.unwrap();

    let skipped = run(
        &offline_config(path.clone(), Some(reply_file.clone()), true),
        new_year(),
    )
    .await
    .unwrap();

    assert_eq!(skipped.events.len(), 2);
    assert!(!path.exists());

    let written = run(&offline_config(path.clone(), Some(reply_file), false), new_year())
        .await
        .unwrap();

    assert_eq!(written, skipped);

    let html = Html::parse_document(&fs::read_to_string(&path).await.unwrap());

    assert_eq!(select_count(&html, "#live .event-card"), 2);
    assert!(fs::read_to_string(&path).await.unwrap().contains(TODAY));

    fs::remove_dir_all(&dir).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn run_without_a_key_or_reply_file_should_fail_without_writing() {
    let (dir, path) = scratch_output();

    let result = run(&offline_config(path.clone(), None, false), new_year()).await;

    assert!(
        matches!(result, Err(DashboardError::Api(ApiError::MissingApiKey))),
        "{:?}",
        result
    );
    assert!(!dir.exists());
}
