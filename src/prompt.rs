use crate::claude::model::MessageRequest;
use crate::date::japanese_date;
use crate::report::model::{ArtistKey, EventTag, MembershipStatus, ReleaseType};
use chrono::NaiveDate;
use itertools::Itertools;
use strum::IntoEnumIterator;

const CATEGORIES: &str = r#"1. ライブ・イベント（今後の公演、ツアー日程）
2. FC・会員先行申し込み（締切日付き）
3. グッズ販売情報
4. 新曲・リリース情報"#;

// Placeholders are filled in by system_prompt()
const RESPONSE_SHAPE: &str = r#"{
  "updated": "YYYY-MM-DD",
  "urgent": [
    {"text": "緊急告知テキスト（締切間近の情報）"}
  ],
  "live": [
    {
      "artist": "アーティスト名",
      "artistKey": "{artist_keys}",
      "title": "イベントタイトル",
      "date": "日程テキスト",
      "venue": "会場",
      "ticket": "チケット情報",
      "tags": ["{event_tags}"],
      "url": "公式URL",
      "ended": true|false
    }
  ],
  "fc": [
    {
      "artist": "アーティスト名",
      "artistKey": "{artist_keys}",
      "fcName": "FC名",
      "fee": "月額",
      "status": "{membership_statuses}",
      "benefit": "特典内容"
    }
  ],
  "release": [
    {
      "artist": "アーティスト名",
      "artistKey": "{artist_keys}",
      "title": "タイトル",
      "date": "発売日",
      "type": "{release_types}",
      "note": "補足情報",
      "url": "URL"
    }
  ],
  "goods": [
    {
      "artist": "アーティスト名",
      "artistKey": "{artist_keys}",
      "title": "グッズ名・販売名",
      "date": "販売期間・日程",
      "note": "補足",
      "url": "URL"
    }
  ]
}"#;

/// Builds the one request sent per run
pub fn build_request(today: NaiveDate, model: &str, max_tokens: u32) -> MessageRequest {
    MessageRequest {
        model: model.to_string(),
        max_tokens,
        web_search: true,
        system: system_prompt(),
        user_message: user_message(today),
    }
}

fn system_prompt() -> String {
    let artists = ArtistKey::iter().map(|key| key.display_name()).join(", ");

    format!(
        "あなたはBMSG（Be My Self Group）の最新情報を収集するアシスタントです。\n\
         以下のアーティストの情報を収集してください：\n{}\n\n\
         収集する情報カテゴリ：\n{}\n\n\
         必ず以下のJSON形式のみで返してください（前後の説明文やマークダウンは不要）：\n{}",
        artists,
        CATEGORIES,
        response_shape()
    )
}

fn response_shape() -> String {
    let artist_keys = ArtistKey::iter().map(|key| key.css_class()).join("|");
    let event_tags = EventTag::iter().map(|tag| tag.css_class()).join("\"|\"");
    let membership_statuses = MembershipStatus::iter().map(|status| status.wire_name()).join("|");
    let release_types = ReleaseType::iter().map(|release_type| release_type.wire_name()).join("|");

    RESPONSE_SHAPE
        .replace("{artist_keys}", &artist_keys)
        .replace("{event_tags}", &event_tags)
        .replace("{membership_statuses}", &membership_statuses)
        .replace("{release_types}", &release_types)
}

fn user_message(today: NaiveDate) -> String {
    format!(
        "今日は{}です。BMSGアーティスト全員の最新情報をweb検索して収集し、JSON形式で返してください。\
         特に今後のライブ、現在受付中のFC先行、直近のリリース情報を重点的に調べてください。",
        japanese_date(today)
    )
}
