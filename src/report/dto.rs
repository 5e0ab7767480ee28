use super::model::{
    ArtistKey, Event, EventTag, MembershipStatus, MerchEntry, Membership, Release, ReleaseType,
    UpdateReport,
};
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_either::SingleOrVec;
use serde_json::Value;
use tracing::warn;

// Note: the model writes whatever it finds, so every field is optional and
// wrongly typed values are coerced instead of failing the whole report
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportResponse {
    #[serde(deserialize_with = "deserialize_text")]
    pub updated: Option<String>,
    #[serde(deserialize_with = "deserialize_records")]
    pub urgent: Vec<UrgentResponse>,
    #[serde(deserialize_with = "deserialize_records")]
    pub live: Vec<EventResponse>,
    #[serde(deserialize_with = "deserialize_records")]
    pub fc: Vec<MembershipResponse>,
    #[serde(deserialize_with = "deserialize_records")]
    pub release: Vec<ReleaseResponse>,
    #[serde(deserialize_with = "deserialize_records")]
    pub goods: Vec<MerchResponse>,
}

impl ReportResponse {
    pub fn to_model(&self) -> UpdateReport {
        UpdateReport {
            updated_date: self.updated.clone(),
            urgent_notices: self.urgent.iter().filter_map(|u| u.to_model()).collect(),
            events: self.live.iter().map(|e| e.to_model()).collect(),
            memberships: self.fc.iter().map(|m| m.to_model()).collect(),
            releases: self.release.iter().map(|r| r.to_model()).collect(),
            merchandise: self.goods.iter().map(|g| g.to_model()).collect(),
        }
    }
}

/// Urgent notices come either as bare strings or as `{"text": ...}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UrgentResponse {
    Plain(String),
    Notice(NoticeResponse),
}

#[derive(Debug, Deserialize)]
pub struct NoticeResponse {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: Option<String>,
}

impl UrgentResponse {
    pub fn to_model(&self) -> Option<String> {
        match self {
            UrgentResponse::Plain(text) => non_empty(text),
            UrgentResponse::Notice(notice) => notice.text.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(deserialize_with = "deserialize_text")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub artist_key: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub venue: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub ticket: Option<String>,
    pub tags: Option<SingleOrVec<String>>,
    #[serde(deserialize_with = "deserialize_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub ended: bool,
}

impl EventResponse {
    pub fn to_model(&self) -> Event {
        let tags = match self.tags.clone() {
            None => Vec::new(),
            Some(SingleOrVec::Single(tag)) => vec![tag],
            Some(SingleOrVec::Vec(tags)) => tags,
        };

        Event {
            artist: self.artist.clone(),
            artist_key: ArtistKey::parse_or_default(self.artist_key.as_deref()),
            title: self.title.clone(),
            date: self.date.clone(),
            venue: self.venue.clone(),
            ticket: self.ticket.clone(),
            tags: Self::parse_tags(&tags),
            url: self.url.clone(),
            ended: self.ended,
        }
    }

    fn parse_tags(raw_tags: &[String]) -> Vec<EventTag> {
        raw_tags
            .iter()
            .filter_map(|raw| match raw.trim().parse::<EventTag>() {
                Ok(tag) => Some(tag),
                Err(_) => {
                    warn!("Unknown event tag '{}' (omitting tag)", raw);
                    None
                }
            })
            .unique()
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MembershipResponse {
    #[serde(deserialize_with = "deserialize_text")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub artist_key: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub fc_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub fee: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub benefit: Option<String>,
}

impl MembershipResponse {
    pub fn to_model(&self) -> Membership {
        Membership {
            artist: self.artist.clone(),
            artist_key: ArtistKey::parse_or_default(self.artist_key.as_deref()),
            program_name: self.fc_name.clone(),
            fee: self.fee.clone(),
            status: MembershipStatus::parse_or_default(self.status.as_deref()),
            benefit: self.benefit.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseResponse {
    #[serde(deserialize_with = "deserialize_text")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub artist_key: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub date: Option<String>,
    #[serde(rename = "type", deserialize_with = "deserialize_text")]
    pub release_type: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub note: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub url: Option<String>,
}

impl ReleaseResponse {
    pub fn to_model(&self) -> Release {
        Release {
            artist: self.artist.clone(),
            artist_key: ArtistKey::parse_or_default(self.artist_key.as_deref()),
            title: self.title.clone(),
            date: self.date.clone(),
            release_type: ReleaseType::parse_or_default(self.release_type.as_deref()),
            note: self.note.clone(),
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MerchResponse {
    #[serde(deserialize_with = "deserialize_text")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub artist_key: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub note: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub url: Option<String>,
}

impl MerchResponse {
    pub fn to_model(&self) -> MerchEntry {
        MerchEntry {
            artist: self.artist.clone(),
            artist_key: ArtistKey::parse_or_default(self.artist_key.as_deref()),
            title: self.title.clone(),
            date: self.date.clone(),
            note: self.note.clone(),
            url: self.url.clone(),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Anything that isn't an array yields an empty list; unreadable elements are skipped
fn deserialize_records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Skipping unreadable record. Err: {err}");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        unknown => {
            warn!("Expected a list but found: {}", unknown);
            Vec::new()
        }
    })
}

fn deserialize_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => non_empty(&s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Bool(flag) => flag,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}
