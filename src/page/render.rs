use crate::report::model::{
    ArtistKey, Event, EventTag, MembershipStatus, MerchEntry, Membership, Release, ReleaseType,
    UpdateReport,
};
use askama::Template;

const PLACEHOLDER: &str = "—";
const WEB_SCHEMES: [&str; 2] = ["http://", "https://"];

pub struct Tab {
    pub id: &'static str,
    pub label: &'static str,
}

/// The sections a viewer can switch between. The first one is shown on load.
pub const TABS: [Tab; 4] = [
    Tab {
        id: "live",
        label: "🎤 ライブ・イベント",
    },
    Tab {
        id: "fc",
        label: "🏷 FC先行・申込",
    },
    Tab {
        id: "release",
        label: "💿 新曲・リリース",
    },
    Tab {
        id: "goods",
        label: "🛍 グッズ",
    },
];

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    today: &'a str,
    tabs: [Tab; 4],
    urgent_notices: Vec<&'a str>,
    events: Vec<EventCard<'a>>,
    memberships: Vec<MembershipRow<'a>>,
    releases: Vec<ReleaseCard<'a>>,
    merchandise: Vec<MerchCard<'a>>,
}

struct EventCard<'a> {
    artist_class: &'static str,
    artist: &'a str,
    title: &'a str,
    date: Option<&'a str>,
    venue: Option<&'a str>,
    ticket: Option<&'a str>,
    tags: Vec<EventTag>,
    url: Option<&'a str>,
    concluded: bool,
}

struct MembershipRow<'a> {
    artist_class: &'static str,
    artist: &'a str,
    program_name: &'a str,
    fee: &'a str,
    status: MembershipStatus,
    benefit: &'a str,
}

struct ReleaseCard<'a> {
    artist_class: &'static str,
    artist: &'a str,
    title: &'a str,
    date: Option<&'a str>,
    release_type: ReleaseType,
    note: Option<&'a str>,
    url: Option<&'a str>,
}

struct MerchCard<'a> {
    artist_class: &'static str,
    artist: &'a str,
    title: &'a str,
    date: Option<&'a str>,
    note: Option<&'a str>,
    url: Option<&'a str>,
}

impl<'a> EventCard<'a> {
    fn new(event: &'a Event) -> Self {
        Self {
            artist_class: event.artist_key.css_class(),
            artist: artist_name(&event.artist, event.artist_key),
            title: or_placeholder(&event.title),
            date: event.date.as_deref(),
            venue: event.venue.as_deref(),
            ticket: event.ticket.as_deref(),
            tags: event.tags.clone(),
            url: web_link(&event.url),
            concluded: event.is_concluded(),
        }
    }
}

impl<'a> MembershipRow<'a> {
    fn new(membership: &'a Membership) -> Self {
        Self {
            artist_class: membership.artist_key.css_class(),
            artist: artist_name(&membership.artist, membership.artist_key),
            program_name: or_placeholder(&membership.program_name),
            fee: or_placeholder(&membership.fee),
            status: membership.status,
            benefit: or_placeholder(&membership.benefit),
        }
    }
}

impl<'a> ReleaseCard<'a> {
    fn new(release: &'a Release) -> Self {
        Self {
            artist_class: release.artist_key.css_class(),
            artist: artist_name(&release.artist, release.artist_key),
            title: or_placeholder(&release.title),
            date: release.date.as_deref(),
            release_type: release.release_type,
            note: release.note.as_deref(),
            url: web_link(&release.url),
        }
    }
}

impl<'a> MerchCard<'a> {
    fn new(entry: &'a MerchEntry) -> Self {
        Self {
            artist_class: entry.artist_key.css_class(),
            artist: artist_name(&entry.artist, entry.artist_key),
            title: or_placeholder(&entry.title),
            date: entry.date.as_deref(),
            note: entry.note.as_deref(),
            url: web_link(&entry.url),
        }
    }
}

/// Falls back to the key's own name when the model left the artist out
fn artist_name(artist: &Option<String>, key: ArtistKey) -> &str {
    artist.as_deref().unwrap_or(key.display_name())
}

fn or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

/// Only http(s) URLs become links; anything else is dropped
fn web_link(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|url| {
        let url = url.trim_start().to_ascii_lowercase();
        WEB_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
    })
}

/// Renders the whole page. Entries keep their order and concluded events
/// stay in the list. `today` is shown as is in the header and the badge.
pub fn render_page(report: &UpdateReport, today: &str) -> Result<String, askama::Error> {
    DashboardTemplate {
        today,
        tabs: TABS,
        urgent_notices: report.urgent_notices.iter().map(String::as_str).collect(),
        events: report.events.iter().map(EventCard::new).collect(),
        memberships: report.memberships.iter().map(MembershipRow::new).collect(),
        releases: report.releases.iter().map(ReleaseCard::new).collect(),
        merchandise: report.merchandise.iter().map(MerchCard::new).collect(),
    }
    .render()
}
