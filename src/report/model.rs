use strum::{EnumIter, EnumString, IntoStaticStr};

/// Which BMSG act an entry belongs to. Drives the card colours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ArtistKey {
    BeFirst,
    Mazzel,
    Hana,
    SkyHi,
    NovelCore,
    Aile,
    Starglow,
    Reiko,
    /// The label itself, also used for anything unrecognised
    #[default]
    Bmsg,
}

impl ArtistKey {
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ArtistKey::BeFirst => "BE:FIRST",
            ArtistKey::Mazzel => "MAZZEL",
            ArtistKey::Hana => "HANA",
            ArtistKey::SkyHi => "SKY-HI",
            ArtistKey::NovelCore => "Novel Core",
            ArtistKey::Aile => "Aile The Shota",
            ArtistKey::Starglow => "STARGLOW",
            ArtistKey::Reiko => "REIKO",
            ArtistKey::Bmsg => "BMSG",
        }
    }

    /// CSS class used on cards and rows
    pub fn css_class(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventTag {
    /// Fan club / member-only priority window
    Fc,
    General,
    Release,
    Goods,
    Ended,
}

impl EventTag {
    pub fn label(&self) -> &'static str {
        match self {
            EventTag::Fc => "⭐ FC先行",
            EventTag::General => "一般",
            EventTag::Release => "リリース",
            EventTag::Goods => "グッズ",
            EventTag::Ended => "終了",
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum MembershipStatus {
    #[strum(to_string = "active", serialize = "open")]
    Open,
    #[default]
    #[strum(to_string = "pending")]
    Pending,
}

impl MembershipStatus {
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Value the model is asked to write
    pub fn wire_name(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipStatus::Open => "受付中",
            MembershipStatus::Pending => "詳細待ち",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MembershipStatus::Open => "open",
            MembershipStatus::Pending => "pending",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReleaseType {
    Album,
    Single,
    Video,
    #[default]
    Streaming,
}

impl ReleaseType {
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn wire_name(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReleaseType::Album => "📀 アルバム",
            ReleaseType::Single => "🎵 シングル",
            ReleaseType::Video => "🎬 映像作品",
            ReleaseType::Streaming => "🎵 配信",
        }
    }
}

/// Everything gathered in one run. Lives only until the page is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub updated_date: Option<String>,
    pub urgent_notices: Vec<String>,
    pub events: Vec<Event>,
    pub memberships: Vec<Membership>,
    pub releases: Vec<Release>,
    pub merchandise: Vec<MerchEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub artist: Option<String>,
    pub artist_key: ArtistKey,
    pub title: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub ticket: Option<String>,
    pub tags: Vec<EventTag>,
    pub url: Option<String>,
    pub ended: bool,
}

impl Event {
    /// Either flagged as ended or tagged as such; both count.
    pub fn is_concluded(&self) -> bool {
        self.ended || self.tags.contains(&EventTag::Ended)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Membership {
    pub artist: Option<String>,
    pub artist_key: ArtistKey,
    pub program_name: Option<String>,
    pub fee: Option<String>,
    pub status: MembershipStatus,
    pub benefit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Release {
    pub artist: Option<String>,
    pub artist_key: ArtistKey,
    pub title: Option<String>,
    pub date: Option<String>,
    pub release_type: ReleaseType,
    pub note: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MerchEntry {
    pub artist: Option<String>,
    pub artist_key: ArtistKey,
    pub title: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
    pub url: Option<String>,
}
