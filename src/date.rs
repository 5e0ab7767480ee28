use chrono::{FixedOffset, NaiveDate, Utc};
use lazy_static::lazy_static;

const JST_OFFSET_SECS: i32 = 9 * 3600;

lazy_static! {
    static ref JST: FixedOffset =
        FixedOffset::east_opt(JST_OFFSET_SECS).expect("JST offset is within bounds");
}

/// The dashboard follows Japan's calendar regardless of where it runs
pub fn today_in_japan() -> NaiveDate {
    Utc::now().with_timezone(&*JST).date_naive()
}

/// e.g. `2025年1月5日`
pub fn japanese_date(date: NaiveDate) -> String {
    date.format("%Y年%-m月%-d日").to_string()
}
