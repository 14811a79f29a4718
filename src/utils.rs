use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

pub const PLACEHOLDER_TIME: &str = "--:--";

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// `2024-01-01` -> `Monday, January 1, 2024`. Unparsable input is returned as is.
pub fn format_date(date: &str) -> String {
    match parse_date(date) {
        Some(day) => day.format("%A, %B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

pub fn format_date_short(date: &str) -> String {
    match parse_date(date) {
        Some(day) => day.format("%d/%m/%Y").to_string(),
        None => date.to_string(),
    }
}

pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return PLACEHOLDER_TIME.to_string();
    }
    time.replace('-', ":")
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    if bytes < 1024 * 1024 {
        return format!("{:.1} KB", bytes as f64 / 1024.0);
    }
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

pub fn relative_time(timestamp: &str, now: NaiveDateTime) -> String {
    let Some(then) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };
    let elapsed = now - then;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        then.date().format("%d/%m/%Y").to_string()
    }
}

pub fn days_ago(today: NaiveDate, days: i64) -> String {
    date_key(today - Duration::days(days))
}

pub fn is_today(date: &str, today: NaiveDate) -> bool {
    date == date_key(today)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn plural(count: usize, word: &str) -> String {
    if count > 1 {
        format!("{count} {word}s")
    } else {
        format!("{count} {word}")
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn dates_are_formatted() {
        assert_eq!(format_date("2024-01-01"), "Monday, January 1, 2024");
        assert_eq!(format_date_short("2024-03-09"), "09/03/2024");
        assert_eq!(format_date_short("not-a-date"), "not-a-date");
    }

    #[test]
    fn times_use_colons() {
        assert_eq!(format_time("08-15-00"), "08:15:00");
        assert_eq!(format_time("08:15:00"), "08:15:00");
        assert_eq!(format_time(""), "--:--");
    }

    #[test]
    fn file_sizes_pick_a_unit() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn relative_time_buckets() {
        let now = at("2024-01-10T12:00:00");
        assert_eq!(relative_time("2024-01-10T11:59:30", now), "just now");
        assert_eq!(relative_time("2024-01-10T11:45:00", now), "15 min ago");
        assert_eq!(relative_time("2024-01-10T09:00:00", now), "3h ago");
        assert_eq!(relative_time("2024-01-10T09:00:00.250000", now), "2h ago");
        assert_eq!(relative_time("2024-01-08T12:00:00", now), "2d ago");
        assert_eq!(relative_time("2023-12-01T12:00:00", now), "01/12/2023");
        assert_eq!(relative_time("garbage", now), "garbage");
    }

    #[test]
    fn days_ago_is_a_calendar_offset() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(days_ago(today, 7), "2024-02-24");
        assert_eq!(days_ago(today, 30), "2024-02-01");
        assert!(is_today("2024-03-02", today));
        assert!(!is_today("2024-03-01", today));
    }

    #[test]
    fn plural_and_escape() {
        assert_eq!(plural(1, "photo"), "1 photo");
        assert_eq!(plural(0, "photo"), "0 photo");
        assert_eq!(plural(4, "photo"), "4 photos");
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
