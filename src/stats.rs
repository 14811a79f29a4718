use crate::models::{FeederEvent, ImageCollection, StatsSummary};
use crate::utils::{date_key, format_date_short, format_time, relative_time, PLACEHOLDER_TIME};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const WEEKDAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
pub const DAILY_PERIODS: [u32; 3] = [7, 30, 90];
pub const DEFAULT_DAILY_PERIOD: u32 = 30;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
const GIGABYTE_THRESHOLD_MB: f64 = 1000.0;

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: StatsSummary,
    pub images: ImageCollection,
    pub events: Vec<FeederEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakDay {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub message: String,
    pub path: Option<String>,
    pub size: Option<String>,
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub total_images: u64,
    pub total_days: u64,
    pub storage: String,
    pub daily_average: String,
    pub daily: Series,
    pub hourly: Series,
    pub weekly: Series,
    pub peak_day: Option<PeakDay>,
    pub peak_hour: Option<usize>,
    pub first_capture: Option<String>,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSummary {
    pub total_photos: u64,
    pub total_days: u64,
    pub today_photos: usize,
    pub last_capture: String,
}

impl Default for HomeSummary {
    fn default() -> Self {
        Self {
            total_photos: 0,
            total_days: 0,
            today_photos: 0,
            last_capture: PLACEHOLDER_TIME.to_string(),
        }
    }
}

pub fn build_dashboard(data: &DashboardData, daily_period: u32) -> DashboardView {
    build_dashboard_at(Local::now().naive_local(), data, daily_period)
}

pub fn build_dashboard_at(now: NaiveDateTime, data: &DashboardData, daily_period: u32) -> DashboardView {
    let hourly = hourly_histogram(&data.images);
    DashboardView {
        total_images: data.summary.total_images,
        total_days: data.summary.total_days,
        storage: storage_label(data.summary.total_size_mb),
        daily_average: daily_average(data.summary.total_images, data.summary.total_days),
        daily: daily_series(now.date(), &data.images, daily_period),
        peak_hour: peak_hour(&hourly),
        hourly: Series {
            labels: (0..24).map(|hour| format!("{hour}h")).collect(),
            values: hourly.to_vec(),
        },
        weekly: Series {
            labels: WEEKDAY_LABELS.iter().map(|day| day.to_string()).collect(),
            values: weekday_histogram(&data.images).to_vec(),
        },
        peak_day: peak_day(&data.images),
        first_capture: data.images.keys().next().map(|date| format_date_short(date)),
        recent_activity: recent_activity(&data.events, now),
    }
}

pub fn build_home_summary(summary: &StatsSummary, images: &ImageCollection, today: NaiveDate) -> HomeSummary {
    let todays = images.get(&date_key(today)).map(Vec::as_slice).unwrap_or_default();
    HomeSummary {
        total_photos: summary.total_images,
        total_days: summary.total_days,
        today_photos: todays.len(),
        last_capture: todays
            .first()
            .map(|record| format_time(&record.time))
            .unwrap_or_else(|| PLACEHOLDER_TIME.to_string()),
    }
}

/// MB below 1000, GB (MB / 1024) from there on.
pub fn storage_label(size_mb: f64) -> String {
    if size_mb >= GIGABYTE_THRESHOLD_MB {
        format!("{:.1} GB", size_mb / 1024.0)
    } else {
        format!("{size_mb:.1} MB")
    }
}

pub fn daily_average(total_images: u64, total_days: u64) -> String {
    if total_days == 0 {
        return "0".to_string();
    }
    format!("{:.1}", total_images as f64 / total_days as f64)
}

pub fn daily_series(today: NaiveDate, images: &ImageCollection, days: u32) -> Series {
    let mut labels = Vec::with_capacity(days as usize);
    let mut values = Vec::with_capacity(days as usize);
    for offset in (0..i64::from(days)).rev() {
        let date = today - Duration::days(offset);
        labels.push(date.format("%d/%m").to_string());
        values.push(images.get(&date_key(date)).map_or(0, |day| day.len() as u64));
    }
    Series { labels, values }
}

/// Hour of a capture time: the leading digits of `HH-MM-SS` or `HH:MM:SS`.
fn capture_hour(time: &str) -> Option<usize> {
    let digits: String = time.chars().take_while(char::is_ascii_digit).collect();
    let hour: usize = digits.parse().ok()?;
    (hour < 24).then_some(hour)
}

pub fn hourly_histogram(images: &ImageCollection) -> [u64; 24] {
    let mut counts = [0u64; 24];
    for record in images.values().flatten() {
        if let Some(hour) = capture_hour(&record.time) {
            counts[hour] += 1;
        }
    }
    counts
}

/// Index 0 is Sunday. Keys that are not dates are skipped.
pub fn weekday_histogram(images: &ImageCollection) -> [u64; 7] {
    let mut counts = [0u64; 7];
    for (date, records) in images {
        if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            counts[day.weekday().num_days_from_sunday() as usize] += records.len() as u64;
        }
    }
    counts
}

pub fn peak_day(images: &ImageCollection) -> Option<PeakDay> {
    let mut best: Option<PeakDay> = None;
    for (date, records) in images {
        let current = best.as_ref().map_or(0, |peak| peak.count);
        if records.len() > current {
            best = Some(PeakDay {
                date: date.clone(),
                count: records.len(),
            });
        }
    }
    best
}

/// Busiest hour; the earliest hour wins a tie, no peak without captures.
pub fn peak_hour(hourly: &[u64; 24]) -> Option<usize> {
    let max = *hourly.iter().max()?;
    if max == 0 {
        return None;
    }
    hourly.iter().position(|count| *count == max)
}

pub fn recent_activity(events: &[FeederEvent], now: NaiveDateTime) -> Vec<ActivityEntry> {
    events
        .iter()
        .filter(|event| event.kind == "UPLOAD")
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|event| ActivityEntry {
            message: if event.message.is_empty() {
                "Photo received".to_string()
            } else {
                event.message.clone()
            },
            path: event.details.path.clone().filter(|path| !path.is_empty()),
            size: event.details.size_kb.map(|kb| format!("{kb} KB")),
            when: relative_time(&event.timestamp, now),
        })
        .collect()
}
