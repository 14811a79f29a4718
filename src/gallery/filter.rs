use crate::models::{ImageCollection, ImageRecord};
use crate::utils::{days_ago, is_today};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::str::FromStr;

pub const WEEK_DAYS: i64 = 7;
pub const MONTH_DAYS: i64 = 30;
const MISSING_TIME: &str = "00:00:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", content = "date", rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom(String),
}

impl DateFilter {
    pub fn from_period(period: &str) -> Option<Self> {
        match period {
            "all" => Some(Self::All),
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn period_name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Custom(_) => "custom",
        }
    }

    pub fn custom_date(&self) -> Option<&str> {
        match self {
            Self::Custom(date) => Some(date.as_str()),
            _ => None,
        }
    }

    pub fn matches(&self, date: &str, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => is_today(date, today),
            Self::Week => date >= days_ago(today, WEEK_DAYS).as_str(),
            Self::Month => date >= days_ago(today, MONTH_DAYS).as_str(),
            Self::Custom(day) => date == day.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub date: String,
    #[serde(flatten)]
    pub record: ImageRecord,
}

impl GalleryItem {
    pub fn path(&self) -> &str {
        &self.record.path
    }

    /// `date_time`; zero padded dates and times make byte order chronological.
    pub fn sort_key(&self) -> String {
        let time = if self.record.time.is_empty() {
            MISSING_TIME
        } else {
            self.record.time.as_str()
        };
        format!("{}_{}", self.date, time)
    }
}

pub fn flatten(images: &ImageCollection) -> Vec<GalleryItem> {
    images
        .iter()
        .flat_map(|(date, records)| {
            records.iter().map(move |record| GalleryItem {
                date: date.clone(),
                record: record.clone(),
            })
        })
        .collect()
}

/// Stable: items with equal keys keep their listing order in both directions.
pub fn sort_items(items: &mut [GalleryItem], order: SortOrder) {
    match order {
        SortOrder::Oldest => items.sort_by_cached_key(GalleryItem::sort_key),
        SortOrder::Newest => items.sort_by_cached_key(|item| Reverse(item.sort_key())),
    }
}

pub fn filtered_view(
    images: &ImageCollection,
    filter: &DateFilter,
    order: SortOrder,
    today: NaiveDate,
) -> Vec<GalleryItem> {
    let mut items: Vec<GalleryItem> = flatten(images)
        .into_iter()
        .filter(|item| filter.matches(&item.date, today))
        .collect();
    sort_items(&mut items, order);
    items
}

pub fn date_range(items: &[GalleryItem]) -> Option<(&str, &str)> {
    let min = items.iter().map(|item| item.date.as_str()).min()?;
    let max = items.iter().map(|item| item.date.as_str()).max()?;
    Some((min, max))
}
