use super::filter::{DateFilter, GalleryItem, SortOrder, filtered_view};
use crate::models::ImageCollection;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Loading,
    Ready,
    Empty,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "mode", content = "path", rename_all = "lowercase")]
pub enum DeleteModal {
    #[default]
    Closed,
    Single(String),
    Bulk,
}

/// Identifies one reload; only the latest issued ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    Single(String),
    Bulk(Vec<String>),
}

#[derive(Debug, Clone)]
pub enum GalleryEvent {
    LoadStarted,
    LoadSucceeded {
        ticket: LoadTicket,
        images: ImageCollection,
    },
    LoadFailed {
        ticket: LoadTicket,
    },
    Filter(DateFilter),
    /// Empty input is ignored, like clearing a date picker.
    PickDate(String),
    SortBy(SortOrder),
    ToggleSelectionMode,
    ItemClicked(String),
    ToggleItem(String),
    SelectAll,
    OpenLightbox(usize),
    Navigate(isize),
    CloseLightbox,
    /// Carries the path the page was showing; a mismatch is ignored.
    LightboxDeleteStarted(String),
    LightboxDeleteSucceeded,
    LightboxDeleteFailed,
    AskDeleteImage(String),
    AskDeleteSelection,
    DismissDeleteModal,
    ConfirmStarted,
    ConfirmSucceeded,
    ConfirmFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Ignored,
    LoadIssued(LoadTicket),
    StaleLoad,
    DeleteNow(String),
    Confirmed(DeleteRequest),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GalleryState {
    #[serde(skip)]
    source: ImageCollection,
    #[serde(skip)]
    latest_ticket: u64,
    pub view_state: ViewState,
    pub filter: DateFilter,
    pub sort: SortOrder,
    pub view: Vec<GalleryItem>,
    pub selection_mode: bool,
    pub selection: BTreeSet<String>,
    pub lightbox: Option<usize>,
    pub lightbox_busy: bool,
    pub delete_modal: DeleteModal,
    pub modal_busy: bool,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lightbox_item(&self) -> Option<&GalleryItem> {
        self.lightbox.and_then(|index| self.view.get(index))
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selection.contains(path)
    }

    /// Compares counts only, not the paths themselves.
    pub fn all_selected(&self) -> bool {
        self.selection.len() == self.view.len()
    }

    fn contains_path(&self, path: &str) -> bool {
        self.view.iter().any(|item| item.path() == path)
    }

    pub fn apply_event(&mut self, event: GalleryEvent, today: NaiveDate) -> Outcome {
        match event {
            GalleryEvent::LoadStarted => {
                self.latest_ticket += 1;
                self.view_state = ViewState::Loading;
                Outcome::LoadIssued(LoadTicket(self.latest_ticket))
            }
            GalleryEvent::LoadSucceeded { ticket, images } => {
                if ticket.0 != self.latest_ticket {
                    return Outcome::StaleLoad;
                }
                self.source = images;
                self.recompute(today);
                self.view_state = self.resolved_state();
                Outcome::Changed
            }
            GalleryEvent::LoadFailed { ticket } => {
                if ticket.0 != self.latest_ticket {
                    return Outcome::StaleLoad;
                }
                self.view_state = ViewState::Error;
                Outcome::Changed
            }
            GalleryEvent::Filter(filter) => {
                self.filter = filter;
                self.refilter(today)
            }
            GalleryEvent::PickDate(date) => {
                let date = date.trim();
                if date.is_empty() {
                    return Outcome::Ignored;
                }
                self.filter = DateFilter::Custom(date.to_string());
                self.refilter(today)
            }
            GalleryEvent::SortBy(order) => {
                self.sort = order;
                self.refilter(today)
            }
            GalleryEvent::ToggleSelectionMode => {
                self.selection_mode = !self.selection_mode;
                self.selection.clear();
                if self.selection_mode {
                    self.lightbox = None;
                } else if self.delete_modal == DeleteModal::Bulk {
                    self.delete_modal = DeleteModal::Closed;
                }
                Outcome::Changed
            }
            GalleryEvent::ItemClicked(path) => {
                if self.selection_mode {
                    return self.apply_event(GalleryEvent::ToggleItem(path), today);
                }
                match self.view.iter().position(|item| item.path() == path) {
                    Some(index) => self.apply_event(GalleryEvent::OpenLightbox(index), today),
                    None => Outcome::Ignored,
                }
            }
            GalleryEvent::ToggleItem(path) => {
                if !self.selection_mode || !self.contains_path(&path) {
                    return Outcome::Ignored;
                }
                if !self.selection.remove(&path) {
                    self.selection.insert(path);
                }
                Outcome::Changed
            }
            GalleryEvent::SelectAll => {
                if !self.selection_mode {
                    return Outcome::Ignored;
                }
                if self.all_selected() {
                    self.selection.clear();
                } else {
                    self.selection
                        .extend(self.view.iter().map(|item| item.path().to_string()));
                }
                Outcome::Changed
            }
            GalleryEvent::OpenLightbox(index) => {
                if self.selection_mode || index >= self.view.len() {
                    return Outcome::Ignored;
                }
                self.lightbox = Some(index);
                Outcome::Changed
            }
            GalleryEvent::Navigate(step) => {
                let Some(current) = self.lightbox else {
                    return Outcome::Ignored;
                };
                if self.view.is_empty() {
                    self.lightbox = None;
                    return Outcome::Changed;
                }
                let len = self.view.len() as isize;
                let next = (current as isize + step).rem_euclid(len);
                self.lightbox = Some(next as usize);
                Outcome::Changed
            }
            GalleryEvent::CloseLightbox => {
                if self.lightbox.take().is_some() {
                    Outcome::Changed
                } else {
                    Outcome::Ignored
                }
            }
            GalleryEvent::LightboxDeleteStarted(shown) => {
                if self.lightbox_busy {
                    return Outcome::Ignored;
                }
                match self.lightbox_item() {
                    Some(item) if item.path() == shown => {
                        self.lightbox_busy = true;
                        Outcome::DeleteNow(shown)
                    }
                    _ => Outcome::Ignored,
                }
            }
            GalleryEvent::LightboxDeleteSucceeded => {
                self.lightbox_busy = false;
                if let Some(index) = self.lightbox {
                    let len = self.view.len();
                    if len <= 1 {
                        self.lightbox = None;
                    } else if index >= len - 1 {
                        self.lightbox = Some(index.saturating_sub(1));
                    }
                }
                Outcome::Changed
            }
            GalleryEvent::LightboxDeleteFailed => {
                self.lightbox_busy = false;
                Outcome::Changed
            }
            GalleryEvent::AskDeleteImage(path) => {
                if self.selection_mode || !self.contains_path(&path) {
                    return Outcome::Ignored;
                }
                self.delete_modal = DeleteModal::Single(path);
                Outcome::Changed
            }
            GalleryEvent::AskDeleteSelection => {
                if self.selection.is_empty() {
                    return Outcome::Ignored;
                }
                self.delete_modal = DeleteModal::Bulk;
                Outcome::Changed
            }
            GalleryEvent::DismissDeleteModal => {
                if self.delete_modal == DeleteModal::Closed {
                    return Outcome::Ignored;
                }
                self.delete_modal = DeleteModal::Closed;
                Outcome::Changed
            }
            GalleryEvent::ConfirmStarted => {
                if self.modal_busy {
                    return Outcome::Ignored;
                }
                let request = match &self.delete_modal {
                    DeleteModal::Closed => return Outcome::Ignored,
                    DeleteModal::Single(path) => DeleteRequest::Single(path.clone()),
                    DeleteModal::Bulk if self.selection.is_empty() => return Outcome::Ignored,
                    DeleteModal::Bulk => DeleteRequest::Bulk(self.selection.iter().cloned().collect()),
                };
                self.modal_busy = true;
                Outcome::Confirmed(request)
            }
            GalleryEvent::ConfirmSucceeded => {
                self.modal_busy = false;
                match std::mem::take(&mut self.delete_modal) {
                    DeleteModal::Single(_) => self.lightbox = None,
                    DeleteModal::Bulk => {
                        self.selection.clear();
                        self.selection_mode = false;
                    }
                    DeleteModal::Closed => {}
                }
                Outcome::Changed
            }
            GalleryEvent::ConfirmFailed => {
                self.modal_busy = false;
                Outcome::Changed
            }
        }
    }

    fn refilter(&mut self, today: NaiveDate) -> Outcome {
        self.recompute(today);
        if matches!(self.view_state, ViewState::Ready | ViewState::Empty) {
            self.view_state = self.resolved_state();
        }
        Outcome::Changed
    }

    fn resolved_state(&self) -> ViewState {
        if self.view.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready
        }
    }

    fn recompute(&mut self, today: NaiveDate) {
        self.view = filtered_view(&self.source, &self.filter, self.sort, today);

        let view = &self.view;
        self.selection
            .retain(|path| view.iter().any(|item| item.path() == path));

        self.lightbox = match self.lightbox {
            Some(_) if self.view.is_empty() => None,
            Some(index) => Some(index.min(self.view.len() - 1)),
            None => None,
        };
    }
}
