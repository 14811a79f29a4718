use crate::api::ApiClient;
use crate::dashboard::{CLEANUP_CHOICES, DashboardState};
use crate::gallery::filter::date_range;
use crate::gallery::{DeleteModal, GalleryState, SortOrder, ViewState};
use crate::health::FeederStatus;
use crate::stats::{DAILY_PERIODS, DashboardView, HomeSummary, Series};
use crate::theme::Theme;
use crate::toast::Toast;
use crate::utils::{escape_html, format_date, format_date_short, format_file_size, format_time, plural};
use std::fmt::Write;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Gallery,
    Stats,
}

impl Page {
    fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Gallery => "/gallery",
            Self::Stats => "/stats",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Gallery => "Gallery",
            Self::Stats => "Statistics",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Chrome {
    pub page: Page,
    pub theme: Option<Theme>,
    pub status: FeederStatus,
    pub toasts: Vec<Toast>,
    pub toast_lifetime: Duration,
    /// Seconds before the browser reloads the page, if it should.
    pub auto_reload: Option<u64>,
}

pub fn render_page(chrome: &Chrome, content: &str, scripts: &str) -> String {
    let theme_attr = chrome
        .theme
        .map(|theme| format!(" data-theme=\"{}\"", theme.as_str()))
        .unwrap_or_default();
    let toggle_icon = chrome.theme.unwrap_or(Theme::Light).toggle_icon();
    let head_extra = chrome
        .auto_reload
        .map(|secs| format!("<meta http-equiv=\"refresh\" content=\"{secs}\" />"))
        .unwrap_or_default();

    LAYOUT_HTML
        .replace("{{THEME_ATTR}}", &theme_attr)
        .replace("{{HEAD_EXTRA}}", &head_extra)
        .replace("{{TITLE}}", chrome.page.title())
        .replace("{{NAV}}", &render_nav(chrome.page))
        .replace("{{BACK}}", chrome.page.path())
        .replace("{{TOGGLE_ICON}}", toggle_icon)
        .replace("{{STATUS_CLASS}}", chrome.status.css_class())
        .replace("{{STATUS_TEXT}}", chrome.status.label())
        .replace(
            "{{TOASTS}}",
            &render_toasts(&chrome.toasts, chrome.toast_lifetime, chrome.page.path()),
        )
        .replace("{{SCRIPTS}}", scripts)
        .replace("{{CONTENT}}", content)
}

fn render_nav(active: Page) -> String {
    [Page::Home, Page::Gallery, Page::Stats]
        .iter()
        .map(|page| {
            let class = if *page == active { "nav-link active" } else { "nav-link" };
            format!(
                "<li><a class=\"{class}\" href=\"{}\">{}</a></li>",
                page.path(),
                page.title()
            )
        })
        .collect()
}

pub fn render_toasts(toasts: &[Toast], lifetime: Duration, back: &str) -> String {
    let mut html = String::new();
    for toast in toasts {
        let _ = write!(
            html,
            "<div class=\"toast {kind}\" style=\"animation-delay: 0s, {delay}ms\">\
             <span class=\"toast-icon\">{icon}</span>\
             <span class=\"toast-message\">{message}</span>\
             <form method=\"post\" action=\"/toasts/{id}/dismiss\">\
             <input type=\"hidden\" name=\"back\" value=\"{back}\" />\
             <button class=\"toast-close\" type=\"submit\" aria-label=\"Dismiss\">×</button></form></div>",
            kind = toast.kind.css_class(),
            delay = lifetime.as_millis().saturating_sub(300),
            icon = toast.kind.icon(),
            message = escape_html(&toast.message),
            id = toast.id,
        );
    }
    html
}

pub fn render_home(summary: &HomeSummary) -> String {
    HOME_HTML
        .replace("{{TOTAL_PHOTOS}}", &summary.total_photos.to_string())
        .replace("{{TOTAL_DAYS}}", &summary.total_days.to_string())
        .replace("{{TODAY_PHOTOS}}", &summary.today_photos.to_string())
        .replace("{{LAST_CAPTURE}}", &escape_html(&summary.last_capture))
}

fn post_button(action: &str, label: &str, class: &str, fields: &[(&str, &str)], disabled: bool) -> String {
    let mut hidden = String::new();
    for (name, value) in fields {
        let _ = write!(
            hidden,
            "<input type=\"hidden\" name=\"{name}\" value=\"{}\" />",
            escape_html(value)
        );
    }
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        "<form class=\"inline\" method=\"post\" action=\"{action}\">{hidden}\
         <button class=\"{class}\" type=\"submit\"{disabled}>{label}</button></form>"
    )
}

pub fn render_gallery(state: &GalleryState, api: &ApiClient) -> String {
    let mut html = String::new();

    html.push_str("<section class=\"toolbar\"><div class=\"filters\">");
    for (period, label) in [("all", "All"), ("today", "Today"), ("week", "7 days"), ("month", "30 days")] {
        let class = if state.filter.period_name() == period {
            "filter-btn active"
        } else {
            "filter-btn"
        };
        html.push_str(&post_button("/gallery/filter", label, class, &[("period", period)], false));
    }
    let custom = state.filter.custom_date().unwrap_or_default();
    let _ = write!(
        html,
        "<form class=\"inline\" method=\"post\" action=\"/gallery/date\">\
         <input type=\"date\" name=\"date\" value=\"{}\" onchange=\"this.form.submit()\" />\
         <noscript><button type=\"submit\">Go</button></noscript></form>",
        escape_html(custom)
    );
    html.push_str("</div><div class=\"actions\">");
    html.push_str(&render_sort_select(state.sort));
    html.push_str(&post_button("/gallery/refresh", "🔄 Refresh", "btn", &[], false));
    let select_class = if state.selection_mode { "btn active" } else { "btn" };
    html.push_str(&post_button("/gallery/selection", "☑️ Select", select_class, &[], false));
    html.push_str("</div></section>");

    if state.selection_mode {
        let count = state.selection.len();
        let select_label = if state.all_selected() { "Deselect all" } else { "Select all" };
        let _ = write!(
            html,
            "<section class=\"selection-toolbar active\"><span id=\"selectionCount\">{count} selected</span>"
        );
        html.push_str(&post_button("/gallery/select-all", select_label, "btn", &[], false));
        html.push_str(&post_button("/gallery/delete/ask", "🗑️ Delete", "btn danger", &[], count == 0));
        html.push_str(&post_button("/gallery/selection", "Cancel", "btn", &[], false));
        html.push_str("</section>");
    }

    let range = match date_range(&state.view) {
        Some((min, max)) if min == max => format_date_short(min),
        Some((min, max)) => format!("{} - {}", format_date_short(min), format_date_short(max)),
        None => "--".to_string(),
    };
    let _ = write!(
        html,
        "<p class=\"gallery-info\"><span id=\"photoCount\">{}</span> · <span id=\"dateRange\">{}</span></p>",
        plural(state.view.len(), "photo"),
        range
    );

    match state.view_state {
        ViewState::Loading => html.push_str("<div class=\"gallery-loading\">Loading photos…</div>"),
        ViewState::Error => html.push_str(
            "<div class=\"gallery-empty\"><p>The gallery could not be loaded.</p>\
             <p>Use Refresh to try again.</p></div>",
        ),
        ViewState::Empty => html.push_str(
            "<div class=\"gallery-empty\"><p>No photos for this period.</p></div>",
        ),
        ViewState::Ready => html.push_str(&render_grid(state, api)),
    }

    if let Some(index) = state.lightbox {
        if let Some(item) = state.view.get(index) {
            html.push_str(&render_lightbox(item, state.lightbox_busy, api));
        }
    }

    if state.delete_modal != DeleteModal::Closed {
        html.push_str(&render_delete_modal(state));
    }

    html
}

fn render_sort_select(sort: SortOrder) -> String {
    let option = |order: SortOrder, label: &str| {
        let selected = if order == sort { " selected" } else { "" };
        format!("<option value=\"{}\"{selected}>{label}</option>", order.as_str())
    };
    format!(
        "<form class=\"inline\" method=\"post\" action=\"/gallery/sort\">\
         <select name=\"sort\" onchange=\"this.form.submit()\">{}{}</select>\
         <noscript><button type=\"submit\">Sort</button></noscript></form>",
        option(SortOrder::Newest, "Newest first"),
        option(SortOrder::Oldest, "Oldest first")
    )
}

fn render_grid(state: &GalleryState, api: &ApiClient) -> String {
    let grid_class = if state.selection_mode {
        "gallery-grid selection-mode"
    } else {
        "gallery-grid"
    };
    let mut html = format!("<div id=\"galleryGrid\" class=\"{grid_class}\">");
    for item in &state.view {
        let selected = state.is_selected(item.path());
        let checkbox = if state.selection_mode {
            let checked = if selected { " checked" } else { "" };
            format!("<div class=\"selection-checkbox{checked}\"><span>✓</span></div>")
        } else {
            String::new()
        };
        let delete = if state.selection_mode {
            String::new()
        } else {
            post_button("/gallery/delete/ask", "🗑️", "item-delete", &[("path", item.path())], false)
        };
        let _ = write!(
            html,
            "<div class=\"gallery-item{selected_class}\" data-path=\"{path}\">\
             <form method=\"post\" action=\"/gallery/items/click\">\
             <input type=\"hidden\" name=\"path\" value=\"{path}\" />\
             <button class=\"item-open\" type=\"submit\">{checkbox}\
             <img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\" />\
             <div class=\"gallery-item-overlay\"><span>{date}</span><span>{time}</span></div>\
             </button></form>{delete}</div>",
            selected_class = if selected { " selected" } else { "" },
            path = escape_html(item.path()),
            src = escape_html(&api.upload_url(item.path())),
            alt = escape_html(&item.record.filename),
            date = format_date_short(&item.date),
            time = escape_html(&format_time(&item.record.time)),
        );
    }
    html.push_str("</div>");
    html
}

fn render_lightbox(item: &crate::gallery::GalleryItem, busy: bool, api: &ApiClient) -> String {
    let src = escape_html(&api.upload_url(item.path()));
    let filename = escape_html(&item.record.filename);
    let delete_label = if busy { "⏳ Deleting…" } else { "🗑️ Delete" };
    format!(
        "<div id=\"lightbox\" class=\"lightbox active\">\
         <div class=\"lightbox-content\">\
         {close}\
         <img id=\"lightboxImage\" src=\"{src}\" alt=\"{filename}\" />\
         <div class=\"lightbox-info\"><h3>{filename}</h3><p>{date} at {time}{size}</p></div>\
         <div class=\"lightbox-actions\">{prev}\
         <a class=\"btn\" href=\"{src}\" download=\"{filename}\">⬇️ Download</a>\
         {delete}{next}</div></div></div>",
        close = post_button("/gallery/lightbox/close", "×", "lightbox-close", &[], false),
        prev = post_button("/gallery/lightbox/navigate", "‹", "lightbox-nav", &[("step", "-1")], false),
        next = post_button("/gallery/lightbox/navigate", "›", "lightbox-nav", &[("step", "1")], false),
        delete = post_button(
            "/gallery/lightbox/delete",
            delete_label,
            "btn danger",
            &[("path", item.path())],
            busy
        ),
        date = format_date(&item.date),
        time = escape_html(&format_time(&item.record.time)),
        size = item
            .record
            .size
            .map(|bytes| format!(" · {}", format_file_size(bytes)))
            .unwrap_or_default(),
    )
}

fn render_delete_modal(state: &GalleryState) -> String {
    let (title, detail) = match &state.delete_modal {
        DeleteModal::Single(path) => {
            let filename = state
                .view
                .iter()
                .find(|item| item.path() == path)
                .map(|item| item.record.filename.as_str())
                .unwrap_or(path.as_str());
            ("Delete this photo?", format!("<p class=\"delete-filename\">{}</p>", escape_html(filename)))
        }
        _ => {
            let count = state.selection.len();
            (
                "Delete the selected photos?",
                format!("<p class=\"delete-count\">{} selected</p>", plural(count, "photo")),
            )
        }
    };
    let confirm_label = if state.modal_busy { "Deleting…" } else { "Delete" };
    format!(
        "<div id=\"deleteModal\" class=\"modal active\"><div class=\"modal-content\">\
         <h3>{title}</h3>{detail}<p>This cannot be undone.</p><div class=\"modal-actions\">{cancel}{confirm}</div></div></div>",
        cancel = post_button("/gallery/delete/cancel", "Cancel", "btn", &[], false),
        confirm = post_button("/gallery/delete/confirm", confirm_label, "btn danger", &[], state.modal_busy),
    )
}

pub fn render_stats(state: &DashboardState, view: Option<&DashboardView>, api: &ApiClient) -> String {
    let Some(view) = view else {
        return format!(
            "<section class=\"stats-unavailable\"><p>Statistics are not available right now.</p>{}</section>",
            post_button("/stats/refresh", "🔄 Retry", "btn", &[], false)
        );
    };

    let mut html = String::new();
    let _ = write!(
        html,
        "<section class=\"stats-grid\">\
         <div class=\"stat\"><span class=\"label\">Photos</span><span class=\"value\" id=\"statTotalPhotos\">{}</span></div>\
         <div class=\"stat\"><span class=\"label\">Days</span><span class=\"value\" id=\"statTotalDays\">{}</span></div>\
         <div class=\"stat\"><span class=\"label\">Storage</span><span class=\"value\" id=\"statTotalSize\">{}</span></div>\
         <div class=\"stat\"><span class=\"label\">Per day</span><span class=\"value\" id=\"statAvgDaily\">{}</span></div>\
         </section>",
        view.total_images, view.total_days, view.storage, view.daily_average
    );

    let mut periods = String::new();
    for days in DAILY_PERIODS {
        let selected = if days == state.daily_period { " selected" } else { "" };
        let _ = write!(periods, "<option value=\"{days}\"{selected}>{days} days</option>");
    }
    let _ = write!(
        html,
        "<section class=\"chart-card\"><div class=\"chart-header\"><h2>Photos per day</h2>\
         <form class=\"inline\" method=\"post\" action=\"/stats/period\">\
         <select name=\"days\" onchange=\"this.form.submit()\">{periods}</select>\
         <noscript><button type=\"submit\">Show</button></noscript></form></div>\
         <div class=\"chart-box\"><canvas id=\"dailyChart\"></canvas></div></section>\
         <section class=\"chart-row\">\
         <div class=\"chart-card\"><h2>Activity by hour</h2><div class=\"chart-box\"><canvas id=\"hourlyChart\"></canvas></div></div>\
         <div class=\"chart-card\"><h2>Activity by weekday</h2><div class=\"chart-box\"><canvas id=\"weeklyChart\"></canvas></div></div>\
         </section>"
    );

    let peak_day = view
        .peak_day
        .as_ref()
        .map(|peak| format_date_short(&peak.date))
        .unwrap_or_else(|| "--".to_string());
    let peak_count = view
        .peak_day
        .as_ref()
        .map(|peak| format!("{} photos", peak.count))
        .unwrap_or_else(|| "-- photos".to_string());
    let peak_hour = view
        .peak_hour
        .map(|hour| format!("{hour}h - {}h", hour + 1))
        .unwrap_or_else(|| "--".to_string());
    let first_capture = view.first_capture.clone().unwrap_or_else(|| "--".to_string());
    let _ = write!(
        html,
        "<section class=\"peaks\">\
         <div class=\"stat\"><span class=\"label\">Busiest day</span><span class=\"value\" id=\"peakDay\">{peak_day}</span>\
         <span class=\"hint\" id=\"peakCount\">{peak_count}</span></div>\
         <div class=\"stat\"><span class=\"label\">Busiest hour</span><span class=\"value\" id=\"peakHour\">{peak_hour}</span></div>\
         <div class=\"stat\"><span class=\"label\">First capture</span><span class=\"value\" id=\"firstCapture\">{first_capture}</span></div>\
         </section>"
    );

    html.push_str("<section class=\"activity\"><h2>Recent activity</h2><div id=\"activityList\">");
    if view.recent_activity.is_empty() {
        html.push_str("<div class=\"activity-empty\"><p>No recent activity</p></div>");
    }
    for entry in &view.recent_activity {
        let icon = match &entry.path {
            Some(path) => format!("<img src=\"{}\" alt=\"Photo\" />", escape_html(&api.upload_url(path))),
            None => "📷".to_string(),
        };
        let _ = write!(
            html,
            "<div class=\"activity-item\"><div class=\"activity-icon\">{icon}</div>\
             <div class=\"activity-details\"><h4>{}</h4><p>{}</p></div>\
             <div class=\"activity-time\">{}</div></div>",
            escape_html(&entry.message),
            entry.size.as_deref().unwrap_or_default(),
            escape_html(&entry.when)
        );
    }
    html.push_str("</div></section>");

    html.push_str("<section class=\"cleanup\"><h2>Cleanup</h2>");
    match state.pending_cleanup {
        Some(days) => {
            let _ = write!(
                html,
                "<p class=\"confirm\">Delete every photo older than {days} days?</p>{}{}",
                post_button("/stats/cleanup/cancel", "Cancel", "btn", &[], false),
                post_button("/stats/cleanup/confirm", "Yes, delete", "btn danger", &[], state.cleanup_running)
            );
        }
        None => {
            let mut choices = String::new();
            for days in CLEANUP_CHOICES {
                let selected = if days == 30 { " selected" } else { "" };
                let _ = write!(choices, "<option value=\"{days}\"{selected}>Older than {days} days</option>");
            }
            let _ = write!(
                html,
                "<form class=\"inline\" method=\"post\" action=\"/stats/cleanup\">\
                 <select name=\"days\">{choices}</select>\
                 <button class=\"btn danger\" type=\"submit\">🧹 Clean up</button></form>"
            );
        }
    }
    html.push_str("</section>");

    html
}

pub fn render_chart_scripts(view: Option<&DashboardView>) -> String {
    let Some(view) = view else {
        return String::new();
    };
    CHARTS_JS
        .replace("{{DAILY}}", &series_json(&view.daily))
        .replace("{{HOURLY}}", &series_json(&view.hourly))
        .replace("{{WEEKLY}}", &series_json(&view.weekly))
}

fn series_json(series: &Series) -> String {
    serde_json::to_string(series)
        .unwrap_or_else(|_| "{\"labels\":[],\"values\":[]}".to_string())
        .replace("</", "<\\/")
}

const HOME_HTML: &str = r#"<section class="hero">
  <h1>🐦 Connected bird feeder</h1>
  <p class="subtitle">Photos captured by the feeder camera, straight from the garden.</p>
  <div class="hero-actions">
    <a class="btn primary" href="/gallery">Open the gallery</a>
    <a class="btn" href="/stats">See statistics</a>
  </div>
</section>
<section class="stats-grid">
  <div class="stat"><span class="label">Photos</span><span class="value" id="totalPhotos">{{TOTAL_PHOTOS}}</span></div>
  <div class="stat"><span class="label">Days</span><span class="value" id="totalDays">{{TOTAL_DAYS}}</span></div>
  <div class="stat"><span class="label">Today</span><span class="value" id="todayPhotos">{{TODAY_PHOTOS}}</span></div>
  <div class="stat"><span class="label">Last capture</span><span class="value" id="lastCapture">{{LAST_CAPTURE}}</span></div>
</section>
"#;

const CHARTS_JS: &str = r#"<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<script>
  (function () {
    if (typeof Chart === 'undefined') {
      return;
    }
    const isDark = document.documentElement.getAttribute('data-theme') === 'dark';
    const tick = isDark ? '#B0B0B0' : '#636E72';
    const grid = isDark ? '#2D3748' : '#E0E0E0';
    const axes = {
      y: { beginAtZero: true, ticks: { stepSize: 1, color: tick }, grid: { color: grid } },
      x: { ticks: { color: tick }, grid: { display: false } }
    };
    const daily = {{DAILY}};
    const hourly = {{HOURLY}};
    const weekly = {{WEEKLY}};

    new Chart(document.getElementById('dailyChart'), {
      type: 'bar',
      data: { labels: daily.labels, datasets: [{ label: 'Photos', data: daily.values,
        backgroundColor: 'rgba(76, 175, 80, 0.7)', borderColor: '#4CAF50', borderWidth: 1, borderRadius: 4 }] },
      options: { responsive: true, maintainAspectRatio: false, plugins: { legend: { display: false } }, scales: axes }
    });

    new Chart(document.getElementById('hourlyChart'), {
      type: 'line',
      data: { labels: hourly.labels, datasets: [{ label: 'Photos', data: hourly.values,
        borderColor: '#FF9800', backgroundColor: 'rgba(255, 152, 0, 0.1)', fill: true, tension: 0.4,
        pointRadius: 4, pointBackgroundColor: '#FF9800' }] },
      options: { responsive: true, maintainAspectRatio: false, plugins: { legend: { display: false } }, scales: axes }
    });

    new Chart(document.getElementById('weeklyChart'), {
      type: 'doughnut',
      data: { labels: weekly.labels, datasets: [{ data: weekly.values,
        backgroundColor: ['#F44336', '#FF9800', '#FFC107', '#4CAF50', '#2196F3', '#9C27B0', '#795548'],
        borderWidth: 2, borderColor: isDark ? '#1F2940' : '#FFFFFF' }] },
      options: { responsive: true, maintainAspectRatio: false,
        plugins: { legend: { position: 'bottom', labels: { color: tick, usePointStyle: true } } } }
    });
  })();
</script>
"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en"{{THEME_ATTR}}>
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{HEAD_EXTRA}}
  <title>{{TITLE}} · Bird feeder</title>
  <style>
    :root {
      --bg: #f5f7f2;
      --card: #ffffff;
      --ink: #2d3436;
      --muted: #636e72;
      --accent: #4caf50;
      --danger: #e53935;
      --border: #e0e0e0;
      --shadow: 0 12px 32px rgba(45, 52, 54, 0.12);
    }

    [data-theme="dark"] {
      --bg: #141a2b;
      --card: #1f2940;
      --ink: #f0f0f0;
      --muted: #b0b0b0;
      --border: #2d3748;
      --shadow: 0 12px 32px rgba(0, 0, 0, 0.4);
    }

    @media (prefers-color-scheme: dark) {
      :root:not([data-theme="light"]) {
        --bg: #141a2b;
        --card: #1f2940;
        --ink: #f0f0f0;
        --muted: #b0b0b0;
        --border: #2d3748;
      }
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    }

    .navbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      padding: 14px 24px;
      background: var(--card);
      box-shadow: var(--shadow);
      position: sticky;
      top: 0;
      z-index: 10;
    }

    .brand { font-weight: 700; color: var(--ink); text-decoration: none; }
    .nav-menu { display: flex; gap: 8px; list-style: none; margin: 0; padding: 0; }
    .nav-link { color: var(--muted); text-decoration: none; padding: 8px 12px; border-radius: 8px; }
    .nav-link.active, .nav-link:hover { color: var(--accent); background: rgba(76, 175, 80, 0.1); }
    .nav-toggle-input { display: none; }
    .nav-toggle { display: none; cursor: pointer; font-size: 1.4rem; }

    .nav-tools { display: flex; align-items: center; gap: 12px; }
    .server-status { display: flex; align-items: center; gap: 6px; color: var(--muted); font-size: 0.85rem; }
    .status-dot { width: 10px; height: 10px; border-radius: 50%; background: #b0b0b0; }
    .status-dot.online { background: var(--accent); }
    .status-dot.offline { background: var(--danger); }

    main { width: min(1200px, 100%); margin: 0 auto; padding: 24px; display: grid; gap: 20px; }

    .btn, button {
      appearance: none;
      border: 1px solid var(--border);
      background: var(--card);
      color: var(--ink);
      border-radius: 10px;
      padding: 8px 14px;
      font: inherit;
      cursor: pointer;
      text-decoration: none;
      display: inline-flex;
      align-items: center;
      gap: 6px;
    }
    .btn.primary, .btn.active, .filter-btn.active { background: var(--accent); border-color: var(--accent); color: #fff; }
    .btn.danger { background: var(--danger); border-color: var(--danger); color: #fff; }
    button:disabled { opacity: 0.5; cursor: not-allowed; }
    form.inline { display: inline-flex; gap: 6px; align-items: center; margin: 0; }

    .stats-grid, .peaks { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 16px; }
    .stat { background: var(--card); border-radius: 14px; padding: 18px; box-shadow: var(--shadow); display: grid; gap: 6px; }
    .stat .label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.1em; color: var(--muted); }
    .stat .value { font-size: 1.6rem; font-weight: 600; }
    .hint { color: var(--muted); font-size: 0.9rem; }

    .toolbar, .selection-toolbar { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 12px; }
    .filters, .actions { display: flex; flex-wrap: wrap; gap: 6px; }
    .selection-toolbar { background: var(--card); padding: 12px; border-radius: 12px; align-items: center; }
    .gallery-info { color: var(--muted); margin: 0; }

    .gallery-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; }
    .gallery-item { position: relative; border-radius: 12px; overflow: hidden; box-shadow: var(--shadow); }
    .gallery-item.selected { outline: 3px solid var(--accent); }
    .gallery-item form { margin: 0; }
    .item-open { padding: 0; border: none; border-radius: 0; width: 100%; display: block; position: relative; }
    .item-open img { width: 100%; aspect-ratio: 4 / 3; object-fit: cover; display: block; }
    .gallery-item-overlay {
      position: absolute; left: 0; right: 0; bottom: 0; display: flex; justify-content: space-between;
      padding: 6px 10px; color: #fff; background: linear-gradient(transparent, rgba(0, 0, 0, 0.6)); font-size: 0.8rem;
    }
    .selection-checkbox {
      position: absolute; top: 8px; left: 8px; width: 24px; height: 24px; border-radius: 6px;
      border: 2px solid #fff; background: rgba(0, 0, 0, 0.3); color: transparent; display: grid; place-items: center;
    }
    .selection-checkbox.checked { background: var(--accent); color: #fff; }
    .item-delete { position: absolute; top: 8px; right: 8px; padding: 4px 8px; opacity: 0.85; }
    .gallery-loading, .gallery-empty, .stats-unavailable { text-align: center; color: var(--muted); padding: 48px 0; }

    .lightbox, .modal {
      position: fixed; inset: 0; background: rgba(0, 0, 0, 0.85); display: grid; place-items: center; z-index: 20;
    }
    .lightbox-content { max-width: 92vw; display: grid; gap: 12px; color: #fff; position: relative; }
    .lightbox-content img { max-width: 92vw; max-height: 72vh; object-fit: contain; }
    .lightbox-actions { display: flex; gap: 8px; justify-content: center; flex-wrap: wrap; }
    .lightbox-close { position: absolute; top: -44px; right: 0; }
    .modal { background: rgba(0, 0, 0, 0.5); }
    .modal-content { background: var(--card); border-radius: 14px; padding: 24px; width: min(420px, 92vw); }
    .modal-actions { display: flex; justify-content: flex-end; gap: 8px; }

    .chart-card { background: var(--card); border-radius: 14px; padding: 18px; box-shadow: var(--shadow); }
    .chart-header { display: flex; justify-content: space-between; align-items: center; gap: 12px; }
    .chart-row { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }
    .chart-box { position: relative; height: 280px; }
    .activity { background: var(--card); border-radius: 14px; padding: 18px; }
    .activity-item { display: grid; grid-template-columns: 48px 1fr auto; gap: 12px; align-items: center; padding: 8px 0; }
    .activity-icon img { width: 48px; height: 48px; object-fit: cover; border-radius: 8px; }
    .activity-details h4, .activity-details p { margin: 0; }
    .activity-time { color: var(--muted); font-size: 0.85rem; }
    .cleanup { background: var(--card); border-radius: 14px; padding: 18px; }

    .toast-container { position: fixed; right: 20px; bottom: 20px; display: grid; gap: 8px; z-index: 30; }
    .toast {
      display: flex; align-items: center; gap: 10px; background: var(--card); border-left: 4px solid var(--accent);
      padding: 12px 14px; border-radius: 10px; box-shadow: var(--shadow);
      animation: slideIn 0.3s ease, fadeOut 0.3s ease forwards;
    }
    .toast.error { border-color: var(--danger); }
    .toast.warning { border-color: #ff9800; }
    .toast.info { border-color: #2196f3; }
    .toast form { margin: 0; }
    .toast-close { border: none; background: transparent; padding: 0 4px; font-size: 1.1rem; }

    @keyframes slideIn { from { transform: translateX(120%); } to { transform: translateX(0); } }
    @keyframes fadeOut { to { opacity: 0; visibility: hidden; } }

    @media (max-width: 720px) {
      .nav-toggle { display: block; }
      .nav-menu { display: none; position: absolute; top: 100%; left: 0; right: 0; flex-direction: column; background: var(--card); padding: 12px; }
      .nav-toggle-input:checked ~ .nav-menu { display: flex; }
      .server-status span:last-child { display: none; }
    }
  </style>
</head>
<body>
  <nav class="navbar">
    <a class="brand" href="/">🐦 Bird feeder</a>
    <input class="nav-toggle-input" type="checkbox" id="navToggle" />
    <label class="nav-toggle" for="navToggle" aria-label="Menu">☰</label>
    <ul class="nav-menu">{{NAV}}</ul>
    <div class="nav-tools">
      <div class="server-status"><span class="status-dot {{STATUS_CLASS}}" id="serverStatus"></span><span id="serverStatusText">{{STATUS_TEXT}}</span></div>
      <form class="inline" method="post" action="/theme/toggle">
        <input type="hidden" name="back" value="{{BACK}}" />
        <button id="themeToggle" type="submit" aria-label="Toggle theme"><span class="theme-icon">{{TOGGLE_ICON}}</span></button>
      </form>
    </div>
  </nav>
  <main>
{{CONTENT}}
  </main>
  <div class="toast-container">{{TOASTS}}</div>
{{SCRIPTS}}
</body>
</html>
"#;
