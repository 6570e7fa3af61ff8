/// Text rendering of the view model
///
/// Pure functions from state to strings. The renderer thread decides when to
/// draw; nothing here touches the terminal.
use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::api::{DailySleep, SleepHistoryRecord, WeeklySleep};
use crate::playback::SessionInfo;
use crate::state::{Alert, DashboardPanel, Section, SettingsForm, ViewModel};

/// Chart y axis upper bound, in hours
pub const CHART_MAX_HOURS: f64 = 10.0;
const CHART_WIDTH: usize = 30;
const RULE: &str = "────────────────────────────────────────────────────────";

pub fn render_screen(view: &ViewModel, alerts: &[Alert], playing: Option<&SessionInfo>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Smart Bedroom · {}", view.section.title());
    let _ = writeln!(out, "{}", RULE);
    out.push_str(&render_banners(alerts));

    match view.section {
        Section::Dashboard => out.push_str(&render_dashboard(&view.dashboard, playing)),
        Section::Settings => out.push_str(&render_settings(&view.settings, playing)),
    }

    let _ = writeln!(out, "{}", RULE);
    out.push_str("> ");
    out.push_str(&view.input);
    out
}

pub fn render_banners(alerts: &[Alert]) -> String {
    let mut out = String::new();
    for alert in alerts {
        let _ = writeln!(
            out,
            "[{}] {}",
            alert.level.label().to_uppercase(),
            alert.message
        );
    }
    if !alerts.is_empty() {
        out.push('\n');
    }
    out
}

fn now_playing_line(playing: Option<&SessionInfo>) -> String {
    match playing {
        Some(session) => format!("Now playing: {} ({})", session.sound_id, session.mode),
        None => "Now playing: nothing".to_string(),
    }
}

pub fn render_dashboard(panel: &DashboardPanel, playing: Option<&SessionInfo>) -> String {
    let mut out = String::new();

    match &panel.reading {
        Some(reading) => {
            let _ = writeln!(
                out,
                "Temperature  {:.1}°C [{}]",
                reading.temperature,
                reading.temperature_status.label()
            );
            let _ = writeln!(
                out,
                "Light        {:.0}% [{}]",
                reading.light,
                reading.light_status.label()
            );
            let _ = writeln!(
                out,
                "Sleep        {} ({})",
                reading.occupancy.label(),
                reading.occupancy.badge()
            );
            if let Some(minutes) = reading.sleeping_minutes {
                let _ = writeln!(out, "             asleep for {} min", minutes);
            }
            let _ = writeln!(out, "Environment  {}", reading.environment.label());
            let _ = writeln!(out, "Updated      {}", reading.timestamp);
        }
        None => {
            let _ = writeln!(out, "Waiting for sensor data...");
        }
    }

    if let Some(control) = &panel.control {
        let _ = writeln!(out, "Climate      {}", control.temperature);
        let _ = writeln!(out, "Lighting     {}", control.light);
    }

    let _ = writeln!(out, "{}", now_playing_line(playing));
    out.push('\n');

    out.push_str(&render_chart(&panel.sleep_chart));
    if let Some(weekly) = &panel.weekly {
        out.push_str(&render_weekly(weekly));
    }
    out.push('\n');
    out.push_str(&render_history(&panel.history));
    out
}

/// Parse the server's `YYYY-MM-DD` dates, tolerating a trailing time part
fn parse_date(date: &str) -> Option<NaiveDate> {
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Short weekday label for a chart bar ("Mon")
pub fn weekday_label(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// History table date ("Mon, Jan 5")
pub fn history_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// One decimal place, "N/A" for missing and zero values; the unit is always appended
pub fn history_value(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format!("{:.1}{}", v, suffix),
        _ => format!("N/A{}", suffix),
    }
}

pub fn render_chart(days: &[DailySleep]) -> String {
    let mut out = String::from("Sleep (hours, last week)\n");
    if days.is_empty() {
        out.push_str("  no sleep data\n");
        return out;
    }

    for day in days {
        let hours = day.hours.unwrap_or(0.0);
        let filled = ((hours.clamp(0.0, CHART_MAX_HOURS) / CHART_MAX_HOURS)
            * CHART_WIDTH as f64)
            .round() as usize;
        let _ = writeln!(
            out,
            "  {:<4}|{}{}| {:.1}h",
            weekday_label(&day.date),
            "█".repeat(filled),
            " ".repeat(CHART_WIDTH - filled),
            hours
        );
    }
    let _ = writeln!(
        out,
        "      0{}{}",
        " ".repeat(CHART_WIDTH - 1),
        CHART_MAX_HOURS
    );
    out
}

fn render_weekly(weekly: &WeeklySleep) -> String {
    format!(
        "Weekly avg: {} sleep, {} temp, {} light over {} sessions\n",
        history_value(weekly.avg_hours, "h"),
        history_value(weekly.avg_temp, "°C"),
        history_value(weekly.avg_light, "%"),
        weekly.session_count
    )
}

pub fn render_history(records: &[SleepHistoryRecord]) -> String {
    let mut out = String::from("Sleep history\n");
    if records.is_empty() {
        out.push_str("  no sleep sessions recorded\n");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<12} {:>6} {:>8} {:>7}  {}",
        "Date", "Hours", "Temp", "Light", "Quality"
    );
    for record in records {
        let _ = writeln!(
            out,
            "  {:<12} {:>6} {:>8} {:>7}  [{}]",
            history_date(&record.date),
            history_value(record.hours, ""),
            history_value(record.temp, "°C"),
            history_value(record.light, "%"),
            record.quality.label()
        );
    }
    out
}

fn checkbox(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn render_settings(form: &SettingsForm, playing: Option<&SessionInfo>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Environment");
    let _ = writeln!(out, "  Ideal temperature   {}", form.temp_label());
    let _ = writeln!(out, "  Max light           {}", form.light_label());
    let _ = writeln!(out, "  {} Adaptive lighting", checkbox(form.adaptive_light));
    let _ = writeln!(out, "  {} Auto temperature", checkbox(form.auto_temp));
    let _ = writeln!(
        out,
        "  {} Sleep notifications",
        checkbox(form.sleep_notifications)
    );
    out.push('\n');

    let _ = writeln!(out, "Sleep sound ({}s)", form.sound_duration);
    for card in &form.sounds {
        let marker = if form.selected_sound.as_deref() == Some(card.id.as_str()) {
            "●"
        } else {
            "○"
        };
        let _ = writeln!(out, "  {} {:<16} {}", marker, card.name, card.id);
    }
    let _ = writeln!(out, "{}", now_playing_line(playing));
    out
}
