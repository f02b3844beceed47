//! Colored terminal rendering for seminar-core types.

use owo_colors::OwoColorize;
use seminar_core::Seminar;
use seminar_core::member::{MemberDocument, Notification};
use seminar_core::rating::{Rating, RatingDimension};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Seminar {
    /// One list row: title, when, where.
    fn render(&self) -> String {
        let when = format!("{} {}", self.date_label(), self.time_label());
        let mut line = format!(
            "{} {} {}",
            format!("#{}", self.id).dimmed(),
            self.title.bold(),
            when.trim_end().dimmed()
        );
        if !self.location.is_empty() {
            line.push_str(&format!(" {}", format!("@ {}", self.location).dimmed()));
        }
        line
    }
}

/// Full details block for a single seminar.
pub fn render_details(seminar: &Seminar, registered: bool) -> Vec<String> {
    let mut lines = vec![seminar.title.bold().to_string()];

    let when = format!("{} {}", seminar.date_label(), seminar.time_label());
    lines.push(format!("  Date:      {}", when.trim_end()));
    if !seminar.location.is_empty() {
        lines.push(format!("  Location:  {}", seminar.location));
    }
    lines.push(format!("  Host:      {}", seminar.host_name()));
    if let Some(capacity) = seminar.capacity {
        lines.push(format!("  Capacity:  {capacity}"));
    }

    let status = if registered {
        "registered".green().to_string()
    } else {
        "not registered".dimmed().to_string()
    };
    lines.push(format!("  Status:    {status}"));

    let body = seminar.plain_content();
    if !body.is_empty() {
        lines.push(String::new());
        lines.extend(body.lines().map(|l| format!("  {}", l.trim())));
    }

    if !seminar.documents.is_empty() {
        lines.push(String::new());
        lines.push("  Documents".bold().to_string());
        for doc in &seminar.documents {
            lines.push(format!("   {} {}", doc.title, doc.url.dimmed()));
        }
    }

    lines
}

impl Render for MemberDocument {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.title.bold(),
            format!("[{}]", self.kind).cyan(),
            format!("{} {}", self.date, self.size).dimmed()
        )
    }
}

impl Render for Notification {
    fn render(&self) -> String {
        let marker = if self.read {
            " ".to_string()
        } else {
            "●".blue().to_string()
        };
        format!("{} {} {}", marker, self.message, self.date.dimmed())
    }
}

impl Render for Rating {
    fn render(&self) -> String {
        RatingDimension::ALL
            .iter()
            .map(|&dim| match self.get(dim) {
                Some(score) => format!("{}: {}", dim.label(), dim.option_label(score)),
                None => format!("{}: {}", dim.label(), "-".dimmed()),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
