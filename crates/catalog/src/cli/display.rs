//! Display formatting utilities for CLI output

use colored::*;
use matcher::{Channel, Quantity, Record};

use crate::identity::User;

/// Break text into lines of at most `width` characters. Overlong words get a
/// line to themselves and empty lines between paragraphs are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.lines() {
    let mut words = paragraph.split_whitespace();
    let Some(first) = words.next() else {
      lines.push(String::new());
      continue;
    };

    let mut line = first.to_string();
    let mut used = first.chars().count();
    for word in words {
      let len = word.chars().count();
      if used + 1 + len > width {
        lines.push(std::mem::replace(&mut line, word.to_string()));
        used = len;
      } else {
        line.push(' ');
        line.push_str(word);
        used += 1 + len;
      }
    }
    lines.push(line);
  }

  lines
}

/// The band as shown to users, whichever shape the record uses.
pub fn band_label(record: &Record) -> String {
  match record.band() {
    Ok(Some(range)) => format!("{range} MHz"),
    Ok(None) => "-".to_string(),
    Err(_) => record.range.clone().unwrap_or_default(),
  }
}

/// `name  frequency MHz  (features)`, skipping what is unknown.
pub fn channel_label(link: &Channel) -> String {
  let mut label = link.channel.clone();
  if let Some(frequency) = &link.frequency {
    label.push_str(&format!("  {frequency} MHz"));
  }
  if let Some(features) = &link.features {
    label.push_str(&format!("  ({features})"));
  }
  label
}

/// One line per record, for lists and search results.
pub fn display_record_line(record: &Record) {
  let kind = record.signal_type.map(|t| t.as_str()).unwrap_or("-");
  let frequency = record.frequency.map(|f| format!("{f} MHz")).unwrap_or_else(|| "-".to_string());

  println!(
    "  {} {} {} {} {} {}",
    "📡".yellow(),
    record.name.bold(),
    format!("[{}]", record.id).dimmed(),
    kind.cyan(),
    frequency,
    band_label(record).dimmed()
  );
}

pub fn display_records(records: &[Record]) {
  for record in records {
    display_record_line(record);
  }
}

/// Full detail view of a single record
pub fn display_record(record: &Record) {
  let header = format!("=== {} ({}) ===", record.name.yellow().bold(), record.id.cyan());
  println!("{header}");

  let field = |label: &str, value: String| println!("{}: {value}", format!("{label:>11}").bold());

  field("Type", record.signal_type.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()));
  field("Frequency", record.frequency.map(|f| format!("{f} MHz")).unwrap_or_else(|| "-".to_string()));
  field("Range", band_label(record));
  if let Some(image) = &record.image {
    field("Image", image.clone());
  }

  let flight = &record.flight;
  let speed = |s: &Option<Quantity>| s.as_ref().map(|s| format!("{s} km/h"));
  let figures = [
    ("Max height", flight.max_height.clone()),
    ("Work height", flight.work_height.clone()),
    ("Endurance", flight.flight_duration.clone()),
    ("Reach", flight.flight_range.clone()),
    ("Cruising", speed(&flight.cruising_speed)),
    ("Top speed", speed(&flight.max_speed)),
  ];
  for (label, value) in figures {
    if let Some(value) = value {
      field(label, value);
    }
  }

  if let Some(at) = record.updated_at {
    let by = record.updated_by.as_deref().unwrap_or("unknown");
    field("Updated", format!("{} by {by}", at.format("%Y-%m-%d %H:%M UTC")));
  }

  if !record.signals.is_empty() {
    println!();
    println!("{}", "Channels".blue().bold());
    for link in &record.signals {
      println!("  • {}", channel_label(link));
    }
  }

  for (title, text) in [("Description", &record.description), ("Specs", &record.specs)] {
    if let Some(text) = text {
      println!();
      println!("{}", title.blue().bold());
      for line in wrap_text(text, 80) {
        println!("{line}");
      }
    }
  }
  println!();
}

pub fn display_user(user: &User) {
  let name = user.display_name.as_deref().unwrap_or(&user.email);
  println!("{} {} <{}> ({})", "👤".cyan(), name.bold(), user.email, user.role.to_string().yellow());
}
