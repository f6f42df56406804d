//! Shared helpers for the `reunion` command-line tool.

use reunion_core::{ContactRecord, MediaItem, StatsSnapshot};

/// Truncate a string to `max_len` characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

pub fn media_table(items: &[MediaItem]) -> String {
    let mut out = format!("{:<6} {:<40} {:>10}  {}\n", "KIND", "NAME", "SIZE", "ID");
    for item in items {
        out.push_str(&format!(
            "{:<6} {:<40} {:>10}  {}\n",
            item.kind.as_str(),
            truncate_string(&item.name, 40),
            item.size_bytes,
            item.id
        ));
    }
    out.push_str(&format!("\n{} item(s)\n", items.len()));
    out
}

pub fn contacts_table(contacts: &[ContactRecord]) -> String {
    let mut out = format!(
        "{:<12} {:<28} {:<16} {:<6} {}\n",
        "ID", "NAME", "PHONE", "BLOOD", "CITY"
    );
    for c in contacts {
        out.push_str(&format!(
            "{:<12} {:<28} {:<16} {:<6} {}\n",
            c.id,
            truncate_string(&c.name, 28),
            c.phone,
            c.blood_group.as_deref().unwrap_or("-"),
            c.city.as_deref().unwrap_or("-")
        ));
    }
    out.push_str(&format!("\n{} contact(s)\n", contacts.len()));
    out
}

pub fn stats_table(stats: &StatsSnapshot) -> String {
    format!(
        "Friends: {}\nPhotos:  {}\nVideos:  {}\nCities:  {} ({})\n",
        stats.total_friends,
        stats.total_photos,
        stats.total_videos,
        stats.unique_cities_count,
        stats.cities.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("ঢাকা শহরের ছবি", 6), "ঢাক...");
    }

    #[test]
    fn stats_table_lists_cities() {
        let stats = StatsSnapshot {
            total_friends: 3,
            total_photos: 10,
            total_videos: 2,
            cities: vec!["Dhaka".to_string(), "Sylhet".to_string()],
            unique_cities_count: 2,
        };
        let table = stats_table(&stats);
        assert!(table.contains("Friends: 3"));
        assert!(table.contains("Cities:  2 (Dhaka, Sylhet)"));
    }

    #[test]
    fn contacts_table_marks_missing_fields() {
        let contact = ContactRecord {
            id: "contact-1".to_string(),
            name: "Arif".to_string(),
            phone: "01711000000".to_string(),
            ..Default::default()
        };
        let table = contacts_table(&[contact]);
        assert!(table.contains("contact-1"));
        assert!(table.contains("1 contact(s)"));
        assert!(table.lines().nth(1).is_some_and(|l| l.trim_end().ends_with('-')));
    }
}
