//! CSV export of entry lists.
//!
//! Fixed column order, RFC 4180 quoting, CRLF row separators. Output is
//! deterministic for a given input list and ordering, so the same export
//! request always produces byte-identical files.

use chrono::{DateTime, Utc};

use super::entry::Entry;

/// Column headers, in the order fields are written.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Topic",
    "Telegram Username",
    "Platform Username",
    "Wallet Address",
    "Discord Username",
    "Email",
    "Submitted At",
];

/// Serialise `entries` to CSV text, header row included.
///
/// A missing Discord username becomes an empty field. Fields containing a
/// comma, quote, CR, or LF are quoted with embedded quotes doubled; this
/// is the one place a naive writer silently corrupts data.
pub fn entries_to_csv(entries: &[Entry]) -> String {
    let mut out = String::new();
    push_row(&mut out, EXPORT_COLUMNS.iter().map(|column| (*column).to_owned()));
    for entry in entries {
        push_row(
            &mut out,
            [
                entry.topic_name.clone(),
                entry.telegram_username.to_string(),
                entry.platform_username.to_string(),
                entry.wallet_address.to_string(),
                entry
                    .discord_username
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                entry.email.to_string(),
                format_submitted_at(entry.created_at),
            ]
            .into_iter(),
        );
    }
    out
}

/// Human-readable submission instant, e.g. `Jan 5, 2026 3:07 PM`.
///
/// English month abbreviations regardless of process locale, always UTC.
pub fn format_submitted_at(instant: DateTime<Utc>) -> String {
    instant.format("%b %-d, %Y %-I:%M %p").to_string()
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let row = fields
        .map(|field| escape_field(&field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push_str("\r\n");
}

fn escape_field(raw: &str) -> String {
    if raw.contains(['"', ',', '\r', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::fields::{
        DiscordUsername, Email, PlatformUsername, TelegramPolicy, TelegramUsername,
    };
    use crate::domain::wallet::WalletAddress;

    fn entry(topic_name: &str, discord: Option<&str>) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            topic_id: Uuid::new_v4(),
            topic_name: topic_name.to_owned(),
            telegram_username: TelegramUsername::new("alice", TelegramPolicy::Lenient)
                .expect("valid telegram username"),
            platform_username: PlatformUsername::new("alice").expect("valid platform username"),
            wallet_address: WalletAddress::new("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
                .expect("valid wallet"),
            discord_username: DiscordUsername::new_optional(discord)
                .expect("valid discord username"),
            email: Email::new("a@x.com").expect("valid email"),
            created_at: Utc
                .with_ymd_and_hms(2026, 1, 5, 15, 7, 0)
                .single()
                .expect("valid instant"),
        }
    }

    /// Minimal RFC 4180 reader used to verify the writer round-trips.
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            if quoted {
                match ch {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    other => field.push(other),
                }
            } else {
                match ch {
                    '"' => quoted = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\r' if chars.peek() == Some(&'\n') => {
                        chars.next();
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    other => field.push(other),
                }
            }
        }
        rows
    }

    #[test]
    fn header_row_matches_column_order() {
        let csv = entries_to_csv(&[]);
        assert_eq!(
            csv,
            "Topic,Telegram Username,Platform Username,Wallet Address,Discord Username,Email,Submitted At\r\n"
        );
    }

    #[test]
    fn date_format_is_fixed_and_unpadded() {
        let morning = Utc
            .with_ymd_and_hms(2026, 3, 9, 0, 5, 0)
            .single()
            .expect("valid instant");
        assert_eq!(format_submitted_at(morning), "Mar 9, 2026 12:05 AM");
        let afternoon = Utc
            .with_ymd_and_hms(2026, 1, 5, 15, 7, 0)
            .single()
            .expect("valid instant");
        assert_eq!(format_submitted_at(afternoon), "Jan 5, 2026 3:07 PM");
    }

    #[test]
    fn missing_discord_is_an_empty_field() {
        let csv = entries_to_csv(&[entry("Launch Week", None)]);
        let rows = parse_csv(&csv);
        let data = rows.get(1).expect("data row");
        assert_eq!(data.get(4).map(String::as_str), Some(""));
    }

    #[rstest]
    #[case::comma("Launch, Week")]
    #[case::quote("The \"Launch\" Week")]
    #[case::newline("Launch\nWeek")]
    #[case::everything("A \"big\", launch\r\nweek")]
    fn awkward_fields_round_trip(#[case] topic_name: &str) {
        let csv = entries_to_csv(&[entry(topic_name, Some("gamer#1234"))]);
        let rows = parse_csv(&csv);
        assert_eq!(rows.len(), 2);
        let data = rows.get(1).expect("data row");
        assert_eq!(data.first().map(String::as_str), Some(topic_name));
        assert_eq!(data.get(5).map(String::as_str), Some("a@x.com"));
    }

    #[test]
    fn output_is_deterministic() {
        let entries = vec![entry("Launch Week", Some("gamer#1234")), entry("Genesis", None)];
        assert_eq!(entries_to_csv(&entries), entries_to_csv(&entries));
    }
}
