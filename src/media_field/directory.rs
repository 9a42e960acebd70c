//! Upload directory templates.
//!
//! `{userid}` and `{username}` expand to the given user; any other `{...}` token is a
//! PHP-style date format rendered at `now`.

use chrono::{Datelike, NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(.*?)\}").unwrap();
}

/// The user a template is expanded for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub id: u64,
    pub username: String,
}

impl UserContext {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Expands every placeholder in `template`.
pub fn translate_directory(template: &str, user: &UserContext, now: NaiveDateTime) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "userid" => user.id.to_string(),
            "username" => user.username.clone(),
            format => php_date(format, now),
        })
        .into_owned()
}

/// Renders the subset of PHP `date()` format characters used in directory templates.
pub fn php_date(format: &str, now: NaiveDateTime) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            'Y' => out.push_str(&now.year().to_string()),
            'y' => out.push_str(&format!("{:02}", now.year().rem_euclid(100))),
            'm' => out.push_str(&format!("{:02}", now.month())),
            'n' => out.push_str(&now.month().to_string()),
            'M' => out.push_str(&now.format("%b").to_string()),
            'F' => out.push_str(&now.format("%B").to_string()),
            'd' => out.push_str(&format!("{:02}", now.day())),
            'j' => out.push_str(&now.day().to_string()),
            'D' => out.push_str(&now.format("%a").to_string()),
            'l' => out.push_str(&now.format("%A").to_string()),
            'N' => out.push_str(&now.weekday().number_from_monday().to_string()),
            'w' => out.push_str(&now.weekday().num_days_from_sunday().to_string()),
            'H' => out.push_str(&format!("{:02}", now.hour())),
            'G' => out.push_str(&now.hour().to_string()),
            'h' => out.push_str(&format!("{:02}", now.hour12().1)),
            'g' => out.push_str(&now.hour12().1.to_string()),
            'i' => out.push_str(&format!("{:02}", now.minute())),
            's' => out.push_str(&format!("{:02}", now.second())),
            'a' => out.push_str(if now.hour12().0 { "pm" } else { "am" }),
            'A' => out.push_str(if now.hour12().0 { "PM" } else { "AM" }),
            'U' => out.push_str(&now.and_utc().timestamp().to_string()),
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn user_tokens_expand() {
        let user = UserContext::new(42, "ada");
        let now = at(2024, 3, 7, 9, 5, 0);
        assert_eq!(
            translate_directory("users/{userid}/{username}", &user, now),
            "users/42/ada"
        );
    }

    #[test]
    fn other_tokens_are_date_formats() {
        let user = UserContext::new(1, "x");
        let now = at(2024, 3, 7, 21, 5, 9);
        assert_eq!(
            translate_directory("images/{Y}/{m}/{d}", &user, now),
            "images/2024/03/07"
        );
        assert_eq!(translate_directory("{Y-m}", &user, now), "2024-03");
        assert_eq!(php_date("H:i:s", now), "21:05:09");
        assert_eq!(php_date("g A", now), "9 PM");
        assert_eq!(php_date("D, j M y", now), "Thu, 7 Mar 24");
        assert_eq!(php_date("l F", now), "Thursday March");
        assert_eq!(php_date("N w", now), "4 4");
    }

    #[test]
    fn backslash_escapes_format_characters() {
        let now = at(2024, 3, 7, 0, 0, 0);
        assert_eq!(php_date(r"\Y\e\a\r Y", now), "Year 2024");
    }

    #[test]
    fn templates_without_tokens_are_unchanged() {
        let user = UserContext::new(1, "x");
        assert_eq!(
            translate_directory("images/banners", &user, at(2024, 1, 1, 0, 0, 0)),
            "images/banners"
        );
    }

    #[test]
    fn unix_timestamp_renders() {
        assert_eq!(php_date("U", at(1970, 1, 2, 0, 0, 0)), "86400");
    }
}
