//! HR-contact cell parsing.
//!
//! The cell is either a formula joining `HYPERLINK("url","name")` parts with
//! `& CHAR(10) &`, or plain text naming a single contact.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::HrContact;

fn separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*&\s*CHAR\(10\)\s*&\s*").expect("valid separator regex"))
}

fn hyperlink() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^HYPERLINK\("([^"]+)"\s*,\s*"([^"]+)"\)"#).expect("valid hyperlink regex")
    })
}

/// Parses a raw HR-contact cell. Formulas must start with `=`.
pub fn parse_hr_contacts(raw: &str) -> Vec<HrContact> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let Some(formula) = raw.strip_prefix('=') else {
        return vec![HrContact {
            name: raw.to_string(),
            url: String::new(),
        }];
    };

    separator()
        .split(formula)
        .filter_map(|part| {
            let part = part.trim();
            if let Some(caps) = hyperlink().captures(part) {
                return Some(HrContact {
                    name: caps[2].to_string(),
                    url: caps[1].to_string(),
                });
            }
            let text = part.trim_matches('"').trim();
            (!text.is_empty()).then(|| HrContact {
                name: text.to_string(),
                url: String::new(),
            })
        })
        .collect()
}
