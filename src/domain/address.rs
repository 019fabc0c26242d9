//! Street splitting and first-name handling for gateway address blocks.

use crate::error::{PaymentError, Result};

/// How the first name of an address is rendered in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstNamePolicy {
    Initials,
    FullName,
}

impl FirstNamePolicy {
    pub fn render(&self, first_name: &str) -> String {
        match self {
            Self::Initials => initials(first_name),
            Self::FullName => first_name.trim().to_string(),
        }
    }
}

/// First character of the first name, uppercased. Empty for an empty name.
pub fn initials(first_name: &str) -> String {
    first_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_default()
}

/// Splits a free-text street into `(street_name, house_number)`.
///
/// The house number is the last token containing a digit, together with any
/// digit-free additions after it (`"12 a"`, `"12 III"`). Numbers earlier in
/// the line belong to the street name (`"Straße des 17. Juni 100"`). A number
/// glued to a word (`"Hauptstr.12"`) is split off at its first digit. For
/// leading-number notation (`"12 Main Street"`) the first token is the number.
/// Without any digits the house number is empty.
pub fn split_street(street: &str) -> Result<(String, String)> {
    let street = street.trim();
    if street.is_empty() {
        return Err(PaymentError::Parse("street is empty".to_string()));
    }

    let tokens: Vec<&str> = street.split_whitespace().collect();
    let Some(pos) = tokens
        .iter()
        .rposition(|t| t.chars().any(|c| c.is_ascii_digit()))
    else {
        return Ok((tokens.join(" "), String::new()));
    };

    let token = tokens[pos];
    if let Some(idx) = token.find(|c: char| c.is_ascii_digit())
        && idx > 0
    {
        let (word, number) = token.split_at(idx);
        let mut name = tokens[..pos].to_vec();
        name.push(word);
        let mut house = vec![number];
        house.extend_from_slice(&tokens[pos + 1..]);
        return Ok((name.join(" "), house.join(" ")));
    }

    if pos > 0 {
        return Ok((tokens[..pos].join(" "), tokens[pos..].join(" ")));
    }

    if tokens.len() > 1 {
        return Ok((tokens[1..].join(" "), tokens[0].to_string()));
    }

    Ok((tokens.join(" "), String::new()))
}
