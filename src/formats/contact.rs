// src/formats/contact.rs
//! Address, phone, fax and email checks.

use email_address::EmailAddress;
use phonenumber::metadata::DATABASE;
use phonenumber::{country, Mode, PhoneNumber};

use crate::model::DetailedSchool;

pub const MISSING_STREET: &str = "Missing street name";
pub const MISSING_HOUSE_NUMBER: &str = "Missing house number";
pub const MISSING_POSTCODE: &str = "Missing postcode";
pub const MISSING_CITY: &str = "Missing city";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const INVALID_FAX: &str = "Invalid fax number";
pub const MISSING_EMAIL: &str = "Missing email";
pub const INVALID_EMAIL: &str = "Invalid email";

pub const PROBLEM_SEP: &str = " / ";
pub const PHONE_PREFIX: &str = "Telefon: ";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactReport {
    pub problems: Vec<&'static str>,
    pub phone_display: Option<String>,
}

impl ContactReport {
    pub fn joined(&self) -> String {
        self.problems.join(PROBLEM_SEP)
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn parse_german(raw: &str) -> Option<PhoneNumber> {
    phonenumber::parse(Some(country::Id::DE), raw).ok()
}

/// Valid according to the German dialing plan.
pub fn is_valid_german_phone(raw: &str) -> bool {
    parse_german(raw).is_some_and(|n| phonenumber::is_valid(&n))
}

/// Length check against the numbering plan of the number's country,
/// counting local-only lengths as possible. Without a region the number must
/// carry its country code, so national-format strings are never possible.
pub fn is_possible_phone(raw: &str) -> bool {
    let Ok(number) = phonenumber::parse(None, raw) else {
        return false;
    };
    let Some(plans) = DATABASE.by_code(&number.code().value()) else {
        return false;
    };
    let Some(plan) = plans
        .iter()
        .find(|m| m.is_main_country_for_code())
        .or_else(|| plans.first())
    else {
        return false;
    };

    let general = plan.descriptors().general();
    let Ok(len) = u16::try_from(number.national().to_string().len()) else {
        return false;
    };
    general.possible_length().contains(&len) || general.possible_local_length().contains(&len)
}

pub fn format_international(raw: &str) -> Option<String> {
    parse_german(raw)
        .map(|n| n.format().mode(Mode::International).to_string())
        .filter(|s| !s.is_empty())
}

pub fn is_valid_email(raw: &str) -> bool {
    EmailAddress::is_valid(raw)
}

pub fn validate(school: &DetailedSchool) -> ContactReport {
    let mut problems = Vec::new();

    if school.street.is_none() {
        problems.push(MISSING_STREET);
    }
    if school.house_number.is_none() {
        problems.push(MISSING_HOUSE_NUMBER);
    }
    if school.postcode.is_none() {
        problems.push(MISSING_POSTCODE);
    }
    if school.city.is_none() {
        problems.push(MISSING_CITY);
    }

    let phone = non_empty(&school.phone);
    let phone_invalid = phone.is_some_and(|p| !is_valid_german_phone(p));
    if phone_invalid {
        problems.push(INVALID_PHONE);
    }

    if non_empty(&school.fax).is_some_and(|f| !is_possible_phone(f)) {
        problems.push(INVALID_FAX);
    }

    match school.email.as_deref() {
        None => problems.push(MISSING_EMAIL),
        Some(email) if !is_valid_email(email) => problems.push(INVALID_EMAIL),
        Some(_) => {}
    }

    let phone_display = phone.map(|p| {
        if phone_invalid {
            format!("{PHONE_PREFIX}{p}")
        } else {
            let formatted = format_international(p).unwrap_or_else(|| p.to_string());
            format!("{PHONE_PREFIX}{formatted}")
        }
    });

    ContactReport { problems, phone_display }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> DetailedSchool {
        DetailedSchool {
            name: "Schule".into(),
            street: Some("Hauptstraße".into()),
            house_number: Some("1".into()),
            postcode: Some("70173".into()),
            city: Some("Stuttgart".into()),
            email: Some("poststelle@schule.de".into()),
            ..Default::default()
        }
    }

    #[test]
    fn complete_record_has_no_problems() {
        let report = validate(&complete());
        assert!(report.problems.is_empty());
        assert_eq!(report.joined(), "");
        assert_eq!(report.phone_display, None);
    }

    #[test]
    fn empty_phone_is_skipped() {
        let school = DetailedSchool { phone: Some(String::new()), ..complete() };
        let report = validate(&school);
        assert!(report.problems.is_empty());
        assert_eq!(report.phone_display, None);
    }

    #[test]
    fn empty_email_is_invalid_not_missing() {
        let school = DetailedSchool { email: Some(String::new()), ..complete() };
        assert_eq!(validate(&school).problems, vec![INVALID_EMAIL]);
    }

    #[test]
    fn malformed_email() {
        let school = DetailedSchool { email: Some("poststelle(at)schule.de".into()), ..complete() };
        assert_eq!(validate(&school).problems, vec![INVALID_EMAIL]);
    }

    #[test]
    fn national_fax_is_not_possible_without_region() {
        assert!(!is_possible_phone("0711 1234568"));
        assert!(is_possible_phone("+49 711 1234568"));
        assert!(!is_possible_phone("fax"));
    }

    #[test]
    fn possible_lengths_follow_the_country() {
        assert!(!is_possible_phone("+1 12345"));
        assert!(is_possible_phone("+1 202 555 0143"));
        assert!(!is_possible_phone("+49 12"));
    }

    #[test]
    fn all_address_parts_missing_in_order() {
        let school = DetailedSchool {
            name: "X".into(),
            email: Some("a@b.de".into()),
            ..Default::default()
        };
        assert_eq!(
            validate(&school).joined(),
            "Missing street name / Missing house number / Missing postcode / Missing city"
        );
    }
}
