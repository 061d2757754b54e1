use std::sync::LazyLock;

use regex::Regex;

use super::page::ParsedPage;
use crate::domain::extraction::Heuristics;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[a-z0-9][a-z0-9._%+-]*@[a-z0-9.-]+\.[a-z]{2,}").unwrap());

// Mobile numbers first (trunk/country prefix + 3xx code + 7-digit subscriber),
// then landlines (prefix + 2-3 digit area code + 6-8 digit subscriber).
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:\+92|0092|0)[\s-]?3\d{2}[\s-]?\d{7}\b
        |
        (?:\+92|0)[\s-]?\d{2,3}[\s-]?\d{6,8}\b",
    )
    .unwrap()
});

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:address|location|campus)\s*[:\-–—|]\s*([^\r\n]{10,100})").unwrap()
});

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:,\d{3})*(?:\.\d+)?\s*(?:acres|kanals|sq\.?\s?ft|square\s+feet|hectares)\b")
        .unwrap()
});

const EMAIL_KEYWORDS: [&str; 3] = ["info", "admission", "contact"];

pub const CITIES: [&str; 20] = [
    "Karachi",
    "Lahore",
    "Islamabad",
    "Rawalpindi",
    "Faisalabad",
    "Multan",
    "Peshawar",
    "Quetta",
    "Hyderabad",
    "Gujranwala",
    "Sialkot",
    "Bahawalpur",
    "Sargodha",
    "Abbottabad",
    "Sukkur",
    "Larkana",
    "Sheikhupura",
    "Jhelum",
    "Mardan",
    "Gujrat",
];

pub const DISCIPLINES: [&str; 24] = [
    "Computer Science",
    "Software Engineering",
    "Information Technology",
    "Electrical Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Chemical Engineering",
    "Business Administration",
    "Commerce",
    "Economics",
    "Accounting and Finance",
    "Medicine",
    "Dentistry",
    "Pharmacy",
    "Nursing",
    "Law",
    "Psychology",
    "Sociology",
    "Mass Communication",
    "English",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Agriculture",
];

static DISCIPLINE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DISCIPLINES
        .iter()
        .map(|name| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))).unwrap())
        .collect()
});

pub fn extract_heuristics(page: &ParsedPage) -> Heuristics {
    let body_text = page.body_text();

    let (mut address, mut city) = extract_address_and_city(&body_text);
    if city.is_empty() {
        if let Some((footer_address, footer_city)) = city_from_footer(&page.footer_text()) {
            address = footer_address;
            city = footer_city;
        }
    }

    Heuristics {
        email: extract_email(&body_text),
        phone: extract_phone(&body_text),
        address,
        city,
        disciplines: extract_disciplines(&body_text),
        size: extract_size(&body_text),
    }
}

/// First email containing one of the contact-ish keywords, otherwise the
/// first raw match.
pub fn extract_email(text: &str) -> String {
    let matches: Vec<&str> = EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect();

    matches
        .iter()
        .find(|email| {
            let lowered = email.to_lowercase();
            EMAIL_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        })
        .or_else(|| matches.first())
        .map(|email| email.to_string())
        .unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Stage A of address resolution: a labelled span after Address/Location/
/// Campus, plus whichever known city appears inside it.
pub fn extract_address_and_city(text: &str) -> (String, String) {
    let Some(captures) = ADDRESS_RE.captures(text) else {
        return (String::new(), String::new());
    };

    let address = captures
        .get(1)
        .map(|span| span.as_str().trim().to_string())
        .unwrap_or_default();

    let lowered = address.to_lowercase();
    let city = CITIES
        .iter()
        .find(|city| lowered.contains(&city.to_lowercase()))
        .map(|city| city.to_string())
        .unwrap_or_default();

    (address, city)
}

/// Stage B: the known city mentioned earliest in the footer text, with a
/// window of up to 50 chars before and 100 after standing in for the address.
/// Ties on position go to list order.
pub fn city_from_footer(footer_text: &str) -> Option<(String, String)> {
    let chars: Vec<char> = footer_text.chars().collect();
    let lowered: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();

    let mut earliest: Option<(usize, usize, &str)> = None;
    for city in CITIES {
        let needle: Vec<char> = city.chars().map(|c| c.to_ascii_lowercase()).collect();
        let Some(char_pos) = lowered
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
        else {
            continue;
        };

        match earliest {
            Some((best_pos, ..)) if best_pos <= char_pos => {}
            _ => earliest = Some((char_pos, needle.len(), city)),
        }
    }

    let (char_pos, needle_len, city) = earliest?;
    let start = char_pos.saturating_sub(50);
    let end = (char_pos + needle_len + 100).min(chars.len());

    let window: String = chars[start..end].iter().collect();
    let address = window.split_whitespace().collect::<Vec<_>>().join(" ");
    Some((address, city.to_string()))
}

/// Every vocabulary entry found in the text, in vocabulary order.
pub fn extract_disciplines(text: &str) -> Vec<String> {
    DISCIPLINES
        .iter()
        .zip(DISCIPLINE_RES.iter())
        .filter(|(_, re)| re.is_match(text))
        .map(|(name, _)| name.to_string())
        .collect()
}

pub fn extract_size(text: &str) -> String {
    SIZE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_prefers_contact_keywords_over_position() {
        let text = "Reach webmaster@foo.edu or Contact: info@foo.edu or admissions@foo.edu";
        assert_eq!(extract_email(text), "info@foo.edu");
    }

    #[test]
    fn email_falls_back_to_first_raw_match() {
        let text = "Written by jane.doe@uni.edu.pk and john@uni.edu.pk";
        assert_eq!(extract_email(text), "jane.doe@uni.edu.pk");
    }

    #[test]
    fn email_empty_when_no_match() {
        assert_eq!(extract_email("no emails here"), "");
    }

    #[test]
    fn phone_matches_mobile_and_landline_forms() {
        assert_eq!(extract_phone("Call 0300-1234567 today"), "0300-1234567");
        assert_eq!(extract_phone("UAN 042-35880007"), "042-35880007");
        assert_eq!(extract_phone("Dial +92 321 9876543"), "+92 321 9876543");
    }

    #[test]
    fn phone_takes_first_match_in_document_order() {
        let text = "Lahore office 042-35880007, Karachi office 021-34567890";
        assert_eq!(extract_phone(text), "042-35880007");
    }

    #[test]
    fn labelled_address_and_contained_city_are_captured() {
        let (address, city) =
            extract_address_and_city("Address: 123 Mall Road, Lahore, Punjab and more text");
        assert!(address.starts_with("123 Mall Road, Lahore"));
        assert_eq!(city, "Lahore");
    }

    #[test]
    fn labelled_address_without_known_city_leaves_city_empty() {
        let (address, city) = extract_address_and_city("Location: 45 College Avenue, Hunza Valley");
        assert!(!address.is_empty());
        assert_eq!(city, "");
    }

    #[test]
    fn footer_scan_builds_address_window_around_city() {
        let footer = "Copyright 2024   The University,   Sector H-12,   Islamabad,   Pakistan";
        let (address, city) = city_from_footer(footer).unwrap();
        assert_eq!(city, "Islamabad");
        assert!(address.contains("Sector H-12, Islamabad, Pakistan"));
        // internal whitespace collapsed
        assert!(!address.contains("  "));
    }

    #[test]
    fn footer_scan_picks_earliest_city_by_text_position() {
        let footer = "Main campus in Gujrat, liaison office in Karachi";
        let (address, city) = city_from_footer(footer).unwrap();

        assert_eq!(city, "Gujrat");
        assert!(address.starts_with("Main campus in Gujrat"));
    }

    #[test]
    fn page_without_footer_or_city_resolves_empty_without_raising() {
        let page = ParsedPage::parse("<body><p>About our faculty</p></body>", "", None);
        let heuristics = extract_heuristics(&page);
        assert_eq!(heuristics.address, "");
        assert_eq!(heuristics.city, "");
    }

    #[test]
    fn disciplines_come_back_in_vocabulary_order() {
        let text = "We offer Medicine, Computer Science and Business Administration degrees";
        let first = extract_disciplines(text);
        let second = extract_disciplines(text);

        assert_eq!(
            first,
            vec!["Computer Science", "Business Administration", "Medicine"]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn discipline_matching_requires_word_boundaries() {
        assert!(extract_disciplines("study Lawnmowing here").is_empty());
    }

    #[test]
    fn size_returns_exactly_number_and_unit() {
        assert_eq!(
            extract_size("The campus is spread over 100 acres of land"),
            "100 acres"
        );
        assert_eq!(extract_size("covers 1,200.5 kanals in total"), "1,200.5 kanals");
        assert_eq!(extract_size("a 25,000 sq ft library"), "25,000 sq ft");
    }

    #[test]
    fn size_empty_when_no_unit_follows() {
        assert_eq!(extract_size("over 100 students enrolled"), "");
    }
}
