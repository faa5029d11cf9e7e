//! Country name to ISO 3166-1 alpha-2 lookup
//!
//! Codes and official names come from the ISO 3166-1 registry in
//! `rust_iso3166`. Common and colloquial names that differ from the official
//! ones, plus user-assigned codes such as Kosovo's, are kept here as aliases.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::NormalizationError;

/// Names as they appear on profiles, keyed by `lookup_key`
const ALIASES: &[(&str, &str)] = &[
    ("united states", "US"),
    ("united states of america", "US"),
    ("america", "US"),
    ("u s", "US"),
    ("u s a", "US"),
    ("united kingdom", "GB"),
    ("great britain", "GB"),
    ("britain", "GB"),
    ("england", "GB"),
    ("scotland", "GB"),
    ("wales", "GB"),
    ("northern ireland", "GB"),
    ("uk", "GB"),
    ("u k", "GB"),
    ("russia", "RU"),
    ("russian federation", "RU"),
    ("korea", "KR"),
    ("south korea", "KR"),
    ("republic of korea", "KR"),
    ("korea republic of", "KR"),
    ("north korea", "KP"),
    ("democratic peoples republic of korea", "KP"),
    ("vietnam", "VN"),
    ("viet nam", "VN"),
    ("czechia", "CZ"),
    ("czech republic", "CZ"),
    ("turkey", "TR"),
    ("turkiye", "TR"),
    ("netherlands", "NL"),
    ("holland", "NL"),
    ("ivory coast", "CI"),
    ("cote d ivoire", "CI"),
    ("cabo verde", "CV"),
    ("cape verde", "CV"),
    ("eswatini", "SZ"),
    ("swaziland", "SZ"),
    ("myanmar", "MM"),
    ("burma", "MM"),
    ("timor leste", "TL"),
    ("east timor", "TL"),
    ("holy see", "VA"),
    ("vatican city", "VA"),
    ("vatican", "VA"),
    ("north macedonia", "MK"),
    ("macedonia", "MK"),
    ("congo", "CG"),
    ("republic of the congo", "CG"),
    ("congo brazzaville", "CG"),
    ("democratic republic of the congo", "CD"),
    ("congo kinshasa", "CD"),
    ("dr congo", "CD"),
    ("drc", "CD"),
    ("laos", "LA"),
    ("lao peoples democratic republic", "LA"),
    ("iran", "IR"),
    ("iran islamic republic of", "IR"),
    ("syria", "SY"),
    ("syrian arab republic", "SY"),
    ("moldova", "MD"),
    ("moldova republic of", "MD"),
    ("tanzania", "TZ"),
    ("tanzania united republic of", "TZ"),
    ("bolivia", "BO"),
    ("bolivia plurinational state of", "BO"),
    ("venezuela", "VE"),
    ("venezuela bolivarian republic of", "VE"),
    ("micronesia", "FM"),
    ("micronesia federated states of", "FM"),
    ("palestine", "PS"),
    ("palestine state of", "PS"),
    ("palestinian territories", "PS"),
    ("taiwan", "TW"),
    ("taiwan province of china", "TW"),
    ("hong kong", "HK"),
    ("hong kong sar", "HK"),
    ("macao", "MO"),
    ("macau", "MO"),
    ("uae", "AE"),
    ("emirates", "AE"),
    ("brunei", "BN"),
    ("bahamas the", "BS"),
    ("gambia the", "GM"),
    ("saint lucia", "LC"),
    ("st lucia", "LC"),
    ("saint kitts and nevis", "KN"),
    ("st kitts and nevis", "KN"),
    ("saint vincent and the grenadines", "VC"),
    ("st vincent and the grenadines", "VC"),
    ("saint martin", "MF"),
    ("sint maarten", "SX"),
    ("british virgin islands", "VG"),
    ("us virgin islands", "VI"),
    ("united states virgin islands", "VI"),
    ("falkland islands", "FK"),
    ("falkland islands malvinas", "FK"),
    ("bonaire", "BQ"),
    ("kosovo", "XK"),
    ("republic of kosovo", "XK"),
];

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,'’()\-/]").expect("punctuation pattern compiles"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Official name with any ", ..." or " (...)" qualifier dropped
fn base_name(name: &str) -> &str {
    name.split(['(', ',']).next().unwrap_or(name)
}

static LOOKUP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let registry = rust_iso3166::ALL;
    let mut lookup = HashMap::with_capacity(registry.len() * 4 + ALIASES.len());
    for entry in registry {
        lookup.insert(lookup_key(entry.name), entry.alpha2);
        lookup.insert(entry.alpha2.to_lowercase(), entry.alpha2);
        lookup.insert(entry.alpha3.to_lowercase(), entry.alpha2);
    }

    // "Bolivia (Plurinational State of)" is also found as "Bolivia", unless
    // two entries share the base ("Korea, Republic of" and "Korea, Democratic ...")
    let mut bases: HashMap<String, Option<&'static str>> = HashMap::new();
    for entry in registry {
        bases
            .entry(lookup_key(base_name(entry.name)))
            .and_modify(|code| {
                if *code != Some(entry.alpha2) {
                    *code = None;
                }
            })
            .or_insert(Some(entry.alpha2));
    }
    for (base, code) in bases {
        if let Some(code) = code {
            lookup.entry(base).or_insert(code);
        }
    }

    for &(alias, alpha2) in ALIASES {
        lookup.insert(lookup_key(alias), alpha2);
    }
    lookup
});

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn lookup_key(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .map(fold_diacritic)
        .collect();
    let stripped = PUNCTUATION.replace_all(&lowered, " ");
    let collapsed = WHITESPACE.replace_all(stripped.trim(), " ");
    collapsed
        .strip_prefix("the ")
        .unwrap_or(&*collapsed)
        .to_string()
}

/// Map a free-text country name (or an alpha-2/alpha-3 code) to its alpha-2 code
pub fn country_to_iso2(name: &str) -> Result<String, NormalizationError> {
    let key = lookup_key(name);
    LOOKUP
        .get(&key)
        .map(|code| (*code).to_string())
        .ok_or_else(|| NormalizationError::unknown_country(name))
}
