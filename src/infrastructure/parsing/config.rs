//! Parsing configuration for HTML extraction
//!
//! Centralized configuration for CSS selectors and normalization defaults.
//! Every field takes a list of selectors tried in order.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Base URL for resolving relative links
    pub base_url: String,

    /// Region assumed for phone numbers without a country code
    pub default_phone_region: String,

    /// Landing page selectors
    pub homepage_selectors: HomepageSelectors,

    /// Profile page selectors
    pub profile_selectors: ProfileSelectors,

    /// Contact info page selectors
    pub contact_info_selectors: ContactInfoSelectors,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        use crate::infrastructure::config::defaults;
        Self {
            base_url: defaults::BASE_URL.to_string(),
            default_phone_region: defaults::PHONE_REGION.to_string(),
            homepage_selectors: HomepageSelectors::default(),
            profile_selectors: ProfileSelectors::default(),
            contact_info_selectors: ContactInfoSelectors::default(),
        }
    }
}

fn selectors(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// CSS selectors for the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageSelectors {
    pub name: Vec<String>,
    pub available_connects: Vec<String>,
    pub hours_per_week: Vec<String>,
    pub specialization: Vec<String>,
    /// Every node matched is one category label
    pub categories: Vec<String>,
    pub profile_completeness: Vec<String>,
}

impl Default for HomepageSelectors {
    fn default() -> Self {
        Self {
            name: selectors(&[r#"a[class="profile-title"]"#, "a.profile-title"]),
            available_connects: selectors(&[r#"section[data-test="sidebar-available-connects"] > a"#]),
            hours_per_week: selectors(&[
                r#"div[data-test="freelancer-sidebar-availability"] > div:nth-child(2) > span > span"#,
            ]),
            specialization: selectors(&["div.text-center > p"]),
            categories: selectors(&[r#"section[data-test="sidebar-categories"] > div:nth-child(2) > *"#]),
            profile_completeness: selectors(&[
                "div.profile-completeness-nudges-tiles-alternative > div > div > small",
            ]),
        }
    }
}

/// CSS selectors for the profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSelectors {
    pub city: Vec<String>,
    pub state: Vec<String>,
    pub country: Vec<String>,
    /// Image element; the URL is read from its `src` attribute
    pub picture: Vec<String>,
    /// Combined "title | employer" heading
    pub job_title: Vec<String>,
    pub specialization: Vec<String>,
    pub hourly_rate: Vec<String>,
    pub hours_per_week: Vec<String>,
    pub language: Vec<String>,
    pub proficiency: Vec<String>,
    pub military_status: Vec<String>,
    pub university: Vec<String>,
    pub degree: Vec<String>,
    pub university_years: Vec<String>,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            city: selectors(&[r#"span[itemprop="locality"]"#]),
            state: selectors(&[r#"span[itemprop="state-name"]"#]),
            country: selectors(&[r#"span[itemprop="country-name"]"#]),
            picture: selectors(&["div.up-presence-container > img.up-avatar"]),
            job_title: selectors(&[
                r#"section.up-card-section > div > ul > li > div > div > h4[role="presentation"]"#,
            ]),
            specialization: selectors(&["section.up-card-section > div > div > div > h2"]),
            hourly_rate: selectors(&[r#"h3[role="presentation"] > span"#]),
            hours_per_week: selectors(&["section.up-card-section > div.mt-30 > div:nth-child(2) > span"]),
            language: selectors(&["ul.list-unstyled > li > div > strong"]),
            proficiency: selectors(&["ul.list-unstyled > li > div > span"]),
            military_status: selectors(&[
                "section.up-card-section > div.mt-30 > div > div > span > strong",
            ]),
            university: selectors(&[r#"ul.list-unstyled > li > div > h5[role="presentation"]"#]),
            degree: selectors(&["ul.list-unstyled > li > div > div"]),
            university_years: selectors(&["ul.list-unstyled > li > div > div.text-muted"]),
        }
    }
}

/// CSS selectors for the contact info page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfoSelectors {
    pub full_name: Vec<String>,
    pub street_address: Vec<String>,
    pub secondary_address: Vec<String>,
    pub postal_code: Vec<String>,
    pub phone: Vec<String>,
    pub email: Vec<String>,
}

impl Default for ContactInfoSelectors {
    fn default() -> Self {
        Self {
            full_name: selectors(&[r#"div[data-test="userName"]"#]),
            street_address: selectors(&[r#"span[data-test="addressStreet"]"#]),
            secondary_address: selectors(&[r#"span[data-test="addressStreet2"]"#]),
            postal_code: selectors(&[r#"span[data-test="addressZip"]"#]),
            phone: selectors(&[r#"div[data-test="phone"]"#]),
            email: selectors(&[r#"div[data-test="userEmail"]"#]),
        }
    }
}
