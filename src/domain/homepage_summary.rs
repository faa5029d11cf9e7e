use serde::{Deserialize, Serialize};

use super::constants::SENTINEL;

/// Landing page summary, persisted on its own and never merged into the user record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageSummary {
    pub name: String,
    pub specialization: String,
    pub available_connects: String,
    pub hours_per_week: String,
    pub categories: Vec<String>,
    pub profile_completeness: String,
}

impl HomepageSummary {
    /// Replace empty string fields with the sentinel. Categories are left alone.
    pub fn fill_empty_fields(&mut self) -> usize {
        let mut filled = 0;
        for field in [
            &mut self.name,
            &mut self.specialization,
            &mut self.available_connects,
            &mut self.hours_per_week,
            &mut self.profile_completeness,
        ] {
            if field.is_empty() {
                *field = SENTINEL.to_string();
                filled += 1;
            }
        }
        filled
    }
}
