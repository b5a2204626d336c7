use serde::{Deserialize, Serialize};

use crate::record::model::CookieRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Cookies per category, in order of first occurrence.
pub fn cookie_category_counts(cookies: &[CookieRecord]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for cookie in cookies {
        match counts.iter_mut().find(|c| c.category == cookie.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: cookie.category.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Before-consent tallies recomputed from the cookie list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentCounts {
    pub set_before_consent: u64,
    pub non_essential_before_consent: u64,
}

pub fn consent_counts(cookies: &[CookieRecord]) -> ConsentCounts {
    ConsentCounts {
        set_before_consent: cookies.iter().filter(|c| c.set_before_consent).count() as u64,
        non_essential_before_consent: cookies.iter().filter(|c| c.is_consent_violation()).count()
            as u64,
    }
}

/// Display icon for a cookie category; unknown categories share one.
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "essential" => "🔒",
        "analytics" => "📊",
        "advertising" => "📢",
        _ => "📦",
    }
}
