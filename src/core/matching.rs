use crate::models::{Need, Specialization};

/// Case-insensitive substring test in either direction
///
/// This is a lexical heuristic: "AI" matches "Cocktail". It differs from a
/// raw `contains` on the stored strings in two ways: surrounding whitespace
/// is trimmed first (" ai" overlaps "ai strategy"), and blank terms never
/// match, where an empty stored tag would otherwise overlap every term.
#[inline]
pub fn terms_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Count mentor expertise terms that overlap at least one startup tag
pub fn count_expertise_matches(expertise: &[String], tags: &[String]) -> usize {
    expertise
        .iter()
        .filter(|skill| tags.iter().any(|tag| terms_overlap(skill, tag)))
        .count()
}

/// The need a specialization directly serves, if any
#[inline]
pub fn mapped_need(specialization: Specialization) -> Option<Need> {
    match specialization {
        Specialization::Fundraising => Some(Need::Funding),
        Specialization::Marketing => Some(Need::Customers),
        Specialization::HR => Some(Need::Talent),
        Specialization::BusinessStrategy => Some(Need::Partnerships),
        _ => None,
    }
}

/// Whether a specialization addresses a need
///
/// Either the fixed map pairs them, or the specialization label contains the
/// need label (case-insensitive).
#[inline]
pub fn specialization_serves(specialization: Specialization, need: Need) -> bool {
    if mapped_need(specialization) == Some(need) {
        return true;
    }
    specialization
        .as_str()
        .to_lowercase()
        .contains(&need.as_str().to_lowercase())
}

/// Count specializations that serve at least one of the startup's needs
pub fn count_specialization_matches(specializations: &[Specialization], needs: &[Need]) -> usize {
    specializations
        .iter()
        .filter(|spec| needs.iter().any(|need| specialization_serves(**spec, *need)))
        .count()
}
