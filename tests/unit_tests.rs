// Unit tests for Mentor Match

use mentor_match::core::{
    matching::{count_expertise_matches, specialization_serves, terms_overlap},
    scoring::{calculate_match_score, score_breakdown},
};
use mentor_match::models::{
    Availability, AvailabilityStatus, Industry, Mentee, MenteeStatus, Mentor, Need, Ratings,
    ScoringWeights, Specialization, Startup,
};

fn baseline_startup() -> Startup {
    Startup {
        id: "startup".to_string(),
        name: "Test Startup".to_string(),
        industry: None,
        tags: vec![],
        looking_for: vec![],
        is_active: true,
        ..Default::default()
    }
}

fn baseline_mentor() -> Mentor {
    Mentor {
        id: "mentor".to_string(),
        industries: vec![],
        expertise: vec![],
        specializations: vec![],
        availability: None,
        ratings: None,
        mentees: None,
        is_active: true,
        ..Default::default()
    }
}

fn score(startup: &Startup, mentor: &Mentor) -> u8 {
    calculate_match_score(startup, mentor, &ScoringWeights::default())
}

#[test]
fn test_zero_baseline() {
    assert_eq!(score(&baseline_startup(), &baseline_mentor()), 0);
}

#[test]
fn test_industry_only_match_scores_thirty() {
    let startup = Startup {
        industry: Some(Industry::Technology),
        ..baseline_startup()
    };
    let mentor = Mentor {
        industries: vec![Industry::Technology],
        ..baseline_mentor()
    };

    assert_eq!(score(&startup, &mentor), 30);
}

#[test]
fn test_availability_tiers_are_independent() {
    let startup = baseline_startup();

    let tiers = [
        (Some(AvailabilityStatus::Available), 10),
        (Some(AvailabilityStatus::Busy), 3),
        (Some(AvailabilityStatus::Unavailable), 0),
        (None, 0),
    ];

    for (status, expected) in tiers {
        let mentor = Mentor {
            availability: Some(Availability {
                status,
                hours_per_week: Some(5.0),
            }),
            ..baseline_mentor()
        };
        assert_eq!(score(&startup, &mentor), expected, "status {:?}", status);
    }
}

#[test]
fn test_rating_linearity() {
    let startup = baseline_startup();

    for (average, expected) in [(2.5, 5), (5.0, 10), (1.0, 2)] {
        let mentor = Mentor {
            ratings: Some(Ratings {
                average: Some(average),
                count: Some(4),
            }),
            ..baseline_mentor()
        };
        assert_eq!(score(&startup, &mentor), expected, "average {}", average);
    }
}

fn mentor_with(statuses: &[MenteeStatus]) -> Mentor {
    Mentor {
        mentees: Some(
            statuses
                .iter()
                .map(|status| Mentee {
                    startup: Some("s".to_string()),
                    status: Some(*status),
                })
                .collect(),
        ),
        ..baseline_mentor()
    }
}

#[test]
fn test_capacity_cliff() {
    let startup = baseline_startup();
    assert_eq!(score(&startup, &mentor_with(&[MenteeStatus::Active; 2])), 5);
    assert_eq!(score(&startup, &mentor_with(&[MenteeStatus::Active; 3])), 0);
    assert_eq!(
        score(
            &startup,
            &mentor_with(&[
                MenteeStatus::Completed,
                MenteeStatus::Paused,
                MenteeStatus::Completed,
                MenteeStatus::Paused,
            ])
        ),
        5
    );
}

#[test]
fn test_example_scenario_scores_86() {
    let startup = Startup {
        industry: Some(Industry::Agriculture),
        tags: vec!["AI".to_string(), "IoT".to_string()],
        looking_for: vec![Need::Funding],
        ..baseline_startup()
    };
    let mentor = Mentor {
        industries: vec![Industry::Agriculture],
        expertise: vec!["AI Strategy".to_string()],
        specializations: vec![Specialization::Fundraising],
        availability: Some(Availability {
            status: Some(AvailabilityStatus::Available),
            hours_per_week: None,
        }),
        ratings: Some(Ratings {
            average: Some(4.0),
            count: None,
        }),
        mentees: Some(vec![]),
        ..baseline_mentor()
    };

    let breakdown = score_breakdown(&startup, &mentor, &ScoringWeights::default());
    assert_eq!(breakdown.total(), 85.5);
    assert_eq!(score(&startup, &mentor), 86);
}

#[test]
fn test_score_bounded_for_maximal_pair() {
    let startup = Startup {
        industry: Some(Industry::SaaS),
        tags: vec!["growth".to_string()],
        looking_for: vec![Need::Customers],
        ..baseline_startup()
    };
    let mentor = Mentor {
        industries: Industry::ALL.to_vec(),
        expertise: vec!["growth".to_string(), "growth marketing".to_string()],
        specializations: Specialization::ALL.to_vec(),
        availability: Some(Availability {
            status: Some(AvailabilityStatus::Available),
            hours_per_week: Some(40.0),
        }),
        ratings: Some(Ratings {
            average: Some(5.0),
            count: Some(100),
        }),
        mentees: Some(vec![]),
        ..baseline_mentor()
    };

    assert_eq!(score(&startup, &mentor), 100);
}

#[test]
fn test_substring_heuristics() {
    assert!(terms_overlap("fintech", "FinTech Payments"));
    assert!(terms_overlap("AI", "Cocktail"));
    assert_eq!(
        count_expertise_matches(&["Cloud".to_string()], &["cloud-native".to_string(), "saas".to_string()]),
        1
    );
    assert!(specialization_serves(Specialization::HR, Need::Talent));
    assert!(!specialization_serves(Specialization::Sales, Need::Funding));
}

/// Straightforward rendition of the scoring formula, summed signal by signal
fn reference_score(
    industry: bool,
    (matched_tags, tags): (usize, usize),
    (served_needs, needs): (usize, usize),
    availability: f64,
    average: f64,
    capacity: bool,
) -> u8 {
    let mut score: f64 = 0.0;
    if industry {
        score += 30.0;
    }
    score += (matched_tags as f64 / tags.max(1) as f64 * 25.0).min(25.0);
    score += (served_needs as f64 / needs.max(1) as f64 * 20.0).min(20.0);
    score += availability;
    score += average / 5.0 * 10.0;
    if capacity {
        score += 5.0;
    }
    score.min(100.0).round() as u8
}

#[test]
fn test_score_sweep_matches_formula_and_is_bounded() {
    const NEEDS: [Need; 6] = [
        Need::Funding,
        Need::Customers,
        Need::Talent,
        Need::Partnerships,
        Need::CoFounder,
        Need::Mentor,
    ];
    // Each serves exactly the need at the same position
    const SERVING: [Specialization; 4] = [
        Specialization::Fundraising,
        Specialization::Marketing,
        Specialization::HR,
        Specialization::BusinessStrategy,
    ];
    let availability = [
        (Some(AvailabilityStatus::Available), 10.0),
        (Some(AvailabilityStatus::Busy), 3.0),
        (Some(AvailabilityStatus::Unavailable), 0.0),
    ];

    let labels: Vec<String> = (0..12).map(|i| format!("t{:02}x", i)).collect();
    let mut mismatches = Vec::new();
    let mut checked = 0usize;

    for tags in 0..=12 {
        for matched_tags in 0..=tags {
            for needs in 0..=NEEDS.len() {
                for served_needs in 0..=needs.min(SERVING.len()) {
                    for industry in [false, true] {
                        let startup = Startup {
                            industry: Some(Industry::Technology),
                            tags: labels[..tags].to_vec(),
                            looking_for: NEEDS[..needs].to_vec(),
                            ..baseline_startup()
                        };
                        let base = Mentor {
                            industries: if industry { vec![Industry::Technology] } else { vec![] },
                            expertise: labels[..matched_tags].to_vec(),
                            specializations: SERVING[..served_needs].to_vec(),
                            ..baseline_mentor()
                        };

                        for (status, points) in availability {
                            for tenths in 0..=50 {
                                let average = tenths as f64 / 10.0;
                                for capacity in [false, true] {
                                    let active = if capacity { 0 } else { 3 };
                                    let mentor = Mentor {
                                        industries: base.industries.clone(),
                                        expertise: base.expertise.clone(),
                                        specializations: base.specializations.clone(),
                                        availability: Some(Availability {
                                            status,
                                            hours_per_week: None,
                                        }),
                                        ratings: Some(Ratings {
                                            average: Some(average),
                                            count: Some(1),
                                        }),
                                        mentees: mentor_with(&vec![MenteeStatus::Active; active]).mentees,
                                        ..baseline_mentor()
                                    };

                                    let got = score(&startup, &mentor);
                                    let want = reference_score(
                                        industry,
                                        (matched_tags, tags),
                                        (served_needs, needs),
                                        points,
                                        average,
                                        capacity,
                                    );

                                    assert!(got <= 100);
                                    if got != want {
                                        mismatches.push((tags, matched_tags, needs, served_needs, average, got, want));
                                    }
                                    checked += 1;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    assert!(checked > 1_000_000);
    assert!(mismatches.is_empty(), "{} mismatches, first: {:?}", mismatches.len(), mismatches.first());
}
