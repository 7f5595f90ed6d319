use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A label that does not belong to one of the closed enumerations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label: {label:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

/// Declares a closed enumeration whose wire form is a fixed display label.
///
/// Parsing is exact: a value outside the table is rejected with
/// [`UnknownLabel`] instead of being mapped to a fallback variant.
macro_rules! labeled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel {
                        kind: stringify!($name),
                        label: other.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labeled_enum! {
    /// Industry a startup operates in, or a mentor serves
    Industry {
        Technology => "Technology",
        Healthcare => "Healthcare",
        Education => "Education",
        Finance => "Finance",
        Agriculture => "Agriculture",
        ECommerce => "E-Commerce",
        SaaS => "SaaS",
        AiMl => "AI/ML",
        IoT => "IoT",
        CleanTech => "CleanTech",
        FoodTech => "FoodTech",
        SocialImpact => "Social Impact",
        Other => "Other",
    }
}

labeled_enum! {
    /// What a startup is currently looking for
    Need {
        CoFounder => "Co-Founder",
        Mentor => "Mentor",
        Funding => "Funding",
        Talent => "Talent",
        Partnerships => "Partnerships",
        Customers => "Customers",
    }
}

labeled_enum! {
    /// Area a mentor specializes in
    Specialization {
        BusinessStrategy => "Business Strategy",
        ProductDevelopment => "Product Development",
        Marketing => "Marketing",
        Sales => "Sales",
        Fundraising => "Fundraising",
        Technology => "Technology",
        Operations => "Operations",
        Legal => "Legal",
        Finance => "Finance",
        HR => "HR",
        Design => "Design",
        GrowthHacking => "Growth Hacking",
    }
}

labeled_enum! {
    AvailabilityStatus {
        Available => "available",
        Busy => "busy",
        Unavailable => "unavailable",
    }
}

labeled_enum! {
    MenteeStatus {
        Active => "active",
        Completed => "completed",
        Paused => "paused",
    }
}

labeled_enum! {
    /// Admin approval state of a startup or mentor listing
    ApprovalStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Suspended => "suspended",
    }
}

/// Treats an explicit `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_true() -> bool { true }

/// Read-only startup snapshot as supplied by the directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Startup {
    #[serde(alias = "_id", alias = "$id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub industry: Option<Industry>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(rename = "lookingFor", default, deserialize_with = "nullable")]
    pub looking_for: Vec<Need>,
    #[serde(default)]
    pub status: Option<ApprovalStatus>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

impl Startup {
    /// Whether this startup belongs in a mentor's candidate pool
    pub fn is_listed(&self) -> bool {
        self.is_active && self.status == Some(ApprovalStatus::Approved)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub status: Option<AvailabilityStatus>,
    #[serde(rename = "hoursPerWeek", default)]
    pub hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// One mentorship relationship held by a mentor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mentee {
    #[serde(default)]
    pub startup: Option<String>,
    #[serde(default)]
    pub status: Option<MenteeStatus>,
}

/// Read-only mentor snapshot as supplied by the directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    #[serde(alias = "_id", alias = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub industries: Vec<Industry>,
    #[serde(default, deserialize_with = "nullable")]
    pub expertise: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub specializations: Vec<Specialization>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub ratings: Option<Ratings>,
    /// `None` when the directory did not report mentorships at all
    #[serde(default)]
    pub mentees: Option<Vec<Mentee>>,
    #[serde(default)]
    pub status: Option<ApprovalStatus>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

impl Mentor {
    /// Whether this mentor belongs in a startup's candidate pool
    pub fn is_listed(&self) -> bool {
        self.is_active && self.status == Some(ApprovalStatus::Approved)
    }

    pub fn availability_status(&self) -> Option<AvailabilityStatus> {
        self.availability.as_ref().and_then(|a| a.status)
    }

    pub fn rating_average(&self) -> Option<f64> {
        self.ratings.as_ref().and_then(|r| r.average)
    }

    /// Number of mentorships currently marked active, if mentorships are known
    pub fn active_mentees(&self) -> Option<usize> {
        self.mentees.as_ref().map(|mentees| {
            mentees
                .iter()
                .filter(|m| m.status == Some(MenteeStatus::Active))
                .count()
        })
    }
}

/// A ranked candidate and its compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch<T> {
    pub candidate: T,
    pub score: u8,
}

/// Points awarded by each signal of the compatibility score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub industry: f64,
    pub expertise: f64,
    pub specialization: f64,
    pub available: f64,
    pub busy: f64,
    pub rating: f64,
    pub capacity: f64,
    /// Active mentees at which the capacity bonus is withdrawn
    pub capacity_threshold: usize,
}

impl ScoringWeights {
    /// Highest raw total these weights can produce
    pub fn max_total(&self) -> f64 {
        self.industry
            + self.expertise
            + self.specialization
            + self.available.max(self.busy)
            + self.rating
            + self.capacity
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            industry: 30.0,
            expertise: 25.0,
            specialization: 20.0,
            available: 10.0,
            busy: 3.0,
            rating: 10.0,
            capacity: 5.0,
            capacity_threshold: 3,
        }
    }
}
