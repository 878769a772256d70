//! Review types - enums, resource list, validated submissions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{optional_text, required_text};
use super::ValidationError;

/// Maximum length for review titles
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length for author names (reviews and comments)
pub const MAX_AUTHOR_LEN: usize = 100;

/// Maximum length for the study period and experience descriptors
pub const MAX_DESCRIPTOR_LEN: usize = 50;

/// Delimiter used when persisting the resource list
pub const RESOURCE_DELIMITER: char = ',';

/// Exam outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PassStatus {
    #[default]
    Pass,
    Fail,
}

impl PassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

impl FromStr for PassStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pass" => Ok(Self::Pass),
            "Fail" => Ok(Self::Fail),
            other => Err(ValidationError::InvalidVariant {
                field: "pass_status",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for PassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported English proficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnglishLevel {
    High,
    Medium,
    Low,
}

impl EnglishLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl FromStr for EnglishLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(ValidationError::InvalidVariant {
                field: "english_level",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for EnglishLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of study resources, stored as one comma-joined column.
///
/// Names never contain the delimiter: `new` rejects them, so
/// `parse(join(list)) == list` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceList(Vec<String>);

impl ResourceList {
    /// Validate a list of resource names.
    pub fn new<I, S>(names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ValidationError::Empty { field: "resource" });
            }
            if name.contains(RESOURCE_DELIMITER) {
                return Err(ValidationError::InvalidFormat {
                    field: "resource",
                    reason: "must not contain a comma",
                });
            }
            out.push(name.to_owned());
        }
        Ok(Self(out))
    }

    /// Rebuild the list from its stored form. Empty string is the empty list.
    pub fn parse(stored: &str) -> Self {
        if stored.is_empty() {
            return Self::default();
        }
        Self(stored.split(RESOURCE_DELIMITER).map(str::to_owned).collect())
    }

    /// Serialize for storage.
    pub fn join(&self) -> String {
        self.0.join(&RESOURCE_DELIMITER.to_string())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Review submission as received over the wire (or from an import file)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewSubmission {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub pass_status: Option<String>,
    #[serde(default)]
    pub exam_date: Option<String>,
    #[serde(default)]
    pub study_period: Option<String>,
    #[serde(default)]
    pub study_period_months: Option<i64>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub english_level: Option<String>,
    #[serde(default)]
    pub is_working: bool,
    #[serde(default)]
    pub resources: Vec<String>,
    pub content: String,
    #[serde(default)]
    pub center_tips: Option<String>,
}

/// Validated review, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub title: String,
    pub author: String,
    pub pass_status: PassStatus,
    pub exam_date: Option<String>,
    pub study_period: Option<String>,
    pub study_period_months: Option<i64>,
    pub experience: Option<String>,
    pub english_level: Option<EnglishLevel>,
    pub is_working: bool,
    pub resources: ResourceList,
    pub content: String,
    pub center_tips: Option<String>,
}

impl NewReview {
    /// Review with only the required fields; everything else takes its default.
    pub fn new(title: &str, author: &str, content: &str) -> Result<Self, ValidationError> {
        Self::try_from(ReviewSubmission {
            title: title.to_owned(),
            author: author.to_owned(),
            content: content.to_owned(),
            ..Default::default()
        })
    }
}

impl TryFrom<ReviewSubmission> for NewReview {
    type Error = ValidationError;

    fn try_from(s: ReviewSubmission) -> Result<Self, Self::Error> {
        let pass_status = match s.pass_status.as_deref().map(str::trim) {
            None | Some("") => PassStatus::default(),
            Some(v) => v.parse::<PassStatus>()?,
        };
        let english_level = match s.english_level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(v.parse::<EnglishLevel>()?),
        };
        if let Some(months) = s.study_period_months {
            if months < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "study_period_months",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }

        Ok(Self {
            title: required_text("title", &s.title, Some(MAX_TITLE_LEN))?,
            author: required_text("author", &s.author, Some(MAX_AUTHOR_LEN))?,
            pass_status,
            exam_date: optional_text("exam_date", s.exam_date, None)?,
            study_period: optional_text("study_period", s.study_period, Some(MAX_DESCRIPTOR_LEN))?,
            study_period_months: s.study_period_months,
            experience: optional_text("experience", s.experience, Some(MAX_DESCRIPTOR_LEN))?,
            english_level,
            is_working: s.is_working,
            resources: ResourceList::new(&s.resources)?,
            content: required_text("content", &s.content, None)?,
            center_tips: optional_text("center_tips", s.center_tips, None)?,
        })
    }
}
