//! Permit application categories/types and project priority.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Top-level permit family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationCategory {
    /// Sertifikat Laik Fungsi (function-worthiness certificate).
    Slf,
    /// Persetujuan Bangunan Gedung (building approval).
    Pbg,
}

impl ApplicationCategory {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "SLF" => Ok(Self::Slf),
            "PBG" => Ok(Self::Pbg),
            _ => Err(CoreError::Validation(format!(
                "Invalid application category '{s}'. Must be one of: SLF, PBG"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slf => "SLF",
            Self::Pbg => "PBG",
        }
    }

    /// Application types belonging to this category.
    pub fn types(self) -> &'static [ApplicationType] {
        match self {
            Self::Slf => &[
                ApplicationType::SlfBaru,
                ApplicationType::SlfPerpanjangan,
                ApplicationType::SlfPerubahan,
            ],
            Self::Pbg => &[ApplicationType::PbgBaru, ApplicationType::PbgPerubahan],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    /// New SLF.
    SlfBaru,
    /// SLF renewal.
    SlfPerpanjangan,
    /// SLF amendment.
    SlfPerubahan,
    /// New PBG.
    PbgBaru,
    /// PBG amendment.
    PbgPerubahan,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 5] = [
        Self::SlfBaru,
        Self::SlfPerpanjangan,
        Self::SlfPerubahan,
        Self::PbgBaru,
        Self::PbgPerubahan,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid application type '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlfBaru => "SLF_BARU",
            Self::SlfPerpanjangan => "SLF_PERPANJANGAN",
            Self::SlfPerubahan => "SLF_PERUBAHAN",
            Self::PbgBaru => "PBG_BARU",
            Self::PbgPerubahan => "PBG_PERUBAHAN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SlfBaru => "SLF Baru",
            Self::SlfPerpanjangan => "SLF Perpanjangan",
            Self::SlfPerubahan => "SLF Perubahan",
            Self::PbgBaru => "PBG Baru",
            Self::PbgPerubahan => "PBG Perubahan",
        }
    }

    pub fn category(self) -> ApplicationCategory {
        match self {
            Self::SlfBaru | Self::SlfPerpanjangan | Self::SlfPerubahan => ApplicationCategory::Slf,
            Self::PbgBaru | Self::PbgPerubahan => ApplicationCategory::Pbg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(CoreError::Validation(format!(
                "Invalid priority '{s}'. Must be one of: low, medium, high, urgent"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_belong_to_their_category() {
        for category in [ApplicationCategory::Slf, ApplicationCategory::Pbg] {
            for t in category.types() {
                assert_eq!(t.category(), category);
            }
        }
        assert_eq!(
            ApplicationCategory::Slf.types().len() + ApplicationCategory::Pbg.types().len(),
            ApplicationType::ALL.len()
        );
    }

    #[test]
    fn application_type_parsing() {
        assert_eq!(
            ApplicationType::from_str_db("SLF_BARU").unwrap(),
            ApplicationType::SlfBaru
        );
        let err = ApplicationType::from_str_db("SLF").unwrap_err();
        assert!(err.to_string().contains("PBG_PERUBAHAN"));
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(Priority::from_str_db("critical").is_err());
    }
}
