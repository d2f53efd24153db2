use serde::{Deserialize, Serialize};

/// Letter grades as stored on result records. "F" is the only failing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Grade {
    O,
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    P,
    F,
}

impl Grade {
    pub(crate) fn is_fail(self) -> bool {
        matches!(self, Grade::F)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::P => "P",
            Grade::F => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum RegistrationStatus {
    #[serde(rename = "Registered")]
    Registered,
    #[serde(rename = "Not Registered")]
    NotRegistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ExamType {
    Midsem,
    Endsem,
    Classtest,
}

impl ExamType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ExamType::Midsem => "midsem",
            ExamType::Endsem => "endsem",
            ExamType::Classtest => "classtest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Stored representation: 1 for present, 0 for absent.
    pub(crate) fn count(self) -> i32 {
        match self {
            AttendanceStatus::Present => 1,
            AttendanceStatus::Absent => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum UserRole {
    Student,
    Professor,
    Admin,
}

impl UserRole {
    /// Table holding the role-specific profile record for this role.
    pub(crate) fn detail_table(self) -> &'static str {
        match self {
            UserRole::Student => "students",
            UserRole::Professor => "professors",
            UserRole::Admin => "admins",
        }
    }
}
