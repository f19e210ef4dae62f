//! Team member model matching the frontend TeamMember interface.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Primary role a member fills on the worship team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    #[serde(rename = "Worship Leader")]
    WorshipLeader,
    #[serde(rename = "Lead Vocalist")]
    LeadVocalist,
    #[serde(rename = "Backup Vocals")]
    BackupVocals,
    #[serde(rename = "Acoustic Guitar")]
    AcousticGuitar,
    #[serde(rename = "Electric Guitar")]
    ElectricGuitar,
    #[serde(rename = "Bass Guitar")]
    BassGuitar,
    #[serde(rename = "Drums")]
    Drums,
    #[serde(rename = "Keys/Piano")]
    KeysPiano,
    #[serde(rename = "Sound Tech")]
    SoundTech,
    #[serde(rename = "Media/Visuals")]
    MediaVisuals,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::WorshipLeader => "Worship Leader",
            Role::LeadVocalist => "Lead Vocalist",
            Role::BackupVocals => "Backup Vocals",
            Role::AcousticGuitar => "Acoustic Guitar",
            Role::ElectricGuitar => "Electric Guitar",
            Role::BassGuitar => "Bass Guitar",
            Role::Drums => "Drums",
            Role::KeysPiano => "Keys/Piano",
            Role::SoundTech => "Sound Tech",
            Role::MediaVisuals => "Media/Visuals",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Worship Leader" => Some(Role::WorshipLeader),
            "Lead Vocalist" => Some(Role::LeadVocalist),
            "Backup Vocals" => Some(Role::BackupVocals),
            "Acoustic Guitar" => Some(Role::AcousticGuitar),
            "Electric Guitar" => Some(Role::ElectricGuitar),
            "Bass Guitar" => Some(Role::BassGuitar),
            "Drums" => Some(Role::Drums),
            "Keys/Piano" => Some(Role::KeysPiano),
            "Sound Tech" => Some(Role::SoundTech),
            "Media/Visuals" => Some(Role::MediaVisuals),
            _ => None,
        }
    }

    /// Instrumentalist roles, counted as "musicians" in the team stats.
    pub fn is_musician(&self) -> bool {
        matches!(
            self,
            Role::AcousticGuitar
                | Role::ElectricGuitar
                | Role::BassGuitar
                | Role::Drums
                | Role::KeysPiano
        )
    }

    /// Sound and media roles, counted as "tech team" in the team stats.
    pub fn is_tech(&self) -> bool {
        matches!(self, Role::SoundTech | Role::MediaVisuals)
    }
}

/// Instrument or skill a member can cover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Instrument {
    #[serde(rename = "Vocals")]
    Vocals,
    #[serde(rename = "Acoustic Guitar")]
    AcousticGuitar,
    #[serde(rename = "Electric Guitar")]
    ElectricGuitar,
    #[serde(rename = "Bass Guitar")]
    BassGuitar,
    #[serde(rename = "Drums")]
    Drums,
    #[serde(rename = "Keys")]
    Keys,
    #[serde(rename = "Piano")]
    Piano,
    #[serde(rename = "Violin")]
    Violin,
    #[serde(rename = "Saxophone")]
    Saxophone,
    #[serde(rename = "Trumpet")]
    Trumpet,
}

/// Whether a member is currently serving. A plain field, not a soft delete.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(MemberStatus::Active),
            "inactive" => Some(MemberStatus::Inactive),
            _ => None,
        }
    }
}

/// A worship team member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub instruments: BTreeSet<Instrument>,
    pub availability: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub status: MemberStatus,
}

/// The submitted form fields for the add and edit dialogs.
///
/// `role` stays unset until the user picks one; the add flow refuses to
/// submit without it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub instruments: BTreeSet<Instrument>,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub status: MemberStatus,
}

impl MemberForm {
    /// Pre-fill the form from an existing record, as the edit dialog does.
    pub fn from_member(member: &TeamMember) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            role: Some(member.role),
            instruments: member.instruments.clone(),
            availability: member.availability.clone(),
            notes: member.notes.clone(),
            birthday: member.birthday,
            status: member.status,
        }
    }
}

/// Headline counts shown above the team grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub active_members: usize,
    pub vocalists: usize,
    pub musicians: usize,
    pub tech_team: usize,
}
