//! The roster store: an in-memory team collection kept in step with a
//! persistent member table.
//!
//! Create and Delete mutate local state optimistically and roll back if the
//! remote call fails; Update goes remote-first and only commits locally on
//! success, so a failed edit never shows half-applied data. The store also
//! owns the two authoring flows (add and edit), each with its own form state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Instrument, MemberForm, MemberStatus, RosterStats, TeamMember};

/// The four operations the roster store needs from its persistence backend.
///
/// Implementations must treat `delete` of an absent id as a no-op.
#[async_trait]
pub trait MemberTable: Send + Sync {
    async fn select_all(&self) -> Result<Vec<TeamMember>, AppError>;
    async fn insert(&self, member: &TeamMember) -> Result<(), AppError>;
    async fn update(&self, member: &TeamMember) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// A reversible local mutation. Applying one returns its inverse, so a
/// failed remote call rolls back by applying whatever `apply` handed back
/// instead of each operation re-deriving its own undo.
#[derive(Debug, Clone)]
enum LocalChange {
    Insert(TeamMember),
    Remove(String),
    Replace(TeamMember),
}

impl LocalChange {
    fn apply(self, members: &mut Vec<TeamMember>) -> Option<LocalChange> {
        match self {
            LocalChange::Insert(member) => {
                let id = member.id.clone();
                members.push(member);
                Some(LocalChange::Remove(id))
            }
            LocalChange::Remove(id) => {
                let pos = members.iter().position(|m| m.id == id)?;
                Some(LocalChange::Insert(members.remove(pos)))
            }
            LocalChange::Replace(next) => {
                let slot = members.iter_mut().find(|m| m.id == next.id)?;
                Some(LocalChange::Replace(std::mem::replace(slot, next)))
            }
        }
    }
}

/// State of the add-member dialog.
#[derive(Debug, Clone, Default)]
pub struct AddFlow {
    pub open: bool,
    pub form: MemberForm,
}

/// State of the edit-member dialog: the record being edited plus the
/// pending form. Kept separate from the add flow so the two dialogs can
/// never contaminate each other's fields.
#[derive(Debug, Clone)]
pub struct EditFlow {
    pub member: TeamMember,
    pub form: MemberForm,
}

pub struct RosterStore {
    table: Arc<dyn MemberTable>,
    members: Vec<TeamMember>,
    add: AddFlow,
    edit: Option<EditFlow>,
}

impl RosterStore {
    pub fn new(table: Arc<dyn MemberTable>) -> Self {
        Self {
            table,
            members: Vec::new(),
            add: AddFlow::default(),
            edit: None,
        }
    }

    /// Replace local state wholesale from the member table.
    ///
    /// A fetch failure is logged and leaves local state as it was; there is
    /// no retry.
    pub async fn load(&mut self) {
        match self.table.select_all().await {
            Ok(members) => {
                tracing::info!("Loaded {} team members", members.len());
                self.members = members;
            }
            Err(e) => {
                tracing::error!("Failed to load team members: {}", e);
            }
        }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn add_flow(&self) -> &AddFlow {
        &self.add
    }

    pub fn edit_flow(&self) -> Option<&EditFlow> {
        self.edit.as_ref()
    }

    pub fn open_add(&mut self) {
        self.add.open = true;
    }

    pub fn cancel_add(&mut self) {
        self.add = AddFlow::default();
    }

    /// Seed the edit flow from an existing record.
    pub fn open_edit(&mut self, id: &str) -> Result<(), AppError> {
        let member = self
            .member(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;
        let form = MemberForm::from_member(&member);
        self.edit = Some(EditFlow { member, form });
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Submit the add dialog: append the new record optimistically, then
    /// persist it. On failure the optimistic insert is rolled back and the
    /// dialog keeps the submitted form so nothing the user typed is lost.
    pub async fn submit_add(&mut self, form: MemberForm) -> Result<TeamMember, AppError> {
        self.add.open = true;
        self.add.form = form.clone();

        if form.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        let role = form
            .role
            .ok_or_else(|| AppError::Validation("A primary role is required".to_string()))?;

        let member = TeamMember {
            id: uuid::Uuid::new_v4().to_string(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            role,
            instruments: form.instruments,
            availability: form.availability,
            notes: form.notes,
            birthday: form.birthday,
            status: form.status,
        };

        let inverse = LocalChange::Insert(member.clone()).apply(&mut self.members);

        if let Err(e) = self.table.insert(&member).await {
            tracing::error!("Failed to insert member {}: {}", member.id, e);
            if let Some(inverse) = inverse {
                inverse.apply(&mut self.members);
            }
            return Err(e);
        }

        self.add = AddFlow::default();
        Ok(member)
    }

    /// Submit the edit dialog: persist the merged record first, and only
    /// replace local state once the remote update succeeded. On failure both
    /// the collection and the edit flow are left untouched, so the old data
    /// stays on screen and the pending edit survives.
    pub async fn submit_edit(&mut self, form: MemberForm) -> Result<TeamMember, AppError> {
        let flow = self
            .edit
            .as_mut()
            .ok_or_else(|| AppError::Validation("No member is being edited".to_string()))?;
        flow.form = form.clone();

        let existing = &flow.member;
        let updated = TeamMember {
            id: existing.id.clone(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            role: form.role.unwrap_or(existing.role),
            instruments: form.instruments,
            availability: form.availability,
            notes: form.notes,
            birthday: form.birthday,
            status: form.status,
        };

        if let Err(e) = self.table.update(&updated).await {
            tracing::error!("Failed to update member {}: {}", updated.id, e);
            return Err(e);
        }

        LocalChange::Replace(updated.clone()).apply(&mut self.members);
        self.edit = None;
        Ok(updated)
    }

    /// Remove a member: drop the record optimistically, then delete it
    /// remotely. On failure the record is restored, so the two stores never
    /// silently diverge. Removing an id absent from both sides is a no-op.
    pub async fn remove(&mut self, id: &str) -> Result<(), AppError> {
        let inverse = LocalChange::Remove(id.to_string()).apply(&mut self.members);

        if let Err(e) = self.table.delete(id).await {
            tracing::error!("Failed to delete member {}: {}", id, e);
            if let Some(inverse) = inverse {
                inverse.apply(&mut self.members);
            }
            return Err(e);
        }

        Ok(())
    }

    /// Headline counts for the team page.
    pub fn stats(&self) -> RosterStats {
        let active: Vec<&TeamMember> = self
            .members
            .iter()
            .filter(|m| m.status == MemberStatus::Active)
            .collect();

        RosterStats {
            active_members: active.len(),
            vocalists: active
                .iter()
                .filter(|m| m.instruments.contains(&Instrument::Vocals))
                .count(),
            musicians: active.iter().filter(|m| m.role.is_musician()).count(),
            tech_team: active.iter().filter(|m| m.role.is_tech()).count(),
        }
    }
}
