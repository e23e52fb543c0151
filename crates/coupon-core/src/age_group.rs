// ── Age-group entry editor ──
//
// Transient add/cancel/save state for one pending age range. The editor
// never owns the committed ranges: `commit` pushes into the caller's
// vector in place.

use strum::IntoStaticStr;
use tracing::debug;

use crate::model::AgeGroup;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AgeField {
    StartAge,
    EndAge,
}

/// A partially filled age range. Values are signed so that negative
/// input can be reported instead of silently rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingAgeGroup {
    pub start_age: Option<i64>,
    pub end_age: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    Editing {
        pending: PendingAgeGroup,
        errors: FieldErrors<AgeField>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AgeGroupEditor {
    state: EditorState,
}

impl AgeGroupEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    pub fn pending(&self) -> Option<&PendingAgeGroup> {
        match &self.state {
            EditorState::Editing { pending, .. } => Some(pending),
            EditorState::Idle => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors<AgeField>> {
        match &self.state {
            EditorState::Editing { errors, .. } => Some(errors),
            EditorState::Idle => None,
        }
    }

    /// Start a fresh entry, discarding whatever was pending.
    pub fn begin(&mut self) {
        self.state = EditorState::Editing {
            pending: PendingAgeGroup::default(),
            errors: FieldErrors::new(),
        };
    }

    /// Update one field of the pending entry. Ignored while idle.
    pub fn input(&mut self, field: AgeField, value: Option<i64>) {
        let EditorState::Editing { pending, .. } = &mut self.state else {
            debug!(?field, "age group input ignored while idle");
            return;
        };
        match field {
            AgeField::StartAge => pending.start_age = value,
            AgeField::EndAge => pending.end_age = value,
        }
    }

    /// Drop the pending entry without touching any committed ranges.
    pub fn cancel(&mut self) {
        self.state = EditorState::Idle;
    }

    /// Validate the pending entry and append it to `groups`.
    ///
    /// On success the editor returns to idle and the committed range is
    /// returned. On failure the editor stays in editing with its field
    /// errors populated and `groups` is untouched. Committing while idle
    /// does nothing and yields `Ok(None)`.
    pub fn commit(
        &mut self,
        groups: &mut Vec<AgeGroup>,
    ) -> Result<Option<AgeGroup>, FieldErrors<AgeField>> {
        let EditorState::Editing { pending, errors } = &mut self.state else {
            return Ok(None);
        };
        match validate(pending) {
            Ok(group) => {
                groups.push(group);
                self.state = EditorState::Idle;
                Ok(Some(group))
            }
            Err(found) => {
                errors.clone_from(&found);
                Err(found)
            }
        }
    }
}

/// Check every rule and collect all violations.
fn validate(pending: &PendingAgeGroup) -> Result<AgeGroup, FieldErrors<AgeField>> {
    let mut errors = FieldErrors::new();
    let start = check_age(pending.start_age, AgeField::StartAge, "Start", &mut errors);
    let end = check_age(pending.end_age, AgeField::EndAge, "End", &mut errors);

    if let (Some(start_age), Some(end_age)) = (start, end) {
        if end_age < start_age {
            errors.insert(AgeField::EndAge, "End age cannot be smaller than start age");
        } else {
            return Ok(AgeGroup { start_age, end_age });
        }
    }
    Err(errors)
}

fn check_age(
    value: Option<i64>,
    field: AgeField,
    label: &str,
    errors: &mut FieldErrors<AgeField>,
) -> Option<u32> {
    match value {
        None => {
            errors.insert(field, format!("{label} age cannot be empty"));
            None
        }
        Some(v) if v < 0 => {
            errors.insert(field, format!("{label} age cannot be negative"));
            None
        }
        Some(v) => {
            let age = u32::try_from(v).ok();
            if age.is_none() {
                errors.insert(field, format!("{label} age is too large"));
            }
            age
        }
    }
}
