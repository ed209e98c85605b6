use super::parse_quantity;
use crate::domain::{FieldError, ScrapField, ScrapSubmission, ScrapType};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// How the most recent submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("invalid submit state transition: {from:?} -> {to:?}")]
    InvalidTransition { from: SubmitState, to: SubmitState },
}

pub type FormResult<T> = Result<T, FormError>;

/// Draft state and submission lifecycle of the scrap pricing form.
///
/// Validation runs on submit. Once a submit has been attempted, every edit
/// re-validates the edited field so messages clear as the user fixes them.
/// At most one submission can be in flight: `begin_submit` refuses while
/// the form is `Submitting`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapForm {
    draft: ScrapSubmission,
    state: SubmitState,
    errors: BTreeMap<ScrapField, String>,
    submit_error: Option<String>,
    submit_count: u32,
    last_outcome: Option<SubmitOutcome>,
}

impl Default for ScrapForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrapForm {
    pub fn new() -> Self {
        Self {
            draft: ScrapSubmission::default(),
            state: SubmitState::Idle,
            errors: BTreeMap::new(),
            submit_error: None,
            submit_count: 0,
            last_outcome: None,
        }
    }

    pub fn draft(&self) -> &ScrapSubmission {
        &self.draft
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != ScrapSubmission::default()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome
    }

    pub fn field_error(&self, field: ScrapField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.errors
            .iter()
            .map(|(field, message)| FieldError {
                field: *field,
                message: message.clone(),
            })
            .collect()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn set_seller_name(&mut self, value: impl Into<String>) {
        self.draft.seller_name = value.into();
        self.revalidate(ScrapField::SellerName);
    }

    pub fn set_scrap_type(&mut self, value: ScrapType) {
        self.draft.scrap_type = value;
        self.revalidate(ScrapField::ScrapType);
    }

    pub fn set_quantity(&mut self, value: f64) {
        self.draft.quantity = value;
        self.revalidate(ScrapField::Quantity);
    }

    /// Stores raw quantity input, coercing anything non-numeric to zero.
    pub fn set_quantity_input(&mut self, raw: &str) {
        self.set_quantity(parse_quantity(raw));
    }

    pub fn set_location(&mut self, value: impl Into<String>) {
        self.draft.location = value.into();
        self.revalidate(ScrapField::Location);
    }

    /// Validates the draft and, when it passes, moves to `Submitting` and
    /// returns the exact draft to send. Returns `Ok(None)` when validation
    /// failed; the offending fields then carry messages.
    pub fn begin_submit(&mut self) -> FormResult<Option<ScrapSubmission>> {
        if self.state == SubmitState::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.transition(SubmitState::Validating)?;
        self.submit_count = self.submit_count.saturating_add(1);
        self.submit_error = None;

        self.errors.clear();
        if let Err(errors) = self.draft.validate() {
            for error in errors {
                self.errors.insert(error.field, error.message);
            }
            self.transition(SubmitState::Idle)?;
            return Ok(None);
        }

        self.transition(SubmitState::Submitting)?;
        Ok(Some(self.draft.clone()))
    }

    /// Finishes an in-flight submission successfully and resets the draft.
    pub fn complete_success(&mut self) -> FormResult<()> {
        self.transition(SubmitState::Succeeded)?;
        self.draft = ScrapSubmission::default();
        self.errors.clear();
        self.submit_error = None;
        self.submit_count = 0;
        self.last_outcome = Some(SubmitOutcome::Succeeded);
        self.transition(SubmitState::Idle)
    }

    /// Finishes an in-flight submission with an error. The draft is kept
    /// so the user can retry.
    pub fn complete_failure(&mut self, message: impl Into<String>) -> FormResult<()> {
        self.transition(SubmitState::Failed)?;
        self.submit_error = Some(message.into());
        self.last_outcome = Some(SubmitOutcome::Failed);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn revalidate(&mut self, field: ScrapField) {
        if self.submit_count == 0 {
            return;
        }
        match self.draft.validate_field(field) {
            Some(error) => {
                self.errors.insert(field, error.message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn transition(&mut self, next: SubmitState) -> FormResult<()> {
        let current = self.state;
        let allowed = matches!(
            (current, next),
            (SubmitState::Idle, SubmitState::Validating)
                | (SubmitState::Failed, SubmitState::Validating)
                | (SubmitState::Validating, SubmitState::Idle)
                | (SubmitState::Validating, SubmitState::Submitting)
                | (SubmitState::Submitting, SubmitState::Succeeded)
                | (SubmitState::Submitting, SubmitState::Failed)
                | (SubmitState::Succeeded, SubmitState::Idle)
        );
        if !allowed {
            return Err(FormError::InvalidTransition {
                from: current,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
