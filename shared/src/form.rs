//! Validation gate shared by every form-like input.
//!
//! Raw request fields are wrapped in a [`ValidatedInput`]. The wrapped value can
//! only be turned into a domain model after [`ValidatedInput::validate`] has run
//! and succeeded; any other order is a bug in the caller and is reported as a
//! [`FormError`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Per-field error messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form result used before validate() was called")]
    NotValidated,
    #[error("form result used although validation failed: {0:?}")]
    Invalid(FieldErrors),
}

/// A raw form that knows which model it produces once its rules have passed.
pub trait FormInput: Validate {
    type Model;

    /// Builds the model from field values that have already been validated.
    fn into_model(self) -> Self::Model;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Validation {
    #[default]
    NotRun,
    Failed(FieldErrors),
    Passed,
}

#[derive(Debug, Clone)]
pub struct ValidatedInput<F> {
    input: F,
    state: Validation,
}

impl<F: FormInput> ValidatedInput<F> {
    pub fn new(input: F) -> Self {
        Self {
            input,
            state: Validation::NotRun,
        }
    }

    /// Runs the field rules and records the outcome.
    pub fn validate(&mut self) -> bool {
        self.state = match self.input.validate() {
            Ok(()) => Validation::Passed,
            Err(errors) => Validation::Failed(collect_messages(&errors)),
        };
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.state == Validation::Passed
    }

    pub fn state(&self) -> &Validation {
        &self.state
    }

    pub fn input(&self) -> &F {
        &self.input
    }

    pub fn errors(&self) -> FieldErrors {
        match &self.state {
            Validation::Failed(errors) => errors.clone(),
            _ => FieldErrors::new(),
        }
    }

    pub fn into_model(self) -> Result<F::Model, FormError> {
        match self.state {
            Validation::NotRun => Err(FormError::NotValidated),
            Validation::Failed(errors) => Err(FormError::Invalid(errors)),
            Validation::Passed => Ok(self.input.into_model()),
        }
    }
}

impl<F: FormInput + Default> ValidatedInput<F> {
    /// Discards the raw input in favour of the form defaults and re-validates.
    pub fn reset_to_default(&mut self) {
        self.input = F::default();
        self.validate();
    }
}

fn collect_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({}).", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

pub(crate) fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
