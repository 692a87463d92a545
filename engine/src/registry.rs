//! Challenge registry: the validated, immutable catalog.
//!
//! A registry is built once at startup. Construction fails fast when the
//! catalog could make a submitted line ambiguous, so the matcher's
//! declaration-order tie-break never has to pick a winner in practice.

use thiserror::Error;
use tracing::debug;

use ctf_types::{AcceptRule, Challenge};

use crate::catalog::CHALLENGES;
use crate::commands::builtin_named;
use crate::matcher::normalize_attempt;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("challenge catalog is empty")]
    Empty,
    #[error("duplicate challenge id: {0}")]
    DuplicateId(&'static str),
    #[error("challenge {0} has no accepted solution forms")]
    NoAcceptedForms(&'static str),
    #[error("challenge {0} has an empty solution form")]
    EmptyForm(&'static str),
    #[error("challenge {id}: predicate '{label}' rejects its own sample {sample:?}")]
    SampleRejected {
        id: &'static str,
        label: &'static str,
        sample: &'static str,
    },
    #[error("challenge {id}: solution form {form:?} is captured by the `{builtin}` builtin")]
    ShadowedByBuiltin {
        id: &'static str,
        form: &'static str,
        builtin: &'static str,
    },
    #[error("solution form {form:?} of {first} is also accepted by {second}")]
    AmbiguousForm {
        form: &'static str,
        first: &'static str,
        second: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Registry {
    challenges: &'static [Challenge],
}

impl Registry {
    /// Validate `challenges` and wrap them.
    pub fn new(challenges: &'static [Challenge]) -> Result<Self, RegistryError> {
        if challenges.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (index, challenge) in challenges.iter().enumerate() {
            if challenges[..index]
                .iter()
                .any(|earlier| earlier.id.eq_ignore_ascii_case(challenge.id))
            {
                return Err(RegistryError::DuplicateId(challenge.id));
            }
            validate_forms(challenge)?;
        }

        for challenge in challenges {
            for form in challenge.accepts.iter().flat_map(|rule| rule.probes()) {
                let normalized = normalize_attempt(form);
                if let Some(other) = challenges
                    .iter()
                    .find(|other| other.id != challenge.id && other.accepts(&normalized))
                {
                    return Err(RegistryError::AmbiguousForm {
                        form,
                        first: challenge.id,
                        second: other.id,
                    });
                }
            }
        }

        debug!(count = challenges.len(), "Challenge registry validated");
        Ok(Self { challenges })
    }

    /// The shipped catalog.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(CHALLENGES)
    }

    /// All challenges in declaration order.
    #[must_use]
    pub fn challenges(&self) -> &'static [Challenge] {
        self.challenges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Case-insensitive lookup by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static Challenge> {
        let id = id.trim();
        self.challenges
            .iter()
            .find(|challenge| challenge.id.eq_ignore_ascii_case(id))
    }
}

fn validate_forms(challenge: &Challenge) -> Result<(), RegistryError> {
    if challenge.accepts.is_empty() {
        return Err(RegistryError::NoAcceptedForms(challenge.id));
    }

    for rule in challenge.accepts {
        if let AcceptRule::CustomPredicate {
            label,
            check,
            samples,
        } = rule
        {
            if samples.is_empty() {
                return Err(RegistryError::EmptyForm(challenge.id));
            }
            if let Some(sample) = samples
                .iter()
                .copied()
                .find(|sample| !check(&normalize_attempt(sample)))
            {
                return Err(RegistryError::SampleRejected {
                    id: challenge.id,
                    label: *label,
                    sample,
                });
            }
        }

        for form in rule.probes() {
            let normalized = normalize_attempt(form);
            if normalized.is_empty() {
                return Err(RegistryError::EmptyForm(challenge.id));
            }
            let head = normalized.split(' ').next().unwrap_or_default();
            if let Some(builtin) = builtin_named(head) {
                return Err(RegistryError::ShadowedByBuiltin {
                    id: challenge.id,
                    form,
                    builtin,
                });
            }
        }
    }

    Ok(())
}
