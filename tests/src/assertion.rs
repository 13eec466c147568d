//! Assertion types and builders for verifying step results.

use femcat_core::{ComponentKind, Tag, Value};
use femcat_session::{RegionState, RegistryResult, Session};

use crate::error::{ScenarioError, ScenarioResult};
use crate::Outcome;

/// A parameter expectation on a live component.
#[derive(Debug, Clone)]
struct ParamCheck {
    kind: ComponentKind,
    tag: Tag,
    name: String,
    /// `None` asserts the parameter is absent.
    value: Option<Value>,
}

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Outcome assertions
    pub outcome: Option<Outcome>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,
    pub fields: Option<Vec<String>>,

    // Session state assertions
    pub counts: Vec<(ComponentKind, usize)>,
    pub variants: Vec<(ComponentKind, Option<Tag>, String)>,
    params: Vec<ParamCheck>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Session) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("outcome", &self.outcome)
            .field("error", &self.error)
            .field("error_pattern", &self.error_pattern)
            .field("fields", &self.fields)
            .field("counts", &self.counts)
            .field("variants", &self.variants)
            .field("params", &self.params)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result and the session after it.
    pub fn verify(
        &self,
        step: &str,
        result: &RegistryResult<Outcome>,
        session: &Session,
    ) -> ScenarioResult<()> {
        self.verify_result(step, result)?;
        self.verify_state(step, session)
    }

    fn verify_result(&self, step: &str, result: &RegistryResult<Outcome>) -> ScenarioResult<()> {
        let expects_error =
            self.error.is_some() || self.error_pattern.is_some() || self.fields.is_some();

        if expects_error {
            let err = match result {
                Err(e) => e,
                Ok(outcome) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected an error, but step succeeded with {:?}", outcome),
                    ))
                }
            };
            let msg = err.to_string();

            if let Some(ref expected) = self.error {
                if !msg.contains(expected.as_str()) {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', got: {}", expected, msg),
                    ));
                }
            }

            if let Some(ref pattern) = self.error_pattern {
                let re = regex_lite::Regex::new(pattern)
                    .map_err(|e| ScenarioError::invalid_pattern(pattern, e.to_string()))?;
                if !re.is_match(&msg) {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', got: {}", pattern, msg),
                    ));
                }
            }

            if let Some(ref expected) = self.fields {
                let actual: Vec<&str> = err
                    .as_validation()
                    .map(|v| v.fields())
                    .ok_or_else(|| {
                        ScenarioError::assertion_failed(
                            step,
                            format!("expected a validation error, got: {}", msg),
                        )
                    })?;
                if actual != *expected {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected fields {:?}, got {:?}", expected, actual),
                    ));
                }
            }
            return Ok(());
        }

        let outcome = result
            .as_ref()
            .map_err(|e| ScenarioError::assertion_failed(step, format!("step failed: {}", e)))?;

        if let Some(ref expected) = self.outcome {
            if outcome != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {:?}, got {:?}", expected, outcome),
                ));
            }
        }
        Ok(())
    }

    fn verify_state(&self, step: &str, session: &Session) -> ScenarioResult<()> {
        for (kind, expected) in &self.counts {
            let actual = session.list(*kind).count();
            if actual != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} live {} component(s), got {}", expected, kind, actual),
                ));
            }
        }

        for (kind, tag, expected) in &self.variants {
            let instance = session
                .get(*kind, *tag)
                .map_err(|e| ScenarioError::assertion_failed(step, e.to_string()))?;
            if instance.variant != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected {} {} to be {}, got {}",
                        kind, instance.tag, expected, instance.variant
                    ),
                ));
            }
        }

        for check in &self.params {
            let instance = session
                .get(check.kind, Some(check.tag))
                .map_err(|e| ScenarioError::assertion_failed(step, e.to_string()))?;
            let actual = instance.get_param(&check.name);
            if actual != check.value.as_ref() {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "{} {} param '{}': expected {}, got {}",
                        check.kind,
                        check.tag,
                        check.name,
                        describe(check.value.as_ref()),
                        describe(actual)
                    ),
                ));
            }
        }

        if let Some(ref custom) = self.custom {
            if !custom(session) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    "custom assertion returned false",
                ));
            }
        }
        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Outcome assertions ==========

    /// Assert that the step succeeded.
    ///
    /// Success is already required whenever no error assertion is set.
    pub fn ok(self) -> Self {
        self
    }

    /// Assert that the step created a component with this tag.
    pub fn created(mut self, tag: u32) -> Self {
        self.assertion.outcome = Some(Outcome::Created(Tag::new(tag)));
        self
    }

    /// Assert that a damping resolution produced this tag.
    pub fn resolved(mut self, tag: Option<u32>) -> Self {
        self.assertion.outcome = Some(Outcome::Resolved(tag.map(Tag::new)));
        self
    }

    /// Assert a region state.
    pub fn state(mut self, state: RegionState) -> Self {
        self.assertion.outcome = Some(Outcome::State(state));
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    /// Assert that the step fails validation citing exactly these fields.
    pub fn fields(mut self, names: &[&str]) -> Self {
        self.assertion.fields = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    // ========== Session state assertions ==========

    /// Assert the number of live components of a kind after the step.
    pub fn count(mut self, kind: ComponentKind, n: usize) -> Self {
        self.assertion.counts.push((kind, n));
        self
    }

    /// Assert the variant of a component (`None` for the current one).
    pub fn variant(mut self, kind: ComponentKind, tag: Option<u32>, name: &str) -> Self {
        self.assertion
            .variants
            .push((kind, tag.map(Tag::new), name.to_string()));
        self
    }

    /// Assert a parameter value on a live component.
    pub fn param(
        mut self,
        kind: ComponentKind,
        tag: u32,
        name: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.assertion.params.push(ParamCheck {
            kind,
            tag: Tag::new(tag),
            name: name.to_string(),
            value: Some(value.into()),
        });
        self
    }

    /// Assert that a parameter is not set on a live component.
    pub fn no_param(mut self, kind: ComponentKind, tag: u32, name: &str) -> Self {
        self.assertion.params.push(ParamCheck {
            kind,
            tag: Tag::new(tag),
            name: name.to_string(),
            value: None,
        });
        self
    }

    // ========== Advanced ==========

    /// Custom assertion on the session after the step.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Session) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<unset>".to_string(),
    }
}
