//! Rule registry.
//!
//! Maps rule names to factories. The registry is assembled once with a
//! [`RegistryBuilder`] and is immutable afterwards, so it can be shared across threads.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use polars::prelude::DataFrame;
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams, StageKind};
use tabcheck_transform::{Transform, Transformed, builtin_transforms};
use tabcheck_validate::{Check, builtin_checks};

use crate::error::DispatchError;

/// Builds a validator from its parameters.
pub type ValidatorFactory = Arc<
    dyn Fn(&RuleParams, &ProcessOptions) -> Result<Box<dyn Check>, ParamError> + Send + Sync,
>;

/// Builds a transformer from its parameters.
pub type TransformerFactory = Arc<
    dyn Fn(&RuleParams, &ProcessOptions) -> Result<Box<dyn Transform>, ParamError>
        + Send
        + Sync,
>;

/// Collects factories before freezing them into a [`Registry`].
///
/// Registering a name twice replaces the earlier factory.
#[derive(Default)]
pub struct RegistryBuilder {
    validators: BTreeMap<String, ValidatorFactory>,
    transformers: BTreeMap<String, TransformerFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every built-in validator and transformer, aliases included.
    pub fn with_builtins(mut self) -> Self {
        for (name, factory) in builtin_checks() {
            self.validators.insert(name.to_string(), Arc::new(factory));
        }
        for (name, factory) in builtin_transforms() {
            self.transformers.insert(name.to_string(), Arc::new(factory));
        }
        self
    }

    pub fn register_validator<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&RuleParams, &ProcessOptions) -> Result<Box<dyn Check>, ParamError>
            + Send
            + Sync
            + 'static,
    {
        self.validators.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn register_transformer<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&RuleParams, &ProcessOptions) -> Result<Box<dyn Transform>, ParamError>
            + Send
            + Sync
            + 'static,
    {
        self.transformers.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            validators: self.validators,
            transformers: self.transformers,
        }
    }
}

/// Immutable name → factory lookup for validators and transformers.
#[derive(Clone)]
pub struct Registry {
    validators: BTreeMap<String, ValidatorFactory>,
    transformers: BTreeMap<String, TransformerFactory>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry holding only the built-in rules.
    pub fn with_builtins() -> Self {
        RegistryBuilder::new().with_builtins().build()
    }

    pub fn contains(&self, kind: StageKind, name: &str) -> bool {
        match kind {
            StageKind::Validation => self.validators.contains_key(name),
            StageKind::Transformation => self.transformers.contains_key(name),
        }
    }

    /// Registered validator names, sorted.
    pub fn validator_names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Registered transformer names, sorted.
    pub fn transformer_names(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }

    /// `None` when no validator has this name.
    pub fn build_validator(
        &self,
        name: &str,
        params: &RuleParams,
        options: &ProcessOptions,
    ) -> Option<Result<Box<dyn Check>, ParamError>> {
        self.validators
            .get(name)
            .map(|factory| factory(params, options))
    }

    /// `None` when no transformer has this name.
    pub fn build_transformer(
        &self,
        name: &str,
        params: &RuleParams,
        options: &ProcessOptions,
    ) -> Option<Result<Box<dyn Transform>, ParamError>> {
        self.transformers
            .get(name)
            .map(|factory| factory(params, options))
    }

    /// Builds and runs a validator in one step.
    pub fn invoke_validator(
        &self,
        name: &str,
        params: &RuleParams,
        options: &ProcessOptions,
        df: &DataFrame,
    ) -> Result<RuleOutcome, DispatchError> {
        let check = self
            .build_validator(name, params, options)
            .ok_or_else(|| DispatchError::UnknownRule {
                kind: StageKind::Validation,
                name: name.to_string(),
            })?
            .map_err(|source| DispatchError::InvalidParams {
                rule: name.to_string(),
                source,
            })?;
        Ok(check.run(df))
    }

    /// Builds and runs a transformer in one step.
    pub fn invoke_transformer(
        &self,
        name: &str,
        params: &RuleParams,
        options: &ProcessOptions,
        df: &DataFrame,
    ) -> Result<Transformed, DispatchError> {
        let transform = self
            .build_transformer(name, params, options)
            .ok_or_else(|| DispatchError::UnknownRule {
                kind: StageKind::Transformation,
                name: name.to_string(),
            })?
            .map_err(|source| DispatchError::InvalidParams {
                rule: name.to_string(),
                source,
            })?;
        Ok(transform.apply(df)?)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("transformers", &self.transformers.keys().collect::<Vec<_>>())
            .finish()
    }
}
