//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, StorageBackend};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_storage(config, &mut result);
        Self::validate_capture(config, &mut result);
        Self::validate_generator(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        if config.storage.backend == StorageBackend::File
            && config.storage.path.as_os_str().is_empty()
        {
            result.add_error(ValidationError::new(
                "storage.path",
                "path cannot be empty for the file backend",
            ));
        }

        if config.storage.backend == StorageBackend::Memory {
            result.add_warning(ValidationWarning::new(
                "storage.backend",
                "memory backend discards saved logins on exit",
            ));
        }
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        if config.capture.pending_ttl_secs == 0 {
            result.add_error(ValidationError::new(
                "capture.pending_ttl_secs",
                "pending_ttl_secs must be greater than 0",
            ));
        }

        if config.capture.pending_ttl_secs > 600 {
            result.add_warning(ValidationWarning::new(
                "capture.pending_ttl_secs",
                "captured passwords stay in memory for more than 10 minutes",
            ));
        }
    }

    fn validate_generator(config: &Config, result: &mut ValidationResult) {
        if config.generator.length == 0 {
            result.add_error(ValidationError::new(
                "generator.length",
                "length must be greater than 0",
            ));
        } else if config.generator.length < 8 {
            result.add_warning(ValidationWarning::new(
                "generator.length",
                "passwords shorter than 8 characters are reported as weak",
            ));
        }

        if !config.generator.letters && !config.generator.digits && !config.generator.symbols {
            result.add_warning(ValidationWarning::new(
                "generator",
                "no character class enabled, letters will be used",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "level cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
