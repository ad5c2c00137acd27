use std::fmt;

use crate::combat::ShipSpecs;
use crate::data::specs::SpecTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

fn check_stat(report: &mut ValidationReport, context: &str, stat: &str, value: f64) {
    if !value.is_finite() {
        report.push(
            ValidationSeverity::Error,
            context,
            format!("{stat} must be finite, got {value}"),
        );
    } else if value < 0.0 {
        report.push(
            ValidationSeverity::Error,
            context,
            format!("{stat} must be non-negative, got {value}"),
        );
    }
}

fn validate_specs(report: &mut ValidationReport, context: &str, specs: &ShipSpecs) {
    check_stat(report, context, "hull", specs.hull);
    check_stat(report, context, "shields", specs.shields);
    check_stat(report, context, "weapons", specs.weapons);

    if specs.weapons == 0.0 {
        report.push(
            ValidationSeverity::Info,
            context,
            "weapons are zero; this ship can never deal damage",
        );
    }
    if specs.hull == 0.0 {
        report.push(
            ValidationSeverity::Warning,
            context,
            "hull is zero; this ship is destroyed by its first hit",
        );
    }
}

/// Check a spec table: negative or non-finite stats are errors, ship types
/// without an entry are warnings.
pub fn validate_spec_table(table: &SpecTable) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (ship, specs) in table.iter() {
        validate_specs(&mut report, ship.as_str(), specs);
    }
    for ship in table.missing_types() {
        report.push(
            ValidationSeverity::Warning,
            ship.as_str(),
            "no specs; fleets containing this type cannot battle",
        );
    }

    report
}
