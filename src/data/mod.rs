pub mod specs;
pub mod validate;

pub use specs::{load_spec_table, SpecTable, StandardSpecs, DEFAULT_SPECS_PATH};
pub use validate::{
    validate_spec_table, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
