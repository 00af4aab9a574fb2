pub mod error;
pub mod lint;

use crate::cart::Cart;

use error::{Diagnostic, DiagnosticLevel};
use lint::run_lints;

pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error)
    }
}

pub fn analyze_cart(cart: &Cart) -> AnalysisResult {
    AnalysisResult {
        diagnostics: run_lints(cart),
    }
}
