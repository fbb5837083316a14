//! Common surface shared by processing tools.

use super::result::ProcessResult;

/// A named, versioned unit of processing.
///
/// `process` never panics and never returns a bare error: every failure is
/// folded into the returned [`ProcessResult`].
pub trait Tool: Send + Sync {
    type Input;
    type Output;

    /// Stable tool name, e.g. `"HashCalculator"`
    fn name(&self) -> &'static str;

    /// Tool version; hashes are only comparable within one version
    fn version(&self) -> &'static str;

    /// Whether the tool's external dependencies can be exercised
    fn is_available(&self) -> bool;

    /// Run the tool on one input
    fn process(&self, input: Self::Input) -> ProcessResult<Self::Output>;
}
