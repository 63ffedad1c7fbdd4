//! Analysis configuration.

/// Options for one analysis run. Passed explicitly into every call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Log progress at info level.
    pub verbose: bool,
    /// Analyze sheets concurrently. Output is identical either way.
    pub parallel: bool,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
