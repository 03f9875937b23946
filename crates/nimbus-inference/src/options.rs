//! Explicit session configuration.
//!
//! Backends receive these options at construction time and pass them through
//! to the underlying runtime. Options a backend cannot honor (tract has no
//! execution-provider concept, for example) are logged at debug level and
//! otherwise ignored.

/// Execution provider for the native backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionProvider {
    /// Default CPU provider.
    #[default]
    Cpu,
    /// XNNPACK CPU provider.
    Xnnpack,
}

/// Graph optimization aggressiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationLevel {
    Disabled,
    Basic,
    Extended,
    #[default]
    Full,
}

/// Options applied when creating an inference session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Which execution provider to register.
    pub execution_provider: ExecutionProvider,

    /// Intra-op worker parallelism hint.
    pub intra_threads: usize,

    /// Graph optimization level.
    pub optimization_level: OptimizationLevel,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            execution_provider: ExecutionProvider::Cpu,
            intra_threads: 4,
            optimization_level: OptimizationLevel::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = SessionOptions::default();
        assert_eq!(opts.execution_provider, ExecutionProvider::Cpu);
        assert_eq!(opts.intra_threads, 4);
        assert_eq!(opts.optimization_level, OptimizationLevel::Full);
    }
}
