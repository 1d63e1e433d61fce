//! Generation constants.

/// Knobs that shape the generated program.
///
/// The command line always uses [`GenConfig::default`]; changing any field
/// changes the program a seed maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// A statement at depth `d` is forced to be an assignment when
    /// `below(d + 1)` exceeds this.
    pub stmt_depth_threshold: usize,
    /// An expression at depth `d` is forced to be a terminal when
    /// `below(d + 1)` exceeds this.
    pub expr_depth_threshold: usize,
    /// Iteration count of every emitted `for` loop.
    pub loop_limit: usize,
    /// Statement or expression depth at which generation aborts.
    pub depth_ceiling: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            stmt_depth_threshold: 5,
            expr_depth_threshold: 2,
            loop_limit: 5,
            depth_ceiling: 256,
        }
    }
}
