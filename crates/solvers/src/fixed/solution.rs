use stepwise_core::Trajectory;

/// The result of a fixed-step integration.
#[derive(Debug, Clone)]
pub struct Solution {
    /// One sample per grid time, in grid order.
    pub trajectory: Trajectory,

    /// System evaluations reported by the kernel, summed over all intervals.
    pub evaluations: usize,
}
