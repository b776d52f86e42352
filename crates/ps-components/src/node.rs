//! Per-node pressure cell.
//!
//! `NodeBody` is deliberately dumb: it carries a pressure and a fixed flag
//! and nothing else, so that replacing the node a component maps onto (or
//! rewiring edges around it) never has to touch the body itself.

/// A node's pressure state: `pressure` in the engine's single pressure
/// unit, and whether it is currently pinned against integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBody {
    pressure: f64,
    fixed: bool,
}

impl NodeBody {
    pub fn new(pressure: f64, fixed: bool) -> Self {
        Self { pressure, fixed }
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn fixed(&self) -> bool {
        self.fixed
    }

    /// Overwrites both fields. Idempotent: calling this twice with the same
    /// arguments leaves the body unchanged.
    pub fn set(&mut self, pressure: f64, fixed: bool) {
        self.pressure = pressure;
        self.fixed = fixed;
    }

    pub fn set_pressure(&mut self, pressure: f64) {
        self.pressure = pressure;
    }
}

impl Default for NodeBody {
    fn default() -> Self {
        Self {
            pressure: 0.0,
            fixed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_idempotent() {
        let mut body = NodeBody::new(1.0, false);
        body.set(5.0, true);
        let snapshot = body;
        body.set(5.0, true);
        assert_eq!(body, snapshot);
    }

    #[test]
    fn default_is_unfixed_zero() {
        let body = NodeBody::default();
        assert_eq!(body.pressure(), 0.0);
        assert!(!body.fixed());
    }
}
