//! Segment producers.
//!
//! Each producer listens to host events and publishes `powerbar:update`
//! events for the segments it owns.  None of them reads the segment store.

pub mod context;
pub mod git;
pub mod model;
pub mod provider;
pub mod sub;
pub mod tokens;

pub use context::ContextProducer;
pub use git::GitProducer;
pub use model::ModelProducer;
pub use provider::ProviderProducer;
pub use sub::SubProducer;
pub use tokens::TokensProducer;

/// Color tag for a usage percentage: `error` above 80 %, `warning` above
/// 60 %, `default` otherwise.
pub fn severity_color(percent: f64, default: &'static str) -> &'static str {
    if percent > 80.0 {
        "error"
    } else if percent > 60.0 {
        "warning"
    } else {
        default
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds() {
        assert_eq!(severity_color(0.0, "accent"), "accent");
        assert_eq!(severity_color(60.0, "accent"), "accent");
        assert_eq!(severity_color(61.0, "muted"), "warning");
        assert_eq!(severity_color(80.0, "muted"), "warning");
        assert_eq!(severity_color(81.0, "muted"), "error");
    }
}
