use serde::{Deserialize, Serialize};

/// A claim made in a report together with how it was obtained
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Fact<R> {
    pub claim: R,
    pub source: String,
}

impl<R> Fact<R> {
    pub fn new(claim: R, source: impl Into<String>) -> Self {
        Self {
            claim,
            source: source.into(),
        }
    }
}
