use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Binary grading verdict. Produced by each grader chain and consumed by
/// the step that requested it; never stored in graph state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    pub fn is_yes(self) -> bool {
        matches!(self, Verdict::Yes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
        }
    }
}
