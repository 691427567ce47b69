//! The two ways a batch job can supply its prompt.

use crate::reusable::ReusablePrompt;
use crate::template::PromptTemplate;

/// Either an inline message template or a server-side prompt reference.
///
/// Job-level helpers accept this enum so the same call site works with both
/// styles; `From` impls keep the call sites free of explicit wrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptSource {
    /// Messages rendered locally from a [`PromptTemplate`].
    Template(PromptTemplate),
    /// A [`ReusablePrompt`] resolved by the server at execution time.
    Reusable(ReusablePrompt),
}

impl From<PromptTemplate> for PromptSource {
    fn from(template: PromptTemplate) -> Self {
        Self::Template(template)
    }
}

impl From<ReusablePrompt> for PromptSource {
    fn from(prompt: ReusablePrompt) -> Self {
        Self::Reusable(prompt)
    }
}
