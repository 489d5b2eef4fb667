pub mod response;

pub use response::{ErrorPayload, MatchResult, SkillContext};
