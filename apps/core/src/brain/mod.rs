//! # Brain Module
//!
//! Deterministic, non-ML resolution of an utterance to a reply.
//!
//! ## Components
//! - `normalizer`: trim + lowercase
//! - `intent`: ordered keyword rule table, last match wins
//! - `keywords`: query extraction for search intents
//! - `replies`: canned reply pools per intent
//! - `selector`: uniform random pick from a pool

pub mod intent;
pub mod keywords;
pub mod normalizer;
pub mod replies;
pub mod selector;

pub use intent::{Intent, IntentResolver, KeywordRule, ACTIVATION_WORD, DEFAULT_RULES};
pub use keywords::{extract_keyword, SearchKind};
pub use normalizer::normalize;
pub use replies::{ReplyCandidate, ReplyPoolRegistry};
pub use selector::ReplySelector;
