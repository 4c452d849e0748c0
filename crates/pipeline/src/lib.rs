//! Synonymizer processing pipeline.
//!
//! Text goes through four stages:
//! 1. [`tokenizer`] splits it into words and line breaks
//! 2. [`classifier`] assigns each token a part of speech
//! 3. [`resolver`] finds thesaurus entries, cache first
//! 4. [`builder`] picks synonyms and reassembles the sentence
//!
//! A [`Session`] drives the stages and keeps the state needed to rebuild;
//! [`worker`] runs a session on its own task.

pub mod breaker;
pub mod builder;
pub mod classifier;
pub mod profanity;
pub mod resolver;
pub mod selector;
pub mod session;
pub mod tokenizer;
pub mod worker;

#[cfg(test)]
mod test_helpers;

pub use breaker::{BreakerState, CircuitBreaker, DEFAULT_FAILURE_THRESHOLD};
pub use classifier::{Classifier, classify_heuristic, guess_category};
pub use profanity::ProfanityFilter;
pub use resolver::{Lookup, ThesaurusResolver};
pub use selector::select;
pub use session::{Session, SessionState};
pub use tokenizer::tokenize;
pub use worker::{PendingReply, Submission, WorkerError, WorkerHandle, spawn_worker};
