//! # Select Module
//!
//! Algorithms that turn per-candidate score distributions into a ranked, bounded batch of
//! computations to run next.
//!
//! ## Overview
//!
//! Selection runs in rounds. During the gathering phase a driver feeds batches of candidate
//! keys and sample tensors shaped `(objectives, candidates, ensemble members)` into a
//! [`Selector`]. A single call to [`Selector::dispense`] then yields `(key, score)` pairs
//! from best to worst, and the next batch added afterwards starts a fresh round.
//!
//! ## Key Components
//!
//! - [`base`] - The [`Selector`] state machine and shape validation shared by all selectors
//! - [`ranking`] - [`RankingSelector`], a bounded top-K over independently scored candidates
//! - [`policy`] - The [`ScoringPolicy`] extension point and the stock policies
//! - [`observations`] - Extraction of known property values from a database
//! - [`config`] - Selection parameters and their builder
//! - [`error`] - Validation errors raised at the `add_possibilities` boundary
//!
//! ## Usage
//!
//! ```ignore
//! use examol::select::{RankingSelector, Selector, policy::UpperConfidenceBound};
//!
//! let mut selector = RankingSelector::new(8, true, UpperConfidenceBound::new(1.0));
//! selector.add_possibilities(keys, samples.view().into_dyn())?;
//! for (key, score) in selector.dispense() {
//!     scheduler.submit(key, score);
//! }
//! ```

pub mod base;
pub mod config;
pub mod error;
pub mod observations;
pub mod policy;
pub mod ranking;

pub use base::{Phase, Selector, SelectorState};
pub use error::SelectionError;
pub use policy::ScoringPolicy;
pub use ranking::{Maximize, RankingSelector};
