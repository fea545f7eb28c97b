//! # ExaMol Core Library
//!
//! The selection core of an active-learning loop for molecular property campaigns. Surrogate
//! models (graph networks, descriptor regressors) produce ensembles of predictions for untested
//! molecules; this library turns those prediction distributions into a ranked, bounded batch of
//! simulations to run next.
//!
//! ## Architectural Philosophy
//!
//! The library is organized around the gather/dispense protocol of a selection round, with
//! the surrounding pieces of the campaign kept behind narrow interfaces.
//!
//! - **[`store`]: The Known Data.** Molecule records, the property recipes that read scalar
//!   values out of them, and an insertion-ordered database of records.
//!
//! - **[`select`]: The Logic Core.** The [`select::Selector`] state machine, the bounded top-K
//!   [`select::RankingSelector`], the pluggable [`select::ScoringPolicy`] strategies, and the
//!   score aggregator that extracts known property values from a database.
//!
//! - **[`start`]** and **[`train`]**: Campaign helpers for picking an initial training set
//!   before any model exists, and for splitting labelled data for model fitting.
//!
//! - **[`io`]: File Boundaries.** CSV readers and writers for prediction tensors and
//!   dispensed selections.
//!
//! ## Threading
//!
//! Nothing in this crate spawns work or takes locks. A selector is a plain in-memory data
//! structure owned by a single driver; callers sharing one across threads must serialize
//! access themselves.

pub mod io;
pub mod select;
pub mod start;
pub mod store;
pub mod train;
