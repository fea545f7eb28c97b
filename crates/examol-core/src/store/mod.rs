//! # Store Module
//!
//! Data structures describing what is already known about the molecules in a campaign.
//!
//! ## Key Components
//!
//! - [`record`] - A single molecule and its computed property values
//! - [`recipe`] - Named procedures that extract one scalar property from a record
//! - [`database`] - An insertion-ordered collection of records keyed by identifier
//!
//! ## Usage
//!
//! ```ignore
//! use examol::store::{database::MoleculeDatabase, record::MoleculeRecord, recipe::SimpleRecipe};
//!
//! let mut database = MoleculeDatabase::new();
//! let mut record = MoleculeRecord::new("CCO");
//! record.set_property("ip", "xtb", 11.2);
//! database.insert(record);
//!
//! let recipe = SimpleRecipe::new("ip", "xtb");
//! ```

pub mod database;
pub mod recipe;
pub mod record;
