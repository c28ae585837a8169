// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module knows **how to read the answer-archive pages**. Each source gets a
//! [`SourceProfile`] naming the element types that carry prose/list/table content
//! on that site; everything else about extraction is shared.
//!
//! ## Extraction shape
//! 1. **Structural pass**: flatten the visible text of every element the profile
//!    selects and collect `\b[a-z]{5}\b` runs from the lowercased text.
//! 2. **Fallback pass**: only when (1) found nothing, which means the page layout
//!    moved under us, scan the whole raw document for `\b[a-zA-Z]{5}\b`.
//!
//! The result is a *candidate* set: a superset of real answers (menu labels,
//! prose words...). Callers always run it through [`crate::words::normalize`]
//! and later through the allowed-list cross-filter.
//!
//! ## What does **not** live here
//! - Networking (`core::net`), reconciliation (`reconcile`), persistence (`file`).
//!
//! ## Testing notes
//! Specs are tested **offline** against inline HTML fixtures.

mod extract;
mod sources;

pub use extract::{CandidateSet, extract, extract_words, fallback_pass, structural_pass};
pub use sources::{GENERIC, SourceProfile, TECHRADAR, WORDFINDER, profile_for};
