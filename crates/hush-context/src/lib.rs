// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic context store with cosine-ranked retrieval for the Hush bot.
//!
//! Entries are embedded once at insertion; queries rank every vector in the
//! scope by cosine similarity with thresholding and top-k selection.

pub mod index;
pub mod store;
pub mod types;

pub use index::ContextIndex;
pub use store::ContextStore;
pub use types::{ContextEntry, ScoredContext, blob_to_vec, cosine_similarity, vec_to_blob};
