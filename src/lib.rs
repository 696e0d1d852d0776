//! Exact-match term occurrence counting over a fixed corpus.
//!
//! Build once, query forever: every distinct term of the corpus gets a packed
//! bit set over the corpus positions, and "how many times does `t` occur?"
//! becomes one hash lookup plus a popcount. A brute-force linear scan sits
//! beside it as the oracle the index is checked against.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │  corpus.rs  │────▶│   index/     │────▶│   lookup.rs     │
//! │ (Corpus,    │     │ (Builder ──▶ │     │ (IndexedLookup, │
//! │  loader)    │     │  Index)      │     │  LinearScan)    │
//! └─────────────┘     └──────────────┘     └─────────────────┘
//!        │                   │                      │
//!        │                   ▼                      ▼
//!        │            ┌──────────────┐     ┌─────────────────┐
//!        │            │    bits/     │     │   harness/      │
//!        │            │ (PackedBits, │     │ (Clock, Report, │
//!        │            │  popcount)   │     │  timing, diff)  │
//!        │            └──────────────┘     └─────────────────┘
//!        ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      verify/                        │
//! │  (verify_index, verify_against_corpus, contracts)   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use tally::{Corpus, IndexedLookup, LinearScanOracle, Lookup};
//!
//! let corpus = Corpus::parse("a b a c");
//! let indexed: IndexedLookup = IndexedLookup::build(corpus.clone());
//! let oracle = LinearScanOracle::new(corpus);
//!
//! assert_eq!(indexed.matches("a"), 2);
//! assert_eq!(oracle.matches("a"), 2);
//! assert_eq!(indexed.matches("z"), 0);
//! ```

// Module declarations
pub mod bits;
pub mod corpus;
pub mod harness;
pub mod index;
pub mod lookup;
pub mod verify;

pub mod testing;

// Re-exports for public API
pub use bits::{BitStorage, BitVector, PackedBits, Word};
pub use corpus::{Corpus, LoadError};
pub use index::{Builder, Index, IndexStats};
pub use lookup::{IndexedLookup, LinearScanOracle, Lookup};
pub use verify::{verify_against_corpus, verify_index, InvariantError, VerificationReport};
