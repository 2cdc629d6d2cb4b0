// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! FM-index construction and search primitives.
//!
//! Built bottom-up, each layer only talks to the one below:
//! - **sais**: suffix array of `text + $` in O(n)
//! - **bwt**: Burrows–Wheeler transform and C-array from the suffix array
//! - **bitvec** / **wavelet**: rank index over the BWT (the BWT itself is
//!   not kept)
//! - **sampling**: one suffix-array value per `stride` text offsets
//! - **fm**: backward search, LF-mapping and locate

mod bitvec;
mod bwt;
mod fm;
mod sais;
mod sampling;
mod wavelet;

pub(crate) use bitvec::RankBitVec;
pub use bwt::{bwt_from_suffix_array, CArray};
pub use fm::FmIndex;
pub use sais::suffix_array_with_sentinel;
pub use sampling::SampledSuffixArray;
pub use wavelet::WaveletMatrix;
