// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! SA-IS: Suffix Array by Induced Sorting
//!
//! Linear-time O(n) suffix array construction over `text + $`.
//!
//! # Algorithm Overview
//!
//! ```text
//! Input: "banana"
//!
//! Step 1: Append sentinel (0) and classify suffixes
//! ┌───┬───┬───┬───┬───┬───┬───┐
//! │ b │ a │ n │ a │ n │ a │ $ │   ($ = sentinel, value 0)
//! ├───┼───┼───┼───┼───┼───┼───┤
//! │ L │ S │ L │ S │ L │ L │ S │   (S = smaller than next, L = larger)
//! └───┴───┴───┴───┴───┴───┴───┘
//!
//! Step 2: Find LMS (Leftmost S-type) suffixes
//!         LMS = S-type preceded by L-type
//!         Positions: 1, 3, 6
//!
//! Step 3: Induced sorting
//!         - Place LMS suffixes at bucket tails
//!         - Induce L-type positions (left-to-right)
//!         - Induce S-type positions (right-to-left)
//!
//! Step 4: If LMS substrings not unique, recurse on reduced problem
//!
//! Step 5: Use sorted LMS order to induce final suffix array
//!
//! Output: [6, 5, 3, 1, 0, 4, 2]
//! ```
//!
//! Unlike a plain suffix sorter, the sentinel row is kept in the output:
//! the FM-index needs all `n + 1` rows, and row 0 is always the sentinel.
//!
//! # References
//!
//! - Nong, Zhang, Chan (2009): "Linear Suffix Array Construction by Almost Pure Induced-Sorting"
//! - <https://doi.org/10.1109/DCC.2009.42>

use crate::corpus::SENTINEL;

/// Suffix type classification.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SuffixType {
    /// S-type: suffix is lexicographically smaller than the next suffix
    S,
    /// L-type: suffix is lexicographically larger than the next suffix
    L,
}

const EMPTY: usize = usize::MAX;

/// Suffix array of `text` followed by the sentinel.
///
/// The result has `text.len() + 1` rows; `sa[0] == text.len()` (the sentinel
/// suffix). The caller guarantees `text` does not contain [`SENTINEL`].
pub fn suffix_array_with_sentinel(text: &[u8]) -> Vec<usize> {
    debug_assert!(
        !text.contains(&SENTINEL),
        "sentinel byte inside text breaks suffix ordering"
    );
    let mut with_sentinel = Vec::with_capacity(text.len() + 1);
    with_sentinel.extend_from_slice(text);
    with_sentinel.push(SENTINEL);
    induced_sort(&with_sentinel, 256)
}

/// Core SA-IS over any integer alphabet `[0, alphabet_size)`.
///
/// The last symbol must be the unique minimum. That holds at the top level
/// (sentinel) and for every reduced string, whose last LMS substring is the
/// sentinel's and therefore gets the unique smallest name.
fn induced_sort<T>(text: &[T], alphabet_size: usize) -> Vec<usize>
where
    T: Copy + Ord + Into<usize>,
{
    let n = text.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![0],
        2 => {
            return if text[0] <= text[1] {
                vec![0, 1]
            } else {
                vec![1, 0]
            };
        }
        _ => {}
    }

    let types = classify(text);
    let lms_positions: Vec<usize> = (1..n).filter(|&i| is_lms(&types, i)).collect();

    if lms_positions.is_empty() {
        let mut sa: Vec<usize> = (0..n).collect();
        sa.sort_by(|&a, &b| text[a..].cmp(&text[b..]));
        return sa;
    }

    let bucket_sizes = bucket_sizes(text, alphabet_size);

    // First pass: LMS suffixes in text order, only their substrings get sorted
    let mut sa = vec![EMPTY; n];
    induce(text, &types, &bucket_sizes, &lms_positions, &mut sa);

    // Name LMS substrings in sorted order
    let mut name = 0usize;
    let mut prev: Option<usize> = None;
    let mut lms_names = vec![EMPTY; n];
    for &pos in &sa {
        if !is_lms(&types, pos) {
            continue;
        }
        if let Some(p) = prev {
            if !lms_substrings_equal(text, &types, p, pos) {
                name += 1;
            }
        }
        lms_names[pos] = name;
        prev = Some(pos);
    }
    let unique_count = name + 1;

    let reduced: Vec<usize> = lms_positions.iter().map(|&pos| lms_names[pos]).collect();

    let sorted_lms_indices = if unique_count < lms_positions.len() {
        induced_sort(&reduced, unique_count)
    } else {
        // All names distinct: the names are the ranks
        let mut order = vec![0usize; reduced.len()];
        for (i, &r) in reduced.iter().enumerate() {
            order[r] = i;
        }
        order
    };

    let sorted_lms: Vec<usize> = sorted_lms_indices
        .iter()
        .map(|&i| lms_positions[i])
        .collect();

    // Second pass: correctly ordered LMS suffixes induce the full array
    sa.fill(EMPTY);
    induce(text, &types, &bucket_sizes, &sorted_lms, &mut sa);
    sa
}

/// Place `lms` at bucket tails (keeping their relative order), then induce
/// L-type suffixes left to right and S-type suffixes right to left.
fn induce<T>(
    text: &[T],
    types: &[SuffixType],
    bucket_sizes: &[usize],
    lms: &[usize],
    sa: &mut [usize],
) where
    T: Copy + Into<usize>,
{
    let n = text.len();

    let mut tails = bucket_tails(bucket_sizes);
    for &pos in lms.iter().rev() {
        let c: usize = text[pos].into();
        tails[c] -= 1;
        sa[tails[c]] = pos;
    }

    let mut heads = bucket_heads(bucket_sizes);
    for i in 0..n {
        let s = sa[i];
        if s == EMPTY || s == 0 {
            continue;
        }
        let j = s - 1;
        if types[j] == SuffixType::L {
            let c: usize = text[j].into();
            sa[heads[c]] = j;
            heads[c] += 1;
        }
    }

    let mut tails = bucket_tails(bucket_sizes);
    for i in (0..n).rev() {
        let s = sa[i];
        if s == EMPTY || s == 0 {
            continue;
        }
        let j = s - 1;
        if types[j] == SuffixType::S {
            let c: usize = text[j].into();
            tails[c] -= 1;
            sa[tails[c]] = j;
        }
    }
}

/// Classify each suffix as S-type or L-type. The last position is S.
fn classify<T: Ord>(text: &[T]) -> Vec<SuffixType> {
    let n = text.len();
    let mut types = vec![SuffixType::S; n];
    for i in (0..n - 1).rev() {
        types[i] = match text[i].cmp(&text[i + 1]) {
            std::cmp::Ordering::Greater => SuffixType::L,
            std::cmp::Ordering::Less => SuffixType::S,
            std::cmp::Ordering::Equal => types[i + 1],
        };
    }
    types
}

#[inline]
fn is_lms(types: &[SuffixType], i: usize) -> bool {
    i > 0 && i < types.len() && types[i] == SuffixType::S && types[i - 1] == SuffixType::L
}

fn bucket_sizes<T: Copy + Into<usize>>(text: &[T], alphabet_size: usize) -> Vec<usize> {
    let mut sizes = vec![0; alphabet_size];
    for &c in text {
        sizes[c.into()] += 1;
    }
    sizes
}

fn bucket_heads(sizes: &[usize]) -> Vec<usize> {
    let mut sum = 0;
    sizes
        .iter()
        .map(|&size| {
            let head = sum;
            sum += size;
            head
        })
        .collect()
}

fn bucket_tails(sizes: &[usize]) -> Vec<usize> {
    let mut sum = 0;
    sizes
        .iter()
        .map(|&size| {
            sum += size;
            sum
        })
        .collect()
}

/// Two LMS substrings are equal when they match symbol by symbol and type
/// by type up to and including the next LMS position.
fn lms_substrings_equal<T: Eq>(text: &[T], types: &[SuffixType], i: usize, j: usize) -> bool {
    if i == j {
        return true;
    }
    let n = text.len();
    let mut k = 0;
    loop {
        let (pi, pj) = (i + k, j + k);
        if pi >= n || pj >= n {
            return pi >= n && pj >= n;
        }
        if text[pi] != text[pj] || types[pi] != types[pj] {
            return false;
        }
        if k > 0 {
            let (lms_i, lms_j) = (is_lms(types, pi), is_lms(types, pj));
            if lms_i && lms_j {
                return true;
            }
            if lms_i != lms_j {
                return false;
            }
        }
        k += 1;
    }
}
