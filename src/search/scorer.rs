//! Partial-ratio similarity between a search term and a candidate name.
//!
//! The shorter string is slid over the longer one, anchored at every
//! matching block the two share, and each window is compared with an
//! indel (insert/delete) similarity ratio.  The best window wins, so a
//! short fragment of a long secret name still scores 100.

use rapidfuzz::fuzz;

/// Window ratios above this count as a perfect hit.
const PERFECT_RATIO: f64 = 0.995;

/// Similarity score in `0..=100` between `term` and `candidate`.
///
/// Case-insensitive.  An empty string scores 0 against anything non-empty
/// and 100 against another empty string.
pub fn score(term: &str, candidate: &str) -> u8 {
    let a: Vec<char> = term.to_lowercase().chars().collect();
    let b: Vec<char> = candidate.to_lowercase().chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0.0_f64;
    for block in matching_blocks(short, long) {
        let start = block.long_start.saturating_sub(block.short_start);
        let end = (start + short.len()).min(long.len());
        let window = &long[start..end];

        let ratio = fuzz::ratio(short.iter().copied(), window.iter().copied());
        if ratio > PERFECT_RATIO {
            return 100;
        }
        best = best.max(ratio);
    }

    percent(best)
}

/// `0.0..=1.0` to a whole percentage.
fn percent(ratio: f64) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Block {
    short_start: usize,
    long_start: usize,
    len: usize,
}

/// Maximal matching blocks between `a` and `b`, ordered by position,
/// terminated by a zero-length sentinel at `(a.len(), b.len())`.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<Block> {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, b, alo, ahi, blo, bhi);
        if block.len == 0 {
            continue;
        }
        if alo < block.short_start && blo < block.long_start {
            pending.push((alo, block.short_start, blo, block.long_start));
        }
        let a_end = block.short_start + block.len;
        let b_end = block.long_start + block.len;
        if a_end < ahi && b_end < bhi {
            pending.push((a_end, ahi, b_end, bhi));
        }
        blocks.push(block);
    }

    blocks.sort();
    blocks.push(Block {
        short_start: a.len(),
        long_start: b.len(),
        len: 0,
    });
    blocks
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
    let mut best = Block {
        short_start: alo,
        long_start: blo,
        len: 0,
    };
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo;
            cur[k + 1] = if a[i] == b[j] { prev[k] + 1 } else { 0 };
            let run = cur[k + 1];
            if run > best.len {
                best = Block {
                    short_start: i + 1 - run,
                    long_start: j + 1 - run,
                    len: run,
                };
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}
