//! Fuzzy title matching.
//!
//! [`SequenceMatcher`] scores two strings with the Ratcliff/Obershelp
//! "gestalt" ratio: find the longest common block, recurse on the pieces to
//! its left and right, and report `2 * matched / (len(a) + len(b))`.
//! Strings are compared as sequences of `char`s.
//!
//! [`DifflibMatcher`] uses it to pick the best catalog titles for a query:
//! each candidate must pass three increasingly expensive ratio checks, and
//! the survivors are returned best first.

use crate::error::{ResolveError, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// A block of `size` equal elements: `a[a..a+size] == b[b..b+size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Sequences at least this long get the popular-element heuristic
const AUTOJUNK_MIN_LEN: usize = 200;

/// Indexed second sequence, shared between clones of a matcher
#[derive(Debug)]
struct Target {
    b: Vec<char>,
    /// element -> positions in `b`, minus popular elements
    b2j: HashMap<char, Vec<usize>>,
    /// element -> full count in `b`
    b_count: HashMap<char, usize>,
}

/// Ratcliff/Obershelp similarity between a sequence `a` and a fixed `b`.
///
/// The index over `b` is built once, so scoring one query (`b`) against
/// many candidates (`a`) only swaps `a`.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    a: Vec<char>,
    target: Arc<Target>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let mut matcher = Self::for_target(b);
        matcher.set_seq1(a);
        matcher
    }

    /// Prepare a matcher for target `b`, with an empty `a`
    pub fn for_target(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        let mut b_count: HashMap<char, usize> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
            *b_count.entry(c).or_insert(0) += 1;
        }

        // In long sequences, elements making up more than 1% of `b` are
        // dropped from the index
        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let threshold = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        Self {
            a: Vec::new(),
            target: Arc::new(Target { b, b2j, b_count }),
        }
    }

    /// Replace the first sequence
    pub fn set_seq1(&mut self, a: &str) {
        self.a = a.chars().collect();
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (&self.a, &self.target.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i-1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.target.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Grow the block over equal elements the index left out
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks in increasing order, adjacent blocks
    /// merged, terminated by a `(len(a), len(b), 0)` sentinel
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.target.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size > 0 {
                blocks.push(m);
                if alo < m.a && blo < m.b {
                    queue.push((alo, m.a, blo, m.b));
                }
                if m.a + m.size < ahi && m.b + m.size < bhi {
                    queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
                }
            }
        }
        blocks.sort();

        let mut merged = Vec::with_capacity(blocks.len() + 1);
        let mut current = Match { a: 0, b: 0, size: 0 };
        for block in blocks {
            if current.a + current.size == block.a && current.b + current.size == block.b {
                current.size += block.size;
            } else {
                if current.size > 0 {
                    merged.push(current);
                }
                current = block;
            }
        }
        if current.size > 0 {
            merged.push(current);
        }
        merged.push(Match { a: la, b: lb, size: 0 });
        merged
    }

    /// Similarity in [0, 1]; 1.0 for two empty sequences
    pub fn ratio(&self) -> f64 {
        let matches = self.matching_blocks().iter().map(|m| m.size).sum();
        self.scaled(matches)
    }

    /// Upper bound on `ratio()` from element counts alone
    pub fn quick_ratio(&self) -> f64 {
        let mut available: HashMap<char, isize> = HashMap::new();
        let mut matches = 0;
        for c in &self.a {
            let remaining = available
                .entry(*c)
                .or_insert_with(|| self.target.b_count.get(c).copied().unwrap_or(0) as isize);
            if *remaining > 0 {
                matches += 1;
            }
            *remaining -= 1;
        }
        self.scaled(matches)
    }

    /// Upper bound on `ratio()` from lengths alone
    pub fn real_quick_ratio(&self) -> f64 {
        self.scaled(self.a.len().min(self.target.b.len()))
    }

    fn scaled(&self, matches: usize) -> f64 {
        let length = self.a.len() + self.target.b.len();
        if length == 0 {
            1.0
        } else {
            2.0 * matches as f64 / length as f64
        }
    }
}

// =============================================================================
// Title matchers
// =============================================================================

/// A catalog title that fuzzily matched a query
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub title: String,
    pub score: f64,
}

/// Resolves a free-text query to catalog titles.
///
/// Implementations return matches best first and an empty list when
/// nothing qualifies. The same title may be returned more than once if the
/// catalog repeats it.
pub trait TitleMatcher: Send + Sync {
    /// Returns the name of this matcher (for logging/debugging)
    fn name(&self) -> &str;

    fn close_matches(&self, query: &str, candidates: &[String]) -> Vec<TitleMatch>;
}

/// Sequence-ratio title matcher
#[derive(Debug, Clone)]
pub struct DifflibMatcher {
    cutoff: f64,
    max_matches: usize,
}

impl DifflibMatcher {
    pub const DEFAULT_CUTOFF: f64 = 0.6;
    pub const DEFAULT_MAX_MATCHES: usize = 3;

    /// Create a matcher, rejecting a cutoff outside [0, 1] or a zero limit
    pub fn new(cutoff: f64, max_matches: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(ResolveError::Configuration {
                reason: format!("match cutoff must be in [0, 1], got {}", cutoff),
            });
        }
        if max_matches == 0 {
            return Err(ResolveError::Configuration {
                reason: "max_matches must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            cutoff,
            max_matches,
        })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn max_matches(&self) -> usize {
        self.max_matches
    }

    fn score(&self, target: &SequenceMatcher, candidate: &str) -> Option<f64> {
        let mut matcher = target.clone();
        matcher.set_seq1(candidate);
        if matcher.real_quick_ratio() < self.cutoff || matcher.quick_ratio() < self.cutoff {
            return None;
        }
        let ratio = matcher.ratio();
        (ratio >= self.cutoff).then_some(ratio)
    }
}

impl Default for DifflibMatcher {
    fn default() -> Self {
        Self {
            cutoff: Self::DEFAULT_CUTOFF,
            max_matches: Self::DEFAULT_MAX_MATCHES,
        }
    }
}

impl TitleMatcher for DifflibMatcher {
    fn name(&self) -> &str {
        "difflib"
    }

    fn close_matches(&self, query: &str, candidates: &[String]) -> Vec<TitleMatch> {
        let target = SequenceMatcher::for_target(query);

        let mut matches: Vec<TitleMatch> = candidates
            .par_iter()
            .filter_map(|candidate| {
                self.score(&target, candidate).map(|score| TitleMatch {
                    title: candidate.clone(),
                    score,
                })
            })
            .collect();

        // Best score first; equal scores put the greater title first
        matches.sort_by(|x, y| {
            y.score
                .total_cmp(&x.score)
                .then_with(|| y.title.cmp(&x.title))
        });
        matches.truncate(self.max_matches);
        matches
    }
}
