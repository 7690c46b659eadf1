//! Levenshtein edit distance and the normalized similarity built on it.
//!
//! Callers fold their inputs first; these functions compare raw chars.

/// Classic Levenshtein distance with unit insert, delete and substitute costs.
///
/// Uses the full dynamic-programming table; inputs here are book names and
/// query words, so the quadratic table is small.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[a.len()][b.len()]
}

/// Similarity in `[0, 1]`: `1 - distance / max(len(a), len(b))`.
///
/// An empty input on either side scores 0.0, including two empty strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let longest = a.chars().count().max(b.chars().count());
    // Lengths are bounded by user input and book names.
    #[allow(clippy::cast_precision_loss)]
    let score = 1.0 - levenshtein(a, b) as f64 / longest as f64;
    score.clamp(0.0, 1.0)
}
