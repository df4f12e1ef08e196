//! Matrix Market (`.mtx`) coordinate-format reader.
//!
//! Out of the profile-reduction CORE per spec, but still part of the
//! program: this is the one place the crate talks to the filesystem.

use anyhow::{bail, ensure, Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::graph::Graph;

/// Reads a `.mtx` file into a [`Graph`].
///
/// `force_symmetric` makes every stored entry's transpose be materialized
/// regardless of what the header says (spec.md §6).
pub fn load(path: impl AsRef<Path>, force_symmetric: bool) -> Result<Graph> {
    let path = path.as_ref();
    ensure!(
        path.extension().and_then(|e| e.to_str()) == Some("mtx"),
        "expected a .mtx file, got {}",
        path.display()
    );
    log::info!("loading {}", path.display());
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    let g = load_from_reader(reader, force_symmetric)?;
    log::info!("loaded {} vertices, {} directed edges", g.n(), g.col_idx.len());
    Ok(g)
}

/// Parses a `.mtx` document already held in memory. Exposed at `pub(crate)`
/// so fixtures shared across test modules (see `test_fixtures.rs`) don't
/// need to round-trip through a temp file.
pub(crate) fn load_str(contents: &str, force_symmetric: bool) -> Result<Graph> {
    load_from_reader(contents.as_bytes(), force_symmetric)
}

fn load_from_reader(reader: impl BufRead, force_symmetric: bool) -> Result<Graph> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .context("empty .mtx file: missing header line")??;
    let last_word = header
        .split_whitespace()
        .last()
        .context("unable to read matrix info from header line")?;
    let header_symmetric = matches!(last_word, "symmetric" | "skew-symmetric");

    let mut n_rows = 0usize;
    let mut n_entries = 0usize;
    let mut size_line_seen = false;
    let mut elements: Vec<(usize, usize)> = Vec::new();
    let mut lines_read = 0usize;

    for line in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        if !size_line_seen {
            let mut parts = trimmed.split_whitespace();
            let rows: usize = parts
                .next()
                .context("invalid header format")?
                .parse()
                .context("invalid row count")?;
            let cols: usize = parts
                .next()
                .context("invalid header format")?
                .parse()
                .context("invalid column count")?;
            let entries: usize = parts
                .next()
                .context("invalid header format")?
                .parse()
                .context("invalid entry count")?;
            ensure!(rows == cols, "m != n: matrix is not square ({rows} != {cols})");
            ensure!(rows != 0 && entries != 0, "invalid header format");
            n_rows = rows;
            n_entries = entries;
            size_line_seen = true;
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let i: usize = parts
            .next()
            .context("invalid line format")?
            .parse()
            .context("invalid row index")?;
        let j: usize = parts
            .next()
            .context("invalid line format")?
            .parse()
            .context("invalid column index")?;
        // The value field, if present, is ignored (spec.md §6).
        lines_read += 1;

        if i == j {
            continue;
        }
        ensure!(i >= 1 && j >= 1, "indices must be 1-based");
        let (i, j) = (i - 1, j - 1);

        if header_symmetric {
            ensure!(
                j <= i,
                "MTX format error: j > i. For a symmetric matrix only entries \
                 in the lower triangular portion need be supplied"
            );
        }
        if header_symmetric || force_symmetric {
            elements.push((i, j));
            elements.push((j, i));
        } else {
            elements.push((i, j));
        }
    }

    ensure!(size_line_seen, "missing size line in .mtx file");
    ensure!(
        n_entries == lines_read,
        "unexpected number of lines read: header declared {n_entries}, read {lines_read}"
    );

    elements.sort_unstable();
    elements.dedup();

    let mut row_ptr = vec![0usize; n_rows + 1];
    for &(i, _) in &elements {
        row_ptr[i + 1] += 1;
    }
    for i in 0..n_rows {
        row_ptr[i + 1] += row_ptr[i];
    }
    let col_idx: Vec<usize> = elements.into_iter().map(|(_, j)| j).collect();

    Ok(Graph::from_csr(row_ptr, col_idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    // %   V         = [ 3 1 3 5 4 1 5 4 ]
    // %   COL_INDEX = [ 1 3 0 3 3 0 1 2 ]
    // %   ROW_INDEX = [ 0 2 4 5 8 ]
    const TEST1: &str = "%%MatrixMarket matrix coordinate real symmetric\n\
        4 4 4\n\
        2 1 3\n\
        4 1 1\n\
        4 2 5\n\
        4 3 4\n";

    const TEST2: &str = "%%MatrixMarket matrix coordinate real symmetric\n\
        6 6 7\n\
        3 1 1\n\
        6 1 1\n\
        5 2 1\n\
        6 2 1\n\
        4 3 1\n\
        5 3 1\n\
        6 5 1\n";

    #[test]
    fn parses_test1() {
        let g = load_from_reader(TEST1.as_bytes(), false).unwrap();
        assert_eq!(g.n(), 4);
        assert_eq!(g.row_ptr, vec![0, 2, 4, 5, 8]);
        assert_eq!(g.col_idx, vec![1, 3, 0, 3, 3, 0, 1, 2]);
    }

    #[test]
    fn parses_test2() {
        let g = load_from_reader(TEST2.as_bytes(), false).unwrap();
        assert_eq!(g.n(), 6);
        assert_eq!(g.row_ptr, vec![0, 2, 4, 7, 8, 11, 14]);
        assert_eq!(
            g.col_idx,
            vec![2, 5, 4, 5, 0, 3, 4, 2, 1, 2, 5, 0, 1, 4]
        );
    }

    #[test]
    fn rejects_non_square() {
        let bad = "%%MatrixMarket matrix coordinate real general\n3 4 1\n1 1\n";
        assert!(load_from_reader(bad.as_bytes(), false).is_err());
    }

    #[test]
    fn rejects_upper_triangular_entry_under_symmetric_header() {
        let bad = "%%MatrixMarket matrix coordinate real symmetric\n2 2 1\n1 2\n";
        assert!(load_from_reader(bad.as_bytes(), false).is_err());
    }

    #[test]
    fn drops_self_loops() {
        let src = "%%MatrixMarket matrix coordinate real symmetric\n2 2 2\n1 1\n2 1\n";
        let g = load_from_reader(src.as_bytes(), false).unwrap();
        assert_eq!(g.col_idx.len(), 2);
    }

    #[test]
    fn force_symmetric_accepts_upper_triangular_entries_under_a_general_header() {
        // A general-header entry with j > i is not a validation error -
        // only a symmetric header's lower-triangular-only convention
        // rejects it - but force_symmetric still materializes the
        // transpose, same as the reference's separate `f_symmetric` flag.
        let src = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 2\n";
        let g = load_from_reader(src.as_bytes(), true).unwrap();
        assert_eq!(g.col_idx.len(), 2);
        assert_eq!(g.row_ptr, vec![0, 1, 2]);
    }
}
