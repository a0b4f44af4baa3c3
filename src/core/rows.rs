//! Row selections typed on the command line.
//!
//! The CLI prints both file lists numbered from 1 and accepts selections such as
//! `1 3-5,8`. [`parse_rows`] expands them into sorted, de-duplicated, zero-based row
//! numbers ready for [`ListView::select_rows`](crate::core::selection::ListView::select_rows).

use crate::core::error::{Result, StagehandError};
use std::collections::BTreeSet;

/// Parse `args` against a list of `available` rows
pub fn parse_rows(args: &[String], available: usize) -> Result<Vec<usize>> {
    let input = args.join(" ");
    let mut rows = BTreeSet::new();

    for part in input.split([' ', ',']).map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_number(start, part)?, parse_number(end, part)?),
            None => {
                let row = parse_number(part, part)?;
                (row, row)
            }
        };
        if start == 0 || start > end {
            return Err(StagehandError::invalid_row_format(part));
        }
        if end > available {
            return Err(StagehandError::row_out_of_range(end, available));
        }
        rows.extend(start..=end);
    }

    if rows.is_empty() {
        return Err(StagehandError::invalid_row_format(input));
    }
    Ok(rows.into_iter().map(|row| row - 1).collect())
}

fn parse_number(text: &str, part: &str) -> Result<usize> {
    text.trim()
        .parse()
        .map_err(|_| StagehandError::invalid_row_format(part))
}
