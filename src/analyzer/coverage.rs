use crate::catalog::IndexMetadata;

/// Fraction of the ideal order covered by the index's leading columns:
/// length of the common leading-column prefix divided by the ideal length.
pub fn prefix_coverage(index: &IndexMetadata, ideal: &[String]) -> f64 {
    if ideal.is_empty() {
        return 0.0;
    }

    let mut matched = 0usize;
    for (position, column) in index.columns.iter().enumerate() {
        if position >= ideal.len() || !column.name.eq_ignore_ascii_case(&ideal[position]) {
            break;
        }
        matched += 1;
    }

    matched as f64 / ideal.len() as f64
}

/// When every column of the index matches the ideal order's leading columns
/// (and the index is no longer than the ideal), returns the prefix length.
pub fn exact_prefix_len(index: &IndexMetadata, ideal: &[String]) -> Option<usize> {
    if index.columns.len() > ideal.len() {
        return None;
    }

    for (position, column) in index.columns.iter().enumerate() {
        if !column.name.eq_ignore_ascii_case(&ideal[position]) {
            return None;
        }
    }

    Some(index.columns.len())
}

/// True when `shorter`'s column list is a strict leading prefix of
/// `longer`'s, on the same table.
pub fn is_strict_prefix_of(shorter: &IndexMetadata, longer: &IndexMetadata) -> bool {
    if !shorter.table.eq_ignore_ascii_case(&longer.table) {
        return false;
    }
    if shorter.columns.len() >= longer.columns.len() {
        return false;
    }

    shorter
        .columns
        .iter()
        .zip(longer.columns.iter())
        .all(|(a, b)| a.name.eq_ignore_ascii_case(&b.name) && a.order == b.order)
}
