/// Branch registration record.
///
/// `order` is the explicit sort key from the DSL (`branch x order: 2`).
/// Branches declared without one receive a synthesized fractional key when
/// the ordered branch list is built, so they interleave deterministically by
/// declaration position without colliding with explicit integer orders.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchMeta {
    pub name: String,
    pub order: Option<f64>,
}

impl BranchMeta {
    pub fn new(name: impl Into<String>, order: Option<f64>) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
}

/// Fractional sort key for the branch at `index` in declaration order:
/// `0.<index>` interpreted as a decimal fraction (0 -> 0.0, 3 -> 0.3,
/// 12 -> 0.12).
pub(crate) fn fractional_order(index: usize) -> f64 {
    let mut divisor = 1.0;
    let mut rest = index;
    loop {
        divisor *= 10.0;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    index as f64 / divisor
}
