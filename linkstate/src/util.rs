use crate::topology::INF;
use std::cmp::min;

/// Adds two costs, where INF absorbs everything and finite sums never reach INF
///
/// # Arguments
///
/// * `cost_a`: First one
/// * `cost_b`: Second one
///
/// returns: u32
///
/// # Examples
///
/// ```
/// use linkstate::topology::INF;
/// assert_eq!(linkstate::util::sum_inf(3, 4), 7);
/// assert_eq!(linkstate::util::sum_inf(3, INF), INF);
///
/// assert_eq!(linkstate::util::sum_inf(INF - 1, 5), INF - 1);
/// ```
pub fn sum_inf(cost_a: u32, cost_b: u32) -> u32 {
    if cost_a == INF || cost_b == INF {
        INF
    } else {
        min((INF - 1) as u64, cost_a as u64 + cost_b as u64) as u32
    }
}

