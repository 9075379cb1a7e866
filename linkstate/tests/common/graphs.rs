use crate::common::virtual_network::VirtualNetwork;

pub const LINE: (&[&str], &[(i32, &str, &str, u32)]) = (
    &["A", "B", "C"],
    &[(0, "A", "B", 1), (1, "B", "C", 1)],
);

pub const TRIANGLE: (&[&str], &[(i32, &str, &str, u32)]) = (
    &["A", "B", "C"],
    &[(0, "A", "B", 1), (1, "B", "C", 1), (2, "A", "C", 1)],
);

pub const SIMPLE_WEIGHTED: (&[&str], &[(i32, &str, &str, u32)]) = (
    &["1", "2", "3", "4", "5"],
    &[
        (0, "1", "2", 2),
        (1, "1", "3", 1),
        (2, "2", "3", 4),
        (3, "2", "4", 5),
        (4, "3", "4", 100),
        (5, "3", "5", 8),
        (6, "4", "5", 1),
    ],
);

pub const RING: (&[&str], &[(i32, &str, &str, u32)]) = (
    &["r0", "r1", "r2", "r3", "r4", "r5"],
    &[
        (0, "r0", "r1", 3),
        (1, "r1", "r2", 1),
        (2, "r2", "r3", 4),
        (3, "r3", "r4", 1),
        (4, "r4", "r5", 5),
        (5, "r5", "r0", 9),
    ],
);

pub const STAR: (&[&str], &[(i32, &str, &str, u32)]) = (
    &["hub", "s1", "s2", "s3", "s4"],
    &[
        (0, "hub", "s1", 1),
        (1, "hub", "s2", 2),
        (2, "hub", "s3", 3),
        (3, "hub", "s4", 4),
        (4, "s1", "s2", 10),
    ],
);

pub const SPLIT: (&[&str], &[(i32, &str, &str, u32)]) = (
    &["w", "x", "y", "z"],
    &[(0, "w", "x", 1), (1, "y", "z", 1)],
);

pub fn vnet_line() -> VirtualNetwork {
    VirtualNetwork::create(LINE.0, LINE.1)
}

pub fn vnet_triangle() -> VirtualNetwork {
    VirtualNetwork::create(TRIANGLE.0, TRIANGLE.1)
}

pub fn vnet_simple_weighted() -> VirtualNetwork {
    VirtualNetwork::create(SIMPLE_WEIGHTED.0, SIMPLE_WEIGHTED.1)
}
