/// An ocean tide constituent recognised in the coefficient table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constituent {
    pub name: &'static str,
    pub doodson: f64,
    /// Multipliers of the Delaunay arguments (l, l', F, D, Omega).
    pub multipliers: [i8; 5],
}

pub const CONSTITUENT_COUNT: usize = 17;

/// Slot order is the table index.
pub const CONSTITUENTS: [Constituent; CONSTITUENT_COUNT] = [
    // long period
    Constituent { name: "Om1", doodson: 55.565, multipliers: [0, 0, 0, 0, 1] },
    Constituent { name: "Om2", doodson: 55.575, multipliers: [0, 0, 0, 0, 2] },
    Constituent { name: "Sa", doodson: 56.554, multipliers: [0, -1, 0, 0, 0] },
    Constituent { name: "Ssa", doodson: 57.555, multipliers: [0, 0, -2, 2, -2] },
    Constituent { name: "Mm", doodson: 65.455, multipliers: [-1, 0, 0, 0, 0] },
    Constituent { name: "Mf", doodson: 75.555, multipliers: [0, 0, -2, 0, -2] },
    Constituent { name: "Mtm", doodson: 85.455, multipliers: [-1, 0, -2, 0, -2] },
    Constituent { name: "Msqm", doodson: 93.555, multipliers: [0, 0, -2, -2, -2] },
    // diurnal
    Constituent { name: "Q1", doodson: 135.655, multipliers: [1, 0, 2, 0, 2] },
    Constituent { name: "O1", doodson: 145.555, multipliers: [0, 0, 2, 0, 2] },
    Constituent { name: "P1", doodson: 163.555, multipliers: [0, 0, 2, -2, 2] },
    Constituent { name: "K1", doodson: 165.555, multipliers: [0, 0, 0, 0, 0] },
    // semidiurnal
    Constituent { name: "2N2", doodson: 235.755, multipliers: [2, 0, 2, 0, 2] },
    Constituent { name: "N2", doodson: 245.655, multipliers: [1, 0, 2, 0, 2] },
    Constituent { name: "M2", doodson: 255.555, multipliers: [0, 0, 2, 0, 2] },
    Constituent { name: "S2", doodson: 273.555, multipliers: [0, 0, 2, -2, 2] },
    Constituent { name: "K2", doodson: 275.555, multipliers: [0, 0, 0, 0, 0] },
];

/// Inclusive Doodson number ranges (lo, hi, slot), searched in order.
pub const DOODSON_RANGES: [(f64, f64, usize); CONSTITUENT_COUNT] = [
    (55.563, 55.567, 0),
    (55.573, 55.577, 1),
    (56.552, 56.556, 2),
    (57.553, 57.557, 3),
    (65.453, 65.457, 4),
    (75.553, 75.557, 5),
    (85.453, 85.457, 6),
    (93.553, 93.557, 7),
    (135.653, 135.657, 8),
    (145.553, 145.557, 9),
    (163.553, 163.557, 10),
    (165.553, 165.557, 11),
    (235.753, 235.757, 12),
    (245.653, 245.657, 13),
    (255.553, 255.557, 14),
    (273.553, 273.557, 15),
    (275.553, 275.557, 16),
];

/// Slot of the constituent whose range contains `doodson`, if any.
pub fn classify(doodson: f64) -> Option<usize> {
    DOODSON_RANGES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&doodson))
        .map(|&(_, _, slot)| slot)
}

pub fn slot_of(name: &str) -> Option<usize> {
    CONSTITUENTS.iter().position(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_constituent_classifies_to_itself() {
        for (slot, c) in CONSTITUENTS.iter().enumerate() {
            assert_eq!(classify(c.doodson), Some(slot), "{}", c.name);
            assert_eq!(slot_of(c.name), Some(slot));
        }
    }

    #[test]
    fn ranges_are_ordered_and_disjoint() {
        for w in DOODSON_RANGES.windows(2) {
            assert!(w[0].0 < w[0].1);
            assert!(w[0].1 < w[1].0, "slot {} overlaps slot {}", w[0].2, w[1].2);
        }
        for (i, r) in DOODSON_RANGES.iter().enumerate() {
            assert_eq!(r.2, i);
            assert!((r.0..=r.1).contains(&CONSTITUENTS[i].doodson));
        }
    }

    #[test]
    fn unknown_waves_are_discarded() {
        // M4, MN4 and a minor side line
        assert_eq!(classify(455.555), None);
        assert_eq!(classify(445.655), None);
        assert_eq!(classify(255.545), None);
    }

    #[test]
    fn parsed_doodson_numbers_land_in_range() {
        let parsed: f64 = "145.555".parse().unwrap();
        assert_eq!(classify(parsed), slot_of("O1"));
        assert_eq!(classify(55.5655), slot_of("Om1"));
    }
}
