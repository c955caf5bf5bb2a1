//! Standard DCs by level.

/// DC for levels 0 through 20.
const DC_BY_LEVEL: [i32; 21] = [
    14, 15, 16, 18, 19, 20, 22, 23, 24, 26, 27, 28, 30, 31, 32, 34, 35, 36, 38, 39, 40,
];

/// The standard DC for a level. Levels outside 0..=20 use the nearest edge.
pub fn dc_for_level(level: i32) -> i32 {
    DC_BY_LEVEL[level.clamp(0, 20) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(dc_for_level(0), 14);
        assert_eq!(dc_for_level(1), 15);
        assert_eq!(dc_for_level(5), 20);
        assert_eq!(dc_for_level(12), 30);
        assert_eq!(dc_for_level(20), 40);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(dc_for_level(-3), 14);
        assert_eq!(dc_for_level(25), 40);
    }
}
