//! Saturating clamp into the symmetric signed 16-bit range.

/// Largest magnitude of an output sample. `i16::MIN` is never produced.
pub const LIMIT: i64 = 32767;

#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn saturate16(x: i64) -> i16 {
    x.clamp(-LIMIT, LIMIT) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_values_at_the_edge_it_clamps_inward() {
        assert_eq!(saturate16(32767), 32767);
        assert_eq!(saturate16(32768), 32767);
        assert_eq!(saturate16(-32767), -32767);
        assert_eq!(saturate16(-32768), -32767);
    }

    #[test]
    fn given_values_far_out_of_range_it_saturates() {
        assert_eq!(saturate16(i64::MAX), 32767);
        assert_eq!(saturate16(i64::MIN), -32767);
        assert_eq!(saturate16(1 << 20), 32767);
    }

    #[test]
    fn given_values_inside_the_range_it_passes_them_through() {
        for x in [-32766, -1000, -1, 0, 1, 1000, 32766] {
            assert_eq!(i64::from(saturate16(x)), x);
        }
    }
}
