use crate::constants::NUM_GPS_SATS;
use crate::constants::PRN_CODE_LEN;
use crate::error::{AcqError, AcqResult};

// zero-based register stages feeding back into stage 1
const G1_TAP: [usize; 2] = [2, 9];
const G2_TAP: [usize; 6] = [1, 2, 5, 7, 8, 9];

// one-based G2 phase selector taps, IS-GPS-200 table 3-Ia
const PRN_TO_G2_TAP: [(usize, usize); NUM_GPS_SATS] = [
    (2, 6),
    (3, 7),
    (4, 8),
    (5, 9),
    (1, 9),
    (2, 10),
    (1, 8),
    (2, 9),
    (3, 10),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 9),
    (9, 10),
    (1, 4),
    (2, 5),
    (3, 6),
    (4, 7),
    (5, 8),
    (6, 9),
    (1, 3),
    (4, 6),
    (5, 7),
    (6, 8),
    (7, 9),
    (8, 10),
    (1, 6),
    (2, 7),
    (3, 8),
    (4, 9),
];

pub fn check_prn(prn: usize) -> AcqResult<()> {
    if (1..=NUM_GPS_SATS).contains(&prn) {
        Ok(())
    } else {
        Err(AcqError::InvalidArgument { prn })
    }
}

/// Generates the 1023 chips (0/1) of the L1 C/A code for `prn`.
pub fn gen_code(prn: usize) -> AcqResult<Vec<u8>> {
    check_prn(prn)?;

    let (tap_a, tap_b) = PRN_TO_G2_TAP[prn - 1];
    let mut g1 = [1u8; 10];
    let mut g2 = [1u8; 10];
    let mut g = Vec::with_capacity(PRN_CODE_LEN);

    for _i in 0..PRN_CODE_LEN {
        g.push(g1[9] ^ g2[tap_a - 1] ^ g2[tap_b - 1]);

        let v = G1_TAP.iter().fold(0, |acc, &x| acc ^ g1[x]);
        g1[9] = v;
        g1.rotate_right(1);

        let v = G2_TAP.iter().fold(0, |acc, &x| acc ^ g2[x]);
        g2[9] = v;
        g2.rotate_right(1);
    }
    Ok(g)
}

pub fn print_gold_codes() {
    println!("generating gold codes");
    for prn in 1..NUM_GPS_SATS + 1 {
        if let Ok(g) = gen_code(prn) {
            println!("  code-{:02}: {:?}", prn, &g[0..20]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // first 10 chips of each code in octal, IS-GPS-200 table 3-Ia
    const FIRST_10_CHIPS_OCTAL: [u16; NUM_GPS_SATS] = [
        0o1440, 0o1620, 0o1710, 0o1744, 0o1133, 0o1455, 0o1131, 0o1454, 0o1626, 0o1504, 0o1642,
        0o1750, 0o1764, 0o1772, 0o1775, 0o1776, 0o1156, 0o1467, 0o1633, 0o1715, 0o1746, 0o1763,
        0o1063, 0o1706, 0o1743, 0o1761, 0o1770, 0o1774, 0o1127, 0o1453, 0o1625, 0o1712,
    ];

    fn to_bipolar(code: &[u8]) -> Vec<i32> {
        code.iter().map(|&c| if c == 0 { -1 } else { 1 }).collect()
    }

    fn circular_correlation(a: &[i32], b: &[i32], lag: usize) -> i32 {
        let n = a.len();
        (0..n).map(|i| a[i] * b[(i + lag) % n]).sum()
    }

    #[test]
    fn test_first_chips_match_published_codes() {
        for prn in 1..=NUM_GPS_SATS {
            let code = gen_code(prn).unwrap();
            assert_eq!(code.len(), PRN_CODE_LEN);
            let head = code[..10].iter().fold(0u16, |acc, &c| (acc << 1) | c as u16);
            assert_eq!(head, FIRST_10_CHIPS_OCTAL[prn - 1], "prn {prn}: {head:o}");
        }
    }

    #[test]
    fn test_codes_are_balanced_and_distinct() {
        let codes: Vec<_> = (1..=NUM_GPS_SATS).map(|p| gen_code(p).unwrap()).collect();
        for code in &codes {
            assert!(code.iter().all(|&c| c <= 1));
            assert_eq!(code.iter().filter(|&&c| c == 1).count(), 512);
        }
        for i in 0..codes.len() {
            for j in i + 1..codes.len() {
                assert_ne!(codes[i], codes[j]);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(gen_code(17).unwrap(), gen_code(17).unwrap());
    }

    #[test]
    fn test_autocorrelation_peak() {
        for prn in [1, 5, 19, 32] {
            let c = to_bipolar(&gen_code(prn).unwrap());
            assert_eq!(circular_correlation(&c, &c, 0), PRN_CODE_LEN as i32);
            for lag in [1, 2, 100, 511, 1022] {
                assert!(circular_correlation(&c, &c, lag).abs() <= 65);
            }
        }
    }

    #[test]
    fn test_cross_correlation_bound() {
        for (a, b) in [(1, 2), (5, 17), (12, 31), (3, 29)] {
            let ca = to_bipolar(&gen_code(a).unwrap());
            let cb = to_bipolar(&gen_code(b).unwrap());
            let worst = (0..PRN_CODE_LEN)
                .map(|lag| circular_correlation(&ca, &cb, lag).abs())
                .max()
                .unwrap();
            assert!(worst <= 65, "prn {a} vs {b}: {worst}");
        }
    }

    #[test]
    fn test_out_of_range_prn() {
        for prn in [0, 33, 100] {
            assert!(matches!(
                gen_code(prn),
                Err(AcqError::InvalidArgument { prn: p }) if p == prn
            ));
        }
    }
}
