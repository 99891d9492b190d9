use std::cmp::min;
use std::fmt::{Display, Error, Formatter};
use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Format info indicator bits. These are fixed by the BCH table of the
    /// standard, not the ordinal value.
    pub fn indicator(&self) -> u16 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_str(match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        })
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub fn new(version: u8) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    pub(crate) fn new_unchecked(version: u8) -> Self {
        debug_assert!((1..=40).contains(&version), "Invalid version: {version}");
        Self(version)
    }

    pub fn width(&self) -> usize {
        17 + 4 * self.0 as usize
    }

    pub fn alignment_coords(&self) -> &'static [i16] {
        ALIGNMENT_COORDS[self.0 as usize]
    }

    pub fn total_codewords(&self) -> usize {
        TOTAL_CODEWORDS[self.0 as usize]
    }

    pub fn ecc_per_block(&self, ecl: ECLevel) -> usize {
        ECC_PER_BLOCK[ecl as usize][self.0 as usize]
    }

    pub fn num_blocks(&self, ecl: ECLevel) -> usize {
        NUM_BLOCKS[ecl as usize][self.0 as usize]
    }

    pub fn data_codewords(&self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.num_blocks(ecl)
    }

    pub fn data_bit_capacity(&self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn mode_bits(&self) -> usize {
        4
    }

    pub fn char_cnt_bits(&self, mode: Mode) -> usize {
        match mode {
            Mode::Alphanumeric => match self.0 {
                1..=9 => 9,
                10..=26 => 11,
                _ => 13,
            },
            Mode::Byte => {
                if self.0 <= 9 {
                    8
                } else {
                    16
                }
            }
        }
    }

    /// Largest count representable by the char count indicator.
    pub fn char_count_limit(&self, mode: Mode) -> usize {
        (1 << self.char_cnt_bits(mode)) - 1
    }

    pub fn needs_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// BCH(18, 6) encoded version information word: version number in the
    /// high 6 bits, remainder in the low 12. Unlike format info there is no
    /// output mask.
    pub fn info(&self) -> QRResult<u32> {
        if !self.needs_version_info() {
            return Err(QRError::VersionInfoUndefined(*self));
        }

        let ver = self.0 as u32;
        let mut value = ver << 12;
        for bit in (12..=17).rev() {
            if value >> bit & 1 == 1 {
                value ^= VERSION_INFO_GENERATOR << (bit - 12);
            }
        }
        Ok((ver << 12) | (value & 0xFFF))
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

// Capacity queries
//------------------------------------------------------------------------------

/// Fails closed: false when the count indicator cannot represent the length,
/// or when header + payload + terminator + byte alignment overrun the data
/// codeword capacity.
pub fn can_fit_payload(mode: Mode, len: usize, ver: Version, ecl: ECLevel) -> bool {
    if len > ver.char_count_limit(mode) {
        return false;
    }

    let capacity = ver.data_bit_capacity(ecl);
    let mut used = ver.mode_bits() + ver.char_cnt_bits(mode) + mode.encoded_len(len);
    if used > capacity {
        return false;
    }

    used += min(4, capacity - used);
    if used & 7 != 0 {
        used += 8 - (used & 7);
    }
    used <= capacity
}

/// Walks versions in ascending order within the bounds and EC levels in
/// order L, M, Q, H (or only the requested one), returning the first
/// combination that fits.
pub fn select_version_and_ec(
    mode: Mode,
    len: usize,
    min_ver: Version,
    max_ver: Version,
    ecl: Option<ECLevel>,
) -> QRResult<(Version, ECLevel)> {
    if *min_ver > *max_ver {
        return Err(QRError::InvertedVersionRange(*min_ver, *max_ver));
    }

    let levels = match ecl {
        Some(l) => vec![l],
        None => EC_LEVELS.to_vec(),
    };
    for v in *min_ver..=*max_ver {
        let ver = Version::new_unchecked(v);
        for &l in &levels {
            if can_fit_payload(mode, len, ver, l) {
                return Ok((ver, l));
            }
        }
    }
    Err(QRError::NoFittingVersion { len, mode, min: min_ver, max: max_ver })
}

// Format information
//------------------------------------------------------------------------------

/// BCH(15, 5) encoded format word for an EC level and mask pattern, XORed
/// with the fixed output mask.
pub fn format_info(ecl: ECLevel, pattern: MaskPattern) -> u16 {
    let data = (ecl.indicator() << 3) | *pattern as u16;
    let mut value = data << 10;
    for bit in (10..=14).rev() {
        if value >> bit & 1 == 1 {
            value ^= FORMAT_INFO_GENERATOR << (bit - 10);
        }
    }
    ((data << 10) | (value & 0x3FF)) ^ FORMAT_INFO_MASK
}

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(Version::new(1).unwrap().width(), 21);
        assert_eq!(Version::new(7).unwrap().width(), 45);
        assert_eq!(Version::new(40).unwrap().width(), 177);
    }

    #[test]
    fn test_version_bounds() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion(0)));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion(41)));
        assert!(Version::new(40).is_ok());
    }

    #[test]
    fn test_codeword_tables_are_consistent() {
        for v in 1..=40 {
            let ver = Version::new_unchecked(v);
            for ecl in EC_LEVELS {
                assert_eq!(
                    ver.data_codewords(ecl) + ver.ecc_per_block(ecl) * ver.num_blocks(ecl),
                    ver.total_codewords(),
                    "version {v} level {ecl}"
                );
            }
        }
    }

    #[test]
    fn test_alignment_coords() {
        assert!(Version::new_unchecked(1).alignment_coords().is_empty());
        assert_eq!(Version::new_unchecked(2).alignment_coords(), [6, 18]);
        assert_eq!(Version::new_unchecked(7).alignment_coords(), [6, 22, 38]);
        assert_eq!(
            Version::new_unchecked(40).alignment_coords(),
            [6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test_case(1, Mode::Byte, 8)]
    #[test_case(9, Mode::Byte, 8)]
    #[test_case(10, Mode::Byte, 16)]
    #[test_case(40, Mode::Byte, 16)]
    #[test_case(1, Mode::Alphanumeric, 9)]
    #[test_case(9, Mode::Alphanumeric, 9)]
    #[test_case(10, Mode::Alphanumeric, 11)]
    #[test_case(26, Mode::Alphanumeric, 11)]
    #[test_case(27, Mode::Alphanumeric, 13)]
    #[test_case(40, Mode::Alphanumeric, 13)]
    fn test_char_cnt_bits(version: u8, mode: Mode, exp: usize) {
        assert_eq!(Version::new_unchecked(version).char_cnt_bits(mode), exp);
    }

    #[test]
    fn test_can_fit_payload_boundary() {
        let ver = Version::new_unchecked(1);
        // 17 bytes end exactly at the version 1-L capacity
        assert!(can_fit_payload(Mode::Byte, 17, ver, ECLevel::L));
        assert!(!can_fit_payload(Mode::Byte, 18, ver, ECLevel::L));
        // Count indicator limit fails closed
        assert!(!can_fit_payload(Mode::Byte, 256, ver, ECLevel::L));
    }

    #[test_case(17, None, 1, ECLevel::L)]
    #[test_case(18, None, 2, ECLevel::L)]
    #[test_case(17, Some(ECLevel::H), 3, ECLevel::H)]
    #[test_case(2953, None, 40, ECLevel::L)]
    fn test_select_version_and_ec(len: usize, ecl: Option<ECLevel>, exp_ver: u8, exp_ecl: ECLevel) {
        let min = Version::new_unchecked(1);
        let max = Version::new_unchecked(40);
        let (ver, l) = select_version_and_ec(Mode::Byte, len, min, max, ecl).unwrap();
        assert_eq!(*ver, exp_ver);
        assert_eq!(l, exp_ecl);
    }

    #[test]
    fn test_select_version_and_ec_no_fit() {
        let min = Version::new_unchecked(1);
        let max = Version::new_unchecked(40);
        let res = select_version_and_ec(Mode::Byte, 2954, min, max, None);
        assert_eq!(
            res,
            Err(QRError::NoFittingVersion { len: 2954, mode: Mode::Byte, min, max })
        );
    }

    #[test]
    fn test_select_version_and_ec_inverted_range() {
        let min = Version::new_unchecked(9);
        let max = Version::new_unchecked(3);
        let res = select_version_and_ec(Mode::Byte, 1, min, max, None);
        assert_eq!(res, Err(QRError::InvertedVersionRange(9, 3)));
    }

    #[test]
    fn test_format_info_known_words() {
        assert_eq!(format_info(ECLevel::L, MaskPattern::new(0)), 0b111011111000100);
        assert_eq!(format_info(ECLevel::L, MaskPattern::new(5)), 0b110001100011000);
        assert_eq!(format_info(ECLevel::M, MaskPattern::new(0)), 0b101010000010010);
        assert_eq!(format_info(ECLevel::H, MaskPattern::new(7)), 0b000100000111011);
    }

    #[test]
    fn test_format_info_words_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for ecl in EC_LEVELS {
            for m in 0..8 {
                assert!(seen.insert(format_info(ecl, MaskPattern::new(m))));
            }
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn test_version_info_known_word() {
        let word = Version::new_unchecked(7).info().unwrap();
        assert_eq!(word, 0b000111110010010100);
    }

    #[test]
    fn test_version_info_satisfies_bch() {
        for v in 7..=40u8 {
            let word = Version::new_unchecked(v).info().unwrap();
            assert_eq!(word >> 12, v as u32, "version {v}");
            let mut rem = word;
            for bit in (12..=17).rev() {
                if rem >> bit & 1 == 1 {
                    rem ^= VERSION_INFO_GENERATOR << (bit - 12);
                }
            }
            assert_eq!(rem & 0xFFF, 0, "version {v}");
        }
    }

    #[test]
    fn test_version_info_undefined_below_7() {
        for v in 1..7u8 {
            let ver = Version::new_unchecked(v);
            assert_eq!(ver.info(), Err(QRError::VersionInfoUndefined(ver)));
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const MAX_QR_WIDTH: usize = 177;

pub const MAX_GRID_AREA: usize = MAX_QR_WIDTH * MAX_QR_WIDTH;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_INFO_GENERATOR: u16 = 0b10100110111;

const FORMAT_INFO_MASK: u16 = 0b101010000010010;

const VERSION_INFO_GENERATOR: u32 = 0b1111100100101;

pub static EC_LEVELS: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

/// Format info bit positions, most significant bit first. The main copy
/// wraps around the top-left finder; the side copy runs up the bottom rows
/// of column 8 and then right along row 8. Negative coordinates wrap from
/// the far edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

/// Version info bit positions, most significant bit first: bit i of the
/// word lands at (i / 3, width - 11 + i % 3) beside the top-right finder,
/// and at the transposed cell beside the bottom-left finder.
pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

static TOTAL_CODEWORDS: [usize; 41] = [
    0, 26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761,
    2876, 3034, 3196, 3362, 3532, 3706,
];

// Indexed by [EC level][version]; the level order is L, M, Q, H
static ECC_PER_BLOCK: [[usize; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_BLOCKS: [[usize; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

static ALIGNMENT_COORDS: [&[i16]; 41] = [
    &[],
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 26, 54, 82, 110, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];
