pub(crate) mod ec;
pub(crate) mod matrix;

pub use ec::CodewordPlan;

use crate::common::bitstream::BitStream;
use crate::common::codec::{build_data_codewords, resolve_mode, EncodedPayload, Mode};
use crate::common::error::{QRError, QRResult};
use crate::common::mask::{
    apply_mask_pattern, select_best_mask, FormatInfoWriter, MaskPattern,
};
use crate::common::metadata::{can_fit_payload, select_version_and_ec, Color, ECLevel, Version};
use matrix::Matrix;

// QR builder
//------------------------------------------------------------------------------

pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<u8>,
    ec_level: Option<ECLevel>,
    mode: Option<Mode>,
    min_version: u8,
    max_version: u8,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            version: None,
            ec_level: None,
            mode: None,
            min_version: 1,
            max_version: 40,
            mask: None,
        }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn version(&mut self, version: u8) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = Some(ec_level);
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn min_version(&mut self, min_version: u8) -> &mut Self {
        self.min_version = min_version;
        self
    }

    pub fn max_version(&mut self, max_version: u8) -> &mut Self {
        self.max_version = max_version;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!(
                "{{ Version: {v}, Ec level: {:?}, Mode: {:?} }}",
                self.ec_level, self.mode
            ),
            None => {
                format!("{{ Version: None, Ec level: {:?}, Mode: {:?} }}", self.ec_level, self.mode)
            }
        }
    }
}

impl QRBuilder<'_> {
    /// Runs the data pipeline only: mode resolution, version and EC level
    /// selection, data codewords, RS blocks and interleaving.
    pub fn prepare(&self) -> QRResult<CodewordPlan> {
        let mode = resolve_mode(self.text, self.mode)?;
        let payload = EncodedPayload::new(mode, self.text);
        let (ver, ecl) = self.resolve_version_and_ec(mode, payload.char_count())?;
        let data = build_data_codewords(&payload, ver, ecl)?;
        CodewordPlan::assemble(data, ver, ecl, mode)
    }

    pub fn build(&self) -> QRResult<QRCode> {
        let plan = self.prepare()?;
        let ver = plan.version();
        let ecl = plan.ec_level();

        let mut matrix = Matrix::new(ver);
        matrix.draw_all_function_patterns();

        let mut payload = BitStream::new(ver.total_codewords() << 3);
        payload.extend(plan.interleaved());
        matrix.draw_encoding_region(payload);

        let writer = FormatInfoWriter::new(ecl);
        let selection = match self.mask {
            Some(pattern) => apply_mask_pattern(&matrix, pattern, &writer),
            None => select_best_mask(&matrix, &writer),
        };

        Ok(QRCode {
            matrix: selection.matrix,
            ecl,
            mode: plan.mode(),
            mask: selection.pattern,
            format_bits: selection.format_bits,
            penalty: selection.penalty,
        })
    }

    // Validates the version options before any encoding work happens
    fn resolve_version_and_ec(&self, mode: Mode, len: usize) -> QRResult<(Version, ECLevel)> {
        let min = Version::new(self.min_version)?;
        let max = Version::new(self.max_version)?;
        if *min > *max {
            return Err(QRError::InvertedVersionRange(*min, *max));
        }

        match self.version {
            Some(v) => {
                let ver = Version::new(v)?;
                if ver < min || ver > max {
                    return Err(QRError::VersionOutsideRange { ver: v, min: *min, max: *max });
                }
                let ecl = self.ec_level.unwrap_or(ECLevel::L);
                if !can_fit_payload(mode, len, ver, ecl) {
                    return Err(QRError::CapacityOverflow { len, mode, ver, ecl });
                }
                Ok((ver, ecl))
            }
            None => select_version_and_ec(mode, len, min, max, self.ec_level),
        }
    }
}

// QR code output
//------------------------------------------------------------------------------

/// Finished symbol: the immutable module grid plus everything chosen while
/// encoding it. Renderers only need `width` and `dark`.
#[derive(Debug, Clone)]
pub struct QRCode {
    matrix: Matrix,
    ecl: ECLevel,
    mode: Mode,
    mask: MaskPattern,
    format_bits: u16,
    penalty: u32,
}

impl QRCode {
    pub fn version(&self) -> Version {
        self.matrix.version()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn format_bits(&self) -> u16 {
        self.format_bits
    }

    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    pub fn dark(&self, r: usize, c: usize) -> bool {
        matches!(*self.matrix.get(r as i16, c as i16), Color::Dark)
    }

    /// True for cells claimed by function patterns or format/version info.
    pub fn reserved(&self, r: usize, c: usize) -> bool {
        self.matrix.get(r as i16, c as i16).is_reserved()
    }

    pub fn count_dark_modules(&self) -> usize {
        self.matrix.count_dark_modules()
    }
}


#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn test_build_hello_v1l() {
        let qr = QRBuilder::new("HELLO")
            .version(1)
            .ec_level(ECLevel::L)
            .mode(Mode::Byte)
            .build()
            .unwrap();

        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.ec_level(), ECLevel::L);
        assert_eq!(qr.mode(), Mode::Byte);
        assert_eq!(qr.width(), 21);
        assert!(*qr.mask() < 8);
        assert!(qr.count_dark_modules() > 0);
        // Finder corners are always dark
        assert!(qr.dark(0, 0) && qr.dark(0, 20) && qr.dark(20, 0));
        assert!(qr.reserved(0, 0));
    }

    #[test]
    fn test_defaults_pick_smallest_fit() {
        let qr = QRBuilder::new("HELLO").build().unwrap();
        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.ec_level(), ECLevel::L);
        assert_eq!(qr.mode(), Mode::Alphanumeric);
    }

    #[test]
    fn test_fixed_mask_is_honored() {
        for id in 0..8 {
            let qr = QRBuilder::new("FIXED MASK").mask(MaskPattern::new(id)).build().unwrap();
            assert_eq!(*qr.mask(), id);
        }
    }

    #[test]
    fn test_format_bits_match_level_and_mask() {
        let qr = QRBuilder::new("FORMAT CHECK").ec_level(ECLevel::Q).build().unwrap();
        let expected = crate::common::metadata::format_info(ECLevel::Q, qr.mask());
        assert_eq!(qr.format_bits(), expected);
    }
}
