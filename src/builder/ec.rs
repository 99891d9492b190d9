use crate::common::codec::Mode;
use crate::common::ec::Block;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version};

// Block splitting
//------------------------------------------------------------------------------

/// Slices the data codewords into RS blocks, shorter blocks first, and
/// computes each block's parity. Block sizes derive from the codeword
/// totals: `num_blocks - (total % num_blocks)` short blocks of
/// `floor(total / num_blocks)` codewords, the rest one codeword longer.
pub(crate) fn split_into_blocks(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<Vec<Block>> {
    let total_codewords = ver.total_codewords();
    let num_blocks = ver.num_blocks(ecl);
    let ec_len = ver.ecc_per_block(ecl);

    let num_long_blocks = total_codewords % num_blocks;
    let num_short_blocks = num_blocks - num_long_blocks;
    let short_data_len = total_codewords / num_blocks - ec_len;
    let long_data_len = short_data_len + 1;

    let expected = ver.data_codewords(ecl);
    let got = short_data_len * num_short_blocks + long_data_len * num_long_blocks;
    if got != expected {
        return Err(QRError::BlockSizeMismatch { got, expected });
    }
    debug_assert!(
        data.len() == expected,
        "Data len doesn't match total size of blocks: Data len {}, Total block size {expected}",
        data.len()
    );

    let mut blocks = Vec::with_capacity(num_blocks);
    let mut offset = 0;
    for i in 0..num_blocks {
        let dlen = if i < num_short_blocks { short_data_len } else { long_data_len };
        blocks.push(Block::new(&data[offset..offset + dlen], ec_len));
        offset += dlen;
    }
    Ok(blocks)
}

/// Column-major interleave: position by position across the blocks' data
/// codewords (long blocks keep emitting after short ones run dry), then the
/// same across their equal-length parity.
pub(crate) fn interleave(blocks: &[Block]) -> Vec<u8> {
    let total = blocks.iter().map(|b| b.len()).sum();
    let mut res = Vec::with_capacity(total);

    let max_data_len = blocks.iter().map(|b| b.data_len()).max().unwrap_or(0);
    for i in 0..max_data_len {
        for b in blocks {
            if i < b.data_len() {
                res.push(b.data()[i]);
            }
        }
    }

    let ec_len = blocks.first().map(|b| b.ec_len()).unwrap_or(0);
    for i in 0..ec_len {
        for b in blocks {
            res.push(b.ecc()[i]);
        }
    }
    res
}

// Codeword plan
//------------------------------------------------------------------------------

/// Output of the data pipeline: the padded data codewords, the RS blocks
/// and the interleaved transmission sequence, frozen once assembled.
#[derive(Debug, Clone)]
pub struct CodewordPlan {
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    data: Vec<u8>,
    blocks: Vec<Block>,
    interleaved: Vec<u8>,
}

impl CodewordPlan {
    pub(crate) fn assemble(data: Vec<u8>, ver: Version, ecl: ECLevel, mode: Mode) -> QRResult<Self> {
        let blocks = split_into_blocks(&data, ver, ecl)?;
        let interleaved = interleave(&blocks);
        debug_assert!(
            interleaved.len() == ver.total_codewords(),
            "Interleaved len doesn't match total codewords: Len {}, Total {}",
            interleaved.len(),
            ver.total_codewords()
        );
        Ok(Self { ver, ecl, mode, data, blocks, interleaved })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn data_codewords(&self) -> &[u8] {
        &self.data
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn ecc_codewords(&self) -> Vec<u8> {
        self.blocks.iter().flat_map(|b| b.ecc().to_vec()).collect()
    }

    pub fn interleaved(&self) -> &[u8] {
        &self.interleaved
    }
}
