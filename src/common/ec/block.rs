use super::{rs_encode, MAX_BLOCK_SIZE};

// Codeword block
//------------------------------------------------------------------------------

/// One Reed-Solomon block: data codewords followed by parity codewords in a
/// single fixed buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Block {
    data: [u8; MAX_BLOCK_SIZE],
    // Block length
    len: usize,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], ec_len: usize) -> Self {
        let dlen = raw.len();
        let len = dlen + ec_len;
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block overflows max block size: {len}");

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        let ecc = rs_encode(raw, ec_len);
        data[dlen..len].copy_from_slice(&ecc);
        Self { data, len, dlen }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    pub fn data_len(&self) -> usize {
        self.dlen
    }

    pub fn full(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}
