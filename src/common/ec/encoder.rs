use super::galois::GF;
use super::MAX_EC_SIZE;

// Generator polynomial
//------------------------------------------------------------------------------

fn poly_mul(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut res = vec![0u8; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            res[i + j] = GF.add(res[i + j], GF.mul(x, y));
        }
    }
    res
}

/// Monic generator polynomial of degree `ec_len` with roots α^0..α^(ec_len - 1),
/// coefficients highest degree first.
pub fn generator_poly(ec_len: usize) -> Vec<u8> {
    debug_assert!(ec_len <= MAX_EC_SIZE, "Generator degree exceeds max ec size: {ec_len}");

    let mut g = vec![1u8];
    for i in 0..ec_len {
        g = poly_mul(&g, &[1, GF.exp(i)]);
    }
    g
}

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Systematic encoding by synthetic division: the remainder of
/// data(x) * x^ec_len divided by the generator polynomial is the parity
/// sequence appended after the data codewords.
pub fn rs_encode(data: &[u8], ec_len: usize) -> Vec<u8> {
    if ec_len == 0 {
        return Vec::new();
    }

    let gen = generator_poly(ec_len);
    let mut work = vec![0u8; data.len() + ec_len];
    work[..data.len()].copy_from_slice(data);

    for i in 0..data.len() {
        let coef = work[i];
        if coef == 0 {
            continue;
        }
        // The generator is monic, so this zeroes work[i] and folds the
        // scaled tail into positions i+1..=i+ec_len
        for (j, &g) in gen.iter().enumerate() {
            work[i + j] ^= GF.mul(coef, g);
        }
    }

    work.split_off(data.len())
}
