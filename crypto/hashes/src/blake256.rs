//! BLAKE-256, the 14 round SHA-3 finalist used by Decred for checksums and key hashes.

const BLOCK_SIZE: usize = 64;
const ROUNDS: usize = 14;
/// Offset of the length field in the final block.
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

const IV: [u32; 8] = [0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19];

const C: [u32; 16] = [
    0x243f6a88, 0x85a308d3, 0x13198a2e, 0x03707344, 0xa4093822, 0x299f31d0, 0x082efa98, 0xec4e6c89, 0x452821e6, 0x38d01377,
    0xbe5466cf, 0x34e90c6c, 0xc0ac29b7, 0xc97c50dd, 0x3f84d5b5, 0xb5470917,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// Streaming BLAKE-256 hasher (unsalted).
#[derive(Clone)]
pub struct Blake256 {
    h: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    /// Message length in bytes.
    length: u64,
}

impl Default for Blake256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Blake256 {
    pub fn new() -> Self {
        Self { h: IV, buffer: [0; BLOCK_SIZE], buffered: 0, length: 0 }
    }

    pub fn digest(data: &[u8]) -> [u8; 32] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    pub fn update(&mut self, mut data: &[u8]) -> &mut Self {
        while !data.is_empty() {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            self.length += take as u64;
            data = &data[take..];
            if self.buffered == BLOCK_SIZE {
                let block = self.buffer;
                self.compress(&block, self.length * 8);
                self.buffered = 0;
            }
        }
        self
    }

    pub fn finalize(mut self) -> [u8; 32] {
        let bit_len = (self.length * 8).to_be_bytes();
        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;

        // a block carrying no message bits is compressed with a zero counter
        if self.buffered < LENGTH_OFFSET {
            block[LENGTH_OFFSET - 1] |= 0x01;
            block[LENGTH_OFFSET..].copy_from_slice(&bit_len);
            let counter = if self.buffered == 0 { 0 } else { self.length * 8 };
            self.compress(&block, counter);
        } else {
            self.compress(&block, self.length * 8);
            let mut last = [0u8; BLOCK_SIZE];
            last[LENGTH_OFFSET - 1] = 0x01;
            last[LENGTH_OFFSET..].copy_from_slice(&bit_len);
            self.compress(&last, 0);
        }

        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.h) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    fn compress(&mut self, block: &[u8; BLOCK_SIZE], counter: u64) {
        let mut m = [0u32; 16];
        for (word, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let (t0, t1) = (counter as u32, (counter >> 32) as u32);

        let mut v = [0u32; 16];
        v[..8].copy_from_slice(&self.h);
        v[8..12].copy_from_slice(&C[..4]);
        v[12] = t0 ^ C[4];
        v[13] = t0 ^ C[5];
        v[14] = t1 ^ C[6];
        v[15] = t1 ^ C[7];

        for round in 0..ROUNDS {
            let s = &SIGMA[round % 10];
            g(&mut v, &m, s, 0, [0, 4, 8, 12]);
            g(&mut v, &m, s, 1, [1, 5, 9, 13]);
            g(&mut v, &m, s, 2, [2, 6, 10, 14]);
            g(&mut v, &m, s, 3, [3, 7, 11, 15]);
            g(&mut v, &m, s, 4, [0, 5, 10, 15]);
            g(&mut v, &m, s, 5, [1, 6, 11, 12]);
            g(&mut v, &m, s, 6, [2, 7, 8, 13]);
            g(&mut v, &m, s, 7, [3, 4, 9, 14]);
        }

        for i in 0..8 {
            self.h[i] ^= v[i] ^ v[i + 8];
        }
    }
}

#[inline(always)]
fn g(v: &mut [u32; 16], m: &[u32; 16], s: &[usize; 16], i: usize, [a, b, c, d]: [usize; 4]) {
    let (x, y) = (s[2 * i], s[2 * i + 1]);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[x] ^ C[y]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(12);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[y] ^ C[x]);
    v[d] = (v[d] ^ v[a]).rotate_right(8);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(7);
}
