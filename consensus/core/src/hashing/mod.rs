pub mod sighash;
pub mod sighash_type;

/// Little endian and compact-size writers used by the wire codec and the
/// signature hash preimages.
pub trait WriterExtensions {
    fn write_u8(&mut self, element: u8) -> &mut Self;

    /// Writes the u32 as a little endian u8 array
    fn write_u32(&mut self, element: u32) -> &mut Self;

    /// Writes the u64 as a little endian u8 array
    fn write_u64(&mut self, element: u64) -> &mut Self;

    /// Writes `value` as a compact size: one byte below `0xfd`, otherwise a
    /// `0xfd`/`0xfe`/`0xff` marker followed by 2, 4 or 8 little endian bytes.
    fn write_var_int(&mut self, value: u64) -> &mut Self;

    fn write_len(&mut self, len: usize) -> &mut Self;

    fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self;

    /// Writes the number of bytes followed by the bytes themselves
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self;
}

/// Fails at compile time if `usize::MAX > u64::MAX`.
const _: usize = u64::MAX as usize - usize::MAX;

impl WriterExtensions for Vec<u8> {
    #[inline(always)]
    fn write_u8(&mut self, element: u8) -> &mut Self {
        self.push(element);
        self
    }

    #[inline(always)]
    fn write_u32(&mut self, element: u32) -> &mut Self {
        self.write_bytes(&element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u64(&mut self, element: u64) -> &mut Self {
        self.write_bytes(&element.to_le_bytes())
    }

    fn write_var_int(&mut self, value: u64) -> &mut Self {
        match value {
            0..=0xfc => self.write_u8(value as u8),
            0xfd..=0xffff => self.write_u8(0xfd).write_bytes(&(value as u16).to_le_bytes()),
            0x10000..=0xffff_ffff => self.write_u8(0xfe).write_u32(value as u32),
            _ => self.write_u8(0xff).write_u64(value),
        }
    }

    #[inline(always)]
    fn write_len(&mut self, len: usize) -> &mut Self {
        self.write_var_int(len as u64)
    }

    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.extend_from_slice(bytes);
        self
    }

    #[inline(always)]
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_len(bytes.len()).write_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_size() {
        let cases: [(u64, &[u8]); 7] = [
            (0, &[0x00]),
            (0xfc, &[0xfc]),
            (0xfd, &[0xfd, 0xfd, 0x00]),
            (0xffff, &[0xfd, 0xff, 0xff]),
            (0x10000, &[0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0xffff_ffff, &[0xfe, 0xff, 0xff, 0xff, 0xff]),
            (0x1_0000_0000, &[0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
        ];
        for (value, expected) in cases {
            let mut buf = vec![];
            buf.write_var_int(value);
            assert_eq!(buf, expected, "{value:#x}");
        }
    }
}
