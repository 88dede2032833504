pub fn encode_fixed32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

pub fn decode_fixed32(src: &[u8]) -> u32 {
    let mut bytes = [0; 4];
    bytes.copy_from_slice(&src[..4]);
    u32::from_le_bytes(bytes)
}

pub fn put_variant64_into_vec(dest: &mut Vec<u8>, value: u64) {
    const MSB: u64 = 128;
    let mut val = value;
    while val >= MSB {
        dest.push((val | MSB) as u8);
        val >>= 7;
    }
    dest.push(val as u8);
}

/// Returns the decoded value and the number of bytes consumed, `None` when
/// the input ends mid-number or the number overflows.
pub fn decode_variant64(src: &[u8]) -> Option<(u64, usize)> {
    let mut result: u64 = 0;
    for (index, &byte) in src.iter().enumerate().take(10) {
        let shift = 7 * index as u32;
        result |= ((byte & 0x7f) as u64) << shift;
        if byte & 128 == 0 {
            return Some((result, index + 1));
        }
    }
    None
}

pub fn put_length_prefixed_slice(dest: &mut Vec<u8>, slice: &[u8]) {
    put_variant64_into_vec(dest, slice.len() as u64);
    dest.extend_from_slice(slice);
}

pub fn get_length_prefixed_slice(input: &[u8]) -> Option<(&[u8], usize)> {
    let (length, width) = decode_variant64(input)?;
    let end = width.checked_add(usize::try_from(length).ok()?)?;
    if end > input.len() {
        return None;
    }
    Some((&input[width..end], end))
}

#[cfg(test)]
mod tests {
    use super::{
        decode_fixed32, decode_variant64, encode_fixed32, get_length_prefixed_slice,
        put_length_prefixed_slice, put_variant64_into_vec,
    };

    #[test]
    fn test_fixed32() {
        let dest = encode_fixed32(0x12fe34dc);
        assert_eq!(dest, [0xdc, 0x34, 0xfe, 0x12]);
        assert_eq!(decode_fixed32(&dest), 0x12fe34dc);
    }

    #[test]
    fn test_variant64() {
        let mut dest = Vec::new();
        put_variant64_into_vec(&mut dest, 128);
        assert_eq!(dest, [0x80, 0x01]);
        assert_eq!(decode_variant64(&dest), Some((128, 2)));

        dest.clear();
        put_variant64_into_vec(&mut dest, 1234567890);
        assert_eq!(dest, [0xd2, 0x85, 0xd8, 0xcc, 0x04]);
        assert_eq!(decode_variant64(&dest), Some((1234567890, 5)));

        assert_eq!(decode_variant64(&[0x80, 0x80]), None);
    }

    #[test]
    fn test_length_prefixed_slice() {
        let mut dest = Vec::new();
        put_length_prefixed_slice(&mut dest, b"leveldb");
        dest.push(0xff);
        assert_eq!(get_length_prefixed_slice(&dest), Some((&b"leveldb"[..], 8)));
        assert_eq!(get_length_prefixed_slice(&dest[..4]), None);
    }
}
