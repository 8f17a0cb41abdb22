use crate::Error;

/// Borrow `len` bytes at `offset`, erroring with the offset where the data
/// ran out
#[inline]
pub(crate) fn get_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| Error::eof(data.len().min(offset)))
}

/// A const generic version of [get_slice]
#[inline]
pub(crate) fn get_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], Error> {
    data.get(offset..)
        .and_then(|d| d.first_chunk::<N>())
        .copied()
        .ok_or_else(|| Error::eof(data.len().min(offset)))
}

#[inline]
pub(crate) fn get_u8(data: &[u8], offset: usize) -> Result<u8, Error> {
    data.get(offset).copied().ok_or_else(|| Error::eof(data.len()))
}

#[inline]
pub(crate) fn le_u32(data: [u8; 4]) -> u32 {
    u32::from_le_bytes(data)
}
