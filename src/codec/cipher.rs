use crate::XqfHeader;

/// Masks the derived key into the 32 byte stream
const STREAM_MASK: &[u8; 32] = b"[(C) Copyright Mr. Dong Shiwei.]";

/// Shared step of the offset derivation, in wrapping byte arithmetic
#[inline]
const fn square54_plus221(x: u8) -> u8 {
    x.wrapping_mul(x).wrapping_mul(54).wrapping_add(221)
}

/// Key material for obfuscated (version 11+) records.
///
/// Derived once from the first 16 bytes of a file. Records below version 11
/// use [KeyStream::identity] where every operation is a no-op.
///
/// ```
/// use xqf::KeyStream;
///
/// let mut tags = [0u8; 16];
/// tags[..3].copy_from_slice(b"XQ\x0b");
/// tags[13] = 1;
///
/// let keys = KeyStream::derive(&tags);
/// assert_eq!(keys.piece_offset(), 19);
/// assert_eq!(keys.comment_offset(), 768);
/// assert_eq!(keys, KeyStream::derive(&tags));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStream {
    stream: [u8; 32],
    piece_offset: u8,
    source_offset: u8,
    destination_offset: u8,
    comment_offset: u32,
}

impl KeyStream {
    /// Key material that leaves data untouched
    pub const fn identity() -> Self {
        KeyStream {
            stream: [0; 32],
            piece_offset: 0,
            source_offset: 0,
            destination_offset: 0,
            comment_offset: 0,
        }
    }

    /// Derives the key material from the first 16 bytes of a file
    pub fn derive(tags: &[u8; 16]) -> Self {
        let piece_offset = square54_plus221(tags[13]).wrapping_mul(tags[13]);
        let source_offset = square54_plus221(tags[14]).wrapping_mul(piece_offset);
        let destination_offset = square54_plus221(tags[15]).wrapping_mul(source_offset);
        let comment_offset = (u32::from(tags[12]) * 256 + u32::from(tags[13])) % 32000 + 767;

        let mask = tags[3];
        let key: [u8; 4] = std::array::from_fn(|i| tags[8 + i] | (tags[12 + i] & mask));
        let stream = std::array::from_fn(|i| key[i % 4] & STREAM_MASK[i]);

        KeyStream {
            stream,
            piece_offset,
            source_offset,
            destination_offset,
            comment_offset,
        }
    }

    /// The key material a header calls for: derived when the version is 11
    /// or later, otherwise the identity
    pub fn for_header(header: &XqfHeader) -> Self {
        if header.is_encrypted() {
            KeyStream::derive(header.tags())
        } else {
            KeyStream::identity()
        }
    }

    pub fn stream(&self) -> &[u8; 32] {
        &self.stream
    }

    /// Subtracted from every stored placement position
    pub fn piece_offset(&self) -> u8 {
        self.piece_offset
    }

    /// Subtracted from every stored move source
    pub fn source_offset(&self) -> u8 {
        self.source_offset
    }

    /// Subtracted from every stored move destination
    pub fn destination_offset(&self) -> u8 {
        self.destination_offset
    }

    /// Subtracted from every stored comment length
    pub fn comment_offset(&self) -> u32 {
        self.comment_offset
    }

    /// Starts a decryption pass at the first key byte
    pub fn decryptor(&self) -> Decryptor<'_> {
        Decryptor {
            stream: &self.stream,
            index: 0,
        }
    }
}

/// Running position within a [KeyStream]
///
/// Each decrypted byte consumes one key byte and the position wraps after
/// 32 bytes. The position carries over between calls, so one decryptor must
/// be used for the entire move stream.
///
/// ```
/// use xqf::KeyStream;
///
/// let keys = KeyStream::identity();
/// let mut decryptor = keys.decryptor();
/// assert_eq!(decryptor.decrypt(b"\x18\x20\x00\xff"), b"\x18\x20\x00\xff");
/// assert_eq!(decryptor.position(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Decryptor<'a> {
    stream: &'a [u8; 32],
    index: usize,
}

impl Decryptor<'_> {
    #[inline]
    fn next_key(&mut self) -> u8 {
        let key = self.stream[self.index];
        self.index = (self.index + 1) % self.stream.len();
        key
    }

    /// Index of the next key byte
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn decrypt(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|x| x.wrapping_sub(self.next_key())).collect()
    }

    pub fn decrypt_array<const N: usize>(&mut self, mut data: [u8; N]) -> [u8; N] {
        for x in data.iter_mut() {
            *x = x.wrapping_sub(self.next_key());
        }
        data
    }
}
