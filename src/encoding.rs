use std::borrow::Cow;

/// A text encoding used for the header fields and move comments
///
/// XQF files were written by Windows tools in the simplified Chinese code
/// page, so [GbkEncoding] is what the reader and writer use unless told
/// otherwise.
///
/// It is heavily encouraged that encoding implementations are marked as
/// `Copy` as they are passed around by value.
pub trait Encoding {
    /// Decodes bytes into a utf-8 string, allocating if necessary.
    /// Malformed sequences are replaced with U+FFFD.
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str>;

    /// Encodes a utf-8 string into bytes of this encoding. Returns `None`
    /// when the string holds characters the encoding can't represent.
    fn encode<'a>(&self, data: &'a str) -> Option<Cow<'a, [u8]>>;
}

/// The GBK code page
///
/// ```
/// use xqf::{Encoding, GbkEncoding};
///
/// let encoding = GbkEncoding::new();
/// assert_eq!(encoding.decode(b"Common Sense"), "Common Sense");
/// assert_eq!(encoding.decode(b"\xba\xec\xcf\xc8"), "红先");
/// assert_eq!(encoding.encode("红先").as_deref(), Some(&b"\xba\xec\xcf\xc8"[..]));
/// assert_eq!(encoding.encode("😀"), None);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct GbkEncoding;

impl GbkEncoding {
    /// Creates a new GBK codec
    pub fn new() -> Self {
        GbkEncoding
    }
}

impl Encoding for GbkEncoding {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        let (cow, _) = encoding_rs::GBK.decode_without_bom_handling(data);
        cow
    }

    fn encode<'a>(&self, data: &'a str) -> Option<Cow<'a, [u8]>> {
        let (cow, _, unmappable) = encoding_rs::GBK.encode(data);
        if unmappable {
            None
        } else {
            Some(cow)
        }
    }
}

/// Utf-8 text, for records produced by tools that ignore the code page
///
/// ```
/// use xqf::{Encoding, Utf8Encoding};
///
/// let encoding = Utf8Encoding::new();
/// assert_eq!(encoding.decode(b"J\xc3\xa5hk\xc3\xa5m\xc3\xa5hkke"), "Jåhkåmåhkke");
/// assert_eq!(encoding.decode(b"hi\xff"), "hi\u{fffd}");
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Utf8Encoding;

impl Utf8Encoding {
    /// Creates a new utf8 codec
    pub fn new() -> Self {
        Utf8Encoding
    }
}

impl Encoding for Utf8Encoding {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        String::from_utf8_lossy(data)
    }

    fn encode<'a>(&self, data: &'a str) -> Option<Cow<'a, [u8]>> {
        Some(Cow::Borrowed(data.as_bytes()))
    }
}

impl<T: Encoding + ?Sized> Encoding for &'_ T {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        (**self).decode(data)
    }

    fn encode<'a>(&self, data: &'a str) -> Option<Cow<'a, [u8]>> {
        (**self).encode(data)
    }
}

impl<T: Encoding + ?Sized> Encoding for Box<T> {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        (**self).decode(data)
    }

    fn encode<'a>(&self, data: &'a str) -> Option<Cow<'a, [u8]>> {
        (**self).encode(data)
    }
}
