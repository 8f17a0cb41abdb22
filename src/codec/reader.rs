use super::{header::read_metadata, moves::decode_moves, placement::decode_placement};
use crate::{Encoding, Error, ErrorKind, GameRecord, GbkEncoding, KeyStream, MoveNode, XqfHeader};
use std::{fs::File, io::Read, path::Path};

/// Inputs must be smaller than this many bytes (500 KiB)
pub const MAX_FILE_LEN: usize = 500 * 1024;

/// Decodes XQF files into [GameRecord]s
///
/// ```
/// use xqf::{GameRecord, XqfReader, XqfWriter};
///
/// let mut record = GameRecord::new();
/// record.metadata.title = String::from("中炮对屏风马");
/// let data = XqfWriter::new().to_vec(&record)?;
///
/// let decoded = XqfReader::new().read(&data)?;
/// assert_eq!(decoded, record);
/// # Ok::<(), xqf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct XqfReader<E = GbkEncoding> {
    max_len: usize,
    encoding: E,
}

impl XqfReader<GbkEncoding> {
    /// A reader for GBK encoded files of up to 500 KiB
    pub fn new() -> Self {
        XqfReader::builder().build()
    }

    /// Customize the reader
    pub fn builder() -> XqfReaderBuilder<GbkEncoding> {
        XqfReaderBuilder::with_encoding(GbkEncoding::new())
    }
}

impl Default for XqfReader<GbkEncoding> {
    fn default() -> Self {
        XqfReader::new()
    }
}

impl<E> XqfReader<E>
where
    E: Encoding,
{
    fn check_len(&self, len: u64) -> Result<(), Error> {
        if len >= self.max_len as u64 {
            return Err(Error::new(ErrorKind::TooLarge {
                len,
                max: self.max_len,
            }));
        }
        Ok(())
    }

    /// Decodes a complete record
    pub fn read(&self, data: &[u8]) -> Result<GameRecord, Error> {
        let mut record = GameRecord::new();
        self.read_into(data, &mut record)?;
        Ok(record)
    }

    /// Decodes into an existing record. On error, the record is left as it
    /// was.
    pub fn read_into(&self, data: &[u8], record: &mut GameRecord) -> Result<(), Error> {
        self.check_len(data.len() as u64)?;

        let header = XqfHeader::from_slice(data)?;
        let metadata = read_metadata(data, &self.encoding)?;
        let keys = KeyStream::for_header(&header);
        let board = decode_placement(data, &header, &keys)?;

        let mut root = MoveNode::root();
        let moves = decode_moves(data, &header, &keys, &self.encoding, &mut root)?;

        log::debug!(
            "decoded v{} {:?} record with {} moves",
            header.version(),
            header.record_type(),
            moves
        );

        record.metadata = metadata;
        record.result = header.result();
        record.record_type = header.record_type();
        record.board = board;
        record.root = root;
        Ok(())
    }

    /// Reads and decodes a file. The length is checked before any data is
    /// read.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<GameRecord, Error> {
        let mut file = File::open(path)?;
        let len = file.metadata()?.len();
        self.check_len(len)?;

        let mut data = Vec::with_capacity(len as usize);
        file.read_to_end(&mut data)?;
        self.read(&data)
    }
}

/// Construct a customized [XqfReader]
///
/// ```
/// use xqf::{ErrorKind, Utf8Encoding, XqfReader, XqfReaderBuilder};
///
/// let reader = XqfReaderBuilder::with_encoding(Utf8Encoding::new())
///     .max_len(16)
///     .build();
///
/// let err = reader.read(&[0u8; 16]).unwrap_err();
/// assert!(matches!(err.kind(), ErrorKind::TooLarge { len: 16, max: 16 }));
/// ```
#[derive(Debug, Clone)]
pub struct XqfReaderBuilder<E> {
    max_len: usize,
    encoding: E,
}

impl<E> XqfReaderBuilder<E>
where
    E: Encoding + Clone,
{
    /// Create a new builder instance
    pub fn with_encoding(encoding: E) -> Self {
        XqfReaderBuilder {
            max_len: MAX_FILE_LEN,
            encoding,
        }
    }

    /// Inputs of this many bytes or more are rejected before parsing
    pub fn max_len(&mut self, max_len: usize) -> &mut Self {
        self.max_len = max_len;
        self
    }

    pub fn build(&self) -> XqfReader<E> {
        XqfReader {
            max_len: self.max_len,
            encoding: self.encoding.clone(),
        }
    }
}
