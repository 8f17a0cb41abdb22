use super::{header::write_header, moves::encode_moves, placement::encode_placement};
use crate::{Encoding, Error, GameRecord, GbkEncoding};
use std::{io::Write, path::Path};

/// Encodes [GameRecord]s as version 10 XQF files
///
/// Only the main line of the move tree is written: at each node the first
/// child is followed and other variations are dropped. Text that does not
/// fit a header field is cut at the field's capacity. Text the encoding can't
/// represent is an error.
///
/// ```
/// use xqf::{GameRecord, XqfWriter};
///
/// let record = GameRecord::new();
/// let data = XqfWriter::new().to_vec(&record)?;
/// assert_eq!(&data[..3], b"XQ\x0a");
/// assert_eq!(data.len(), 0x400 + 8);
/// # Ok::<(), xqf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct XqfWriter<E = GbkEncoding> {
    encoding: E,
}

impl XqfWriter<GbkEncoding> {
    /// A writer that stores text as GBK
    pub fn new() -> Self {
        XqfWriter::with_encoding(GbkEncoding::new())
    }
}

impl<E> XqfWriter<E>
where
    E: Encoding,
{
    pub fn with_encoding(encoding: E) -> Self {
        XqfWriter { encoding }
    }

    /// Encodes a record in memory
    pub fn to_vec(&self, record: &GameRecord) -> Result<Vec<u8>, Error> {
        let placement = encode_placement(&record.board)?;
        let mut out = write_header(record, &placement, &self.encoding)?;
        let moves = encode_moves(&record.root, &self.encoding, &mut out)?;
        log::debug!(
            "encoded {:?} record with {} moves in {} bytes",
            record.record_type,
            moves,
            out.len()
        );
        Ok(out)
    }

    /// Encodes a record to a writer. Nothing is written if the record can't
    /// be encoded.
    pub fn write<W>(&self, record: &GameRecord, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        let data = self.to_vec(record)?;
        writer.write_all(&data)?;
        Ok(())
    }

    /// Encodes a record to a file. The file is only created once the record
    /// has been encoded.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, record: &GameRecord) -> Result<(), Error> {
        let data = self.to_vec(record)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
