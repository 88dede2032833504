use std::io;
use std::io::Write;
use crate::utils::coding;

#[repr(u8)]
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
enum RecordType {
    Zero,
    Full,
    First,
    Middle,
    Last,
}

impl From<u8> for RecordType {
    fn from(num: u8) -> Self {
        match num {
            1 => RecordType::Full,
            2 => RecordType::First,
            3 => RecordType::Middle,
            4 => RecordType::Last,
            _ => RecordType::Zero,
        }
    }
}

#[cfg(not(test))]
const BLOCK_SIZE: usize = 32 * 1024;

#[cfg(test)]
const BLOCK_SIZE: usize = 32;

const RECORD_HEADER_SIZE: usize = 4 + 2 + 1;

fn corruption(reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.to_string())
}

/// Appends checksummed records, fragmenting them across fixed-size blocks.
pub struct Writer<W: Write> {
    block_offset: usize,
    file: W,
}

impl<W: Write> Writer<W> {
    pub fn new(file: W) -> Self {
        Self {
            block_offset: 0,
            file,
        }
    }

    pub fn add_record<S: AsRef<[u8]>>(&mut self, slice: S) -> io::Result<()> {
        let mut data = slice.as_ref();
        let mut begin = true;

        loop {
            let leftover = BLOCK_SIZE - self.block_offset;
            if leftover < RECORD_HEADER_SIZE {
                if leftover > 0 {
                    self.file.write_all(&[0; RECORD_HEADER_SIZE][..leftover])?;
                }
                self.block_offset = 0;
            }

            let avail = BLOCK_SIZE - self.block_offset - RECORD_HEADER_SIZE;
            let fragment_length = data.len().min(avail);

            let end = data.len() == fragment_length;
            let record_type = match (begin, end) {
                (true, true) => RecordType::Full,
                (true, false) => RecordType::First,
                (false, true) => RecordType::Last,
                (false, false) => RecordType::Middle,
            };

            self.emit_physical_record(record_type, &data[..fragment_length])?;
            data = &data[fragment_length..];
            begin = false;

            if end {
                break;
            }
        }

        self.file.flush()
    }

    pub fn into_inner(self) -> W {
        self.file
    }

    fn emit_physical_record(&mut self, record_type: RecordType, data: &[u8]) -> io::Result<()> {
        let mut record_header = [0u8; RECORD_HEADER_SIZE];
        let len = data.len();
        record_header[..4].copy_from_slice(&coding::encode_fixed32(crc32c::crc32c(data)));
        record_header[4] = (len & 0xff) as u8;
        record_header[5] = (len >> 8) as u8;
        record_header[6] = record_type as u8;

        self.file.write_all(&record_header)?;
        self.file.write_all(data)?;
        self.block_offset += RECORD_HEADER_SIZE + len;

        Ok(())
    }
}

/// Reads records written by [`Writer`] back out of an in-memory log.
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// `Ok(None)` at a clean end of log; checksum or framing problems are
    /// `InvalidData` errors.
    pub fn read_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut in_fragmented_record = false;
        let mut full_record = Vec::new();

        loop {
            let (record_type, fragment) = match self.read_physical_record()? {
                Some(record) => record,
                None if in_fragmented_record => return Err(corruption("partial record without end")),
                None => return Ok(None),
            };

            match record_type {
                RecordType::Full | RecordType::First if in_fragmented_record => {
                    return Err(corruption("partial record without end"));
                }
                RecordType::Middle | RecordType::Last if !in_fragmented_record => {
                    return Err(corruption("missing start of fragmented record"));
                }
                RecordType::Full | RecordType::Last => {
                    full_record.extend_from_slice(fragment);
                    return Ok(Some(full_record));
                }
                RecordType::First | RecordType::Middle => {
                    full_record.extend_from_slice(fragment);
                    in_fragmented_record = true;
                }
                RecordType::Zero => return Err(corruption("unknown record type")),
            }
        }
    }

    fn read_physical_record(&mut self) -> io::Result<Option<(RecordType, &'a [u8])>> {
        let data = self.data;
        loop {
            let leftover = BLOCK_SIZE - self.offset % BLOCK_SIZE;
            if leftover < RECORD_HEADER_SIZE {
                // skip the block trailer
                self.offset += leftover;
            }
            if self.offset + RECORD_HEADER_SIZE > data.len() {
                return Ok(None);
            }

            let record_header = &data[self.offset..self.offset + RECORD_HEADER_SIZE];
            let record_length = (record_header[4] as usize) | (record_header[5] as usize) << 8;
            let record_type = RecordType::from(record_header[6]);
            let begin = self.offset + RECORD_HEADER_SIZE;
            let end = begin + record_length;

            if record_type == RecordType::Zero && record_length == 0 {
                // preallocated zero padding
                self.offset += RECORD_HEADER_SIZE;
                continue;
            }
            if end > data.len() {
                return Err(corruption("truncated record"));
            }

            let expected_crc = coding::decode_fixed32(&record_header[..4]);
            if expected_crc != crc32c::crc32c(&data[begin..end]) {
                return Err(corruption("checksum mismatch"));
            }

            self.offset = end;
            return Ok(Some((record_type, &data[begin..end])));
        }
    }
}
