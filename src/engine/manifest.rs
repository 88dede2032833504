use std::{fs, io};
use std::path::Path;
use crate::logs::{file, filename, wal, MANIFEST_FILE_NUMBER};
use crate::utils::coding;

pub const COMPARATOR_NAME: &str = "leveldb.BytewiseComparator";

const TAG_COMPARATOR: u64 = 1;
const TAG_LOG_NUMBER: u64 = 2;
const TAG_NEXT_FILE_NUMBER: u64 = 3;
const TAG_LAST_SEQUENCE: u64 = 4;

fn bad_descriptor(reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("bad manifest descriptor: {}", reason))
}

/// The first record of a fresh manifest, describing an empty database.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Descriptor {
    pub comparator: Option<String>,
    pub log_number: Option<u64>,
    pub next_file_number: Option<u64>,
    pub last_sequence: Option<u64>,
}

impl Descriptor {
    pub fn initial() -> Self {
        Self {
            comparator: Some(String::from(COMPARATOR_NAME)),
            log_number: Some(0),
            next_file_number: Some(MANIFEST_FILE_NUMBER + 1),
            last_sequence: Some(0),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut record = Vec::new();
        if let Some(comparator) = &self.comparator {
            coding::put_variant64_into_vec(&mut record, TAG_COMPARATOR);
            coding::put_length_prefixed_slice(&mut record, comparator.as_bytes());
        }
        for (tag, value) in [
            (TAG_LOG_NUMBER, self.log_number),
            (TAG_NEXT_FILE_NUMBER, self.next_file_number),
            (TAG_LAST_SEQUENCE, self.last_sequence),
        ] {
            if let Some(number) = value {
                coding::put_variant64_into_vec(&mut record, tag);
                coding::put_variant64_into_vec(&mut record, number);
            }
        }
        record
    }

    pub fn decode(mut input: &[u8]) -> io::Result<Self> {
        let mut descriptor = Descriptor::default();
        while !input.is_empty() {
            let (tag, width) = coding::decode_variant64(input).ok_or_else(|| bad_descriptor("tag"))?;
            input = &input[width..];

            if tag == TAG_COMPARATOR {
                let (name, consumed) = coding::get_length_prefixed_slice(input).ok_or_else(|| bad_descriptor("comparator name"))?;
                let name = String::from_utf8(name.to_vec()).map_err(|_| bad_descriptor("comparator name"))?;
                descriptor.comparator = Some(name);
                input = &input[consumed..];
                continue;
            }

            let (number, width) = coding::decode_variant64(input).ok_or_else(|| bad_descriptor("number"))?;
            input = &input[width..];
            match tag {
                TAG_LOG_NUMBER => descriptor.log_number = Some(number),
                TAG_NEXT_FILE_NUMBER => descriptor.next_file_number = Some(number),
                TAG_LAST_SEQUENCE => descriptor.last_sequence = Some(number),
                _ => return Err(bad_descriptor("unknown tag")),
            }
        }
        Ok(descriptor)
    }
}

/// Writes `MANIFEST-000001` holding the initial descriptor and points
/// `CURRENT` at it.
pub fn create_manifest(db_path: &Path) -> io::Result<()> {
    let manifest = filename::make_manifest_file_name(db_path, MANIFEST_FILE_NUMBER);
    let result = fs::File::create(&manifest).and_then(|file| {
        let mut manifest_logger = wal::Writer::new(file);
        manifest_logger.add_record(Descriptor::initial().encode())?;
        manifest_logger.into_inner().sync_all()
    });

    match result {
        Ok(()) => file::set_current_file(db_path, MANIFEST_FILE_NUMBER),
        Err(err) => {
            fs::remove_file(&manifest).unwrap_or_default();
            Err(err)
        }
    }
}

/// Follows `CURRENT` to the live manifest and decodes its first record.
pub fn read_manifest(db_path: &Path) -> io::Result<Descriptor> {
    let number = file::read_current_file(db_path)?;
    let content = fs::read(filename::make_manifest_file_name(db_path, number))?;
    let record = wal::Reader::new(&content).read_record()?
        .ok_or_else(|| bad_descriptor("empty manifest"))?;
    let descriptor = Descriptor::decode(&record)?;

    match &descriptor.comparator {
        Some(name) if name != COMPARATOR_NAME => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("comparator {} does not match existing comparator {}", COMPARATOR_NAME, name),
        )),
        _ => Ok(descriptor),
    }
}
