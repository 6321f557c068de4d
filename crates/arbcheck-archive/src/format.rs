use std::io::{self, Read, Seek};

use crate::Error;

/// Bytes needed to recognise every supported format, including a bare ustar header.
const SNIFF_LEN: u64 = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(TarCompress),
}

/// Compression codec for tar archives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TarCompress {
    None,
    Gzip,
    Xz,
    Zstd,
}

impl TarCompress {
    /// Create a decoder for this compression codec.
    ///
    /// Fastboot packages ship as gzip (`.tgz`); xz and zstd are recognised
    /// but not decoded.
    #[cfg(feature = "tar")]
    pub fn decoder<R: Read>(self, reader: R) -> Result<Decoder<R>, Error> {
        match self {
            Self::None => Ok(Decoder::Passthrough(reader)),
            Self::Gzip => Ok(Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(
                reader,
            )))),
            Self::Xz | Self::Zstd => Err(Error::UnsupportedFormat),
        }
    }
}

/// Decoder wrapper for tar decompression.
#[cfg(feature = "tar")]
#[derive(Debug)]
pub enum Decoder<R> {
    Passthrough(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
}

#[cfg(feature = "tar")]
impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
        }
    }
}

pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Tar(TarCompress::Gzip)),
        [0x28, 0xB5, 0x2F, 0xFD, ..] => Some(ArchiveFormat::Tar(TarCompress::Zstd)),
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Some(ArchiveFormat::Tar(TarCompress::Xz)),
        _ => {
            if is_tar_header(data) {
                Some(ArchiveFormat::Tar(TarCompress::None))
            } else {
                None
            }
        }
    }
}

fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= 263 && data[257..262] == *b"ustar"
}

/// Sniff the format from the start of `reader`, then rewind it.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    (&mut *reader).take(SNIFF_LEN).read_to_end(&mut header)?;
    reader.rewind()?;
    Ok(detect_format(&header))
}
