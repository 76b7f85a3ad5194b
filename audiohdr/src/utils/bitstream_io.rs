//! Bitstream I/O utilities for header parsing.
//!
//! Bit-granular, MSB-first reading and writing on top of `bitstream_io`, with
//! explicit position bookkeeping so every out-of-range access surfaces as a
//! typed [`HeaderError::OutOfData`] instead of a bare EOF.

use std::io;
use std::io::{Read, SeekFrom};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter, UnsignedInteger};

use crate::utils::errors::HeaderError;

pub type BsResult<T> = Result<T, HeaderError>;

const STACK_BUF_SIZE: usize = 256;

#[derive(Debug)]
pub struct BitstreamIoReader<R: io::Read + io::Seek> {
    bs: BitReader<R, BigEndian>,
    pos: u64,
    len: u64,
}

pub type BsIoSliceReader<'a> = BitstreamIoReader<io::Cursor<&'a [u8]>>;

/// Reader over an owned buffer that can be topped up with [`BsIoVecReader::expand`].
pub type BsIoVecReader = BitstreamIoReader<io::Cursor<Vec<u8>>>;

impl<R> BitstreamIoReader<R>
where
    R: io::Read + io::Seek,
{
    pub fn new(read: R, len_bytes: u64) -> Self {
        Self {
            bs: BitReader::new(read),
            pos: 0,
            len: len_bytes << 3,
        }
    }

    #[inline(always)]
    fn ensure(&self, n: u64) -> BsResult<()> {
        let available = self.available();
        if n > available {
            return Err(HeaderError::OutOfData {
                needed: n,
                available,
            });
        }

        Ok(())
    }

    #[inline(always)]
    pub fn get(&mut self) -> BsResult<bool> {
        self.ensure(1)?;
        let bit = self.bs.read_bit()?;
        self.pos += 1;

        Ok(bit)
    }

    #[inline(always)]
    pub fn get_n<I: UnsignedInteger>(&mut self, n: u32) -> BsResult<I> {
        self.ensure(n as u64)?;
        let value = self.bs.read_unsigned_var(n)?;
        self.pos += n as u64;

        Ok(value)
    }

    /// Reads a presence flag and, only when it is set, an `n`-bit value.
    ///
    /// An absent value costs exactly the one flag bit.
    #[inline(always)]
    pub fn get_conditional<I: UnsignedInteger>(&mut self, n: u32) -> BsResult<Option<I>> {
        if self.get()? {
            Ok(Some(self.get_n(n)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_bytes(&mut self, n: usize) -> BsResult<Vec<u8>> {
        self.ensure((n as u64) << 3)?;

        let mut buf = vec![0; n];
        self.bs.read_bytes(&mut buf)?;
        self.pos += (n as u64) << 3;

        Ok(buf)
    }

    #[inline(always)]
    pub fn skip_n(&mut self, n: u32) -> BsResult<()> {
        self.ensure(n as u64)?;
        self.bs.skip(n)?;
        self.pos += n as u64;

        Ok(())
    }

    /// Moves the cursor by `offset` bits, forwards or backwards.
    pub fn seek(&mut self, offset: i64) -> BsResult<u64> {
        let target = self.pos as i64 + offset;

        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek({offset}): before start of stream at {}", self.pos),
            )
            .into());
        }

        self.set_position(target as u64)?;

        Ok(self.pos)
    }

    /// Hard-sets the absolute bit position. The target may lie behind the
    /// current position.
    pub fn set_position(&mut self, pos: u64) -> BsResult<()> {
        if pos > self.len {
            return Err(HeaderError::OutOfData {
                needed: pos,
                available: self.len,
            });
        }

        self.bs.seek_bits(SeekFrom::Start(pos))?;
        self.pos = pos;

        Ok(())
    }

    // TODO: byte boundary
    pub fn parity_check_for_last_n_bits(&mut self, len: u64) -> BsResult<u8> {
        let position = self.pos;

        self.seek(-(len as i64))?;

        let bytes_len = (len >> 3) as usize;

        let parity = if bytes_len <= STACK_BUF_SIZE {
            let mut stack_buf = [0u8; STACK_BUF_SIZE];
            let buf = &mut stack_buf[..bytes_len];
            self.bs.read_bytes(buf)?;
            buf.iter().fold(0, |acc, x| acc ^ x)
        } else {
            let mut heap_buf = vec![0; bytes_len];
            self.bs.read_bytes(&mut heap_buf)?;
            heap_buf.iter().fold(0, |acc, x| acc ^ x)
        };

        self.set_position(position)?;

        Ok(parity)
    }

    pub fn parity_check_nibble_for_last_n_bits(&mut self, len: u64) -> BsResult<u8> {
        let mut parity = self.parity_check_for_last_n_bits(len)?;

        parity ^= parity >> 4;
        parity &= 0xF;

        Ok(parity)
    }

    #[inline(always)]
    pub fn available(&self) -> u64 {
        self.len - self.pos
    }

    #[inline(always)]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Declared length of the backing buffer in bits.
    #[inline(always)]
    pub fn len(&self) -> u64 {
        self.len
    }
}

impl<'a> BsIoSliceReader<'a> {
    pub fn from_slice(buf: &'a [u8]) -> Self {
        let len = buf.len() as u64;
        let read = io::Cursor::new(buf);

        Self::new(read, len)
    }
}

impl Default for BsIoSliceReader<'_> {
    fn default() -> Self {
        Self::from_slice(&[])
    }
}

impl BsIoVecReader {
    pub fn from_vec(buf: Vec<u8>) -> Self {
        let len = buf.len() as u64;

        Self::new(io::Cursor::new(buf), len)
    }

    /// Pulls `extra_bytes` more bytes from `source` into the backing buffer.
    ///
    /// The bit position is preserved. If `source` runs dry the bytes that did
    /// arrive are kept and [`HeaderError::OutOfData`] is returned.
    pub fn expand<S: io::Read>(&mut self, source: &mut S, extra_bytes: usize) -> BsResult<()> {
        let pos = self.pos;

        let bs = std::mem::replace(&mut self.bs, BitReader::new(io::Cursor::new(Vec::new())));
        let mut buf = bs.into_reader().into_inner();
        let start = buf.len();

        let read_result = source
            .by_ref()
            .take(extra_bytes as u64)
            .read_to_end(&mut buf);
        let received = buf.len() - start;

        self.len = (buf.len() as u64) << 3;
        self.bs = BitReader::new(io::Cursor::new(buf));
        self.bs.seek_bits(SeekFrom::Start(pos))?;

        read_result?;

        if received < extra_bytes {
            return Err(HeaderError::OutOfData {
                needed: (extra_bytes as u64) << 3,
                available: (received as u64) << 3,
            });
        }

        Ok(())
    }
}

/// MSB-first writer over pre-sized storage.
///
/// Every write is checked against the remaining capacity and the field width
/// before any bit reaches the buffer.
pub struct BitstreamIoWriter<W: io::Write> {
    bs: BitWriter<W, BigEndian>,
    pos: u64,
    len: u64,
}

pub type BsIoSliceWriter<'a> = BitstreamIoWriter<io::Cursor<&'a mut [u8]>>;

impl<W> BitstreamIoWriter<W>
where
    W: io::Write,
{
    pub fn new(write: W, len_bytes: u64) -> Self {
        Self {
            bs: BitWriter::new(write),
            pos: 0,
            len: len_bytes << 3,
        }
    }

    #[inline(always)]
    fn ensure(&self, n: u64) -> BsResult<()> {
        let available = self.len - self.pos;
        if n > available {
            return Err(HeaderError::OutOfData {
                needed: n,
                available,
            });
        }

        Ok(())
    }

    #[inline(always)]
    pub fn put(&mut self, bit: bool) -> BsResult<()> {
        self.ensure(1)?;
        self.bs.write_bit(bit)?;
        self.pos += 1;

        Ok(())
    }

    /// Writes `value` in `n` bits. Values wider than `n` bits are rejected
    /// rather than masked.
    #[inline(always)]
    pub fn put_n<U>(&mut self, n: u32, value: U) -> BsResult<()>
    where
        U: UnsignedInteger + Into<u64>,
    {
        let wide: u64 = value.into();
        if n < u64::BITS && wide >> n != 0 {
            return Err(HeaderError::ValueTooWide {
                value: wide,
                bits: n,
            });
        }

        self.ensure(n as u64)?;
        self.bs.write_unsigned_var(n, value)?;
        self.pos += n as u64;

        Ok(())
    }

    /// Mirror of [`BitstreamIoReader::get_conditional`].
    #[inline(always)]
    pub fn put_conditional<U>(&mut self, n: u32, value: Option<U>) -> BsResult<()>
    where
        U: UnsignedInteger + Into<u64>,
    {
        match value {
            Some(value) => {
                let wide: u64 = value.into();
                if n < u64::BITS && wide >> n != 0 {
                    return Err(HeaderError::ValueTooWide {
                        value: wide,
                        bits: n,
                    });
                }

                self.put(true)?;
                self.put_n(n, value)
            }
            None => self.put(false),
        }
    }

    pub fn put_bytes(&mut self, buf: &[u8]) -> BsResult<()> {
        self.ensure((buf.len() as u64) << 3)?;
        self.bs.write_bytes(buf)?;
        self.pos += (buf.len() as u64) << 3;

        Ok(())
    }

    #[inline(always)]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Zero-pads to the next byte boundary and returns the number of bits
    /// written before padding.
    pub fn finish(mut self) -> BsResult<u64> {
        let written = self.pos;

        if !self.bs.byte_aligned() {
            self.bs.byte_align()?;
        }

        Ok(written)
    }
}

impl<'a> BsIoSliceWriter<'a> {
    pub fn from_slice(buf: &'a mut [u8]) -> Self {
        let len = buf.len() as u64;
        let write = io::Cursor::new(buf);

        Self::new(write, len)
    }
}
