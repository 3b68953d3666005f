use std::mem;
use crc::{Crc, Digest};
use crate::error::CommunicationError;

/// Packet serial checksum, CRC-16/XMODEM sent big endian
pub const CRC: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_XMODEM);

/// Fixed size packet writer that checksums everything pushed through it
pub struct Buffer<'a> {
    buffer: &'a mut [u8],
    index: usize,
    digest: Digest<'static, u16>,
}

impl<'a> Buffer<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Buffer {
            buffer,
            index: 0,
            digest: CRC.digest(),
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), CommunicationError> {
        if self.index >= self.buffer.len() {
            return Err(CommunicationError::BufferFull);
        }

        self.buffer[self.index] = byte;
        self.index += 1;

        self.digest.update(&[byte]);

        Ok(())
    }

    pub fn write_checksum(mut self) -> Result<&'a mut [u8], CommunicationError> {
        let crc = mem::replace(&mut self.digest, CRC.digest()).finalize();
        for byte in crc.to_be_bytes() {
            self.write_byte(byte)?;
        }
        Ok(self.into_buffer())
    }

    pub fn into_buffer(self) -> &'a mut [u8] {
        &mut self.buffer[..self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xmodem_check_value() {
        assert_eq!(CRC.checksum(b"123456789"), 0x31C3);
    }

    #[test]
    fn checksum_is_appended_big_endian() {
        let mut raw = [0; 8];
        let mut buffer = Buffer::new(&mut raw);
        buffer.write_byte(0x80).unwrap();
        buffer.write_byte(0x00).unwrap();
        buffer.write_byte(0x00).unwrap();

        assert_eq!(buffer.write_checksum().unwrap(), &[0x80, 0x00, 0x00, 0x3B, 0x5A]);
    }

    #[test]
    fn full_buffer_is_an_error() {
        let mut raw = [0; 2];
        let mut buffer = Buffer::new(&mut raw);
        buffer.write_byte(1).unwrap();
        buffer.write_byte(2).unwrap();

        assert!(matches!(buffer.write_byte(3), Err(CommunicationError::BufferFull)));
    }
}
