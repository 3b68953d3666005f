use std::io::{Read, Write};
use anyhow::Context;
use common::controller::Wheel;
use navigation::Drive;
use tracing::trace;
use crate::crc::Buffer;
use crate::error::CommunicationError;

/// Forward command for one motor channel, backward is the next command up
pub struct Motor(u8);

pub const MOTOR_1: Motor = Motor(0);
pub const MOTOR_2: Motor = Motor(4);

/// Written back by the controller after every accepted command
pub const ACK: u8 = 0xFF;

pub const MAX_SPEED: u8 = 127;

const PACKET_LEN: usize = 5;

pub fn motor_for(wheel: Wheel) -> Motor {
    match wheel {
        Wheel::Left => MOTOR_1,
        Wheel::Right => MOTOR_2,
    }
}

pub fn write_speed(buffer: &mut [u8], address: u8, motor: Motor, forward: bool, speed: u8) -> Result<&mut [u8], CommunicationError> {
    if speed > MAX_SPEED {
        return Err(CommunicationError::PowerOutOfRange(speed));
    }

    let mut buffer = Buffer::new(buffer);
    buffer.write_byte(address)?;

    if forward {
        buffer.write_byte(motor.0)?;
    } else {
        buffer.write_byte(motor.0 + 1)?;
    }
    buffer.write_byte(speed)?;

    buffer.write_checksum()
}

/// Motor controller speaking packet serial
pub struct Roboclaw<P> {
    port: P,
    address: u8,
}

impl<P: Read + Write> Roboclaw<P> {
    pub fn new(port: P, address: u8) -> Self {
        Roboclaw { port, address }
    }

    pub fn drive_motor(&mut self, wheel: Wheel, forward: bool, speed: u8) -> Result<(), CommunicationError> {
        let mut buffer = [0; PACKET_LEN];
        let packet = write_speed(&mut buffer, self.address, motor_for(wheel), forward, speed)?;

        trace!("sending {:02x?}", packet);
        self.port.write_all(packet)?;
        self.port.flush()?;

        let mut ack = [0; 1];
        self.port.read_exact(&mut ack)?;
        if ack[0] != ACK {
            return Err(CommunicationError::BadAck(ack[0]));
        }

        Ok(())
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

impl<P: Read + Write> Drive for Roboclaw<P> {
    fn forward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        self.drive_motor(wheel, true, power)
            .with_context(|| format!("could not drive {:?} wheel forward at {}", wheel, power))
    }

    fn backward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        self.drive_motor(wheel, false, power)
            .with_context(|| format!("could not drive {:?} wheel backward at {}", wheel, power))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use super::*;

    /// Serial port stand in: replies come from `incoming`, writes land in `outgoing`
    struct Loopback {
        incoming: Cursor<Vec<u8>>,
        outgoing: Vec<u8>,
    }

    impl Loopback {
        fn replying(replies: &[u8]) -> Self {
            Loopback {
                incoming: Cursor::new(replies.to_vec()),
                outgoing: Vec::new(),
            }
        }
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.incoming.read(buf)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.outgoing.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn packet_layout() {
        let mut buffer = [0; PACKET_LEN];
        let packet = write_speed(&mut buffer, 0x80, MOTOR_2, false, 64).unwrap();
        assert_eq!(packet, &[0x80, 5, 64, 0x8C, 0x6B]);
    }

    #[test]
    fn rejects_speeds_over_127() {
        let mut buffer = [0; PACKET_LEN];
        assert!(matches!(
            write_speed(&mut buffer, 0x80, MOTOR_1, true, 128),
            Err(CommunicationError::PowerOutOfRange(128))
        ));
    }

    #[test]
    fn wheels_map_to_channels() {
        let mut roboclaw = Roboclaw::new(Loopback::replying(&[ACK, ACK, ACK, ACK]), 0x80);
        roboclaw.forward(Wheel::Left, 10).unwrap();
        roboclaw.backward(Wheel::Left, 10).unwrap();
        roboclaw.forward(Wheel::Right, 0).unwrap();
        roboclaw.backward(Wheel::Right, 10).unwrap();

        let sent = roboclaw.into_inner().outgoing;
        let commands: Vec<u8> = sent.chunks(PACKET_LEN).map(|packet| packet[1]).collect();
        assert_eq!(commands, [0, 1, 4, 5]);
        assert_eq!(&sent[10..15], &[0x80, 4, 0, 0xF7, 0x9E]);
    }

    #[test]
    fn bad_ack_is_an_error() {
        let mut roboclaw = Roboclaw::new(Loopback::replying(&[0x00]), 0x80);
        assert!(matches!(roboclaw.drive_motor(Wheel::Left, true, 5), Err(CommunicationError::BadAck(0))));
    }

    #[test]
    fn silence_is_an_error() {
        let mut roboclaw = Roboclaw::new(Loopback::replying(&[]), 0x80);
        assert!(matches!(roboclaw.drive_motor(Wheel::Left, true, 5), Err(CommunicationError::Io(_))));
    }
}
