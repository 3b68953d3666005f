use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CommunicationError {
    #[error("packet buffer is full")]
    BufferFull,

    #[error("power {0} is above the motor controller limit of 127")]
    PowerOutOfRange(u8),

    #[error("motor controller answered {0:#04x} instead of an ack")]
    BadAck(u8),

    #[error("no suitable serial port found")]
    NoPort,

    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
