//! Serial link to the RoboClaw motor controller.

pub mod crc;
pub mod error;
pub mod roboclaw;

use std::time::Duration;
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use tracing::{debug, info};

pub use error::CommunicationError;
pub use roboclaw::Roboclaw;

/// How long to wait for the controller to acknowledge a command
const ACK_TIMEOUT: Duration = Duration::from_millis(100);

const USB_VID: u16 = 0x03EB;
const USB_PID: u16 = 0x2404;

pub fn get_port() -> Result<Option<SerialPortInfo>, CommunicationError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .find(|port| {
            debug!("{:?}", port);
            match &port.port_type {
                SerialPortType::UsbPort(info) => { info.vid == USB_VID && info.pid == USB_PID }
                _ => { false }
            }
        }))
}

/// Open the motor controller on `port`, or the first one plugged in over USB
pub fn open(port: Option<&str>, address: u8) -> Result<Roboclaw<Box<dyn SerialPort>>, CommunicationError> {
    let port_name = match port {
        Some(port) => port.to_owned(),
        None => get_port()?.ok_or(CommunicationError::NoPort)?.port_name,
    };

    info!("Selected port {}", port_name);

    let port = serialport::new(&port_name, common::BAUD_RATE_ROBOCLAW)
        .timeout(ACK_TIMEOUT)
        .open()?;

    Ok(Roboclaw::new(port, address))
}
