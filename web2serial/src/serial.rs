use crate::config;
use log::*;
use std::io;
use tokio_serial::{FlowControl, SerialPortBuilderExt, SerialStream};

/// The line the display controller listens on.
pub trait SerialLine {
    fn is_open(&self) -> bool;

    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

pub struct SerialDisplay {
    stream: Option<SerialStream>,
}

impl SerialDisplay {
    pub fn open(settings: &config::Serial) -> Result<Self, tokio_serial::Error> {
        info!(
            "Connecting to serial port {} ({} baud, {} data bits, {} parity, {} stop bits)",
            settings.port,
            settings.baud_rate,
            settings.data_bits,
            settings.parity,
            settings.stop_bits
        );
        let stream = tokio_serial::new(&settings.port, settings.baud_rate)
            .flow_control(FlowControl::None)
            .data_bits(settings.data_bits.into())
            .parity(settings.parity.into())
            .stop_bits(settings.stop_bits.into())
            .open_native_async()?;

        Ok(Self {
            stream: Some(stream),
        })
    }

    /// A display that is never open, for running without hardware attached.
    pub fn closed() -> Self {
        Self { stream: None }
    }
}

impl SerialLine for SerialDisplay {
    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotConnected))?;

        match stream.try_write(bytes) {
            Ok(bytes_written) if bytes_written == bytes.len() => Ok(()),
            Ok(bytes_written) => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!(
                    "An incorrect number of bytes was written to the serial port: {bytes_written} of {}",
                    bytes.len()
                ),
            )),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_closed_display() {
        let mut display = SerialDisplay::closed();
        assert!(!display.is_open());
        let err = display.write(b"03\r").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[tokio::test]
    async fn test_open_missing_port_fails() {
        let settings = config::Serial {
            port: "/dev/this-port-does-not-exist".to_string(),
            ..Default::default()
        };
        assert!(SerialDisplay::open(&settings).is_err());
    }
}
