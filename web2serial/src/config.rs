use crate::pacer::DEFAULT_INTERVAL;
use clap::{Args, ValueEnum};
use derivative::Derivative;
use enum_derive_2018::EnumDisplay;
use macro_attr_2018::macro_attr;
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unrecognized IP address: {0:?}")]
    InvalidIp(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub ip: IpAddr,
    pub port: u16,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8888,
        }
    }
}

impl Network {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

macro_attr! {
    #[derive(Debug, Clone, Copy, Derivative, PartialEq, Eq, Serialize, Deserialize, ValueEnum, EnumDisplay!)]
    #[derivative(Default)]
    pub enum DataBits {
        #[value(name = "5")]
        Five,
        #[value(name = "6")]
        Six,
        #[value(name = "7")]
        Seven,
        #[derivative(Default)]
        #[value(name = "8")]
        Eight,
    }
}

macro_attr! {
    #[derive(Debug, Clone, Copy, Derivative, PartialEq, Eq, Serialize, Deserialize, ValueEnum, EnumDisplay!)]
    #[derivative(Default)]
    pub enum Parity {
        #[derivative(Default)]
        None,
        Odd,
        Even,
    }
}

macro_attr! {
    #[derive(Debug, Clone, Copy, Derivative, PartialEq, Eq, Serialize, Deserialize, ValueEnum, EnumDisplay!)]
    #[derivative(Default)]
    pub enum StopBits {
        #[derivative(Default)]
        One,
        Two,
    }
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Five => Self::Five,
            DataBits::Six => Self::Six,
            DataBits::Seven => Self::Seven,
            DataBits::Eight => Self::Eight,
        }
    }
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => Self::None,
            Parity::Odd => Self::Odd,
            Parity::Even => Self::Even,
        }
    }
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => Self::One,
            StopBits::Two => Self::Two,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Serial {
    /// Leave empty to run without a display attached
    pub port: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 19_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Minimum time between two frames sent to the display
    pub interval_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl Pacing {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub network: Network,
    pub serial: Serial,
    pub pacing: Pacing,
}

/// Command line values that take precedence over the config file.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    #[clap(long, value_parser = parse_ip)]
    /// IP address of the scoreboard server, `localhost` is accepted
    pub ip: Option<IpAddr>,

    #[clap(long)]
    /// UDP port of the scoreboard server
    pub port: Option<u16>,

    #[clap(long)]
    /// Serial port the display controller is attached to
    pub serial_port: Option<String>,

    #[clap(long)]
    /// Baud rate for the serial port
    pub baud_rate: Option<u32>,

    #[clap(long, value_enum)]
    pub data_bits: Option<DataBits>,

    #[clap(long, value_enum)]
    pub parity: Option<Parity>,

    #[clap(long, value_enum)]
    pub stop_bits: Option<StopBits>,

    #[clap(long)]
    /// Minimum number of milliseconds between two frames sent to the display
    pub interval_ms: Option<u64>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        let Overrides {
            ip,
            port,
            serial_port,
            baud_rate,
            data_bits,
            parity,
            stop_bits,
            interval_ms,
        } = overrides;

        if let Some(ip) = ip {
            self.network.ip = ip;
        }
        if let Some(port) = port {
            self.network.port = port;
        }
        if let Some(serial_port) = serial_port {
            self.serial.port = serial_port;
        }
        if let Some(baud_rate) = baud_rate {
            self.serial.baud_rate = baud_rate;
        }
        if let Some(data_bits) = data_bits {
            self.serial.data_bits = data_bits;
        }
        if let Some(parity) = parity {
            self.serial.parity = parity;
        }
        if let Some(stop_bits) = stop_bits {
            self.serial.stop_bits = stop_bits;
        }
        if let Some(interval_ms) = interval_ms {
            self.pacing.interval_ms = interval_ms;
        }
        self
    }
}

pub fn parse_ip(text: &str) -> Result<IpAddr, ConfigError> {
    if text.eq_ignore_ascii_case("localhost") {
        return Ok(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
    text.parse().map_err(|_| ConfigError::InvalidIp(text.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ser_network() {
        let n: Network = Default::default();
        let serialized = toml::to_string(&n).unwrap();
        let deser = toml::from_str(&serialized);
        assert_eq!(deser, Ok(n));
    }

    #[test]
    fn test_ser_serial() {
        let s: Serial = Default::default();
        let serialized = toml::to_string(&s).unwrap();
        let deser = toml::from_str(&serialized);
        assert_eq!(deser, Ok(s));
    }

    #[test]
    fn test_ser_config() {
        let config: Config = Default::default();
        let serialized = toml::to_string(&config).unwrap();
        let deser = toml::from_str(&serialized);
        assert_eq!(deser, Ok(config));
    }

    #[test]
    fn test_config_file_format() {
        let config: Config = toml::from_str(
            r#"
            [network]
            ip = "10.0.0.5"
            port = 9000

            [serial]
            port = "/dev/ttyUSB1"
            baud_rate = 9600
            data_bits = "Seven"
            parity = "Even"
            stop_bits = "Two"

            [pacing]
            interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.network.addr(), "10.0.0.5:9000".parse().unwrap());
        assert_eq!(config.serial.port, "/dev/ttyUSB1");
        assert_eq!(config.serial.data_bits, DataBits::Seven);
        assert_eq!(config.serial.parity, Parity::Even);
        assert_eq!(config.serial.stop_bits, StopBits::Two);
        assert_eq!(config.pacing.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.network.addr(), "127.0.0.1:8888".parse().unwrap());
        assert_eq!(config.serial.baud_rate, 19_200);
        assert_eq!(config.serial.data_bits, DataBits::Eight);
        assert_eq!(config.serial.parity, Parity::None);
        assert_eq!(config.serial.stop_bits, StopBits::One);
        assert!(config.serial.port.is_empty());
        assert_eq!(config.pacing.interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Overrides {
            ip: Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))),
            serial_port: Some("COM4".to_string()),
            parity: Some(Parity::Odd),
            interval_ms: Some(100),
            ..Default::default()
        });

        assert_eq!(config.network.addr(), "192.168.1.20:8888".parse().unwrap());
        assert_eq!(config.serial.port, "COM4");
        assert_eq!(config.serial.baud_rate, 19_200);
        assert_eq!(config.serial.parity, Parity::Odd);
        assert_eq!(config.pacing.interval_ms, 100);

        assert_eq!(
            Config::default().with_overrides(Overrides::default()),
            Config::default()
        );
    }

    #[test]
    fn test_parse_ip() {
        assert_eq!(parse_ip("localhost"), Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(parse_ip("LocalHost"), Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(parse_ip("10.1.2.3"), Ok(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3))));
        assert_eq!(parse_ip("::1"), Ok("::1".parse().unwrap()));
        assert_eq!(
            parse_ip("scoreboard"),
            Err(ConfigError::InvalidIp("scoreboard".to_string()))
        );
    }

    #[test]
    fn test_display_settings() {
        assert_eq!(Parity::None.to_string(), "None");
        assert_eq!(StopBits::Two.to_string(), "Two");
        assert_eq!(DataBits::Eight.to_string(), "Eight");
    }
}
