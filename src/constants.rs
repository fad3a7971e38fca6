//! Static lookup data shared by client and host roles.
//!
//! Sensor-range tables and topic templates are fixed data consulted by the
//! surrounding components; nothing here is computed at runtime.

use serde::{Deserialize, Serialize};

/// Supported sensor hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorType {
    #[serde(rename = "DHT11")]
    Dht11,
    #[serde(rename = "DHT22")]
    Dht22,
    #[serde(rename = "DS18B20")]
    Ds18b20,
    #[serde(rename = "BMP280")]
    Bmp280,
}

/// Valid range for one measurement a sensor reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRange {
    pub measurement: &'static str,
    pub min: f64,
    pub max: f64,
}

impl SensorType {
    /// Validation ranges for each measurement this sensor reports.
    pub fn ranges(self) -> &'static [MeasurementRange] {
        match self {
            SensorType::Dht11 => &[
                MeasurementRange { measurement: "temperature", min: 0.0, max: 50.0 },
                MeasurementRange { measurement: "humidity", min: 20.0, max: 90.0 },
            ],
            SensorType::Dht22 => &[
                MeasurementRange { measurement: "temperature", min: -40.0, max: 80.0 },
                MeasurementRange { measurement: "humidity", min: 0.0, max: 100.0 },
            ],
            SensorType::Ds18b20 => &[
                MeasurementRange { measurement: "temperature", min: -55.0, max: 125.0 },
            ],
            SensorType::Bmp280 => &[
                MeasurementRange { measurement: "temperature", min: -40.0, max: 85.0 },
                MeasurementRange { measurement: "pressure", min: 300.0, max: 1100.0 },
            ],
        }
    }

    /// Check a reading against this sensor's range for `measurement`.
    /// Unknown measurements are out of range by definition.
    pub fn in_range(self, measurement: &str, value: f64) -> bool {
        self.ranges()
            .iter()
            .find(|r| r.measurement == measurement)
            .is_some_and(|r| value >= r.min && value <= r.max)
    }
}

/// MQTT message categories published by sensor clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    SensorData,
    SensorStatus,
    Heartbeat,
    ConfigUpdate,
    Debug,
}

impl MessageType {
    /// Per-client topic for this message type.
    pub fn topic(self, client_id: &str) -> String {
        let suffix = match self {
            MessageType::SensorData => "data",
            MessageType::SensorStatus => "status",
            MessageType::Heartbeat => "heartbeat",
            MessageType::ConfigUpdate => "config",
            MessageType::Debug => "debug",
        };
        format!("sensors/{client_id}/{suffix}")
    }
}

/// Topic clients announce themselves on; not per-client.
pub const DISCOVERY_TOPIC: &str = "sensors/discovery";

/// Seconds between component health checks.
pub const HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

/// Seconds between client heartbeat messages.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Seconds before a silent sensor is considered timed out.
pub const SENSOR_TIMEOUT_SECS: u64 = 10;
