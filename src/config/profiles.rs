//! Deployment-role default profiles.
//!
//! A profile is a fixed table of fallback values applied once, right after
//! file/environment resolution, to fill top-level keys the resolved tree does
//! not define. It never overwrites a key that already has a value; callers
//! wanting a per-read fallback use `ConfigStore::get_or` instead.

use serde_json::{json, Value};

/// Deployment role selecting which default table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Sensor-node client: reads a sensor and publishes over MQTT.
    Client,
    /// Host server: broker, database, and dashboard side.
    Host,
}

impl Profile {
    /// The profile's default table as a configuration subtree.
    pub fn defaults(self) -> Value {
        match self {
            Profile::Client => json!({
                "client_id": "pi_client_001",
                "sensor_pin": 4,
                "sensor_type": "DHT11",
                "update_interval": 30,
                "mqtt": {
                    "host": "192.168.1.112",
                    "port": 8883,
                    "username": "",
                    "password": "",
                    "use_tls": true,
                    "ca_cert": "/etc/ssl/certs/ca-certificates.crt"
                },
                "modbus": {
                    "enabled": false,
                    "port": 5020,
                    "slave_id": 1
                },
                "logging": {
                    "level": "INFO",
                    "max_size": "10MB",
                    "backup_count": 5
                }
            }),
            Profile::Host => json!({
                "mqtt": {
                    "host": "0.0.0.0",
                    "port": 8883,
                    "websocket_port": 9001,
                    "username": "admin",
                    "password": "secure_password_123",
                    "use_tls": true,
                    "cert_file": "/etc/ssl/certs/mqtt-server.crt",
                    "key_file": "/etc/ssl/private/mqtt-server.key"
                },
                "database": {
                    "type": "sqlite",
                    "path": "data/sensors.db",
                    "retention_days": 365
                },
                "dashboard": {
                    "host": "0.0.0.0",
                    "port": 8080,
                    "debug": false,
                    "secret_key": "your-secret-key-here"
                },
                "logging": {
                    "level": "INFO",
                    "max_size": "50MB",
                    "backup_count": 10
                }
            }),
        }
    }

    /// Fill every top-level key from this profile that is absent from `tree`.
    ///
    /// The fill is shallow: a key already present keeps its resolved value
    /// even if it only covers part of the profile's subtree for that key.
    pub fn apply(self, tree: &mut Value) {
        let Some(map) = tree.as_object_mut() else {
            return;
        };
        if let Value::Object(defaults) = self.defaults() {
            for (key, value) in defaults {
                map.entry(key).or_insert(value);
            }
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Client => write!(f, "client"),
            Profile::Host => write!(f, "host"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_absent_keys() {
        let mut tree = json!({});
        Profile::Client.apply(&mut tree);
        assert_eq!(tree["sensor_pin"], json!(4));
        assert_eq!(tree["mqtt"]["port"], json!(8883));
    }

    #[test]
    fn test_present_keys_are_kept() {
        let mut tree = json!({"sensor_pin": 17});
        Profile::Client.apply(&mut tree);
        assert_eq!(tree["sensor_pin"], json!(17));
    }

    #[test]
    fn test_fill_is_shallow() {
        // A partial mqtt section from the file is not deep-merged with the
        // profile's full mqtt table.
        let mut tree = json!({"mqtt": {"host": "10.0.0.5"}});
        Profile::Client.apply(&mut tree);
        assert_eq!(tree["mqtt"], json!({"host": "10.0.0.5"}));
    }

    #[test]
    fn test_host_profile_covers_server_sections() {
        let mut tree = json!({});
        Profile::Host.apply(&mut tree);
        assert_eq!(tree["database"]["path"], json!("data/sensors.db"));
        assert_eq!(tree["dashboard"]["port"], json!(8080));
        assert_eq!(tree["logging"]["level"], json!("INFO"));
    }
}
