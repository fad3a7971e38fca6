//! Layered configuration resolution.
//!
//! Configuration is merged from three sources, lowest precedence first:
//! 1. **File** - a YAML document at the path given at construction
//! 2. **Environment** - a fixed table of override variables
//! 3. **Runtime** - in-memory `set` mutations
//!
//! A role [`Profile`] (client or host) can additionally fill top-level keys
//! the file and environment left unset; it never overrides either.
//!
//! ## Environment Variables
//! - `MQTT_HOST` → `mqtt.host`
//! - `MQTT_PORT` → `mqtt.port`
//! - `MQTT_USERNAME` → `mqtt.username`
//! - `MQTT_PASSWORD` → `mqtt.password`
//! - `MQTT_USE_TLS` → `mqtt.use_tls`
//! - `SENSOR_PIN` → `sensor_pin`
//! - `SENSOR_TYPE` → `sensor_type`
//! - `UPDATE_INTERVAL` → `update_interval`
//! - `CLIENT_ID` → `client_id`
//! - `DATABASE_PATH` → `database.path`
//! - `DASHBOARD_PORT` → `dashboard.port`
//! - `LOG_LEVEL` → `logging.level`
//!
//! Values are coerced to the most specific type they parse as (boolean,
//! integer, float, else string), so `MQTT_PORT=8883` lands in the tree as a
//! number.
//!
//! An optional dotenv-style file (see [`StoreOptions::env_path`]) supplies
//! values for variables the process environment leaves unset; it never
//! overrides the live environment.

mod coerce;
mod overlay;
mod path;
mod profiles;
mod schema;
mod store;

pub use coerce::coerce;
pub use overlay::{resolve, EnvOverride, EnvSnapshot, ENV_OVERRIDES};
pub use path::{read, section, write};
pub use profiles::Profile;
pub use schema::{validate, Kind, Schema, SchemaNode};
pub use store::{ConfigStore, StoreOptions};
