//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                   |
//! |----------------|--------------------|-------------------------------|
//! | `hardware`     | KeyOutput, Clock   | embedded-hal pin + delay      |
//! | `log_sink`     | EventSink          | Serial log output             |
//! | `memory_store` | ByteStore          | RAM copy of the store image   |
//! | `nvs`          | ConfigPort         | NVS / in-memory blobs         |

pub mod hardware;
pub mod log_sink;
pub mod memory_store;
pub mod nvs;
