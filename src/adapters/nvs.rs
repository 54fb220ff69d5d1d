//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigPort`] for the keyer and keeps the store image
//! (preamble flag, password, hidden message) as a second blob in the same
//! namespace.
//!
//! - Config is range-checked with [`KeyerConfig::validate`] before it is
//!   written and after it is read back.
//! - On ESP32 each access opens the namespace, runs one operation and
//!   closes it again; commits are atomic per `nvs_commit()`.
//! - The simulation backend keeps blobs in a `HashMap` (dev/test only).

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::adapters::memory_store::{IMAGE_CAPACITY, MemoryStore};
use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::KeyerConfig;
use crate::error::{Error, Result, StoreError};

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "tinymorse";
const CONFIG_KEY: &str = "keyercfg";
const IMAGE_KEY: &str = "image";

/// Config blobs are tiny; anything past this is treated as corrupt.
const MAX_CONFIG_BLOB: usize = 256;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: std::cell::RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Initialise NVS flash.
    ///
    /// On first boot or after a version mismatch the partition is erased
    /// and re-initialised.
    pub fn new() -> core::result::Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: called once from the main task before any other NVS use.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK || unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: std::cell::RefCell::new(HashMap::new()),
        })
    }

    // ── Store image ───────────────────────────────────────────

    /// Load the store image.  A missing blob yields a blank store, so a
    /// fresh device plays nothing and accepts no password.
    pub fn load_image(&self) -> Result<MemoryStore> {
        let blob = self.read_blob(IMAGE_KEY, IMAGE_CAPACITY).map_err(|e| match e {
            ConfigError::Corrupted => Error::Store(StoreError::ImageTooLarge),
            other => Error::from(other),
        })?;
        match blob {
            Some(bytes) => {
                let store = MemoryStore::from_bytes(&bytes)?;
                info!("NvsAdapter: store image loaded ({} bytes)", store.len());
                Ok(store)
            }
            None => {
                info!("NvsAdapter: no store image, starting blank");
                Ok(MemoryStore::new())
            }
        }
    }

    /// Persist a store image (provisioning).
    pub fn store_image(&self, image: &MemoryStore) -> Result<()> {
        self.write_blob(IMAGE_KEY, image.as_bytes())
            .map_err(Error::from)?;
        info!("NvsAdapter: store image saved ({} bytes)", image.len());
        Ok(())
    }

    // ── Blob backend ──────────────────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self, key: &str, max: usize) -> core::result::Result<Option<Vec<u8>>, ConfigError> {
        match self.store.borrow().get(&Self::composite_key(key)) {
            Some(bytes) if bytes.len() > max => Err(ConfigError::Corrupted),
            Some(bytes) => Ok(Some(bytes.clone())),
            None => Ok(None),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&self, key: &str, data: &[u8]) -> core::result::Result<(), ConfigError> {
        self.store
            .borrow_mut()
            .insert(Self::composite_key(key), data.to_vec());
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn composite_key(key: &str) -> String {
        format!("{}::{}", NAMESPACE, key)
    }

    #[cfg(target_os = "espidf")]
    fn read_blob(&self, key: &str, max: usize) -> core::result::Result<Option<Vec<u8>>, ConfigError> {
        let key_buf = Self::c_name(key);
        let result = Self::with_nvs_handle(false, |handle| {
            let mut size: usize = 0;
            // First call: size only.
            let ret = unsafe {
                nvs_get_blob(handle, key_buf.as_ptr() as *const _, core::ptr::null_mut(), &mut size)
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            if size > max {
                return Err(ESP_ERR_NVS_INVALID_LENGTH);
            }
            let mut buf = vec![0u8; size];
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    key_buf.as_ptr() as *const _,
                    buf.as_mut_ptr() as *mut _,
                    &mut size,
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(buf)
        });

        match result {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Ok(None),
            Err(e) if e == ESP_ERR_NVS_INVALID_LENGTH => Err(ConfigError::Corrupted),
            Err(e) => {
                warn!("NvsAdapter: read of {:?} failed ({})", key, e);
                Err(ConfigError::IoError)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&self, key: &str, data: &[u8]) -> core::result::Result<(), ConfigError> {
        let key_buf = Self::c_name(key);
        let result = Self::with_nvs_handle(true, |handle| {
            let ret = unsafe {
                nvs_set_blob(
                    handle,
                    key_buf.as_ptr() as *const _,
                    data.as_ptr() as *const _,
                    data.len(),
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        });
        result.map_err(|e| {
            warn!("NvsAdapter: write of {:?} failed ({})", key, e);
            ConfigError::IoError
        })
    }

    /// NUL-terminated copy of an NVS name (max 15 chars).
    #[cfg(target_os = "espidf")]
    fn c_name(name: &str) -> [u8; 16] {
        let mut buf = [0u8; 16];
        let bytes = name.as_bytes();
        let len = bytes.len().min(15);
        buf[..len].copy_from_slice(&bytes[..len]);
        buf
    }

    /// Open the namespace, run `f` with the handle, then close it.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> core::result::Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> core::result::Result<T, i32>,
    {
        let ns_buf = Self::c_name(NAMESPACE);
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(ns_buf.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> core::result::Result<KeyerConfig, ConfigError> {
        let Some(bytes) = self.read_blob(CONFIG_KEY, MAX_CONFIG_BLOB)? else {
            info!("NvsAdapter: no stored config, using defaults");
            return Ok(KeyerConfig::default());
        };
        let cfg: KeyerConfig = postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate().map_err(ConfigError::ValidationFailed)?;
        info!("NvsAdapter: loaded config ({} bytes)", bytes.len());
        Ok(cfg)
    }

    fn save(&self, config: &KeyerConfig) -> core::result::Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.write_blob(CONFIG_KEY, &bytes)?;
        info!("NvsAdapter: config saved ({} bytes)", bytes.len());
        Ok(())
    }
}
