//! Core library for the `weatherpane` display.
//!
//! This crate defines:
//! - Configuration, re-read on every refresh cycle
//! - The forecast provider abstraction and a Dark Sky client
//! - Mapping of provider payloads into current conditions and forecast slots
//! - Observable state and the periodic clock/refresh scheduler
//!
//! Rendering is left to the consumer, which subscribes to [`StateStore`].

pub mod config;
pub mod error;
pub mod format;
pub mod icon;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod scheduler;
pub mod store;

pub use config::{Config, ConfigSource, FileConfigSource, StaticConfig};
pub use error::{MapError, ProviderError, RefreshError};
pub use mapper::{MappedForecast, SlotUpdate, map_forecast};
pub use model::{
    CurrentConditions, ForecastRequest, ForecastSlot, Language, SLOT_COUNT, SlotKind, Units,
    WeatherSnapshot,
};
pub use provider::{DarkSkyProvider, ForecastProvider, RawForecast};
pub use scheduler::{RefreshScheduler, SchedulerTimings, format_clock};
pub use store::{Observable, StateStore};
