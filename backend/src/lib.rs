//! # ND Filter Diagnostics Backend
//!
//! Diagnoses the condition of a neutral-density solar filter from a photograph
//! of the sun, alongside the atmospheric dimming expected for the sun's
//! altitude at the observation time and place.
//!
//! ## Features
//!
//! - **Solar Geometry**: apparent sun altitude, airmass sec(Z) and predicted Δm
//! - **Color Diagnostics**: R_corr anomaly verdict
//! - **Image Analysis**: scattering index and center-window RGB channel ratios
//! - **Ratio Chart**: bar chart description of the three ratios
//! - **HTTP API**: RESTful endpoints for the observation form
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Request/result value types and DTO re-exports
//! - [`ephemeris`]: Process-wide, read-only solar ephemeris
//! - [`services`]: The computations
//! - [`routes`]: View-specific data types (chart, report, form defaults)
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```no_run
//! use ndfilter_diag::api::ObservationRequest;
//! use ndfilter_diag::services;
//!
//! let request = ObservationRequest::parse(35.6351, 127.4263, "2025-06-18T03:00:00Z").unwrap();
//! match services::estimate(&request) {
//!     Ok(geometry) => println!("sec(Z) = {:.3}", geometry.secant_z),
//!     Err(e) => eprintln!("{}", e),
//! }
//! println!("{}", services::diagnose(0.93).verdict);
//! ```

pub mod api;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
