// @file: placemark_engine/src/lib.rs
// @description: Exposes the modular architecture for integration testing and external usage.
// @author: LAS.


pub mod connectors;
pub mod core;
pub mod kml;
pub mod tests;
pub mod utils;
