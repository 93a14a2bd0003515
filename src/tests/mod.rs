// @file: placemark_engine/src/tests/mod.rs
// @description: Test suites for the conversion pipeline.
// @author: LAS.

#[cfg(test)]
mod support;



#[cfg(test)]
mod kml_tests;
