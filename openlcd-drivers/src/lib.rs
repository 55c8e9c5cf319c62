//! Hardware driver implementations
//!
//! This crate provides the concrete display drivers built on the traits
//! in openlcd-core and the bus primitive in openlcd-hal:
//!
//! - SparkFun SerLCD 16x2 RGB (OpenLCD firmware), blocking and async

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod lcd;
