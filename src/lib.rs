//! Sensor monitor firmware for the ATmega128 expansion board
//!
//! The control loop in [`application`] only talks to the capability traits
//! in [`board`]. On the target those are backed by the drivers in
//! [`drivers`] over the register-level [`hal`]; on a host they are backed
//! by the simulator in the binary.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod alert;
pub mod application;
pub mod board;
pub mod config;
pub mod cursor;
pub mod drivers;
pub mod error;
pub mod os;
pub mod rtos;
pub mod sensors;
pub mod telemetry;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use application::{Application, Capabilities, Mode};
pub use error::{Error, Result};
