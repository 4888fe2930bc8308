//! Userspace access to Linux I2C/SMBus adapters through i2c-dev.
//!
//! A [`Bus`] owns one open `/dev/i2c-N` node. Opening it reads the
//! adapter's functionality mask ([`Funcs`]) right away; transactions are
//! issued through [`Bus::dispatch`] or the SMBus verbs built on it.
//!
//! ```no_run
//! # fn main() -> smbus::Result<()> {
//! let mut bus = smbus::Bus::open(1)?;
//! for name in bus.funcs().names() {
//!     println!("{}", name);
//! }
//! let temperature = bus.read_word_data(0x48, 0x00)?;
//! bus.close()?;
//! # let _ = temperature;
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

pub mod bus;
pub mod capability;

pub use crate::bus::{Bus, BusId, Error, Result};
pub use crate::capability::Funcs;
