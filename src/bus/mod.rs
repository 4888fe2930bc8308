mod backend;
mod error;
mod ioctl;
mod rw_bit;
mod smbus;

#[cfg(test)]
pub(crate) mod fake;

pub use self::backend::{Backend, Linux};
pub use self::error::{Error, Result};
pub use self::ioctl::{
    Argument, Command, Message, SmbusData, SmbusTransfer, BLOCK_MAX, M_RD, M_TEN,
};
pub use self::rw_bit::{ReadWrite, TransactionSize};

use std::fmt;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use libc::c_ulong;

use crate::capability::Funcs;

/// Descriptor value of a handle that has been closed.
const CLOSED: RawFd = -1;

/// Path of the character device for bus `index`.
pub fn device_path(index: u32) -> PathBuf {
    PathBuf::from(format!("/dev/i2c-{}", index))
}

/// Identifies an adapter either by bus number or by device path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusId {
    Index(u32),
    Path(PathBuf),
}

impl BusId {
    pub fn path(&self) -> PathBuf {
        match *self {
            BusId::Index(index) => device_path(index),
            BusId::Path(ref path) => path.clone(),
        }
    }
}

impl FromStr for BusId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<u32>() {
            Ok(index) => BusId::Index(index),
            Err(_) => BusId::Path(PathBuf::from(s)),
        })
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// An open i2c-dev adapter.
///
/// The handle owns its descriptor and releases it on `close` or when
/// dropped. The functionality mask is read once while opening, so a handle
/// never exists without it.
///
/// Transaction settings (forced addressing, PEC, 10-bit mode) belong to the
/// handle, not to the adapter. A handle is meant for one owner; wrap it in a
/// `Mutex` to share it, since a logical transaction may take more than one
/// ioctl.
pub struct Bus<B: Backend = Linux> {
    backend: B,
    path: PathBuf,
    fd: RawFd,
    funcs: Funcs,
    force: bool,
    pec: bool,
    ten_bit: bool,
    // last selected address and whether it was forced
    address: Option<(u16, bool)>,
}

impl Bus<Linux> {
    /// Opens `/dev/i2c-<index>`.
    pub fn open(index: u32) -> Result<Self> {
        Bus::open_with(Linux, device_path(index))
    }

    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Bus::open_with(Linux, path)
    }
}

impl<B: Backend> Bus<B> {
    /// Opens `path` through `backend` and queries the adapter's
    /// functionality.
    ///
    /// When `I2C_FUNCS` fails the freshly opened descriptor is closed before
    /// the error is returned.
    pub fn open_with<P: AsRef<Path>>(backend: B, path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        trace!("Opening {}", path.display());

        let fd = backend.open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        let mut funcs: c_ulong = 0;
        if let Err(source) = backend.ioctl(fd, Command::Funcs, Argument::Funcs(&mut funcs)) {
            if let Err(e) = backend.close(fd) {
                warn!("Could not close {} after failed {}: {}", path.display(), Command::Funcs, e);
            }

            return Err(Error::Ioctl {
                command: Command::Funcs,
                source,
            });
        }

        let funcs = Funcs::from_bits(funcs as u32);
        debug!("Opened {} with functionality {}", path.display(), funcs);

        Ok(Bus {
            backend,
            path,
            fd,
            funcs,
            force: false,
            pec: false,
            ten_bit: false,
            address: None,
        })
    }

    pub fn funcs(&self) -> Funcs {
        self.funcs
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.fd == CLOSED
    }

    /// Releases the descriptor.
    ///
    /// The stored descriptor is poisoned even when the OS reports an error,
    /// since the number may already have been recycled.
    pub fn close(&mut self) -> Result<()> {
        let fd = self.live_fd()?;
        self.fd = CLOSED;
        self.address = None;

        trace!("Closing {}", self.path.display());
        self.backend.close(fd).map_err(Error::Close)
    }

    /// Issues a single ioctl against the adapter.
    ///
    /// Arguments that do not fit `command` are refused before reaching the
    /// kernel. Errors are passed on untouched; nothing is retried.
    ///
    /// Address, 10-bit and PEC requests are mirrored into the handle's
    /// settings, so the verbs never act on a stale address selection.
    pub fn dispatch(&mut self, command: Command, argument: Argument) -> Result<()> {
        let fd = self.live_fd()?;

        if !command.accepts(&argument) {
            return Err(Error::InvalidArgument(command));
        }

        let value = match &argument {
            Argument::Value(value) => Some(*value),
            _ => None,
        };
        match command {
            Command::SetSlaveAddress | Command::ForceSlaveAddress | Command::TenBit => {
                self.address = None
            }
            _ => {}
        }

        trace!("ioctl {} {:?} on {}", command, argument, self.path.display());
        self.backend
            .ioctl(fd, command, argument)
            .map_err(|source| Error::Ioctl { command, source })?;

        if let Some(value) = value {
            match command {
                // the kernel rejects anything above 0x3ff, so this fits
                Command::SetSlaveAddress => self.address = Some((value as u16, false)),
                Command::ForceSlaveAddress => self.address = Some((value as u16, true)),
                Command::TenBit => self.ten_bit = value != 0,
                Command::Pec => self.pec = value != 0,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// Selects slave addresses with `I2C_SLAVE_FORCE` from now on, even if a
    /// kernel driver has claimed the address.
    pub fn set_force(&mut self, force: bool) -> Result<()> {
        self.live_fd()?;
        self.force = force;
        Ok(())
    }

    pub fn pec(&self) -> bool {
        self.pec
    }

    /// Turns packet error checking on or off for subsequent SMBus transfers.
    pub fn set_pec(&mut self, enable: bool) -> Result<()> {
        self.live_fd()?;
        if enable && !self.funcs.has_all(crate::capability::SMBUS_PEC) {
            return Err(Error::Unsupported(crate::capability::SMBUS_PEC));
        }

        self.dispatch(Command::Pec, Argument::Value(enable as c_ulong))
    }

    pub fn ten_bit(&self) -> bool {
        self.ten_bit
    }

    /// Switches between 7-bit and 10-bit slave addresses.
    pub fn set_ten_bit(&mut self, enable: bool) -> Result<()> {
        self.live_fd()?;
        if enable && !self.funcs.has_all(crate::capability::TEN_BIT_ADDR) {
            return Err(Error::Unsupported(crate::capability::TEN_BIT_ADDR));
        }

        // dispatch also drops the cached address; the kernel keeps it, but
        // the next verb reselects in the new mode
        self.dispatch(Command::TenBit, Argument::Value(enable as c_ulong))
    }

    /// Binds following transfers to `address`.
    ///
    /// The ioctl is skipped when the same address was last selected in the
    /// same forcing mode.
    pub fn select(&mut self, address: u16) -> Result<()> {
        self.live_fd()?;
        let limit = if self.ten_bit { 0x3ff } else { 0x7f };
        if address > limit {
            return Err(Error::InvalidAddress(address));
        }

        let force = self.force;
        if self.address == Some((address, force)) {
            return Ok(());
        }

        let command = if force {
            Command::ForceSlaveAddress
        } else {
            Command::SetSlaveAddress
        };
        self.dispatch(command, Argument::Value(address as c_ulong))
    }

    pub(crate) fn live_fd(&self) -> Result<RawFd> {
        if self.fd == CLOSED {
            Err(Error::Closed)
        } else {
            Ok(self.fd)
        }
    }
}

impl<B: Backend> Drop for Bus<B> {
    fn drop(&mut self) {
        if self.fd != CLOSED {
            if let Err(e) = self.close() {
                warn!("{}", e);
            }
        }
    }
}

impl<B: Backend> fmt::Debug for Bus<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Bus")
            .field("path", &self.path)
            .field("fd", &self.fd)
            .field("funcs", &self.funcs)
            .field("force", &self.force)
            .field("pec", &self.pec)
            .field("ten_bit", &self.ten_bit)
            .finish()
    }
}
