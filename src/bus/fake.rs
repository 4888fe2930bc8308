//! Recording stand-in for the kernel, used by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::os::unix::io::RawFd;
use std::path::Path;
use std::rc::Rc;

use libc::c_ulong;

use super::backend::Backend;
use super::ioctl::{Argument, Command, SmbusData};
use super::rw_bit::{ReadWrite, TransactionSize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Open(RawFd),
    /// Integer ioctl with its value, or `I2C_FUNCS` with `None`
    Ioctl(Command, Option<c_ulong>),
    Smbus {
        read_write: ReadWrite,
        command: u8,
        size: TransactionSize,
        data: Option<SmbusData>,
    },
    /// (address, flags, outgoing bytes) per segment
    Rdwr(Vec<(u16, u16, Vec<u8>)>),
}

#[derive(Default)]
struct State {
    funcs: c_ulong,
    next_fd: RawFd,
    open: Vec<RawFd>,
    closed: Vec<RawFd>,
    calls: Vec<Call>,
    open_error: Option<i32>,
    close_error: Option<i32>,
    ioctl_errors: Vec<(Command, i32)>,
    smbus_replies: VecDeque<SmbusData>,
    rdwr_reply: Vec<u8>,
}

#[derive(Clone)]
pub struct Fake {
    state: Rc<RefCell<State>>,
}

impl Fake {
    pub fn with_funcs(funcs: u32) -> Self {
        Fake {
            state: Rc::new(RefCell::new(State {
                funcs: funcs as c_ulong,
                next_fd: 3,
                ..State::default()
            })),
        }
    }

    pub fn fail_open(&self, errno: i32) {
        self.state.borrow_mut().open_error = Some(errno);
    }

    pub fn fail_close(&self, errno: i32) {
        self.state.borrow_mut().close_error = Some(errno);
    }

    pub fn fail_ioctl(&self, command: Command, errno: i32) {
        self.state.borrow_mut().ioctl_errors.push((command, errno));
    }

    /// Queues the data block the next SMBus transfer hands back.
    pub fn reply(&self, data: SmbusData) {
        self.state.borrow_mut().smbus_replies.push_back(data);
    }

    /// Bytes the read segments of the next combined transfer receive.
    pub fn reply_rdwr(&self, bytes: &[u8]) {
        self.state.borrow_mut().rdwr_reply = bytes.to_vec();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn closed(&self) -> Vec<RawFd> {
        self.state.borrow().closed.clone()
    }

    pub fn open_fds(&self) -> Vec<RawFd> {
        self.state.borrow().open.clone()
    }
}

impl Backend for Fake {
    fn open(&self, _path: &Path) -> io::Result<RawFd> {
        let mut state = self.state.borrow_mut();
        if let Some(errno) = state.open_error {
            return Err(io::Error::from_raw_os_error(errno));
        }

        let fd = state.next_fd;
        state.next_fd += 1;
        state.open.push(fd);
        state.calls.push(Call::Open(fd));
        Ok(fd)
    }

    fn ioctl(&self, fd: RawFd, command: Command, argument: Argument) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        assert!(state.open.contains(&fd), "ioctl on descriptor {} which is not open", fd);

        let failure = state
            .ioctl_errors
            .iter()
            .find(|&&(failing, _)| failing == command)
            .map(|&(_, errno)| io::Error::from_raw_os_error(errno));

        match argument {
            Argument::Value(value) => {
                state.calls.push(Call::Ioctl(command, Some(value)));
            }
            Argument::Funcs(funcs) => {
                state.calls.push(Call::Ioctl(command, None));
                if failure.is_none() {
                    *funcs = state.funcs;
                }
            }
            Argument::Smbus(transfer) => {
                state.calls.push(Call::Smbus {
                    read_write: transfer.read_write,
                    command: transfer.command,
                    size: transfer.size,
                    data: transfer.data.as_ref().map(|data| **data),
                });
                if let (None, Some(data)) = (failure.as_ref(), transfer.data) {
                    if let Some(reply) = state.smbus_replies.pop_front() {
                        *data = reply;
                    }
                }
            }
            Argument::Rdwr(messages) => {
                let segments = messages
                    .iter()
                    .map(|m| {
                        let outgoing = if m.is_read() { Vec::new() } else { m.data().to_vec() };
                        (m.address(), m.flags(), outgoing)
                    })
                    .collect();
                state.calls.push(Call::Rdwr(segments));

                if failure.is_none() {
                    let mut reply = state.rdwr_reply.iter().cloned();
                    for message in messages.iter_mut() {
                        if let Some(buf) = message.data_mut() {
                            for byte in buf.iter_mut() {
                                *byte = reply.next().unwrap_or(0);
                            }
                        }
                    }
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn close(&self, fd: RawFd) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.open.retain(|&open| open != fd);
        state.closed.push(fd);

        match state.close_error {
            Some(errno) => Err(io::Error::from_raw_os_error(errno)),
            None => Ok(()),
        }
    }
}
