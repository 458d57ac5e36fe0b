// usbcontrol/src/host/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::host::traits::{DriverSession, UsbHost};
use crate::types::{
    DevicePath, DeviceSpeed, InterfaceDescriptor, InterfaceGuid, PipeId, PipeInfo,
};
use crate::{Error, Result};

/// One recorded host or driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `interface_paths`
    InterfacePaths(InterfaceGuid),
    /// `open_device`
    Open(DevicePath),
    /// `initialize_driver`
    InitializeDriver(DevicePath),
    /// Alternate setting.
    InterfaceDescriptor(u8),
    /// Alternate setting and endpoint index.
    PipeInfo(u8, u8),
    /// `device_speed`
    DeviceSpeed,
    /// `set_pipe_timeout`
    SetPipeTimeout(PipeId, Duration),
    /// Bytes actually accepted.
    Write(PipeId, Vec<u8>),
    /// Buffer length offered.
    Read(PipeId, usize),
    /// Session dropped.
    ReleaseSession(DevicePath),
    /// Device dropped.
    CloseDevice(DevicePath),
}

/// Scripted host state. Shared between the host, its devices and its
/// sessions so a test can keep a clone of the host and inspect `calls`
/// after the handles have moved into a `Device`.
#[derive(Debug)]
pub struct MockState {
    /// Paths returned by enumeration.
    pub paths: Vec<DevicePath>,
    /// Descriptor returned for every alternate setting.
    pub descriptor: InterfaceDescriptor,
    /// Pipes by endpoint index.
    pub pipes: Vec<PipeInfo>,
    /// Endpoint indexes whose pipe query fails.
    pub failing_pipes: Vec<u8>,
    /// Speed reported by sessions.
    pub speed: DeviceSpeed,
    /// Replies handed out by reads, in order.
    pub responses: VecDeque<Vec<u8>>,
    /// Cap on bytes accepted per write, to simulate short writes.
    pub write_limit: Option<usize>,
    /// OS error codes to fail the corresponding call with.
    pub enumerate_error: Option<u32>,
    /// Fails `open_device`.
    pub open_error: Option<u32>,
    /// Fails `initialize_driver`.
    pub init_error: Option<u32>,
    /// Fails `interface_descriptor`.
    pub descriptor_error: Option<u32>,
    /// Every call in the order it was made.
    pub calls: Vec<MockCall>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            descriptor: InterfaceDescriptor::default(),
            pipes: Vec::new(),
            failing_pipes: Vec::new(),
            speed: DeviceSpeed::Full,
            responses: VecDeque::new(),
            write_limit: None,
            enumerate_error: None,
            open_error: None,
            init_error: None,
            descriptor_error: None,
            calls: Vec::new(),
        }
    }
}

/// Mock host for unit tests. Returns scripted paths, pipes and responses
/// and records every call.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    state: Rc<RefCell<MockState>>,
}

impl MockHost {
    /// Host with no devices and no scripted failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path to the enumeration result.
    pub fn add_device(&mut self, path: impl Into<String>) {
        self.state.borrow_mut().paths.push(DevicePath::new(path));
    }

    /// Replace the pipe list; the interface descriptor's endpoint count
    /// follows it.
    pub fn set_pipes(&mut self, pipes: Vec<PipeInfo>) {
        let mut st = self.state.borrow_mut();
        st.descriptor.num_endpoints = pipes.len() as u8;
        st.pipes = pipes;
    }

    /// Make the pipe query for endpoint `index` fail.
    pub fn fail_pipe(&mut self, index: u8) {
        self.state.borrow_mut().failing_pipes.push(index);
    }

    /// Speed reported by sessions.
    pub fn set_speed(&mut self, speed: DeviceSpeed) {
        self.state.borrow_mut().speed = speed;
    }

    /// Queue a reply for the next read.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.state.borrow_mut().responses.push_back(resp);
    }

    /// Accept at most `limit` bytes per write.
    pub fn set_write_limit(&mut self, limit: usize) {
        self.state.borrow_mut().write_limit = Some(limit);
    }

    /// Fail enumeration with OS error `code`.
    pub fn fail_enumeration(&mut self, code: u32) {
        self.state.borrow_mut().enumerate_error = Some(code);
    }

    /// Fail opening with OS error `code`.
    pub fn fail_open(&mut self, code: u32) {
        self.state.borrow_mut().open_error = Some(code);
    }

    /// Fail driver binding with OS error `code`.
    pub fn fail_driver_init(&mut self, code: u32) {
        self.state.borrow_mut().init_error = Some(code);
    }

    /// Fail the interface descriptor query with OS error `code`.
    pub fn fail_descriptor(&mut self, code: u32) {
        self.state.borrow_mut().descriptor_error = Some(code);
    }

    /// Snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.borrow().calls.clone()
    }

    /// Payloads written to any pipe, in order.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Write(_, data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Paths passed to `open_device`, in order.
    pub fn opened(&self) -> Vec<DevicePath> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Open(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

/// Open mock device file.
#[derive(Debug)]
pub struct MockDevice {
    path: DevicePath,
    state: Rc<RefCell<MockState>>,
}

impl MockDevice {
    /// Path the device was opened from.
    pub fn path(&self) -> &DevicePath {
        &self.path
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.state
            .borrow_mut()
            .calls
            .push(MockCall::CloseDevice(self.path.clone()));
    }
}

/// Mock driver session.
#[derive(Debug)]
pub struct MockSession {
    path: DevicePath,
    state: Rc<RefCell<MockState>>,
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.state
            .borrow_mut()
            .calls
            .push(MockCall::ReleaseSession(self.path.clone()));
    }
}

impl UsbHost for MockHost {
    type InterfaceId = InterfaceGuid;
    type Device = MockDevice;
    type Session = MockSession;

    fn interface_paths(&mut self, id: &InterfaceGuid) -> Result<Vec<DevicePath>> {
        self.record(MockCall::InterfacePaths(*id));
        let st = self.state.borrow();
        if let Some(code) = st.enumerate_error {
            return Err(Error::os("SetupDiGetClassDevsW", code));
        }
        Ok(st.paths.clone())
    }

    fn open_device(&mut self, path: &DevicePath) -> Result<MockDevice> {
        self.record(MockCall::Open(path.clone()));
        if let Some(code) = self.state.borrow().open_error {
            return Err(Error::os("CreateFileW", code));
        }
        Ok(MockDevice {
            path: path.clone(),
            state: Rc::clone(&self.state),
        })
    }

    fn initialize_driver(&mut self, device: &MockDevice) -> Result<MockSession> {
        self.record(MockCall::InitializeDriver(device.path.clone()));
        if let Some(code) = self.state.borrow().init_error {
            return Err(Error::os("WinUsb_Initialize", code));
        }
        Ok(MockSession {
            path: device.path.clone(),
            state: Rc::clone(&self.state),
        })
    }
}

impl DriverSession for MockSession {
    fn interface_descriptor(&mut self, alternate_setting: u8) -> Result<InterfaceDescriptor> {
        let mut st = self.state.borrow_mut();
        st.calls.push(MockCall::InterfaceDescriptor(alternate_setting));
        if let Some(code) = st.descriptor_error {
            return Err(Error::os("WinUsb_QueryInterfaceSettings", code));
        }
        Ok(InterfaceDescriptor {
            alternate_setting,
            ..st.descriptor
        })
    }

    fn pipe_info(&mut self, alternate_setting: u8, index: u8) -> Result<PipeInfo> {
        let mut st = self.state.borrow_mut();
        st.calls.push(MockCall::PipeInfo(alternate_setting, index));
        if st.failing_pipes.contains(&index) {
            return Err(Error::os("WinUsb_QueryPipe", 87));
        }
        // ERROR_NO_MORE_ITEMS, as WinUSB reports an index past the last pipe
        st.pipes
            .get(index as usize)
            .copied()
            .ok_or(Error::os("WinUsb_QueryPipe", 259))
    }

    fn device_speed(&mut self) -> Result<DeviceSpeed> {
        let mut st = self.state.borrow_mut();
        st.calls.push(MockCall::DeviceSpeed);
        Ok(st.speed)
    }

    fn set_pipe_timeout(&mut self, pipe: PipeId, timeout: Duration) -> Result<()> {
        self.state
            .borrow_mut()
            .calls
            .push(MockCall::SetPipeTimeout(pipe, timeout));
        Ok(())
    }

    fn write_pipe(&mut self, pipe: PipeId, data: &[u8]) -> Result<usize> {
        let mut st = self.state.borrow_mut();
        let n = st.write_limit.map_or(data.len(), |limit| limit.min(data.len()));
        st.calls.push(MockCall::Write(pipe, data[..n].to_vec()));
        Ok(n)
    }

    fn read_pipe(&mut self, pipe: PipeId, buf: &mut [u8]) -> Result<usize> {
        let mut st = self.state.borrow_mut();
        st.calls.push(MockCall::Read(pipe, buf.len()));
        let resp = st.responses.pop_front().ok_or(Error::Timeout)?;
        let n = resp.len().min(buf.len());
        buf[..n].copy_from_slice(&resp[..n]);
        Ok(n)
    }
}
