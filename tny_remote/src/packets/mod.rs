use crate::errors::TnyError;
use crate::wire::{self, WireType, WireValue};

/// Request header: request id (u16 big-endian) plus the command id byte.
pub const REQUEST_HEADER_LEN: usize = 3;

/// Response header: request id (u16 big-endian), status byte, payload length byte.
pub const RESPONSE_HEADER_LEN: usize = 4;

/// An outbound command frame. The request id correlates the eventual response;
/// id 0 marks a free correlation slot on the controller and is never issued.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: u16,
    pub command: u8,
    pub args: Vec<WireValue>,
}

impl Request {
    pub fn new(id: u16, command: u8, args: Vec<WireValue>) -> Self {
        Self { id, command, args }
    }

    /// Serializes the frame: big-endian request id, command id byte, then each
    /// argument in declaration order. No length prefix, checksum or terminator;
    /// boundaries are implicit from the per-command schema both sides know.
    pub fn encode(&self) -> Vec<u8> {
        let arg_types: Vec<WireType> = self.args.iter().map(|a| a.wire_type()).collect();
        let mut buf = Vec::with_capacity(REQUEST_HEADER_LEN + WireType::total_width(&arg_types));
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.push(self.command);
        for arg in &self.args {
            arg.encode_into(&mut buf);
        }
        buf
    }
}

/// An inbound frame from the controller. A zero status byte means the firmware
/// rejected the command; the payload carries the return values otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub id: u16,
    pub ok: bool,
    pub payload: Vec<u8>,
}

impl Response {
    pub fn new(id: u16, ok: bool, payload: Vec<u8>) -> Self {
        Self { id, ok, payload }
    }

    /// Parses a raw WebSocket binary message into a response frame.
    pub fn parse(bytes: &[u8]) -> Result<Response, TnyError> {
        if bytes.len() < RESPONSE_HEADER_LEN {
            return Err(TnyError::FrameMismatch(format!(
                "response frame is {} bytes, header alone needs {}",
                bytes.len(),
                RESPONSE_HEADER_LEN
            )));
        }
        let id = u16::from_be_bytes([bytes[0], bytes[1]]);
        let ok = bytes[2] != 0;
        let declared = bytes[3] as usize;
        let payload = &bytes[RESPONSE_HEADER_LEN..];
        if payload.len() != declared {
            return Err(TnyError::FrameMismatch(format!(
                "response declares {} payload bytes but carries {}",
                declared,
                payload.len()
            )));
        }
        Ok(Response {
            id,
            ok,
            payload: payload.to_vec(),
        })
    }

    /// Serializes the frame the way the controller does. The driver never sends
    /// responses; this is the controller-side counterpart used by tests.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(RESPONSE_HEADER_LEN + self.payload.len());
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.push(self.ok as u8);
        buf.push(self.payload.len() as u8);
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Decodes the payload per the command's declared return types.
    pub fn decode_values(&self, returns: &[WireType]) -> Result<Vec<WireValue>, TnyError> {
        wire::decode_values(&self.payload, returns)
    }
}
