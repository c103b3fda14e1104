use serde::{Deserialize, Serialize};

use crate::errors::TnyError;

/// The four fixed-width binary encodings the control protocol uses for every
/// argument and return value. There are no variable-length types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// Unsigned, one byte.
    Byte,
    /// One byte, 0 or 1 on encode; any non-zero byte decodes to true.
    Bool,
    /// Signed 32-bit, little-endian.
    Int,
    /// IEEE-754 single precision, little-endian.
    Float,
}

impl WireType {
    pub fn width(&self) -> usize {
        match self {
            WireType::Byte | WireType::Bool => 1,
            WireType::Int | WireType::Float => 4,
        }
    }

    /// Total encoded width of an argument or return list.
    pub fn total_width(types: &[WireType]) -> usize {
        types.iter().map(|t| t.width()).sum()
    }
}

/// A single typed protocol value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum WireValue {
    Byte(u8),
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl WireValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            WireValue::Byte(_) => WireType::Byte,
            WireValue::Bool(_) => WireType::Bool,
            WireValue::Int(_) => WireType::Int,
            WireValue::Float(_) => WireType::Float,
        }
    }

    /// Appends the fixed-width encoding of this value to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match *self {
            WireValue::Byte(v) => buf.push(v),
            WireValue::Bool(v) => buf.push(v as u8),
            WireValue::Int(v) => buf.extend_from_slice(&v.to_le_bytes()),
            WireValue::Float(v) => buf.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

/// Decodes `bytes` left to right per the positional `types`.
///
/// The byte count must match the declared widths exactly; a short buffer or
/// unconsumed trailing bytes fail with `FrameMismatch` rather than truncating.
pub fn decode_values(bytes: &[u8], types: &[WireType]) -> Result<Vec<WireValue>, TnyError> {
    let expected = WireType::total_width(types);
    if bytes.len() != expected {
        return Err(TnyError::FrameMismatch(format!(
            "payload is {} bytes but the declared return types need {}",
            bytes.len(),
            expected
        )));
    }

    let mut values = Vec::with_capacity(types.len());
    let mut offset = 0;
    for ty in types {
        let chunk = &bytes[offset..offset + ty.width()];
        offset += ty.width();
        values.push(match ty {
            WireType::Byte => WireValue::Byte(chunk[0]),
            WireType::Bool => WireValue::Bool(chunk[0] != 0),
            WireType::Int => {
                WireValue::Int(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            }
            WireType::Float => {
                WireValue::Float(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            }
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: WireValue) -> WireValue {
        let mut buf = Vec::new();
        value.encode_into(&mut buf);
        let decoded = decode_values(&buf, &[value.wire_type()]).unwrap();
        decoded[0]
    }

    #[test]
    fn byte_roundtrip() {
        for v in [0u8, 1, 11, 0x7F, 0xFF] {
            assert_eq!(roundtrip(WireValue::Byte(v)), WireValue::Byte(v));
        }
    }

    #[test]
    fn bool_roundtrip() {
        assert_eq!(roundtrip(WireValue::Bool(true)), WireValue::Bool(true));
        assert_eq!(roundtrip(WireValue::Bool(false)), WireValue::Bool(false));
    }

    #[test]
    fn bool_decodes_any_nonzero_byte_as_true() {
        for b in [1u8, 2, 0x80, 0xFF] {
            let decoded = decode_values(&[b], &[WireType::Bool]).unwrap();
            assert_eq!(decoded[0], WireValue::Bool(true));
        }
        let decoded = decode_values(&[0], &[WireType::Bool]).unwrap();
        assert_eq!(decoded[0], WireValue::Bool(false));
    }

    #[test]
    fn int_roundtrip_and_layout() {
        for v in [0i32, 1, -1, 1500, -42, i32::MIN, i32::MAX] {
            assert_eq!(roundtrip(WireValue::Int(v)), WireValue::Int(v));
        }
        let mut buf = Vec::new();
        WireValue::Int(0x0403_0201).encode_into(&mut buf);
        assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn float_roundtrip_is_exact() {
        for v in [0.0f32, 1.5, -1.5707964, 90.0, f32::MIN_POSITIVE, 1e30] {
            assert_eq!(roundtrip(WireValue::Float(v)), WireValue::Float(v));
        }
    }

    #[test]
    fn widths() {
        assert_eq!(WireType::Byte.width(), 1);
        assert_eq!(WireType::Bool.width(), 1);
        assert_eq!(WireType::Int.width(), 4);
        assert_eq!(WireType::Float.width(), 4);
        assert_eq!(
            WireType::total_width(&[WireType::Byte, WireType::Float, WireType::Int]),
            9
        );
    }

    #[test]
    fn short_buffer_is_a_mismatch() {
        let err = decode_values(&[0x00, 0x00], &[WireType::Float]).unwrap_err();
        assert!(matches!(err, TnyError::FrameMismatch(_)));
    }

    #[test]
    fn trailing_bytes_are_a_mismatch() {
        let err = decode_values(&[0x01, 0x02], &[WireType::Byte]).unwrap_err();
        assert!(matches!(err, TnyError::FrameMismatch(_)));
    }

    #[test]
    fn mixed_sequence_decodes_in_order() {
        let mut buf = Vec::new();
        WireValue::Byte(7).encode_into(&mut buf);
        WireValue::Float(1.25).encode_into(&mut buf);
        WireValue::Bool(true).encode_into(&mut buf);
        let decoded =
            decode_values(&buf, &[WireType::Byte, WireType::Float, WireType::Bool]).unwrap();
        assert_eq!(
            decoded,
            vec![
                WireValue::Byte(7),
                WireValue::Float(1.25),
                WireValue::Bool(true)
            ]
        );
    }
}
