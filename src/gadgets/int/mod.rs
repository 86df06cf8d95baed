//! Fixed-width two's-complement integers as little-endian wire vectors.

use std::iter;

use bitvec::prelude::*;
pub use num_bigint::{BigInt, BigUint};
use num_bigint::Sign;

use crate::{Circuit, CircuitContext, CircuitError, WireId};

mod add;
mod cmp;
mod div;
pub use add::*;
pub use cmp::*;
pub use div::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("value {value} does not fit into {width} bits")]
    TooWide { value: BigInt, width: usize },
    #[error("`{0}` is not a bit string")]
    InvalidBitString(String),
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}
pub type IntError = Error;

/// Two's-complement bits of `value`, least significant first.
///
/// Accepts anything in `-2^(n-1) .. 2^n`, so both signed and unsigned
/// readings of an `n`-bit pattern are valid.
pub fn bits_from_bigint_with_len(value: &BigInt, bit_count: usize) -> Result<BitVec<u8>, Error> {
    let too_wide = || Error::TooWide {
        value: value.clone(),
        width: bit_count,
    };

    let unsigned = match value.sign() {
        Sign::Minus => {
            let magnitude = value.magnitude();
            let half = BigUint::from(1u8) << bit_count.saturating_sub(1);
            if bit_count == 0 || magnitude > &half {
                return Err(too_wide());
            }
            (BigUint::from(1u8) << bit_count) - magnitude
        }
        _ => value.magnitude().clone(),
    };

    if unsigned.bits() as usize > bit_count {
        return Err(too_wide());
    }

    let mut bytes = unsigned.to_bytes_le();
    bytes.resize(bit_count.div_ceil(8), 0);
    let mut bv = BitVec::from_vec(bytes);
    bv.truncate(bit_count);

    Ok(bv)
}

/// Signed reading of an unsigned `width`-bit pattern.
fn to_signed(unsigned: BigUint, width: usize) -> BigInt {
    let value = BigInt::from(unsigned);
    if width > 0 && value.bit(width as u64 - 1) {
        value - (BigInt::from(1u8) << width)
    } else {
        value
    }
}

/// Parse an MSB-first output string such as `Circuit::output_bits` returns.
pub fn unsigned_from_bit_string(bits: &str) -> Result<BigUint, Error> {
    if bits.is_empty() || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(Error::InvalidBitString(bits.to_owned()));
    }
    BigUint::parse_bytes(bits.as_bytes(), 2).ok_or_else(|| Error::InvalidBitString(bits.to_owned()))
}

/// Like [`unsigned_from_bit_string`], with the leading bit as sign.
pub fn signed_from_bit_string(bits: &str) -> Result<BigInt, Error> {
    unsigned_from_bit_string(bits).map(|unsigned| to_signed(unsigned, bits.len()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntWires {
    pub bits: Vec<WireId>,
}

impl IntWires {
    /// `len` fresh primary inputs.
    pub fn new_input(circuit: &mut Circuit, len: usize) -> Self {
        Self {
            bits: iter::repeat_with(|| circuit.issue_input_wire())
                .take(len)
                .collect(),
        }
    }

    pub fn from_bits(bits: impl IntoIterator<Item = WireId>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Pre-solved constant wires holding `value`.
    pub fn constant<C: CircuitContext>(
        circuit: &mut C,
        len: usize,
        value: &BigInt,
    ) -> Result<Self, Error> {
        let bits = bits_from_bigint_with_len(value, len)?;
        Ok(Self {
            bits: bits.iter().map(|bit| circuit.constant_wire(*bit)).collect(),
        })
    }

    /// Write `value` into the wires of an input vector.
    pub fn assign(&self, circuit: &mut Circuit, value: &BigInt) -> Result<(), Error> {
        let bits = bits_from_bigint_with_len(value, self.len())?;
        for (&wire, bit) in self.bits.iter().zip(bits.iter()) {
            circuit.assign(wire, *bit)?;
        }
        Ok(())
    }

    /// Declare every bit as an output, least significant first.
    pub fn mark_output(&self, circuit: &mut Circuit) -> Result<(), CircuitError> {
        self.bits.iter().try_for_each(|&wire| circuit.make_output(wire))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WireId> {
        self.bits.iter()
    }

    pub fn get(&self, index: usize) -> Option<WireId> {
        self.bits.get(index).copied()
    }

    /// Sign bit.
    ///
    /// # Panics
    /// On an empty vector.
    pub fn msb(&self) -> WireId {
        *self.bits.last().expect("integer of width zero")
    }

    pub fn decode_unsigned(&self, circuit: &Circuit) -> Result<BigUint, Error> {
        let mut value = BigUint::ZERO;
        for (index, &wire) in self.bits.iter().enumerate() {
            let bit = circuit
                .value(wire)?
                .ok_or(CircuitError::UnassignedOutput(wire))?;
            value.set_bit(index as u64, bit);
        }
        Ok(value)
    }

    pub fn decode_signed(&self, circuit: &Circuit) -> Result<BigInt, Error> {
        Ok(to_signed(self.decode_unsigned(circuit)?, self.len()))
    }
}

impl AsRef<[WireId]> for IntWires {
    fn as_ref(&self) -> &[WireId] {
        &self.bits
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use test_log::test;

    use super::*;

    /// Two input vectors of `width` bits and a circuit to build on.
    pub(crate) fn binary_inputs(width: usize) -> (Circuit, IntWires, IntWires) {
        let mut circuit = Circuit::new();
        let a = IntWires::new_input(&mut circuit, width);
        let b = IntWires::new_input(&mut circuit, width);
        (circuit, a, b)
    }

    /// Assign both operands, run the circuit, read the result bits.
    pub(crate) fn evaluate(
        circuit: &mut Circuit,
        inputs: [(&IntWires, i64); 2],
        result: &IntWires,
    ) -> BigInt {
        for (wires, value) in inputs {
            wires.assign(circuit, &BigInt::from(value)).unwrap();
        }
        circuit.execute().unwrap();
        result.decode_signed(circuit).unwrap()
    }

    #[test]
    fn bit_encoding() {
        let bits = bits_from_bigint_with_len(&BigInt::from(5), 4).unwrap();
        assert_eq!(bits, bitvec![u8, Lsb0; 1, 0, 1, 0]);

        let bits = bits_from_bigint_with_len(&BigInt::from(-3), 4).unwrap();
        assert_eq!(bits, bitvec![u8, Lsb0; 1, 0, 1, 1]);

        let bits = bits_from_bigint_with_len(&BigInt::from(-8), 4).unwrap();
        assert_eq!(bits, bitvec![u8, Lsb0; 0, 0, 0, 1]);

        let bits = bits_from_bigint_with_len(&BigInt::from(15), 4).unwrap();
        assert_eq!(bits, bitvec![u8, Lsb0; 1, 1, 1, 1]);
    }

    #[test]
    fn bit_encoding_rejects_overflow() {
        for value in [16, -9] {
            assert!(matches!(
                bits_from_bigint_with_len(&BigInt::from(value), 4),
                Err(Error::TooWide { width: 4, .. })
            ));
        }
        assert!(bits_from_bigint_with_len(&BigInt::from(-1), 0).is_err());
    }

    #[test]
    fn bit_strings() {
        assert_eq!(
            unsigned_from_bit_string("1010").unwrap(),
            BigUint::from(10u8)
        );
        assert_eq!(signed_from_bit_string("1010").unwrap(), BigInt::from(-6));
        assert_eq!(signed_from_bit_string("0111").unwrap(), BigInt::from(7));
        assert_eq!(signed_from_bit_string("1").unwrap(), BigInt::from(-1));

        for bad in ["", "10a1", "2"] {
            assert!(matches!(
                unsigned_from_bit_string(bad),
                Err(Error::InvalidBitString(_))
            ));
        }
    }

    #[test]
    fn assign_and_decode() {
        let mut circuit = Circuit::new();
        let a = IntWires::new_input(&mut circuit, 8);
        a.mark_output(&mut circuit).unwrap();

        for value in [-128, -1, 0, 1, 127] {
            a.assign(&mut circuit, &BigInt::from(value)).unwrap();
            circuit.execute().unwrap();
            assert_eq!(a.decode_signed(&circuit).unwrap(), BigInt::from(value));
            assert_eq!(
                signed_from_bit_string(&circuit.output_bits().unwrap()).unwrap(),
                BigInt::from(value)
            );
        }

        assert_eq!(
            a.decode_unsigned(&circuit).unwrap(),
            BigUint::from(127u8)
        );
    }

    #[test]
    fn constant_is_presolved() {
        let mut circuit = Circuit::new();
        let c = IntWires::constant(&mut circuit, 6, &BigInt::from(-20)).unwrap();
        assert_eq!(circuit.num_gates(), 0);
        assert_eq!(c.decode_signed(&circuit).unwrap(), BigInt::from(-20));
    }

    #[test]
    fn decode_unassigned_input_fails() {
        let mut circuit = Circuit::new();
        let a = IntWires::new_input(&mut circuit, 2);
        assert!(matches!(
            a.decode_unsigned(&circuit),
            Err(Error::Circuit(CircuitError::UnassignedOutput(_)))
        ));
    }
}
