use std::fmt;

use itertools::Itertools;

/// A 2-input boolean function stored as its 4-entry truth table.
///
/// Bit `i` of the code is the output for inputs encoded as `i = in0 | in1 << 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateFunction(u8);

impl GateFunction {
    pub const NOR: GateFunction = GateFunction(0b0001);
    /// A AND NOT B
    pub const NIMP: GateFunction = GateFunction(0b0010);
    /// NOT A AND B
    pub const NCIMP: GateFunction = GateFunction(0b0100);
    pub const XOR: GateFunction = GateFunction(0b0110);
    pub const NAND: GateFunction = GateFunction(0b0111);
    pub const AND: GateFunction = GateFunction(0b1000);
    pub const XNOR: GateFunction = GateFunction(0b1001);
    /// B implies A
    pub const CIMP: GateFunction = GateFunction(0b1011);
    /// A implies B
    pub const IMP: GateFunction = GateFunction(0b1101);
    pub const OR: GateFunction = GateFunction(0b1110);

    /// Returns `None` for codes that do not fit into four bits.
    pub const fn new(code: u8) -> Option<Self> {
        if code < 16 { Some(Self(code)) } else { None }
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// Constant functions (codes 0 and 15) ignore both inputs and are not
    /// accepted in netlists.
    pub const fn is_constant(self) -> bool {
        self.0 == 0 || self.0 == 15
    }

    #[inline]
    pub const fn eval(self, a: bool, b: bool) -> bool {
        let row = (a as u8) | ((b as u8) << 1);
        (self.0 >> row) & 1 == 1
    }

    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0b0001 => Some("NOR"),
            0b0010 => Some("NIMP"),
            0b0100 => Some("NCIMP"),
            0b0110 => Some("XOR"),
            0b0111 => Some("NAND"),
            0b1000 => Some("AND"),
            0b1001 => Some("XNOR"),
            0b1011 => Some("CIMP"),
            0b1101 => Some("IMP"),
            0b1110 => Some("OR"),
            _ => None,
        }
    }
}

impl fmt::Display for GateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "F{:04b}", self.0),
        }
    }
}

/// Number of registered gates per function code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateCount {
    counts: [u64; 16],
}

impl GateCount {
    #[inline]
    pub fn handle(&mut self, function: GateFunction) {
        self.counts[function.code() as usize] += 1;
    }

    pub fn get(&self, function: GateFunction) -> u64 {
        self.counts[function.code() as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Functions with at least one gate, in code order.
    pub fn iter(&self) -> impl Iterator<Item = (GateFunction, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count != 0)
            .map(|(code, count)| (GateFunction(code as u8), *count))
    }
}

impl fmt::Display for GateCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {} ({})",
            self.total(),
            self.iter()
                .format_with(", ", |(function, count), f| f(&format_args!(
                    "{function}: {count}"
                )))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_codes_match_their_functions() {
        let cases: [(GateFunction, fn(bool, bool) -> bool); 10] = [
            (GateFunction::NOR, |a, b| !(a || b)),
            (GateFunction::NIMP, |a, b| a && !b),
            (GateFunction::NCIMP, |a, b| !a && b),
            (GateFunction::XOR, |a, b| a ^ b),
            (GateFunction::NAND, |a, b| !(a && b)),
            (GateFunction::AND, |a, b| a && b),
            (GateFunction::XNOR, |a, b| !(a ^ b)),
            (GateFunction::CIMP, |a, b| a || !b),
            (GateFunction::IMP, |a, b| !a || b),
            (GateFunction::OR, |a, b| a || b),
        ];

        for (function, expected) in cases {
            for (a, b) in [(false, false), (true, false), (false, true), (true, true)] {
                assert_eq!(function.eval(a, b), expected(a, b), "{function}({a}, {b})");
            }
        }
    }

    #[test]
    fn code_range() {
        assert_eq!(GateFunction::new(15).map(GateFunction::code), Some(15));
        assert_eq!(GateFunction::new(16), None);
        assert!(GateFunction::new(0).unwrap().is_constant());
        assert!(!GateFunction::XOR.is_constant());
    }

    #[test]
    fn gate_count_display() {
        let mut count = GateCount::default();
        count.handle(GateFunction::AND);
        count.handle(GateFunction::AND);
        count.handle(GateFunction::XOR);

        assert_eq!(count.total(), 3);
        assert_eq!(count.get(GateFunction::AND), 2);
        assert_eq!(count.to_string(), "total 3 (XOR: 1, AND: 2)");
    }
}
