mod registry;

use std::convert;
use std::fmt;

pub use self::registry::*;

/// True iff every bit of `bits` is set in `mask`.
///
/// Composite patterns such as `SMBUS_BYTE` only match when all of their
/// constituent bits are present.
pub fn has_all(mask: u32, bits: u32) -> bool {
    mask & bits == bits
}

/// Names of every registered pattern fully contained in `mask`, in registry
/// order.
pub fn decompose(mask: u32) -> Vec<&'static str> {
    REGISTRY
        .iter()
        .filter(|&&(pattern, _)| has_all(mask, pattern))
        .map(|&(_, name)| name)
        .collect()
}

/// Functionality mask reported by an adapter through `I2C_FUNCS`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Funcs(u32);

impl Funcs {
    pub const fn from_bits(bits: u32) -> Self {
        Funcs(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn has_all(self, bits: u32) -> bool {
        has_all(self.0, bits)
    }

    pub fn names(self) -> Vec<&'static str> {
        decompose(self.0)
    }

    /// Bits set in the mask that no registry entry accounts for.
    pub fn unrecognized(self) -> u32 {
        self.0 & !registry::known_bits()
    }
}

impl convert::From<u32> for Funcs {
    fn from(bits: u32) -> Self {
        Funcs(bits)
    }
}

impl fmt::Display for Funcs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for Funcs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Funcs({} {:?})", self, self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLES: &[u32] = &[
        I2C,
        TEN_BIT_ADDR,
        PROTOCOL_MANGLING,
        SMBUS_PEC,
        NOSTART,
        SLAVE,
        SMBUS_BLOCK_PROC_CALL,
        SMBUS_QUICK,
        SMBUS_READ_BYTE,
        SMBUS_WRITE_BYTE,
        SMBUS_READ_BYTE_DATA,
        SMBUS_WRITE_BYTE_DATA,
        SMBUS_READ_WORD_DATA,
        SMBUS_WRITE_WORD_DATA,
        SMBUS_PROC_CALL,
        SMBUS_READ_BLOCK_DATA,
        SMBUS_WRITE_BLOCK_DATA,
        SMBUS_READ_I2C_BLOCK,
        SMBUS_WRITE_I2C_BLOCK,
        SMBUS_HOST_NOTIFY,
    ];

    #[test]
    fn single_bit_decomposes_to_its_own_name() {
        for &bit in SINGLES {
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(decompose(bit), vec![name_of(bit).into_owned()]);
        }
    }

    #[test]
    fn composite_needs_every_constituent() {
        assert_eq!(decompose(SMBUS_READ_BYTE), vec!["Read byte"]);
        assert_eq!(decompose(SMBUS_WRITE_BYTE), vec!["Write byte"]);
        assert_eq!(
            decompose(SMBUS_READ_BYTE | SMBUS_WRITE_BYTE),
            vec!["Read byte", "Write byte", "Byte"]
        );

        assert!(!has_all(SMBUS_READ_I2C_BLOCK, SMBUS_I2C_BLOCK));
        assert!(has_all(SMBUS_I2C_BLOCK, SMBUS_I2C_BLOCK));
    }

    #[test]
    fn emulated_adapter_lists_in_registry_order() {
        let names = Funcs::from_bits(I2C | SMBUS_EMUL).names();
        assert_eq!(
            names,
            vec![
                "I2C",
                "SMBus PEC",
                "Quick",
                "Read byte",
                "Write byte",
                "Read byte data",
                "Write byte data",
                "Read word data",
                "Write word data",
                "Procedure call",
                "Write block data",
                "Read I2C block",
                "Write I2C block",
                "Byte",
                "Byte data",
                "Word data",
                "I2C block",
                "Emulated",
            ]
        );
    }

    #[test]
    fn unknown_bits_get_a_placeholder() {
        assert_eq!(name_of(0x2000_0000), "unknown flag bits: 0x20000000");
        assert_eq!(name_of(SMBUS_BYTE), "Byte");
        // a pattern that is a subset of a composite is still unknown
        assert_eq!(name_of(I2C | SLAVE), "unknown flag bits: 0x00000021");
    }

    #[test]
    fn unrecognized_bits_are_kept_apart() {
        let funcs = Funcs::from_bits(I2C | 0x2000_0000 | 0x0000_0100);
        assert_eq!(funcs.names(), vec!["I2C"]);
        assert_eq!(funcs.unrecognized(), 0x2000_0100);
        assert_eq!(Funcs::from_bits(SMBUS_EMUL).unrecognized(), 0);
    }

    #[test]
    fn renders_as_padded_hex() {
        assert_eq!(Funcs::from_bits(0x0006_0000).to_string(), "0x00060000");
        assert_eq!(Funcs::default().to_string(), "0x00000000");
        assert_eq!(
            format!("{:?}", Funcs::from(SMBUS_QUICK)),
            "Funcs(0x00010000 [\"Quick\"])"
        );
    }

    #[test]
    fn has_all_is_pure() {
        let mask = SMBUS_EMUL;
        let first = has_all(mask, SMBUS_WORD_DATA);
        assert_eq!(first, has_all(mask, SMBUS_WORD_DATA));
        assert!(first);
        assert!(has_all(mask, 0));
        assert!(!has_all(0, I2C));
    }
}
