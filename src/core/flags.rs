//! # Control Flags
//!
//! The nine control bits of the header. Eight of them share byte 13; the
//! `ns` bit lives alone in bit 0 of byte 12, under the data offset nibble.
//!
//! ```text
//! byte 12: [ data offset (4) | reserved (3) | NS ]
//! byte 13: [ CWR | ECE | URG | ACK | PSH | RST | SYN | FIN ]
//!            bit7                                      bit0
//! ```
//!
//! The bit positions are part of the wire format.

use serde::{Deserialize, Serialize};

const FIN: u8 = 0x01;
const SYN: u8 = 0x02;
const RST: u8 = 0x04;
const PSH: u8 = 0x08;
const ACK: u8 = 0x10;
const URG: u8 = 0x20;
const ECE: u8 = 0x40;
const CWR: u8 = 0x80;

/// Bit 0 of byte 12
const NS: u8 = 0x01;

/// Named control flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// ECN-nonce concealment protection
    pub ns: bool,
    /// Congestion window reduced
    pub cwr: bool,
    /// ECN echo
    pub ece: bool,
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl Flags {
    /// Unpack flags from header bytes 12 and 13.
    ///
    /// Only bit 0 of `offset_byte` is consulted; the data offset nibble and
    /// reserved bits are ignored.
    pub fn from_wire(offset_byte: u8, control_byte: u8) -> Self {
        Self {
            ns: offset_byte & NS != 0,
            cwr: control_byte & CWR != 0,
            ece: control_byte & ECE != 0,
            urg: control_byte & URG != 0,
            ack: control_byte & ACK != 0,
            psh: control_byte & PSH != 0,
            rst: control_byte & RST != 0,
            syn: control_byte & SYN != 0,
            fin: control_byte & FIN != 0,
        }
    }

    /// Pack every flag except `ns` into byte 13
    pub fn control_byte(&self) -> u8 {
        let mut byte = 0;
        for (set, bit) in [
            (self.fin, FIN),
            (self.syn, SYN),
            (self.rst, RST),
            (self.psh, PSH),
            (self.ack, ACK),
            (self.urg, URG),
            (self.ece, ECE),
            (self.cwr, CWR),
        ] {
            if set {
                byte |= bit;
            }
        }
        byte
    }

    /// The `ns` flag as it is OR'd into byte 12
    pub fn ns_bit(&self) -> u8 {
        if self.ns {
            NS
        } else {
            0
        }
    }

    /// True when no flag is set
    pub fn is_empty(&self) -> bool {
        !self.ns && self.control_byte() == 0
    }
}
