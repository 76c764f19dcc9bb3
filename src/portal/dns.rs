//! Captive-portal DNS codec.
//!
//! Every standard `A` query is answered with the gateway address, whatever
//! the name. Parsing is strict about the header and the first question and
//! ignores everything after it (additional questions, EDNS records).
//!
//! ## Response layout
//!
//! ```text
//! ┌────────────┬──────────────────────┬──────────────────────────────┐
//! │ header 12B │ question (echoed)    │ answer 16B (A / ANY only)    │
//! │ ID echoed  │ QNAME QTYPE QCLASS   │ C00C 0001 0001 TTL 0004 ADDR │
//! └────────────┴──────────────────────┴──────────────────────────────┘
//! ```

use core::fmt;
use core::net::Ipv4Addr;

pub const HEADER_LEN: usize = 12;
/// Size of the one answer record we ever emit.
pub const ANSWER_LEN: usize = 16;
/// Largest name on the wire, including length octets and the root label.
pub const MAX_NAME_WIRE_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 63;

pub const QTYPE_A: u16 = 1;
pub const QTYPE_ANY: u16 = 255;
pub const QCLASS_IN: u16 = 1;
pub const QCLASS_ANY: u16 = 255;

const FLAG_QR: u16 = 0x8000;
const FLAG_AA: u16 = 0x0400;
const FLAG_RD: u16 = 0x0100;
const FLAG_RA: u16 = 0x0080;
const OPCODE_MASK: u16 = 0x7800;

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsError {
    /// Packet ends before the header or question does.
    Truncated,
    /// QR bit set: this is a response, not a query.
    NotAQuery,
    /// Opcode other than standard query.
    UnsupportedOpcode(u8),
    /// QDCOUNT is zero.
    NoQuestion,
    /// Compression pointer or over-long label in the question name.
    BadLabel,
    NameTooLong,
    /// Output buffer cannot hold the response.
    BufferTooSmall,
}

impl fmt::Display for DnsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "packet truncated"),
            Self::NotAQuery => write!(f, "not a query (QR set)"),
            Self::UnsupportedOpcode(op) => write!(f, "unsupported opcode {}", op),
            Self::NoQuestion => write!(f, "no question"),
            Self::BadLabel => write!(f, "bad label in question name"),
            Self::NameTooLong => write!(f, "question name exceeds {} bytes", MAX_NAME_WIRE_LEN),
            Self::BufferTooSmall => write!(f, "response buffer too small"),
        }
    }
}

impl std::error::Error for DnsError {}

// ───────────────────────────────────────────────────────────────
// Query
// ───────────────────────────────────────────────────────────────

/// The parts of a query the responder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub id: u16,
    pub flags: u16,
    pub qtype: u16,
    pub qclass: u16,
    /// Offset one past the first question's QCLASS.
    pub question_end: usize,
    /// Dotted name, lower case preserved as sent. Empty for the root.
    pub name: heapless::String<253>,
}

impl DnsQuery {
    /// Whether the responder should attach an A record.
    pub fn wants_address(&self) -> bool {
        matches!(self.qtype, QTYPE_A | QTYPE_ANY) && matches!(self.qclass, QCLASS_IN | QCLASS_ANY)
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }
}

fn be16(packet: &[u8], at: usize) -> Result<u16, DnsError> {
    match packet.get(at..at + 2) {
        Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
        None => Err(DnsError::Truncated),
    }
}

/// Parse the header and first question of a DNS query.
pub fn parse_query(packet: &[u8]) -> Result<DnsQuery, DnsError> {
    if packet.len() < HEADER_LEN {
        return Err(DnsError::Truncated);
    }
    let id = be16(packet, 0)?;
    let flags = be16(packet, 2)?;
    if flags & FLAG_QR != 0 {
        return Err(DnsError::NotAQuery);
    }
    let opcode = ((flags & OPCODE_MASK) >> 11) as u8;
    if opcode != 0 {
        return Err(DnsError::UnsupportedOpcode(opcode));
    }
    if be16(packet, 4)? == 0 {
        return Err(DnsError::NoQuestion);
    }

    let mut name = heapless::String::<253>::new();
    let mut pos = HEADER_LEN;
    loop {
        let len = usize::from(*packet.get(pos).ok_or(DnsError::Truncated)?);
        pos += 1;
        if len == 0 {
            break;
        }
        if len > MAX_LABEL_LEN {
            // Covers both compression pointers (0xC0) and reserved 0x40/0x80 types.
            return Err(DnsError::BadLabel);
        }
        if pos - HEADER_LEN + len >= MAX_NAME_WIRE_LEN {
            return Err(DnsError::NameTooLong);
        }
        let label = packet.get(pos..pos + len).ok_or(DnsError::Truncated)?;
        if !name.is_empty() {
            name.push('.').map_err(|_| DnsError::NameTooLong)?;
        }
        for &b in label {
            // Non-printable octets are kept visible rather than rejected.
            let c = if b.is_ascii_graphic() { char::from(b) } else { '?' };
            name.push(c).map_err(|_| DnsError::NameTooLong)?;
        }
        pos += len;
    }

    let qtype = be16(packet, pos)?;
    let qclass = be16(packet, pos + 2)?;

    Ok(DnsQuery {
        id,
        flags,
        qtype,
        qclass,
        question_end: pos + 4,
        name,
    })
}

// ───────────────────────────────────────────────────────────────
// Response
// ───────────────────────────────────────────────────────────────

/// Write the response to `query` into `out`, returning its length.
///
/// `packet` must be the datagram `query` was parsed from.
pub fn build_response(
    packet: &[u8],
    query: &DnsQuery,
    answer: Ipv4Addr,
    ttl_secs: u32,
    out: &mut [u8],
) -> Result<usize, DnsError> {
    let question = packet.get(..query.question_end).ok_or(DnsError::Truncated)?;
    let with_answer = query.wants_address();
    let total = question.len() + if with_answer { ANSWER_LEN } else { 0 };
    if out.len() < total {
        return Err(DnsError::BufferTooSmall);
    }

    out[..question.len()].copy_from_slice(question);

    let flags = FLAG_QR | FLAG_AA | (query.flags & FLAG_RD) | FLAG_RA;
    out[2..4].copy_from_slice(&flags.to_be_bytes());
    out[4..6].copy_from_slice(&1u16.to_be_bytes()); // QDCOUNT
    out[6..8].copy_from_slice(&u16::from(with_answer).to_be_bytes()); // ANCOUNT
    out[8..12].fill(0); // NSCOUNT, ARCOUNT

    if with_answer {
        let rr = &mut out[question.len()..total];
        rr[0..2].copy_from_slice(&0xC00Cu16.to_be_bytes());
        rr[2..4].copy_from_slice(&QTYPE_A.to_be_bytes());
        rr[4..6].copy_from_slice(&QCLASS_IN.to_be_bytes());
        rr[6..10].copy_from_slice(&ttl_secs.to_be_bytes());
        rr[10..12].copy_from_slice(&4u16.to_be_bytes());
        rr[12..16].copy_from_slice(&answer.octets());
    }

    Ok(total)
}
