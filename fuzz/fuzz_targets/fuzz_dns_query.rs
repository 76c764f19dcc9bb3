//! Fuzz target: `parse_query` + `build_response`
//!
//! Arbitrary datagrams go through the captive DNS codec. Neither half may
//! panic, and any response must echo the ID and fit the output buffer.
//!
//! cargo fuzz run fuzz_dns_query

#![no_main]

use core::net::Ipv4Addr;

use libfuzzer_sys::fuzz_target;
use thermolight::portal::dns::{build_response, parse_query, DnsError};

fuzz_target!(|data: &[u8]| {
    let Ok(query) = parse_query(data) else {
        return;
    };
    assert!(query.question_end <= data.len());
    assert!(query.name.len() <= 253);

    let mut out = [0u8; 512];
    match build_response(data, &query, Ipv4Addr::new(192, 168, 4, 1), 60, &mut out) {
        Ok(n) => {
            assert!(n <= out.len());
            assert_eq!(&out[0..2], &data[0..2], "ID must be echoed");
            assert_eq!(out[2] & 0x80, 0x80, "QR must be set");
        }
        Err(DnsError::BufferTooSmall) => assert!(query.question_end + 16 > out.len()),
        Err(e) => panic!("unexpected build error: {e}"),
    }
});
