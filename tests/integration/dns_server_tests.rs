//! Captive DNS responder over loopback UDP.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use thermolight::adapters::dns_server::{CaptiveDnsServer, MAX_DATAGRAMS_PER_POLL};

const GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);

fn server() -> CaptiveDnsServer {
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
    CaptiveDnsServer::bind(addr, GATEWAY, 60).unwrap()
}

fn client() -> UdpSocket {
    let sock = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    sock
}

fn a_query(id: u16, name: &str) -> Vec<u8> {
    let mut p = id.to_be_bytes().to_vec();
    p.extend_from_slice(&[0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
    for label in name.split('.') {
        p.push(label.len() as u8);
        p.extend_from_slice(label.as_bytes());
    }
    p.extend_from_slice(&[0, 0, 1, 0, 1]);
    p
}

/// Poll until `want` queries have been answered or two seconds pass.
fn poll_until(dns: &mut CaptiveDnsServer, want: usize) -> usize {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut total = 0;
    while total < want && Instant::now() < deadline {
        total += dns.poll();
        std::thread::sleep(Duration::from_millis(1));
    }
    total
}

#[test]
fn answers_with_gateway() {
    let mut dns = server();
    let to = dns.local_addr().unwrap();
    let c = client();

    c.send_to(&a_query(0x1234, "captive.apple.com"), to).unwrap();
    assert_eq!(poll_until(&mut dns, 1), 1);

    let mut buf = [0u8; 512];
    let (n, _) = c.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[0..2], &[0x12, 0x34]);
    assert_eq!(buf[2] & 0x80, 0x80, "QR must be set");
    assert_eq!(&buf[n - 4..n], &GATEWAY.octets());
    assert_eq!(dns.stats(), (1, 0));
}

#[test]
fn malformed_datagrams_are_dropped() {
    let mut dns = server();
    let to = dns.local_addr().unwrap();
    let c = client();

    c.send_to(&[0xFF; 5], to).unwrap();
    c.send_to(&a_query(7, "example.com"), to).unwrap();
    assert_eq!(poll_until(&mut dns, 1), 1);

    let mut buf = [0u8; 512];
    let (_, _) = c.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[0..2], &[0, 7]);
    assert_eq!(dns.stats().1, 1);
}

#[test]
fn poll_is_bounded() {
    let mut dns = server();
    let to = dns.local_addr().unwrap();
    let c = client();

    let burst = MAX_DATAGRAMS_PER_POLL + 4;
    for i in 0..burst {
        c.send_to(&a_query(i as u16, "flood.test"), to).unwrap();
    }
    // Give loopback a moment to queue everything.
    std::thread::sleep(Duration::from_millis(50));

    let first = dns.poll();
    assert!(first <= MAX_DATAGRAMS_PER_POLL);
    assert_eq!(first + poll_until(&mut dns, burst - first), burst);
}

#[test]
fn idle_poll_returns_zero() {
    let mut dns = server();
    assert_eq!(dns.poll(), 0);
}
