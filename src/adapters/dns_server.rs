//! Captive DNS responder.
//!
//! Non-blocking UDP socket polled from the main loop. Each [`poll`]
//! drains at most [`MAX_DATAGRAMS_PER_POLL`] pending queries so a flood
//! cannot starve the sampling branch.
//!
//! [`poll`]: CaptiveDnsServer::poll

use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use log::{debug, error, info, warn};

use crate::error::CommsError;
use crate::portal::dns::{build_response, parse_query};

pub const MAX_DATAGRAMS_PER_POLL: usize = 8;
/// Classic DNS-over-UDP payload limit.
const DNS_UDP_MAX: usize = 512;

pub struct CaptiveDnsServer {
    socket: UdpSocket,
    answer: Ipv4Addr,
    ttl_secs: u32,
    rx: [u8; DNS_UDP_MAX],
    tx: [u8; DNS_UDP_MAX],
    answered: u64,
    dropped: u64,
}

impl CaptiveDnsServer {
    /// Bind `addr` and answer every `A` query with `answer`.
    pub fn bind(addr: SocketAddr, answer: Ipv4Addr, ttl_secs: u32) -> Result<Self, CommsError> {
        let socket = UdpSocket::bind(addr).map_err(|e| {
            error!("DNS: bind {} failed: {}", addr, e);
            CommsError::DnsBindFailed
        })?;
        socket.set_nonblocking(true).map_err(|e| {
            error!("DNS: set_nonblocking failed: {}", e);
            CommsError::DnsSocketError
        })?;
        info!("DNS: answering on {} with {}", addr, answer);
        Ok(Self {
            socket,
            answer,
            ttl_secs,
            rx: [0; DNS_UDP_MAX],
            tx: [0; DNS_UDP_MAX],
            answered: 0,
            dropped: 0,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, CommsError> {
        self.socket.local_addr().map_err(|_| CommsError::DnsSocketError)
    }

    /// Handle pending queries. Returns how many were answered.
    pub fn poll(&mut self) -> usize {
        let mut answered = 0;
        for _ in 0..MAX_DATAGRAMS_PER_POLL {
            let (len, peer) = match self.socket.recv_from(&mut self.rx) {
                Ok(r) => r,
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("DNS: recv failed: {}", e);
                    break;
                }
            };
            if self.handle(len, peer) {
                answered += 1;
            }
        }
        answered
    }

    fn handle(&mut self, len: usize, peer: SocketAddr) -> bool {
        let packet = &self.rx[..len];
        let query = match parse_query(packet) {
            Ok(q) => q,
            Err(e) => {
                debug!("DNS: dropped {} bytes from {}: {}", len, peer, e);
                self.dropped += 1;
                return false;
            }
        };
        let n = match build_response(packet, &query, self.answer, self.ttl_secs, &mut self.tx) {
            Ok(n) => n,
            Err(e) => {
                debug!("DNS: no response for '{}': {}", query.name, e);
                self.dropped += 1;
                return false;
            }
        };
        match self.socket.send_to(&self.tx[..n], peer) {
            Ok(_) => {
                debug!("DNS: {} (type {}) -> {}", query.name, query.qtype, self.answer);
                self.answered += 1;
                true
            }
            Err(e) => {
                debug!("DNS: send to {} failed: {}", peer, e);
                self.dropped += 1;
                false
            }
        }
    }

    /// `(answered, dropped)` since bind.
    pub fn stats(&self) -> (u64, u64) {
        (self.answered, self.dropped)
    }
}
