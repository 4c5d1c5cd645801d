use sha2::{Digest, Sha256};
use std::net::IpAddr;

// One-way hash of an identifying string (sha256, lowercase hex)
pub fn fingerprint(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

// Fingerprint of a caller address.
// Mapped v4 addresses (::ffff:a.b.c.d) hash the same as plain a.b.c.d
pub fn fingerprint_addr(addr: IpAddr) -> String {
    fingerprint(&addr.to_canonical().to_string())
}
