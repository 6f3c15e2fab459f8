use rand::RngCore;

/// Hex-encodes `n_bytes` bytes from the thread-local CSPRNG, giving `2 * n_bytes` characters.
#[must_use]
pub fn random_hex(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
